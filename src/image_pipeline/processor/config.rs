//! Frame processor configuration types

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::edge::{EdgeParams, EdgeThresholds, GradientNorm};
use crate::image_pipeline::frame::YuvLayout;

/// Configuration for the camera-frame edge pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessorConfig {
    /// Hysteresis thresholds for the edge detector
    pub thresholds: EdgeThresholds,
    /// Gradient magnitude norm
    pub norm: GradientNorm,
    /// Chroma ordering of incoming frames
    pub layout: YuvLayout,
    /// Require the input to be exactly one encoded frame. When false, any buffer
    /// holding at least the luma plane is accepted.
    pub validate_frame_size: bool,
    /// Spread per-row work over the rayon thread pool
    pub parallel: bool,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            thresholds: EdgeThresholds::default(),
            norm: GradientNorm::L1,
            layout: YuvLayout::Nv21,
            validate_frame_size: true,
            parallel: true,
        }
    }
}

impl ProcessorConfig {
    pub fn builder() -> ProcessorConfigBuilder {
        ProcessorConfigBuilder::default()
    }

    pub fn edge_params(&self) -> EdgeParams {
        EdgeParams {
            thresholds: self.thresholds,
            norm: self.norm,
            parallel: self.parallel,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.thresholds.validate()
    }
}

/// Builder for ProcessorConfig
#[derive(Default)]
pub struct ProcessorConfigBuilder {
    thresholds: Option<EdgeThresholds>,
    norm: Option<GradientNorm>,
    layout: Option<YuvLayout>,
    validate_frame_size: Option<bool>,
    parallel: Option<bool>,
}

impl ProcessorConfigBuilder {
    pub fn thresholds(mut self, low: f32, high: f32) -> Self {
        self.thresholds = Some(EdgeThresholds { low, high });
        self
    }

    pub fn norm(mut self, norm: GradientNorm) -> Self {
        self.norm = Some(norm);
        self
    }

    pub fn layout(mut self, layout: YuvLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn validate_frame_size(mut self, validate: bool) -> Self {
        self.validate_frame_size = Some(validate);
        self
    }

    pub fn parallel(mut self, enable: bool) -> Self {
        self.parallel = Some(enable);
        self
    }

    pub fn build(self) -> ProcessorConfig {
        let default = ProcessorConfig::default();
        ProcessorConfig {
            thresholds: self.thresholds.unwrap_or(default.thresholds),
            norm: self.norm.unwrap_or(default.norm),
            layout: self.layout.unwrap_or(default.layout),
            validate_frame_size: self.validate_frame_size.unwrap_or(default.validate_frame_size),
            parallel: self.parallel.unwrap_or(default.parallel),
        }
    }
}
