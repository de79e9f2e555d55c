use tracing::{debug, instrument, warn};

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::common::timing::PipelineTimings;
use crate::image_pipeline::display::{DisplayFrame, expand_into, expand_to_rgba};
use crate::image_pipeline::edge::{CannyDetector, EdgeDetector, EdgeMask};
use crate::image_pipeline::frame::{RawFrame, extract_luma};
use crate::image_pipeline::processor::config::ProcessorConfig;

/// Summary of one processed frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    pub width: usize,
    pub height: usize,
    pub edge_pixels: usize,
}

impl FrameStats {
    pub fn edge_ratio(&self) -> f64 {
        let total = self.width * self.height;
        if total == 0 {
            0.0
        } else {
            self.edge_pixels as f64 / total as f64
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProcessedFrame {
    pub frame: DisplayFrame,
    pub timings: PipelineTimings,
    pub stats: FrameStats,
}

/// Runs the luma → edges → RGBA pipeline over camera frames.
///
/// Holds no per-frame state; one instance can serve concurrent callers as long as
/// each call gets its own input and output buffers.
pub struct FrameProcessor<D: EdgeDetector = CannyDetector> {
    detector: D,
    config: ProcessorConfig,
}

impl Default for FrameProcessor<CannyDetector> {
    fn default() -> Self {
        Self {
            detector: CannyDetector,
            config: ProcessorConfig::default(),
        }
    }
}

impl FrameProcessor<CannyDetector> {
    pub fn new(config: ProcessorConfig) -> Result<Self> {
        Self::with_detector(CannyDetector, config)
    }
}

impl<D: EdgeDetector> FrameProcessor<D> {
    pub fn with_detector(detector: D, config: ProcessorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { detector, config })
    }

    /// Wraps caller-owned bytes using the configured layout.
    pub fn frame<'a>(&self, data: &'a [u8], width: usize, height: usize) -> RawFrame<'a> {
        RawFrame::with_layout(data, width, height, self.config.layout)
    }

    /// Processes one frame handed over as raw bytes plus dimensions.
    pub fn process(&self, data: &[u8], width: usize, height: usize) -> Result<DisplayFrame> {
        self.process_frame(&self.frame(data, width, height))
    }

    #[instrument(skip(self, raw), fields(width = raw.width(), height = raw.height(), input_size = raw.data().len()))]
    pub fn process_frame(&self, raw: &RawFrame<'_>) -> Result<DisplayFrame> {
        let mask = self.detect(raw)?;

        let frame = {
            let _span = tracing::info_span!("display").entered();
            expand_to_rgba(&mask, self.config.parallel)?
        };

        debug!(edges = mask.edge_count(), "Frame processed");
        Ok(frame)
    }

    /// Same as [`process_frame`](Self::process_frame), writing into a
    /// caller-provided frame instead of allocating one.
    #[instrument(skip(self, raw, out), fields(width = raw.width(), height = raw.height()))]
    pub fn process_into(&self, raw: &RawFrame<'_>, out: &mut DisplayFrame) -> Result<()> {
        let mask = self.detect(raw)?;
        let _span = tracing::info_span!("display").entered();
        expand_into(&mask, out, self.config.parallel)
    }

    /// Runs the luma and edge stages only.
    pub fn detect(&self, raw: &RawFrame<'_>) -> Result<EdgeMask> {
        self.check_frame(raw)?;

        let gray = {
            let _span = tracing::info_span!("luma").entered();
            extract_luma(raw)?
        };

        let _span = tracing::info_span!("edges").entered();
        self.detector.detect(&gray, &self.config.edge_params())
    }

    /// Processes a frame and records how long each stage took.
    #[instrument(skip(self, raw), fields(width = raw.width(), height = raw.height()))]
    pub fn process_with_timings(&self, raw: &RawFrame<'_>) -> Result<ProcessedFrame> {
        let mut timings = PipelineTimings::new();

        timings.measure("validate", || self.check_frame(raw))?;
        let gray = timings.measure("luma", || extract_luma(raw))?;
        let mask = timings.measure("edges", || {
            self.detector.detect(&gray, &self.config.edge_params())
        })?;
        let frame = timings.measure("display", || expand_to_rgba(&mask, self.config.parallel))?;

        let stats = FrameStats {
            width: raw.width(),
            height: raw.height(),
            edge_pixels: mask.edge_count(),
        };
        Ok(ProcessedFrame {
            frame,
            timings,
            stats,
        })
    }

    fn check_frame(&self, raw: &RawFrame<'_>) -> Result<()> {
        raw.validate(self.config.validate_frame_size).inspect_err(|e| {
            warn!("Rejecting {} frame: {}", raw.layout().name(), e);
        })
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ProcessorConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }
}

/// Processes an NV21 frame with the default 50/150 thresholds and returns the
/// RGBA bytes, ready for texture upload.
pub fn process(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>> {
    FrameProcessor::<CannyDetector>::default()
        .process(data, width, height)
        .map(DisplayFrame::into_bytes)
}
