//! Edge detection parameter and result types

use crate::image_pipeline::common::error::{FrameError, Result};

pub const DEFAULT_LOW_THRESHOLD: f32 = 50.0;
pub const DEFAULT_HIGH_THRESHOLD: f32 = 150.0;

/// Mask value for an edge pixel
pub const EDGE: u8 = 255;
/// Mask value for a non-edge pixel
pub const NO_EDGE: u8 = 0;

/// Hysteresis thresholds on gradient magnitude.
///
/// Magnitudes at or above `high` seed edges; magnitudes in `[low, high)` are kept
/// only when 8-connected to a seed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeThresholds {
    pub low: f32,
    pub high: f32,
}

impl Default for EdgeThresholds {
    fn default() -> Self {
        Self {
            low: DEFAULT_LOW_THRESHOLD,
            high: DEFAULT_HIGH_THRESHOLD,
        }
    }
}

impl EdgeThresholds {
    pub fn new(low: f32, high: f32) -> Result<Self> {
        let thresholds = Self { low, high };
        thresholds.validate()?;
        Ok(thresholds)
    }

    pub fn validate(&self) -> Result<()> {
        let finite = self.low.is_finite() && self.high.is_finite();
        if !finite || self.low < 0.0 || self.low > self.high {
            return Err(FrameError::InvalidThresholds {
                low: self.low,
                high: self.high,
            });
        }
        Ok(())
    }
}

/// How `gx` and `gy` are combined into one magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GradientNorm {
    /// `|gx| + |gy|`, cheaper and the usual choice for camera preview
    #[default]
    L1,
    /// `sqrt(gx^2 + gy^2)`
    L2,
}

impl GradientNorm {
    #[inline]
    pub fn magnitude(self, gx: i32, gy: i32) -> f32 {
        match self {
            GradientNorm::L1 => (gx.abs() + gy.abs()) as f32,
            GradientNorm::L2 => ((gx * gx + gy * gy) as f32).sqrt(),
        }
    }
}

/// Everything an edge detector needs besides the image itself.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeParams {
    pub thresholds: EdgeThresholds,
    pub norm: GradientNorm,
    /// Split per-row work across the rayon pool. Output is identical either way.
    pub parallel: bool,
}

/// Binary edge map, one byte per pixel: [`EDGE`] or [`NO_EDGE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeMask {
    /// Width of the mask in pixels
    pub width: usize,
    /// Height of the mask in pixels
    pub height: usize,
    /// Row-major mask values
    pub data: Vec<u8>,
}

impl EdgeMask {
    pub fn is_edge(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.data[y * self.width + x] == EDGE
    }

    pub fn edge_count(&self) -> usize {
        self.data.iter().filter(|&&v| v == EDGE).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_thresholds_are_50_150() {
        let t = EdgeThresholds::default();
        assert_eq!((t.low, t.high), (50.0, 150.0));
        assert!(t.validate().is_ok());
    }

    #[test]
    fn rejects_inverted_negative_and_nan_thresholds() {
        assert!(EdgeThresholds::new(150.0, 50.0).is_err());
        assert!(EdgeThresholds::new(-1.0, 50.0).is_err());
        assert!(EdgeThresholds::new(f32::NAN, 50.0).is_err());
        assert!(EdgeThresholds::new(10.0, f32::INFINITY).is_err());
        assert!(EdgeThresholds::new(80.0, 80.0).is_ok());
    }

    #[test]
    fn norms() {
        assert_eq!(GradientNorm::L1.magnitude(3, -4), 7.0);
        assert_eq!(GradientNorm::L2.magnitude(3, -4), 5.0);
    }
}
