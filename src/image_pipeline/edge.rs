//! Edge detection module
//!
//! Turns a grayscale frame into a binary edge mask.

mod canny;
mod detector;
mod sobel;
pub mod types;

#[cfg(test)]
mod tests;

pub use canny::{CannyDetector, detect_edges};
pub use detector::EdgeDetector;
pub use sobel::{Gradients, sobel_gradients};
pub use types::{
    DEFAULT_HIGH_THRESHOLD, DEFAULT_LOW_THRESHOLD, EDGE, EdgeMask, EdgeParams, EdgeThresholds,
    GradientNorm, NO_EDGE,
};
