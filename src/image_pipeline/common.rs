//! Common utilities module
//!
//! This module contains the error type and timing helpers shared across the pipeline stages.

pub mod error;
pub mod timing;

pub use error::{FrameError, Result};
pub use timing::{PipelineTimings, StepTiming};
