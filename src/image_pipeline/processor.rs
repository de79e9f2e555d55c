//! Frame processor module
//!
//! Orchestrates the per-frame pipeline: luma extraction, edge detection and
//! display conversion.

mod config;
mod frame_processor;


pub use config::{ProcessorConfig, ProcessorConfigBuilder};
pub use frame_processor::{FrameProcessor, FrameStats, ProcessedFrame, process};
