//! Pipeline conversions module
//!
//! This module contains orchestration logic that connects the frame processor to file sinks.

mod frame_to_tiff;


pub use frame_to_tiff::{FrameToTiffPipeline, OutputFormat, OutputOptions};
