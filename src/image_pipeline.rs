//! Camera frame edge pipeline
//!
//! Converts planar 4:2:0 camera frames into RGBA edge images in three stages:
//! luma extraction, Canny-style edge detection, and display expansion. The
//! `tiff` and `conversions` modules add file sinks for offline use.

pub mod common;
pub mod conversions;
pub mod display;
pub mod edge;
pub mod frame;
pub mod processor;
pub mod tiff;

pub use common::{FrameError, PipelineTimings, Result};

pub use frame::{GrayscaleFrame, Plane, RawFrame, YuvLayout, extract_luma, pack_nv21, pack_yuv420};

pub use edge::{
    CannyDetector, EdgeDetector, EdgeMask, EdgeParams, EdgeThresholds, GradientNorm, detect_edges,
};

pub use display::{DisplayFrame, DisplayFramePool, expand_to_rgba};

pub use processor::{
    FrameProcessor, FrameStats, ProcessedFrame, ProcessorConfig, ProcessorConfigBuilder, process,
};

pub use tiff::{StandardTiffWriter, TiffCompression, TiffOptions, TiffWriter};

pub use conversions::{FrameToTiffPipeline, OutputFormat, OutputOptions};
