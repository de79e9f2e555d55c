//! Input frame module
//!
//! Borrowed 4:2:0 camera frames, luma extraction, and packing of strided capture
//! planes into a contiguous frame.

mod luma;
mod packing;
pub mod types;

pub use luma::extract_luma;
pub use packing::{Plane, pack_nv21, pack_yuv420};
pub use types::{GrayscaleFrame, RawFrame, YuvLayout, frame_len, luma_len, yuv420_len};
