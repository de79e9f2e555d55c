//! Display conversion module
//!
//! Expands edge masks into RGBA frames and manages reusable output buffers.

mod pool;
mod rgba;
pub mod types;

pub use pool::{DEFAULT_FRAMES_PER_SIZE, DisplayFramePool};
pub use rgba::{expand_into, expand_to_rgba};
pub use types::{BYTES_PER_PIXEL, DisplayFrame, OPAQUE, display_len};
