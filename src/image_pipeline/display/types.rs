//! Display frame types

use crate::image_pipeline::common::error::{FrameError, Result, try_alloc_zeroed};
use crate::image_pipeline::frame::luma_len;

/// Interleaved RGBA8: R, G, B, A
pub const BYTES_PER_PIXEL: usize = 4;

/// Alpha written for every output pixel
pub const OPAQUE: u8 = 255;

/// Byte length of a `width x height` display frame.
pub fn display_len(width: usize, height: usize) -> Result<usize> {
    luma_len(width, height)?
        .checked_mul(BYTES_PER_PIXEL)
        .ok_or(FrameError::InvalidDimensions(width, height))
}

/// Row-major RGBA8 frame ready for texture upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayFrame {
    /// Width of the frame in pixels
    pub width: usize,
    /// Height of the frame in pixels
    pub height: usize,
    /// Pixel data interleaved [R, G, B, A, R, G, B, A, ...]
    pub data: Vec<u8>,
}

impl DisplayFrame {
    /// Allocates a zeroed frame, failing gracefully when memory is short.
    pub fn zeroed(width: usize, height: usize) -> Result<Self> {
        Ok(Self {
            width,
            height,
            data: try_alloc_zeroed(display_len(width, height)?)?,
        })
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * BYTES_PER_PIXEL;
        self.data
            .get(i..i + BYTES_PER_PIXEL)
            .map(|p| [p[0], p[1], p[2], p[3]])
    }

    /// Bytes between the starts of consecutive rows.
    pub fn stride(&self) -> usize {
        self.width * BYTES_PER_PIXEL
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}
