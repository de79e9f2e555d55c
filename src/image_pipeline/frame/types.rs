//! Frame buffer types for the input side of the pipeline

use crate::image_pipeline::common::error::{FrameError, Result};

/// Byte order of a planar 4:2:0 frame.
///
/// Every supported layout stores the full-resolution luma plane first; they differ
/// only in how the quarter-resolution chroma samples follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YuvLayout {
    /// Luma plane, then interleaved V/U pairs (Android camera default)
    #[default]
    Nv21,
    /// Luma plane, then interleaved U/V pairs
    Nv12,
    /// Luma plane, then the full U plane, then the full V plane
    I420,
    /// Luma plane, then the full V plane, then the full U plane
    Yv12,
}

impl YuvLayout {
    pub fn name(self) -> &'static str {
        match self {
            YuvLayout::Nv21 => "nv21",
            YuvLayout::Nv12 => "nv12",
            YuvLayout::I420 => "i420",
            YuvLayout::Yv12 => "yv12",
        }
    }

    /// Whether chroma is stored as interleaved pairs rather than separate planes.
    pub fn is_semi_planar(self) -> bool {
        matches!(self, YuvLayout::Nv21 | YuvLayout::Nv12)
    }

    /// Whether V precedes U in the chroma section.
    pub fn v_first(self) -> bool {
        matches!(self, YuvLayout::Nv21 | YuvLayout::Yv12)
    }
}

/// Number of luma bytes in a `width x height` frame.
pub fn luma_len(width: usize, height: usize) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(FrameError::InvalidDimensions(width, height));
    }
    width
        .checked_mul(height)
        .ok_or(FrameError::InvalidDimensions(width, height))
}

/// Nominal size of a 4:2:0 frame, `width * height * 3 / 2`.
pub fn frame_len(width: usize, height: usize) -> Result<usize> {
    let luma = luma_len(width, height)?;
    luma.checked_mul(3)
        .map(|n| n / 2)
        .ok_or(FrameError::InvalidDimensions(width, height))
}

/// Size of a 4:2:0 frame whose chroma planes round up for odd dimensions, the
/// way sensors and [`pack_yuv420`](super::pack_yuv420) emit them.
///
/// Equals [`frame_len`] for even dimensions.
pub fn yuv420_len(width: usize, height: usize) -> Result<usize> {
    let luma = luma_len(width, height)?;
    let chroma = width
        .div_ceil(2)
        .checked_mul(height.div_ceil(2))
        .and_then(|quarter| quarter.checked_mul(2))
        .ok_or(FrameError::InvalidDimensions(width, height))?;
    luma.checked_add(chroma)
        .ok_or(FrameError::InvalidDimensions(width, height))
}

/// A borrowed camera frame.
///
/// The pipeline only ever reads through this borrow, so it cannot keep the
/// caller's buffer alive past the call that received it.
#[derive(Debug, Clone, Copy)]
pub struct RawFrame<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    layout: YuvLayout,
}

impl<'a> RawFrame<'a> {
    /// Wraps an NV21 buffer. Sizes are checked when the frame is processed.
    pub fn new(data: &'a [u8], width: usize, height: usize) -> Self {
        Self::with_layout(data, width, height, YuvLayout::Nv21)
    }

    pub fn with_layout(data: &'a [u8], width: usize, height: usize, layout: YuvLayout) -> Self {
        Self {
            data,
            width,
            height,
            layout,
        }
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn layout(&self) -> YuvLayout {
        self.layout
    }

    pub fn expected_len(&self) -> Result<usize> {
        frame_len(self.width, self.height)
    }

    /// Checks the buffer length against the declared dimensions.
    ///
    /// In strict mode the buffer must be exactly one encoded frame: the nominal
    /// `width * height * 3 / 2` bytes, or the rounded-up [`yuv420_len`] when a
    /// dimension is odd. Otherwise only the luma plane has to be present, which
    /// admits row-padded sensor buffers.
    pub fn validate(&self, strict: bool) -> Result<()> {
        let len = self.data.len();
        let (expected, size_ok) = if strict {
            let expected = self.expected_len()?;
            (expected, len == expected || len == yuv420_len(self.width, self.height)?)
        } else {
            let expected = luma_len(self.width, self.height)?;
            (expected, len >= expected)
        };

        if !size_ok {
            return Err(FrameError::InvalidFrameSize {
                expected,
                actual: len,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// The first `height` rows of `width` bytes.
    pub fn luma_plane(&self) -> Result<&'a [u8]> {
        let len = luma_len(self.width, self.height)?;
        self.data
            .get(..len)
            .ok_or(FrameError::InvalidFrameSize {
                expected: len,
                actual: self.data.len(),
                width: self.width,
                height: self.height,
            })
    }
}

/// Single-channel 8-bit intensity image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayscaleFrame {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Row-major luma samples, one byte per pixel
    pub data: Vec<u8>,
}

impl GrayscaleFrame {
    /// Builds a frame from owned samples, checking the length.
    pub fn from_vec(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        let expected = luma_len(width, height)?;
        if data.len() != expected {
            return Err(FrameError::InvalidFrameSize {
                expected,
                actual: data.len(),
                width,
                height,
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }
}
