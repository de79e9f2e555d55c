//! Packing of strided capture planes into contiguous 4:2:0 frames.
//!
//! Mobile capture APIs hand out three planes with independent row and pixel
//! strides (semi-planar chroma shows up as `pixel_stride == 2`). The pipeline
//! wants one contiguous buffer, so this module gathers the samples into the
//! requested [`YuvLayout`].

use tracing::debug;

use crate::image_pipeline::common::error::{FrameError, Result, try_alloc_zeroed};
use crate::image_pipeline::frame::types::{YuvLayout, luma_len, yuv420_len};

/// One strided image plane as delivered by a capture layer.
#[derive(Debug, Clone, Copy)]
pub struct Plane<'a> {
    pub data: &'a [u8],
    /// Bytes between the starts of consecutive rows
    pub row_stride: usize,
    /// Bytes between consecutive samples in a row
    pub pixel_stride: usize,
}

impl<'a> Plane<'a> {
    /// A tightly packed plane: one byte per sample, no row padding.
    pub fn packed(data: &'a [u8], width: usize) -> Self {
        Self {
            data,
            row_stride: width,
            pixel_stride: 1,
        }
    }

    fn sample(&self, x: usize, y: usize) -> Result<u8> {
        let index = y * self.row_stride + x * self.pixel_stride;
        self.data
            .get(index)
            .copied()
            .ok_or(FrameError::BufferSizeMismatch {
                expected: index + 1,
                actual: self.data.len(),
            })
    }
}

/// Gathers Y, U and V planes into one contiguous frame in `layout` order.
pub fn pack_yuv420(
    y: Plane<'_>,
    u: Plane<'_>,
    v: Plane<'_>,
    width: usize,
    height: usize,
    layout: YuvLayout,
) -> Result<Vec<u8>> {
    let luma = luma_len(width, height)?;
    let mut out = try_alloc_zeroed(yuv420_len(width, height)?)?;

    debug!(
        "Packing {}x{} planes into {} (y stride {}, chroma stride {}/{})",
        width,
        height,
        layout.name(),
        y.row_stride,
        u.row_stride,
        u.pixel_stride
    );

    for row in 0..height {
        let start = row * y.row_stride;
        let src = y
            .data
            .get(start..start + width)
            .ok_or(FrameError::BufferSizeMismatch {
                expected: start + width,
                actual: y.data.len(),
            })?;
        out[row * width..(row + 1) * width].copy_from_slice(src);
    }

    let chroma_w = width.div_ceil(2);
    let chroma_h = height.div_ceil(2);
    let quarter = chroma_w * chroma_h;
    let (first, second) = if layout.v_first() { (v, u) } else { (u, v) };
    let chroma = &mut out[luma..];

    for row in 0..chroma_h {
        for col in 0..chroma_w {
            let a = first.sample(col, row)?;
            let b = second.sample(col, row)?;
            let i = row * chroma_w + col;
            if layout.is_semi_planar() {
                chroma[2 * i] = a;
                chroma[2 * i + 1] = b;
            } else {
                chroma[i] = a;
                chroma[quarter + i] = b;
            }
        }
    }

    Ok(out)
}

/// Packs planes into NV21, the layout Android camera frames are usually handed over in.
pub fn pack_nv21(
    y: Plane<'_>,
    u: Plane<'_>,
    v: Plane<'_>,
    width: usize,
    height: usize,
) -> Result<Vec<u8>> {
    pack_yuv420(y, u, v, width, height, YuvLayout::Nv21)
}
