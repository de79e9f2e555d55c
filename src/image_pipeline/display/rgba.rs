use rayon::prelude::*;
use tracing::debug;

use crate::image_pipeline::common::error::{FrameError, Result};
use crate::image_pipeline::display::types::{BYTES_PER_PIXEL, DisplayFrame, OPAQUE};
use crate::image_pipeline::edge::EdgeMask;

/// Expands a mask into a freshly allocated RGBA frame.
pub fn expand_to_rgba(mask: &EdgeMask, parallel: bool) -> Result<DisplayFrame> {
    let mut frame = DisplayFrame::zeroed(mask.width, mask.height)?;
    expand_into(mask, &mut frame, parallel)?;
    Ok(frame)
}

/// Writes `[v, v, v, 255]` for each mask value `v` into an existing frame.
pub fn expand_into(mask: &EdgeMask, frame: &mut DisplayFrame, parallel: bool) -> Result<()> {
    let expected = mask.data.len() * BYTES_PER_PIXEL;
    if frame.width != mask.width || frame.height != mask.height || frame.data.len() != expected {
        return Err(FrameError::BufferSizeMismatch {
            expected,
            actual: frame.data.len(),
        });
    }

    debug!("Expanding {}x{} mask to RGBA", mask.width, mask.height);

    let write = |(px, &v): (&mut [u8], &u8)| {
        px[0] = v;
        px[1] = v;
        px[2] = v;
        px[3] = OPAQUE;
    };

    if parallel {
        frame
            .data
            .par_chunks_exact_mut(BYTES_PER_PIXEL)
            .zip(mask.data.par_iter())
            .for_each(write);
    } else {
        frame
            .data
            .chunks_exact_mut(BYTES_PER_PIXEL)
            .zip(mask.data.iter())
            .for_each(write);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask(width: usize, height: usize, data: Vec<u8>) -> EdgeMask {
        EdgeMask { width, height, data }
    }

    #[test]
    fn replicates_value_and_sets_alpha() {
        let frame = expand_to_rgba(&mask(2, 1, vec![255, 0]), false).unwrap();
        assert_eq!(frame.data, vec![255, 255, 255, 255, 0, 0, 0, 255]);
        assert_eq!(frame.pixel(1, 0), Some([0, 0, 0, 255]));
        assert_eq!(frame.stride(), 8);
    }

    #[test]
    fn reused_frame_is_fully_overwritten() {
        let mut frame = DisplayFrame {
            width: 2,
            height: 2,
            data: vec![7; 16],
        };
        expand_into(&mask(2, 2, vec![0, 255, 255, 0]), &mut frame, true).unwrap();
        assert_eq!(
            frame.data,
            vec![0, 0, 0, 255, 255, 255, 255, 255, 255, 255, 255, 255, 0, 0, 0, 255]
        );
    }

    #[test]
    fn mismatched_target_is_rejected() {
        let mut frame = DisplayFrame::zeroed(3, 2).unwrap();
        let err = expand_into(&mask(2, 2, vec![0; 4]), &mut frame, false).unwrap_err();
        assert!(matches!(err, FrameError::BufferSizeMismatch { expected: 16, actual: 24 }));
    }
}
