use tracing::debug;

use crate::image_pipeline::common::error::{Result, try_alloc_zeroed};
use crate::image_pipeline::frame::types::{GrayscaleFrame, RawFrame};

/// Copies the luma plane out of a 4:2:0 frame.
///
/// Luma samples are already 8-bit intensities, so this is a plain copy of the
/// first `height` rows; the chroma section is never touched.
pub fn extract_luma(raw: &RawFrame<'_>) -> Result<GrayscaleFrame> {
    let luma = raw.luma_plane()?;
    debug!(
        "Extracting {}x{} luma from {} byte {} frame",
        raw.width(),
        raw.height(),
        raw.data().len(),
        raw.layout().name()
    );

    let mut data = try_alloc_zeroed(luma.len())?;
    data.copy_from_slice(luma);

    Ok(GrayscaleFrame {
        width: raw.width(),
        height: raw.height(),
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::common::error::FrameError;
    use crate::image_pipeline::frame::types::YuvLayout;

    #[test]
    fn copies_luma_and_ignores_chroma() {
        // 4x2 luma followed by one V/U row
        let data = [10, 20, 30, 40, 50, 60, 70, 80, 200, 201, 202, 203];
        let raw = RawFrame::new(&data, 4, 2);

        let gray = extract_luma(&raw).unwrap();
        assert_eq!(gray.width, 4);
        assert_eq!(gray.height, 2);
        assert_eq!(gray.data, vec![10, 20, 30, 40, 50, 60, 70, 80]);
        assert_eq!(gray.get(3, 1), Some(80));
        assert_eq!(gray.get(4, 0), None);
    }

    #[test]
    fn chroma_ordering_does_not_affect_luma() {
        let data = [1, 2, 3, 4, 9, 8];
        let nv21 = extract_luma(&RawFrame::with_layout(&data, 2, 2, YuvLayout::Nv21)).unwrap();
        let i420 = extract_luma(&RawFrame::with_layout(&data, 2, 2, YuvLayout::I420)).unwrap();
        assert_eq!(nv21, i420);
    }

    #[test]
    fn short_buffer_is_rejected_not_overread() {
        let data = [0u8; 5];
        let err = extract_luma(&RawFrame::new(&data, 4, 2)).unwrap_err();
        assert!(matches!(
            err,
            FrameError::InvalidFrameSize { expected: 8, actual: 5, .. }
        ));
    }
}
