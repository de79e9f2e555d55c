use std::io::Write;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::display::DisplayFrame;
use crate::image_pipeline::edge::EdgeMask;
use crate::image_pipeline::tiff::types::TiffOptions;

pub trait TiffWriter {
    /// Writes an RGBA8 frame.
    fn write_display(&self, frame: &DisplayFrame, output: &mut dyn Write, options: &TiffOptions) -> Result<()>;
    /// Writes a single-channel edge mask.
    fn write_mask(&self, mask: &EdgeMask, output: &mut dyn Write, options: &TiffOptions) -> Result<()>;
}
