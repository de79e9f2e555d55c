use std::io::{Cursor, Write};

use tiff::encoder::colortype::{Gray8, RGBA8};
use tiff::encoder::compression::DeflateLevel;
use tiff::encoder::{Compression, TiffEncoder};
use tiff::tags::Predictor;
use tracing::debug;

use crate::image_pipeline::common::error::{FrameError, Result};
use crate::image_pipeline::display::DisplayFrame;
use crate::image_pipeline::edge::EdgeMask;
use crate::image_pipeline::tiff::types::{TiffCompression, TiffOptions};
use crate::image_pipeline::tiff::writer::TiffWriter;

pub struct StandardTiffWriter;

fn encoder<'a>(
    buffer: &'a mut Vec<u8>,
    options: &TiffOptions,
) -> Result<TiffEncoder<Cursor<&'a mut Vec<u8>>>> {
    let compression = match options.compression {
        TiffCompression::None => Compression::Uncompressed,
        TiffCompression::Lzw => Compression::Lzw,
        TiffCompression::DeflateFast => Compression::Deflate(DeflateLevel::Fast),
        TiffCompression::DeflateBalanced => Compression::Deflate(DeflateLevel::Balanced),
        TiffCompression::DeflateBest => Compression::Deflate(DeflateLevel::Best),
    };

    let mut encoder = TiffEncoder::new(Cursor::new(buffer))
        .map_err(|e| FrameError::EncodeError(e.to_string()))?
        .with_compression(compression);

    if options.horizontal_predictor {
        encoder = encoder.with_predictor(Predictor::Horizontal);
    }
    Ok(encoder)
}

impl TiffWriter for StandardTiffWriter {
    fn write_display(&self, frame: &DisplayFrame, output: &mut dyn Write, options: &TiffOptions) -> Result<()> {
        debug!("Encoding RGBA TIFF image: {}x{}", frame.width, frame.height);

        let mut buffer = Vec::new();
        encoder(&mut buffer, options)?
            .write_image::<RGBA8>(frame.width as u32, frame.height as u32, &frame.data)
            .map_err(|e| FrameError::EncodeError(e.to_string()))?;
        output.write_all(&buffer)?;

        debug!("TIFF encoding complete, {} bytes", buffer.len());
        Ok(())
    }

    fn write_mask(&self, mask: &EdgeMask, output: &mut dyn Write, options: &TiffOptions) -> Result<()> {
        debug!("Encoding grayscale TIFF mask: {}x{}", mask.width, mask.height);

        let mut buffer = Vec::new();
        encoder(&mut buffer, options)?
            .write_image::<Gray8>(mask.width as u32, mask.height as u32, &mask.data)
            .map_err(|e| FrameError::EncodeError(e.to_string()))?;
        output.write_all(&buffer)?;
        Ok(())
    }
}
