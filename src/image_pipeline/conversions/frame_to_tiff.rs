use std::io::Write;
use std::path::Path;

use tracing::{info, instrument};

use crate::image_pipeline::{
    common::error::{FrameError, Result},
    common::timing::PipelineTimings,
    edge::{CannyDetector, EdgeDetector},
    processor::{FrameProcessor, FrameStats, ProcessorConfig},
    tiff::{StandardTiffWriter, TiffOptions, TiffWriter},
};

/// What a converted frame is written as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// RGBA8 TIFF of the display frame
    #[default]
    Tiff,
    /// Grayscale TIFF of the edge mask only
    MaskTiff,
    /// Headerless RGBA8 bytes, exactly what a renderer would upload
    RawRgba,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    pub format: OutputFormat,
    pub tiff: TiffOptions,
}

/// Offline counterpart of the capture → process → render loop: reads a raw
/// 4:2:0 frame dump, runs it through a [`FrameProcessor`] and writes the result.
pub struct FrameToTiffPipeline<D: EdgeDetector, W: TiffWriter> {
    processor: FrameProcessor<D>,
    writer: W,
    options: OutputOptions,
}

impl FrameToTiffPipeline<CannyDetector, StandardTiffWriter> {
    pub fn new(config: ProcessorConfig, options: OutputOptions) -> Result<Self> {
        Ok(Self {
            processor: FrameProcessor::new(config)?,
            writer: StandardTiffWriter,
            options,
        })
    }
}

impl<D: EdgeDetector, W: TiffWriter> FrameToTiffPipeline<D, W> {
    pub fn with_custom(processor: FrameProcessor<D>, writer: W, options: OutputOptions) -> Self {
        Self {
            processor,
            writer,
            options,
        }
    }

    #[instrument(skip(self, input_data, output), fields(input_size = input_data.len()))]
    pub fn convert(
        &self,
        input_data: &[u8],
        width: usize,
        height: usize,
        output: &mut dyn Write,
    ) -> Result<FrameStats> {
        let (stats, _) = self.convert_with_timings(input_data, width, height, output)?;
        Ok(stats)
    }

    pub fn convert_with_timings(
        &self,
        input_data: &[u8],
        width: usize,
        height: usize,
        output: &mut dyn Write,
    ) -> Result<(FrameStats, PipelineTimings)> {
        info!("Starting frame to {:?} conversion", self.options.format);
        let raw = self.processor.frame(input_data, width, height);

        let (stats, mut timings) = match self.options.format {
            OutputFormat::MaskTiff => {
                let mut timings = PipelineTimings::new();
                let mask = timings.measure("detect", || self.processor.detect(&raw))?;
                let stats = FrameStats {
                    width,
                    height,
                    edge_pixels: mask.edge_count(),
                };
                timings.measure("encode", || {
                    let _span = tracing::info_span!("encode_tiff").entered();
                    self.writer.write_mask(&mask, &mut *output, &self.options.tiff)
                })?;
                (stats, timings)
            }
            OutputFormat::Tiff | OutputFormat::RawRgba => {
                let processed = self.processor.process_with_timings(&raw)?;
                let mut timings = processed.timings;
                timings.measure("encode", || {
                    let _span = tracing::info_span!("encode_output").entered();
                    if self.options.format == OutputFormat::RawRgba {
                        output.write_all(processed.frame.as_bytes()).map_err(FrameError::from)
                    } else {
                        self.writer
                            .write_display(&processed.frame, &mut *output, &self.options.tiff)
                    }
                })?;
                (processed.stats, timings)
            }
        };

        timings.measure("flush", || output.flush())?;

        info!(
            width,
            height,
            edges = stats.edge_pixels,
            total_ms = timings.total_duration().as_secs_f64() * 1000.0,
            "Conversion complete"
        );
        Ok((stats, timings))
    }

    #[instrument(skip(self, input_path, output_path))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
        width: usize,
        height: usize,
    ) -> Result<(FrameStats, PipelineTimings)> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Converting file"
        );

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                FrameError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?
        };

        // Encode in memory so a rejected frame never leaves a file behind
        let mut encoded = Vec::new();
        let (stats, mut timings) =
            self.convert_with_timings(&input_data, width, height, &mut encoded)?;

        timings.measure("write_output_file", || {
            std::fs::write(output_path, &encoded).map_err(|e| {
                FrameError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })
        })?;

        Ok((stats, timings))
    }

    pub fn processor(&self) -> &FrameProcessor<D> {
        &self.processor
    }

    pub fn options(&self) -> &OutputOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: OutputOptions) {
        self.options = options;
    }
}
