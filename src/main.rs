use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use edgecam::image_pipeline::{
    FrameToTiffPipeline, GradientNorm, OutputFormat, OutputOptions, ProcessorConfig,
    TiffCompression, TiffOptions, YuvLayout,
};
use edgecam::logger;

use tracing::{error, info};

/// Run the camera edge pipeline over a raw 4:2:0 frame dump.
#[derive(Parser, Debug)]
#[command(name = "edgecam")]
struct Args {
    /// Raw frame file (luma plane followed by chroma)
    input: PathBuf,

    /// Frame width in pixels
    #[arg(short = 'W', long)]
    width: usize,

    /// Frame height in pixels
    #[arg(short = 'H', long)]
    height: usize,

    /// Output file
    #[arg(short, long, default_value = "edges.tiff")]
    output: PathBuf,

    /// Low hysteresis threshold
    #[arg(long, default_value_t = 50.0)]
    low: f32,

    /// High hysteresis threshold
    #[arg(long, default_value_t = 150.0)]
    high: f32,

    /// Chroma ordering of the input
    #[arg(long, value_enum, default_value_t = LayoutArg::Nv21)]
    layout: LayoutArg,

    /// Use the L2 gradient norm instead of L1
    #[arg(long)]
    l2: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = FormatArg::Tiff)]
    format: FormatArg,

    /// TIFF compression
    #[arg(long, value_enum, default_value_t = CompressionArg::None)]
    compression: CompressionArg,

    /// Apply horizontal differencing before TIFF compression
    #[arg(long)]
    predictor: bool,

    /// Accept inputs longer than one frame (padded sensor buffers)
    #[arg(long)]
    lenient: bool,

    /// Process rows on the calling thread only
    #[arg(long)]
    sequential: bool,

    /// Log per-stage spans
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LayoutArg {
    Nv21,
    Nv12,
    I420,
    Yv12,
}

impl From<LayoutArg> for YuvLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Nv21 => YuvLayout::Nv21,
            LayoutArg::Nv12 => YuvLayout::Nv12,
            LayoutArg::I420 => YuvLayout::I420,
            LayoutArg::Yv12 => YuvLayout::Yv12,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Tiff,
    Mask,
    Rgba,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Tiff => OutputFormat::Tiff,
            FormatArg::Mask => OutputFormat::MaskTiff,
            FormatArg::Rgba => OutputFormat::RawRgba,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CompressionArg {
    None,
    Lzw,
    DeflateFast,
    Deflate,
    DeflateBest,
}

impl From<CompressionArg> for TiffCompression {
    fn from(arg: CompressionArg) -> Self {
        match arg {
            CompressionArg::None => TiffCompression::None,
            CompressionArg::Lzw => TiffCompression::Lzw,
            CompressionArg::DeflateFast => TiffCompression::DeflateFast,
            CompressionArg::Deflate => TiffCompression::DeflateBalanced,
            CompressionArg::DeflateBest => TiffCompression::DeflateBest,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_with_default(if args.verbose { "debug" } else { "info" });

    info!("Starting edgecam...");

    let config = ProcessorConfig::builder()
        .thresholds(args.low, args.high)
        .norm(if args.l2 { GradientNorm::L2 } else { GradientNorm::L1 })
        .layout(args.layout.into())
        .validate_frame_size(!args.lenient)
        .parallel(!args.sequential)
        .build();
    let options = OutputOptions {
        format: args.format.into(),
        tiff: TiffOptions {
            compression: args.compression.into(),
            horizontal_predictor: args.predictor,
        },
    };

    let pipeline = FrameToTiffPipeline::new(config, options)
        .context("invalid pipeline configuration")?;

    info!(
        "Thresholds: {}/{}, layout: {}, output: {:?}",
        pipeline.processor().config().thresholds.low,
        pipeline.processor().config().thresholds.high,
        pipeline.processor().config().layout.name(),
        pipeline.options().format
    );

    match pipeline.convert_file(&args.input, &args.output, args.width, args.height) {
        Ok((stats, timings)) => {
            timings.log_summary();
            info!(
                "Wrote {} ({}x{}, {} edge pixels, {:.2}%)",
                args.output.display(),
                stats.width,
                stats.height,
                stats.edge_pixels,
                stats.edge_ratio() * 100.0
            );
            Ok(())
        }
        Err(e) => {
            error!("Conversion failed: {}", e);
            Err(e).with_context(|| format!("processing {}", args.input.display()))
        }
    }
}
