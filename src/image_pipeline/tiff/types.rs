//! TIFF output configuration types

/// TIFF compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    #[default]
    None,
    /// LZW compression
    Lzw,
    /// Deflate compression - fast level
    DeflateFast,
    /// Deflate compression - balanced
    DeflateBalanced,
    /// Deflate compression - best compression (slower)
    DeflateBest,
}

/// Options for writing display frames as TIFF
#[derive(Debug, Clone, Copy, Default)]
pub struct TiffOptions {
    /// Compression method to use
    pub compression: TiffCompression,
    /// Horizontal differencing before compression. Edge masks are mostly runs of
    /// zeros, so this rarely pays off.
    pub horizontal_predictor: bool,
}

impl TiffOptions {
    pub fn compressed(compression: TiffCompression) -> Self {
        Self {
            compression,
            ..Self::default()
        }
    }
}
