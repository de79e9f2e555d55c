//! TIFF writing module
//!
//! Writes display frames and edge masks as TIFF files for offline inspection.

mod standard_tiff_writer;
pub mod types;
mod writer;

pub use standard_tiff_writer::StandardTiffWriter;
pub use types::{TiffCompression, TiffOptions};
pub use writer::TiffWriter;
