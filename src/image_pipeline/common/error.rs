use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrameError {
    #[error("Invalid frame size for {width}x{height}: expected {expected} bytes, got {actual}")]
    InvalidFrameSize {
        expected: usize,
        actual: usize,
        width: usize,
        height: usize,
    },

    #[error("Invalid frame dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Invalid edge thresholds: low={low}, high={high}")]
    InvalidThresholds { low: f32, high: f32 },

    #[error("Output buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("Failed to allocate {0} bytes for frame buffer")]
    AllocationFailed(usize),

    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to encode TIFF image: {0}")]
    EncodeError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl FrameError {
    /// Whether the error was caused by the caller handing over a malformed frame.
    ///
    /// Such frames should be dropped; resubmitting the same buffer will fail again.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            FrameError::InvalidFrameSize { .. }
                | FrameError::InvalidDimensions(..)
                | FrameError::InvalidThresholds { .. }
                | FrameError::BufferSizeMismatch { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, FrameError>;

/// Allocates a zeroed buffer, reporting allocation failure instead of aborting.
pub(crate) fn try_alloc_zeroed(len: usize) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| FrameError::AllocationFailed(len))?;
    buffer.resize(len, 0);
    Ok(buffer)
}
