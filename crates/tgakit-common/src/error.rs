use std::path::PathBuf;
use thiserror::Error;

/// Error types covering stopwatch misuse, image construction, and file output.
#[derive(Debug, Error)]
pub enum KitError {
    /// Invalid state transition attempted.
    #[error("invalid state transition from {from} to {to}")]
    InvalidStateTransition {
        /// Source state.
        from: String,
        /// Attempted target state.
        to: String,
    },

    /// Opening or writing an output file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Target path of the failed operation.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Encoding into a caller-supplied writer failed.
    #[error("encode failed: {0}")]
    Write(#[source] std::io::Error),

    /// Image dimensions do not fit the 16-bit TGA header fields.
    #[error("image dimensions {width}x{height} exceed the TGA limit of 65535")]
    DimensionOverflow {
        /// Requested width in pixels.
        width: usize,
        /// Requested height in pixels.
        height: usize,
    },

    /// Raw RGB source holds fewer bytes than the dimensions require.
    #[error("RGB source too short: expected {expected} bytes, got {actual}")]
    SourceTooShort {
        /// Bytes required (`width * height * 3`).
        expected: usize,
        /// Bytes supplied.
        actual: usize,
    },

    /// Pixel vector length disagrees with `width * height`.
    #[error("pixel count mismatch: expected {expected}, got {actual}")]
    PixelCountMismatch {
        /// Pixels required.
        expected: usize,
        /// Pixels supplied.
        actual: usize,
    },
}

impl KitError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience type alias for tgakit operations.
pub type KitResult<T> = Result<T, KitError>;
