//! Error types for the gifkit library.

use std::fmt;
use std::io;

/// Result type alias for gifkit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during GIF encoding.
#[derive(Debug)]
pub enum Error {
    /// Invalid image dimensions (zero width or height).
    InvalidDimensions {
        /// Canvas width.
        width: u16,
        /// Canvas height.
        height: u16,
    },
    /// Frame data length doesn't match the expected RGBA size.
    InvalidDataLength {
        /// Expected number of bytes (`4 * width * height`).
        expected: usize,
        /// Actual number of bytes provided.
        actual: usize,
    },
    /// A write to the output sink failed.
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidDimensions { width, height } => {
                write!(f, "Invalid image dimensions: {}x{}", width, height)
            }
            Error::InvalidDataLength { expected, actual } => {
                write!(
                    f,
                    "Invalid frame data length: expected {} bytes, got {}",
                    expected, actual
                )
            }
            Error::Io(err) => write!(f, "Sink write failed: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}
