//! Error types for the grid codec.

use std::error::Error;
use std::fmt;

use clife_core::GridError;

/// Errors that can occur while encoding or decoding grid state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CodecError {
    /// The destination buffer is shorter than the encoded grid.
    BufferTooSmall {
        /// Bytes needed for the whole grid.
        required: usize,
        /// Bytes supplied by the caller.
        provided: usize,
    },
    /// The input ended before every row was covered.
    Truncated {
        /// Bytes needed for the whole grid.
        required: usize,
        /// Bytes available.
        available: usize,
    },
    /// Constructing the destination grid failed.
    Grid(GridError),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferTooSmall { required, provided } => {
                write!(f, "buffer too small: need {required} bytes, got {provided}")
            }
            Self::Truncated {
                required,
                available,
            } => write!(f, "truncated input: need {required} bytes, got {available}"),
            Self::Grid(e) => write!(f, "grid error: {e}"),
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for CodecError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}
