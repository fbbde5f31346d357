//! C-compatible status codes.
//!
//! [`ClifeStatus`] is a `repr(i32)` enum covering every failure the engine
//! can report across the C boundary. Conversions from the Rust error types
//! are provided.

use clife_codec::CodecError;
use clife_core::{GridError, RuleError, StepError};

/// C-compatible status code returned by all FFI functions.
///
/// `Ok` = 0, all errors are negative. Values are ABI-stable.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClifeStatus {
    /// Success.
    Ok = 0,
    /// Handle is invalid or the grid was already deleted.
    InvalidHandle = -1,
    /// An argument is null, out of range, or otherwise invalid.
    InvalidArgument = -2,
    /// Caller-provided buffer is too small; the grid is unchanged.
    BufferTooSmall = -3,
    /// Grid buffers or the transition table could not be allocated.
    AllocationFailed = -4,
    /// Step requested before any rule was configured.
    RuleNotConfigured = -5,
    /// A cell coordinate lies outside the grid.
    OutOfBounds = -6,
    /// Internal error (e.g. poisoned mutex after a prior panic).
    InternalError = -20,
    /// A Rust panic was caught at the FFI boundary.
    Panicked = -128,
}

impl From<&GridError> for ClifeStatus {
    fn from(e: &GridError) -> Self {
        match e {
            GridError::AllocationFailed { .. } => ClifeStatus::AllocationFailed,
            GridError::EmptyGrid => ClifeStatus::InvalidArgument,
            GridError::CoordOutOfBounds { .. } => ClifeStatus::OutOfBounds,
        }
    }
}

impl From<&StepError> for ClifeStatus {
    fn from(e: &StepError) -> Self {
        match e {
            StepError::RuleNotConfigured => ClifeStatus::RuleNotConfigured,
            StepError::BufferTooSmall { .. } => ClifeStatus::BufferTooSmall,
        }
    }
}

impl From<&RuleError> for ClifeStatus {
    fn from(e: &RuleError) -> Self {
        match e {
            RuleError::Parse { .. } => ClifeStatus::InvalidArgument,
        }
    }
}

impl From<&CodecError> for ClifeStatus {
    fn from(e: &CodecError) -> Self {
        match e {
            CodecError::BufferTooSmall { .. } | CodecError::Truncated { .. } => {
                ClifeStatus::BufferTooSmall
            }
            CodecError::Grid(g) => ClifeStatus::from(g),
        }
    }
}
