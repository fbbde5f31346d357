//! Error types for grid construction, rule configuration and stepping.
//!
//! Every failure leaves the grid in its previous valid state. Recoverable
//! conditions (`BufferTooSmall`) can be retried with a larger buffer; an
//! `AllocationFailed` grid is never handed back to the caller.

use std::error::Error;
use std::fmt;

/// Errors from grid construction and cell access.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// The cell buffers or the transition table could not be allocated.
    ///
    /// Also returned when `width * height` does not fit in `usize`.
    AllocationFailed {
        /// Number of elements requested (saturated on overflow).
        cells: usize,
    },
    /// Attempted to construct a grid with a zero dimension.
    EmptyGrid,
    /// A coordinate passed to a checked accessor is outside the grid.
    CoordOutOfBounds {
        /// Requested column.
        x: u32,
        /// Requested row.
        y: u32,
        /// Grid width.
        width: u32,
        /// Grid height.
        height: u32,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationFailed { cells } => {
                write!(f, "allocation failed for {cells} elements")
            }
            Self::EmptyGrid => write!(f, "grid must have at least one cell"),
            Self::CoordOutOfBounds {
                x,
                y,
                width,
                height,
            } => write!(
                f,
                "coordinate ({x}, {y}) out of bounds: [0, {width}) x [0, {height})"
            ),
        }
    }
}

impl Error for GridError {}

/// Errors from the step engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepError {
    /// No rule has been configured on the grid yet.
    RuleNotConfigured,
    /// A diff step produced more updates than the caller can hold.
    ///
    /// The grid is left exactly as it was before the call.
    BufferTooSmall {
        /// Number of cells that changed in the aborted generation.
        required: usize,
        /// Capacity supplied by the caller.
        capacity: usize,
    },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RuleNotConfigured => write!(f, "no rule configured"),
            Self::BufferTooSmall { required, capacity } => write!(
                f,
                "update buffer too small: {required} changes, capacity {capacity}"
            ),
        }
    }
}

impl Error for StepError {}

/// Errors from parsing a [`Rule`](crate::Rule) rulestring.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuleError {
    /// A rulestring could not be parsed.
    Parse {
        /// The input that failed to parse.
        input: String,
        /// What went wrong.
        reason: String,
    },
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { input, reason } => {
                write!(f, "invalid rulestring '{input}': {reason}")
            }
        }
    }
}

impl Error for RuleError {}
