//! Grid configuration parameters.

use std::error::Error;
use std::fmt;

use crate::error::GridError;
use crate::grid::Grid;
use crate::rule::Rule;

/// Configuration for constructing a [`Grid`].
///
/// Validated in [`build`](GridConfig::build); dimensions are immutable
/// once the grid exists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridConfig {
    /// Width in cells. Must be non-zero.
    pub width: u32,
    /// Height in cells. Must be non-zero.
    pub height: u32,
    /// Rule to configure after construction. `None` leaves the grid
    /// unconfigured.
    pub rule: Option<Rule>,
}

/// Errors detected during [`GridConfig::validate()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Width or height is zero.
    EmptyGrid,
    /// `width * height` exceeds [`GridConfig::MAX_CELLS`].
    TooManyCells {
        /// The requested cell count.
        requested: u64,
        /// The configured maximum.
        max: u64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "grid must have at least one cell"),
            Self::TooManyCells { requested, max } => {
                write!(f, "grid of {requested} cells exceeds maximum {max}")
            }
        }
    }
}

impl Error for ConfigError {}

impl GridConfig {
    /// Upper bound on `width * height` accepted by [`build`](GridConfig::build).
    ///
    /// Keeps each buffer addressable on 32-bit targets.
    pub const MAX_CELLS: u64 = u32::MAX as u64;

    /// Configuration for a `width x height` grid with no rule.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            rule: None,
        }
    }

    /// Set the rule to configure on build.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rule = Some(rule);
        self
    }

    /// Number of cells the grid will hold.
    pub fn cell_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Check structural invariants without allocating.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        let requested = self.cell_count();
        if requested > Self::MAX_CELLS {
            return Err(ConfigError::TooManyCells {
                requested,
                max: Self::MAX_CELLS,
            });
        }
        Ok(())
    }

    /// Validate, allocate and (optionally) configure the grid.
    pub fn build(&self) -> Result<Grid, GridError> {
        self.validate().map_err(|e| match e {
            ConfigError::EmptyGrid => GridError::EmptyGrid,
            ConfigError::TooManyCells { requested, .. } => GridError::AllocationFailed {
                cells: usize::try_from(requested).unwrap_or(usize::MAX),
            },
        })?;
        let mut grid = Grid::new(self.width, self.height)?;
        if let Some(rule) = self.rule {
            grid.set_rule(rule)?;
        }
        Ok(grid)
    }
}
