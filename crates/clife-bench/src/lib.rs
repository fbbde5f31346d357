//! Benchmark profiles for the clife engine.
//!
//! - [`soup_profile`]: a seeded random soup under Conway's rule
//! - [`SOUP_DENSITY`]: initial live fraction used by every profile

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use clife_core::{Grid, GridError, Rule};

/// Initial live-cell fraction for soup profiles.
pub const SOUP_DENSITY: f64 = 0.35;

/// Build a `width x height` random soup configured with `B3/S23`.
///
/// The same `seed` always yields the same starting grid, so successive
/// benchmark runs step identical populations.
pub fn soup_profile(width: u32, height: u32, seed: u64) -> Result<Grid, GridError> {
    let mut grid = clife_test_utils::random_grid(width, height, seed, SOUP_DENSITY);
    grid.set_rule(Rule::CONWAY)?;
    Ok(grid)
}
