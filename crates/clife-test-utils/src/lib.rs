//! Test utilities for clife development.
//!
//! - [`hex`]: uppercase hex encoding of serialised grids, the format the
//!   conformance fixtures are written in.
//! - [`fixtures`]: small named patterns and seeded random soups.
//! - [`reference_step`]: a naive stepper that recomputes every cell by
//!   counting neighbours directly, used as an oracle for the table-driven
//!   engine.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod hex;

use clife_core::{Grid, Rule};

pub use fixtures::{blinker, block, glider, plus, random_grid};
pub use hex::{grid_from_hex, grid_to_hex, parse_hex, to_hex};

/// Compute the next generation of `grid` under `rule` without touching it.
///
/// Counts the live cells among the up to eight in-grid neighbours of each
/// cell and applies [`Rule::next_state`]. Cells outside the grid are dead.
pub fn reference_step(grid: &Grid, rule: Rule) -> Grid {
    let (width, height) = (grid.width(), grid.height());
    let mut next = grid.clone();
    for y in 0..height {
        for x in 0..width {
            let mut live = 0u32;
            for dy in -1i64..=1 {
                for dx in -1i64..=1 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let (nx, ny) = (x as i64 + dx, y as i64 + dy);
                    if nx < 0 || ny < 0 || nx >= width as i64 || ny >= height as i64 {
                        continue;
                    }
                    live += u32::from(grid.get(nx as u32, ny as u32));
                }
            }
            next.set(x, y, rule.next_state(grid.get(x, y), live));
        }
    }
    next
}

/// Coordinates of every live cell in row-major order.
pub fn live_cells(grid: &Grid) -> Vec<(u32, u32)> {
    let mut out = Vec::with_capacity(grid.population());
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            if grid.get(x, y) {
                out.push((x, y));
            }
        }
    }
    out
}
