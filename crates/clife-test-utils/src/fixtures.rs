//! Named patterns and seeded random grids.
//!
//! Every pattern builder returns an unconfigured grid; callers pick the
//! rule. Coordinates are `(x, y)` of the pattern's top-left cell.

use clife_core::Grid;
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn with_cells(width: u32, height: u32, origin: (u32, u32), cells: &[(u32, u32)]) -> Grid {
    let mut grid = Grid::new(width, height).expect("fixture dimensions are non-zero");
    for &(dx, dy) in cells {
        grid.set(origin.0 + dx, origin.1 + dy, true);
    }
    grid
}

/// Horizontal period-2 blinker, three cells wide.
pub fn blinker(width: u32, height: u32, origin: (u32, u32)) -> Grid {
    with_cells(width, height, origin, &[(0, 0), (1, 0), (2, 0)])
}

/// 2x2 still life.
pub fn block(width: u32, height: u32, origin: (u32, u32)) -> Grid {
    with_cells(width, height, origin, &[(0, 0), (1, 0), (0, 1), (1, 1)])
}

/// South-east travelling glider in a 3x3 box.
///
/// ```text
/// . # .
/// . . #
/// # # #
/// ```
pub fn glider(width: u32, height: u32, origin: (u32, u32)) -> Grid {
    with_cells(
        width,
        height,
        origin,
        &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
    )
}

/// Five-cell plus sign in a 3x3 box.
pub fn plus(width: u32, height: u32, origin: (u32, u32)) -> Grid {
    with_cells(
        width,
        height,
        origin,
        &[(1, 0), (0, 1), (1, 1), (2, 1), (1, 2)],
    )
}

/// Deterministic random soup: each cell is alive with probability `density`.
///
/// Identical `(width, height, seed, density)` always produce the same grid.
pub fn random_grid(width: u32, height: u32, seed: u64, density: f64) -> Grid {
    let mut grid = Grid::new(width, height).expect("fixture dimensions are non-zero");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let threshold = (density.clamp(0.0, 1.0) * (1u64 << 32) as f64) as u64;
    for y in 0..height {
        for x in 0..width {
            grid.set(x, y, u64::from(rng.next_u32()) < threshold);
        }
    }
    grid
}
