//! 3x3 neighbourhood sampling with a permanently dead border.

use crate::grid::Grid;

/// Compute the 9-bit neighbourhood signature of `(x, y)`.
///
/// Bit `3 * (dy + 1) + (dx + 1)` holds the state of the cell at
/// `(x + dx, y + dy)`. Offsets falling outside the grid contribute a 0
/// bit; there is no wraparound.
///
/// # Panics
///
/// Panics if `(x, y)` is outside the grid.
pub fn sample(grid: &Grid, x: u32, y: u32) -> u16 {
    let (width, height) = (grid.width(), grid.height());
    assert!(
        x < width && y < height,
        "coordinate ({x}, {y}) out of bounds: [0, {width}) x [0, {height})"
    );
    sample_cells(grid.cells(), width, height, x, y)
}

/// Signature computation over a raw row-major buffer.
///
/// The caller guarantees `cells.len() == width * height` and that `(x, y)`
/// is in range.
#[inline]
pub(crate) fn sample_cells(cells: &[bool], width: u32, height: u32, x: u32, y: u32) -> u16 {
    let w = width as usize;
    let mut signature = 0u16;
    let mut bit = 0u16;
    for dy in -1i64..=1 {
        let ny = y as i64 + dy;
        for dx in -1i64..=1 {
            let nx = x as i64 + dx;
            if ny >= 0 && ny < height as i64 && nx >= 0 && nx < width as i64 {
                let idx = nx as usize + w * ny as usize;
                if cells[idx] {
                    signature |= 1 << bit;
                }
            }
            bit += 1;
        }
    }
    signature
}
