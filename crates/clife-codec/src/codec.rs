//! Encode/decode between a [`Grid`] and its row-aligned byte stream.

use clife_core::Grid;

use crate::error::CodecError;

/// Bytes needed for one row of `width` cells.
pub fn bytes_per_row(width: u32) -> usize {
    (width as usize).div_ceil(8)
}

/// Bytes needed for a `width x height` grid.
pub fn required_len(width: u32, height: u32) -> usize {
    bytes_per_row(width) * height as usize
}

/// Encode the grid's cell states into `buf`.
///
/// Returns the number of bytes written, always [`required_len`] of the
/// grid. Returns `Err(CodecError::BufferTooSmall)` without writing anything
/// if `buf` is shorter than that. Bytes past the encoded length are left
/// untouched.
pub fn serialize(grid: &Grid, buf: &mut [u8]) -> Result<usize, CodecError> {
    let (width, height) = (grid.width(), grid.height());
    let required = required_len(width, height);
    if buf.len() < required {
        return Err(CodecError::BufferTooSmall {
            required,
            provided: buf.len(),
        });
    }

    let row_len = bytes_per_row(width);
    for (y, row) in buf[..required].chunks_exact_mut(row_len).enumerate() {
        for (i, byte) in row.iter_mut().enumerate() {
            let x0 = i as u32 * 8;
            let mut packed = 0u8;
            for bit in 0..8u32 {
                let x = x0 + bit;
                if x >= width {
                    break;
                }
                if grid.get(x, y as u32) {
                    packed |= 0x80 >> bit;
                }
            }
            *byte = packed;
        }
    }
    Ok(required)
}

/// Encode the grid into a freshly allocated buffer of exactly
/// [`required_len`] bytes.
pub fn serialize_to_vec(grid: &Grid) -> Vec<u8> {
    let mut buf = vec![0u8; required_len(grid.width(), grid.height())];
    serialize(grid, &mut buf).expect("buffer sized by required_len");
    buf
}

/// Decode `bytes` into the grid, row by row.
///
/// Returns the number of bytes consumed. Decoding is strictly bounded:
/// - at most [`required_len`] bytes are consumed; trailing input is ignored;
/// - padding bits past the last column of a row are ignored and never
///   spill into the next row;
/// - if `bytes` runs out early, cells not covered keep their prior state
///   and the return value is less than [`required_len`].
pub fn deserialize(grid: &mut Grid, bytes: &[u8]) -> usize {
    let (width, height) = (grid.width(), grid.height());
    let required = required_len(width, height);
    let row_len = bytes_per_row(width);
    let consumed = bytes.len().min(required);

    for (i, &byte) in bytes[..consumed].iter().enumerate() {
        let y = (i / row_len) as u32;
        let x0 = (i % row_len) as u32 * 8;
        for bit in 0..8u32 {
            let x = x0 + bit;
            if x >= width {
                break;
            }
            grid.set(x, y, byte & (0x80 >> bit) != 0);
        }
    }
    debug_assert!(consumed == 0 || ((consumed - 1) / row_len) < height as usize);
    consumed
}

/// Decode a full grid's worth of bytes, or nothing at all.
///
/// Returns `Err(CodecError::Truncated)` and leaves the grid unmodified if
/// `bytes` is shorter than [`required_len`].
pub fn deserialize_exact(grid: &mut Grid, bytes: &[u8]) -> Result<(), CodecError> {
    let required = required_len(grid.width(), grid.height());
    if bytes.len() < required {
        return Err(CodecError::Truncated {
            required,
            available: bytes.len(),
        });
    }
    deserialize(grid, bytes);
    Ok(())
}

/// Build a new unconfigured grid from an encoded byte stream.
pub fn decode_grid(width: u32, height: u32, bytes: &[u8]) -> Result<Grid, CodecError> {
    let mut grid = Grid::new(width, height)?;
    deserialize_exact(&mut grid, bytes)?;
    Ok(grid)
}
