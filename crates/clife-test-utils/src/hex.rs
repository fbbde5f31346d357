//! Hex helpers for writing serialised grids as compact string fixtures.

use clife_core::Grid;

/// Decode a hex string into bytes.
///
/// Accepts upper- or lowercase digits. Panics on an odd length or a
/// non-hex character; fixtures are static test data.
pub fn parse_hex(s: &str) -> Vec<u8> {
    assert!(s.len() % 2 == 0, "odd-length hex fixture: {s:?}");
    s.as_bytes()
        .chunks_exact(2)
        .map(|pair| (nibble(pair[0]) << 4) | nibble(pair[1]))
        .collect()
}

fn nibble(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'A'..=b'F' => c - b'A' + 10,
        b'a'..=b'f' => c - b'a' + 10,
        _ => panic!("invalid hex digit {:?}", c as char),
    }
}

/// Encode bytes as an uppercase hex string.
pub fn to_hex(bytes: &[u8]) -> String {
    const DIGITS: &[u8; 16] = b"0123456789ABCDEF";
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        out.push(DIGITS[usize::from(b >> 4)] as char);
        out.push(DIGITS[usize::from(b & 0x0F)] as char);
    }
    out
}

/// Build an unconfigured grid from a hex-encoded serialised image.
pub fn grid_from_hex(width: u32, height: u32, hex: &str) -> Grid {
    clife_codec::decode_grid(width, height, &parse_hex(hex))
        .unwrap_or_else(|e| panic!("bad {width}x{height} fixture {hex:?}: {e}"))
}

/// Serialise a grid to an uppercase hex string.
pub fn grid_to_hex(grid: &Grid) -> String {
    to_hex(&clife_codec::serialize_to_vec(grid))
}
