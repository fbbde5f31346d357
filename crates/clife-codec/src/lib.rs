//! Bit-packed serialization of clife grid state.
//!
//! The byte stream carries cell states only: no header, no magic, no
//! dimensions. Width and height travel out of band.
//!
//! # Format
//!
//! ```text
//! row 0: [b7 b6 b5 b4 b3 b2 b1 b0] [b7 ...] ...   ceil(width / 8) bytes
//! row 1: [b7 b6 ...]                              starts on a fresh byte
//! ...
//! ```
//!
//! Column `x` of a row lives in byte `x / 8` of that row at bit
//! `7 - x % 8` (most significant bit first). Unused low bits of a row's
//! last byte are zero on encode and ignored on decode. Total length is
//! `height * ceil(width / 8)`.
//!
//! The codec only touches the grid through [`Grid::get`] and
//! [`Grid::set`], so a round trip also exercises the public accessors.
//!
//! [`Grid::get`]: clife_core::Grid::get
//! [`Grid::set`]: clife_core::Grid::set

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod error;

pub use codec::{
    bytes_per_row, decode_grid, deserialize, deserialize_exact, required_len, serialize,
    serialize_to_vec,
};
pub use error::CodecError;
