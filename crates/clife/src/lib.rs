//! clife: Life-like cellular automata on a bounded rectangular grid.
//!
//! This is the facade crate that re-exports the engine and the codec.
//! Adding `clife` as a single dependency is enough for most users; C
//! callers link `clife-ffi` instead.
//!
//! # Quick start
//!
//! ```rust
//! use clife::prelude::*;
//!
//! // A horizontal blinker in a 5x5 grid.
//! let mut grid = GridConfig::new(5, 5).with_rule(Rule::CONWAY).build().unwrap();
//! for x in 1..4 {
//!     grid.set(x, 2, true);
//! }
//!
//! // Step and collect the cells that flipped.
//! let updates = grid.step_with_updates(25).unwrap();
//! assert_eq!(updates.len(), 4);
//! assert!(grid.get(2, 1) && grid.get(2, 3));
//!
//! // Round-trip through the bit-packed image.
//! let bytes = clife::codec::serialize_to_vec(&grid);
//! assert_eq!(bytes, [0x00, 0x20, 0x20, 0x20, 0x00]);
//! let copy = clife::codec::decode_grid(5, 5, &bytes).unwrap();
//! assert_eq!(copy, grid);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`engine`] | `clife-core` | `Grid`, `Rule`, transition table, sampler, stepping |
//! | [`codec`] | `clife-codec` | Row-aligned MSB-first serialisation |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Grid storage, rules and stepping (`clife-core`).
pub use clife_core as engine;

/// Bit-packed grid serialisation (`clife-codec`).
pub use clife_codec as codec;

/// Common imports.
///
/// ```rust
/// use clife::prelude::*;
/// ```
pub mod prelude {
    pub use clife_codec::{deserialize, required_len, serialize, CodecError};
    pub use clife_core::{CellUpdate, Grid, GridConfig, GridError, Rule, RuleError, StepError};
}
