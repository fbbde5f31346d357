//! Core engine for the clife cellular automaton.
//!
//! Owns the grid buffers, compiles birth/survival rules into a 512-entry
//! transition table, samples bounded 3x3 neighbourhoods and advances the
//! grid one generation at a time.
//!
//! # Architecture
//!
//! ```text
//! Grid
//! ├── cells    Vec<bool>         current generation, row-major
//! ├── scratch  Vec<bool>         next generation during a step
//! ├── rule     Option<Rule>      born / survive masks
//! └── table    TransitionTable   signature (0..512) -> next state
//! ```
//!
//! A step samples every cell of `cells`, looks up its next state and
//! writes it to `scratch`, then swaps the two buffers. The diff variant
//! ([`Grid::step_with_updates`]) only swaps once the changed-cell count
//! fits the caller's capacity.
//!
//! # Concurrency
//!
//! All operations are synchronous. A [`Grid`] is a single mutable resource;
//! share it across threads behind external synchronisation.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod grid;
pub mod neighborhood;
pub mod rule;
pub mod step;

pub use config::{ConfigError, GridConfig};
pub use error::{GridError, RuleError, StepError};
pub use grid::Grid;
pub use neighborhood::sample;
pub use rule::{Rule, TransitionTable, TABLE_SIZE};
pub use step::CellUpdate;
