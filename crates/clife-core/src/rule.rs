//! Birth/survival rules and their compiled transition tables.
//!
//! A [`Rule`] holds two neighbour-count bitmasks: bit `n` of `born` means a
//! dead cell with `n` live neighbours comes alive, bit `n` of `survive` means
//! a live cell with `n` live neighbours stays alive. The canonical Conway
//! rule `B3/S23` is `born = 8`, `survive = 12`.
//!
//! [`TransitionTable`] precomputes the next centre state for every 3x3
//! neighbourhood signature so a step is a single lookup per cell.

use std::fmt;
use std::str::FromStr;

use crate::error::{GridError, RuleError};

/// Number of distinct 3x3 neighbourhood signatures (`2^9`).
pub const TABLE_SIZE: usize = 512;

/// Bit position of the centre cell within a signature.
pub const CENTER_BIT: u16 = 4;

/// Largest possible live-neighbour count.
const MAX_NEIGHBOURS: u16 = 8;

/// Mask bits that can match a neighbour count (`0..=8`).
const COUNT_MASK: u16 = (1 << (MAX_NEIGHBOURS + 1)) - 1;

/// A life-like birth/survival rule.
///
/// Mask bits above bit 8 can never match a neighbour count; [`Rule::new`]
/// discards them, so two rules with the same behaviour compare equal and
/// print the same rulestring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rule {
    born: u16,
    survive: u16,
}

impl Rule {
    /// Conway's Game of Life, `B3/S23`.
    pub const CONWAY: Rule = Rule::new(1 << 3, (1 << 2) | (1 << 3));

    /// Create a rule from raw born/survive masks.
    ///
    /// Bits 9..15 are accepted and cleared.
    pub const fn new(born: u16, survive: u16) -> Self {
        Self {
            born: born & COUNT_MASK,
            survive: survive & COUNT_MASK,
        }
    }

    /// The birth mask.
    pub fn born(&self) -> u16 {
        self.born
    }

    /// The survival mask.
    pub fn survive(&self) -> u16 {
        self.survive
    }

    /// Next state of a cell given its current state and live-neighbour count.
    pub fn next_state(&self, alive: bool, live_neighbours: u32) -> bool {
        let mask = if alive { self.survive } else { self.born };
        live_neighbours <= MAX_NEIGHBOURS as u32 && mask & (1 << live_neighbours) != 0
    }
}

impl Default for Rule {
    fn default() -> Self {
        Self::CONWAY
    }
}

fn write_counts(f: &mut fmt::Formatter<'_>, mask: u16) -> fmt::Result {
    for n in 0..=MAX_NEIGHBOURS {
        if mask & (1 << n) != 0 {
            write!(f, "{n}")?;
        }
    }
    Ok(())
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("B")?;
        write_counts(f, self.born)?;
        f.write_str("/S")?;
        write_counts(f, self.survive)
    }
}

impl FromStr for Rule {
    type Err = RuleError;

    /// Parse a `B<digits>/S<digits>` rulestring, e.g. `"B36/S23"`.
    ///
    /// The `B` and `S` sections may appear in either order and are
    /// case-insensitive. Digits must be in `0..=8`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |reason: String| RuleError::Parse {
            input: s.to_string(),
            reason,
        };

        let mut born = None;
        let mut survive = None;
        for part in s.trim().split('/') {
            let mut chars = part.chars();
            let slot = match chars.next() {
                Some('B' | 'b') => &mut born,
                Some('S' | 's') => &mut survive,
                Some(c) => return Err(err(format!("unexpected section prefix '{c}'"))),
                None => return Err(err("empty section".to_string())),
            };
            if slot.is_some() {
                return Err(err("duplicate section".to_string()));
            }
            let mut mask = 0u16;
            for c in chars {
                let n = c
                    .to_digit(10)
                    .ok_or_else(|| err(format!("unexpected character '{c}'")))?;
                if n > MAX_NEIGHBOURS as u32 {
                    return Err(err(format!("digit {n} out of range 0-8")));
                }
                mask |= 1 << n;
            }
            *slot = Some(mask);
        }

        match (born, survive) {
            (Some(born), Some(survive)) => Ok(Rule::new(born, survive)),
            (None, _) => Err(err("missing B section".to_string())),
            (_, None) => Err(err("missing S section".to_string())),
        }
    }
}

/// Lookup table from 9-bit neighbourhood signature to next centre state.
///
/// Bit 4 of a signature is the centre cell; the remaining bits are the
/// eight neighbours in row-major order of the 3x3 window.
#[derive(Clone, PartialEq, Eq)]
pub struct TransitionTable {
    entries: Box<[bool]>,
}

impl TransitionTable {
    /// Compile `rule` into a full 512-entry table.
    ///
    /// Fails only if the table storage cannot be allocated.
    pub fn compile(rule: &Rule) -> Result<Self, GridError> {
        let mut entries = Vec::new();
        entries
            .try_reserve_exact(TABLE_SIZE)
            .map_err(|_| GridError::AllocationFailed { cells: TABLE_SIZE })?;

        for signature in 0..TABLE_SIZE as u16 {
            let alive = signature & (1 << CENTER_BIT) != 0;
            let live_neighbours = (signature & !(1 << CENTER_BIT)).count_ones();
            entries.push(rule.next_state(alive, live_neighbours));
        }

        Ok(Self {
            entries: entries.into_boxed_slice(),
        })
    }

    /// Next centre state for a neighbourhood signature.
    ///
    /// Only the low 9 bits of `signature` are meaningful.
    #[inline]
    pub fn lookup(&self, signature: u16) -> bool {
        self.entries[(signature as usize) & (TABLE_SIZE - 1)]
    }
}

impl fmt::Debug for TransitionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let live = self.entries.iter().filter(|&&b| b).count();
        f.debug_struct("TransitionTable")
            .field("entries", &self.entries.len())
            .field("live", &live)
            .finish()
    }
}
