//! Grid storage: two equally sized cell buffers plus the compiled rule.
//!
//! Cells are stored row-major at index `x + width * y`. The `scratch`
//! buffer only exists so a step can write the next generation without
//! disturbing neighbour reads; it is swapped with `cells` on commit.
//!
//! # Bounds policy
//!
//! [`Grid::get`] and [`Grid::set`] panic on an out-of-range coordinate, the
//! same contract as slice indexing. A column past the right edge is never
//! allowed to alias a cell of the next row. [`Grid::checked_get`] and
//! [`Grid::checked_set`] report [`GridError::CoordOutOfBounds`] instead.

use tracing::debug;

use crate::error::GridError;
use crate::rule::{Rule, TransitionTable};

/// A fixed-size rectangular cellular automaton.
///
/// Construction leaves every cell dead and no rule configured. A rule
/// must be set with [`Grid::set_rule`] (or [`Grid::configure`]) before
/// stepping.
#[derive(Clone, Debug)]
pub struct Grid {
    pub(crate) width: u32,
    pub(crate) height: u32,
    /// Current generation.
    pub(crate) cells: Vec<bool>,
    /// Workspace for the next generation, same length as `cells`.
    pub(crate) scratch: Vec<bool>,
    pub(crate) rule: Option<Rule>,
    /// Always compiled from `rule` when present.
    pub(crate) table: Option<TransitionTable>,
    pub(crate) generation: u64,
}

/// Allocate a zeroed cell buffer, reporting failure instead of aborting.
fn alloc_cells(len: usize) -> Result<Vec<bool>, GridError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| GridError::AllocationFailed { cells: len })?;
    buf.resize(len, false);
    Ok(buf)
}

impl Grid {
    /// Create a `width x height` grid with every cell dead.
    ///
    /// Returns `Err(GridError::AllocationFailed)` if the buffers cannot be
    /// allocated. No partially built grid is ever returned.
    ///
    /// Unlike the classic C `new_clife`, which hands back a zero-cell grid
    /// for a zero dimension, this returns `Err(GridError::EmptyGrid)` if
    /// either dimension is 0. Such a grid has no cell that could be read,
    /// written or stepped.
    pub fn new(width: u32, height: u32) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyGrid);
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or(GridError::AllocationFailed { cells: usize::MAX })?;

        let cells = alloc_cells(len)?;
        let scratch = alloc_cells(len)?;

        Ok(Self {
            width,
            height,
            cells,
            scratch,
            rule: None,
            table: None,
            generation: 0,
        })
    }

    /// Grid width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells (`width * height`).
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// The configured rule, if any.
    pub fn rule(&self) -> Option<Rule> {
        self.rule
    }

    /// Whether a rule has been configured.
    pub fn is_configured(&self) -> bool {
        self.table.is_some()
    }

    /// Number of generations committed since construction.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    #[track_caller]
    fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "coordinate ({x}, {y}) out of bounds: [0, {}) x [0, {})",
            self.width,
            self.height
        );
        x as usize + self.width as usize * y as usize
    }

    /// State of the cell at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the grid.
    #[inline]
    #[track_caller]
    pub fn get(&self, x: u32, y: u32) -> bool {
        self.cells[self.index(x, y)]
    }

    /// Set the state of the cell at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the grid.
    #[inline]
    #[track_caller]
    pub fn set(&mut self, x: u32, y: u32, state: bool) {
        let idx = self.index(x, y);
        self.cells[idx] = state;
    }

    fn check_bounds(&self, x: u32, y: u32) -> Result<(), GridError> {
        if x < self.width && y < self.height {
            Ok(())
        } else {
            Err(GridError::CoordOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Bounds-checked [`get`](Grid::get).
    pub fn checked_get(&self, x: u32, y: u32) -> Result<bool, GridError> {
        self.check_bounds(x, y)?;
        Ok(self.get(x, y))
    }

    /// Bounds-checked [`set`](Grid::set).
    pub fn checked_set(&mut self, x: u32, y: u32, state: bool) -> Result<(), GridError> {
        self.check_bounds(x, y)?;
        self.set(x, y, state);
        Ok(())
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Kill every cell. The rule and generation counter are untouched.
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Read-only view of the current buffer for in-crate samplers.
    pub(crate) fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Configure the birth/survival rule.
    ///
    /// The transition table is compiled in full before it replaces the
    /// previous one, so a failure leaves the old rule and table in place.
    /// Cell state is never touched.
    pub fn set_rule(&mut self, rule: Rule) -> Result<(), GridError> {
        let table = TransitionTable::compile(&rule)?;
        debug!(
            born = rule.born(),
            survive = rule.survive(),
            rulestring = %rule,
            "compiled transition table"
        );
        self.table = Some(table);
        self.rule = Some(rule);
        Ok(())
    }

    /// Configure the rule from raw born/survive masks.
    pub fn configure(&mut self, born: u16, survive: u16) -> Result<(), GridError> {
        self.set_rule(Rule::new(born, survive))
    }

    /// Configure Conway's `B3/S23`.
    pub fn set_default_rule(&mut self) -> Result<(), GridError> {
        self.set_rule(Rule::CONWAY)
    }
}

impl PartialEq for Grid {
    /// Grids are equal when their dimensions and cell states match.
    ///
    /// Rule, scratch contents and generation count are not compared.
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.cells == other.cells
    }
}

impl Eq for Grid {}
