//! Registry of live grids addressed by opaque `u64` handles.
//!
//! Handles are issued from a counter that starts at 1 and only moves
//! forward, so a deleted grid's handle is never handed out again and 0 is
//! never a valid handle. Lookups report failures as [`ClifeStatus`] so the
//! entry points can return them directly.

use std::collections::BTreeMap;

use clife_core::Grid;
use tracing::warn;

use crate::status::ClifeStatus;

/// Owns every grid created through the C interface.
pub(crate) struct GridRegistry {
    grids: BTreeMap<u64, Grid>,
    next_handle: u64,
}

impl GridRegistry {
    pub(crate) const fn new() -> Self {
        Self {
            grids: BTreeMap::new(),
            next_handle: 1,
        }
    }

    /// Take ownership of `grid` and issue its handle.
    ///
    /// Fails with `InternalError` once the handle space is exhausted.
    pub(crate) fn register(&mut self, grid: Grid) -> Result<u64, ClifeStatus> {
        let handle = self.next_handle;
        self.next_handle = handle.checked_add(1).ok_or(ClifeStatus::InternalError)?;
        self.grids.insert(handle, grid);
        Ok(handle)
    }

    pub(crate) fn grid(&self, handle: u64) -> Result<&Grid, ClifeStatus> {
        self.grids.get(&handle).ok_or_else(|| invalid(handle))
    }

    pub(crate) fn grid_mut(&mut self, handle: u64) -> Result<&mut Grid, ClifeStatus> {
        self.grids.get_mut(&handle).ok_or_else(|| invalid(handle))
    }

    /// Remove a grid, returning it so the caller controls when it drops.
    pub(crate) fn unregister(&mut self, handle: u64) -> Result<Grid, ClifeStatus> {
        self.grids.remove(&handle).ok_or_else(|| invalid(handle))
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.grids.len()
    }
}

fn invalid(handle: u64) -> ClifeStatus {
    warn!(handle, "invalid grid handle");
    ClifeStatus::InvalidHandle
}
