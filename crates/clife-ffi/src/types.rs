//! `repr(C)` value types shared with C callers.

use std::mem::MaybeUninit;

use clife_core::CellUpdate;

/// One changed cell reported by `clife_step_get_updates`.
///
/// Field order matches the classic `clife_point_state` struct.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClifePointState {
    /// State after the step.
    pub state: bool,
    /// Column.
    pub x: u32,
    /// Row.
    pub y: u32,
}

impl From<CellUpdate> for ClifePointState {
    fn from(u: CellUpdate) -> Self {
        Self {
            state: u.state,
            x: u.x,
            y: u.y,
        }
    }
}

impl From<ClifePointState> for CellUpdate {
    fn from(p: ClifePointState) -> Self {
        CellUpdate::new(p.x, p.y, p.state)
    }
}

/// One record of a caller-owned update buffer that may be uninitialised.
///
/// Layout-identical to `ClifePointState`, so a C array of records can be
/// viewed as `[PointSlot]` and filled by the diff step without first
/// reading or zeroing it.
#[repr(transparent)]
pub(crate) struct PointSlot(MaybeUninit<ClifePointState>);

impl From<CellUpdate> for PointSlot {
    fn from(u: CellUpdate) -> Self {
        Self(MaybeUninit::new(ClifePointState::from(u)))
    }
}
