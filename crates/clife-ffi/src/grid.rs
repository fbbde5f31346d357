//! Grid lifecycle, rule, step, cell access and codec entry points.

use std::sync::Mutex;

use clife_core::{Grid, Rule};

use crate::registry::GridRegistry;
use crate::status::ClifeStatus;
use crate::types::{ClifePointState, PointSlot};

static GRIDS: Mutex<GridRegistry> = Mutex::new(GridRegistry::new());

/// Create a `width x height` grid with all cells dead and no rule.
///
/// On success writes the new handle to `grid_out`. Handles are never 0.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn clife_new(width: u32, height: u32, grid_out: *mut u64) -> i32 {
    ffi_guard!({
        if grid_out.is_null() {
            return ClifeStatus::InvalidArgument as i32;
        }
        let grid = ffi_try!(Grid::new(width, height).map_err(|e| ClifeStatus::from(&e)));
        let handle = ffi_try!(ffi_lock!(GRIDS).register(grid));
        // SAFETY: grid_out is non-null and valid per caller contract.
        unsafe { *grid_out = handle };
        ClifeStatus::Ok as i32
    })
}

/// Destroy a grid, releasing both buffers and the transition table.
///
/// Deleting an already deleted grid returns `CLIFE_STATUS_INVALID_HANDLE`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn clife_delete(grid: u64) -> i32 {
    ffi_guard!({
        let removed = ffi_try!(ffi_lock!(GRIDS).unregister(grid));
        drop(removed);
        ClifeStatus::Ok as i32
    })
}

/// Configure a `B/S` rule from neighbour-count bitmasks.
///
/// Bit `n` of `rule_b` makes a dead cell with `n` live neighbours come
/// alive; bit `n` of `rule_s` keeps a live cell with `n` live neighbours
/// alive. Conway's `B3/S23` is `rule_b = 8`, `rule_s = 12`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn clife_set_rule(grid: u64, rule_b: u16, rule_s: u16) -> i32 {
    ffi_guard!({
        let mut registry = ffi_lock!(GRIDS);
        let g = ffi_try!(registry.grid_mut(grid));
        ffi_try!(g
            .set_rule(Rule::new(rule_b, rule_s))
            .map_err(|e| ClifeStatus::from(&e)));
        ClifeStatus::Ok as i32
    })
}

/// Configure Conway's `B3/S23`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn clife_set_default_rule(grid: u64) -> i32 {
    clife_set_rule(grid, Rule::CONWAY.born(), Rule::CONWAY.survive())
}

/// Advance the grid one generation.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn clife_step(grid: u64) -> i32 {
    ffi_guard!({
        let mut registry = ffi_lock!(GRIDS);
        let g = ffi_try!(registry.grid_mut(grid));
        ffi_try!(g.step().map_err(|e| ClifeStatus::from(&e)));
        ClifeStatus::Ok as i32
    })
}

/// Advance one generation and report every changed cell.
///
/// `state_buff` is a caller-allocated array of `buff_len` records and may
/// be null only when `buff_len == 0`. Records are written straight into
/// it. On `CLIFE_STATUS_OK`, `*update_len` receives the number of records
/// written, which is exactly the number of changed cells. If more cells
/// change than fit, returns `CLIFE_STATUS_BUFFER_TOO_SMALL`, sets
/// `*update_len` to 0 and leaves the grid unchanged; the buffer contents
/// are then meaningless.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn clife_step_get_updates(
    grid: u64,
    state_buff: *mut ClifePointState,
    buff_len: u64,
    update_len: *mut u64,
) -> i32 {
    ffi_guard!({
        if update_len.is_null() || (state_buff.is_null() && buff_len != 0) {
            return ClifeStatus::InvalidArgument as i32;
        }
        let Ok(capacity) = usize::try_from(buff_len) else {
            return ClifeStatus::InvalidArgument as i32;
        };
        // SAFETY: update_len is non-null and valid per caller contract.
        unsafe { *update_len = 0 };

        let out: &mut [PointSlot] = if capacity == 0 {
            &mut []
        } else {
            // SAFETY: state_buff points to buff_len writable records. PointSlot
            // is a transparent MaybeUninit wrapper, so the memory need not be
            // initialised.
            unsafe { std::slice::from_raw_parts_mut(state_buff.cast::<PointSlot>(), capacity) }
        };

        let mut registry = ffi_lock!(GRIDS);
        let g = ffi_try!(registry.grid_mut(grid));
        let n = ffi_try!(g
            .step_with_updates_into(out)
            .map_err(|e| ClifeStatus::from(&e)));
        // SAFETY: update_len is non-null and valid per caller contract.
        unsafe { *update_len = n as u64 };
        ClifeStatus::Ok as i32
    })
}

/// Write the grid width to `width_out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn clife_get_width(grid: u64, width_out: *mut u32) -> i32 {
    ffi_guard!({
        if width_out.is_null() {
            return ClifeStatus::InvalidArgument as i32;
        }
        let registry = ffi_lock!(GRIDS);
        let g = ffi_try!(registry.grid(grid));
        // SAFETY: width_out is non-null and valid per caller contract.
        unsafe { *width_out = g.width() };
        ClifeStatus::Ok as i32
    })
}

/// Write the grid height to `height_out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn clife_get_height(grid: u64, height_out: *mut u32) -> i32 {
    ffi_guard!({
        if height_out.is_null() {
            return ClifeStatus::InvalidArgument as i32;
        }
        let registry = ffi_lock!(GRIDS);
        let g = ffi_try!(registry.grid(grid));
        // SAFETY: height_out is non-null and valid per caller contract.
        unsafe { *height_out = g.height() };
        ClifeStatus::Ok as i32
    })
}

/// Write the state of cell `(x, y)` to `state_out`.
///
/// Returns `CLIFE_STATUS_OUT_OF_BOUNDS` for a coordinate outside the grid.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn clife_get_cell(grid: u64, x: u32, y: u32, state_out: *mut bool) -> i32 {
    ffi_guard!({
        if state_out.is_null() {
            return ClifeStatus::InvalidArgument as i32;
        }
        let registry = ffi_lock!(GRIDS);
        let g = ffi_try!(registry.grid(grid));
        let state = ffi_try!(g.checked_get(x, y).map_err(|e| ClifeStatus::from(&e)));
        // SAFETY: state_out is non-null and valid per caller contract.
        unsafe { *state_out = state };
        ClifeStatus::Ok as i32
    })
}

/// Set the state of cell `(x, y)`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn clife_set_cell(grid: u64, x: u32, y: u32, state: bool) -> i32 {
    ffi_guard!({
        let mut registry = ffi_lock!(GRIDS);
        let g = ffi_try!(registry.grid_mut(grid));
        ffi_try!(g.checked_set(x, y, state).map_err(|e| ClifeStatus::from(&e)));
        ClifeStatus::Ok as i32
    })
}

/// Serialise cell states into `buffer`.
///
/// `*written_out` receives the number of bytes written, or 0 with
/// `CLIFE_STATUS_BUFFER_TOO_SMALL` if `buff_len` is shorter than
/// `height * ceil(width / 8)`. After a failure the buffer contents are
/// meaningless.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn clife_serialise(
    grid: u64,
    buffer: *mut u8,
    buff_len: usize,
    written_out: *mut usize,
) -> i32 {
    ffi_guard!({
        if written_out.is_null() || (buffer.is_null() && buff_len != 0) {
            return ClifeStatus::InvalidArgument as i32;
        }
        // SAFETY: written_out is non-null and valid per caller contract.
        unsafe { *written_out = 0 };

        let registry = ffi_lock!(GRIDS);
        let g = ffi_try!(registry.grid(grid));
        let required = clife_codec::required_len(g.width(), g.height());
        if buff_len < required {
            return ClifeStatus::BufferTooSmall as i32;
        }
        // SAFETY: buffer points to buff_len >= required writable bytes.
        let out = unsafe { std::slice::from_raw_parts_mut(buffer, required) };
        let n = ffi_try!(clife_codec::serialize(g, out).map_err(|e| ClifeStatus::from(&e)));
        // SAFETY: written_out is non-null and valid per caller contract.
        unsafe { *written_out = n };
        ClifeStatus::Ok as i32
    })
}

/// Deserialise cell states from `buffer`.
///
/// `*consumed_out` receives the number of bytes consumed. A value smaller
/// than `height * ceil(width / 8)` means the input ran out and the
/// remaining cells kept their previous state; this is not reported as an
/// error.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn clife_deserialise(
    grid: u64,
    buffer: *const u8,
    buff_len: usize,
    consumed_out: *mut usize,
) -> i32 {
    ffi_guard!({
        if consumed_out.is_null() || (buffer.is_null() && buff_len != 0) {
            return ClifeStatus::InvalidArgument as i32;
        }
        let bytes: &[u8] = if buff_len == 0 {
            &[]
        } else {
            // SAFETY: buffer points to buff_len readable bytes.
            unsafe { std::slice::from_raw_parts(buffer, buff_len) }
        };

        let mut registry = ffi_lock!(GRIDS);
        let g = ffi_try!(registry.grid_mut(grid));
        let consumed = clife_codec::deserialize(g, bytes);
        // SAFETY: consumed_out is non-null and valid per caller contract.
        unsafe { *consumed_out = consumed };
        ClifeStatus::Ok as i32
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    fn new_grid(width: u32, height: u32) -> u64 {
        let mut h = 0u64;
        assert_eq!(clife_new(width, height, &mut h), ClifeStatus::Ok as i32);
        h
    }

    fn cell(h: u64, x: u32, y: u32) -> bool {
        let mut state = false;
        assert_eq!(clife_get_cell(h, x, y, &mut state), ClifeStatus::Ok as i32);
        state
    }

    #[test]
    fn lifecycle_and_dimensions() {
        let h = new_grid(7, 4);
        let (mut w, mut ht) = (0u32, 0u32);
        assert_eq!(clife_get_width(h, &mut w), 0);
        assert_eq!(clife_get_height(h, &mut ht), 0);
        assert_eq!((w, ht), (7, 4));
        assert_eq!(clife_delete(h), 0);
        assert_eq!(clife_delete(h), ClifeStatus::InvalidHandle as i32);
        assert_eq!(clife_step(h), ClifeStatus::InvalidHandle as i32);
    }

    #[test]
    fn new_rejects_bad_arguments() {
        let mut h = 0u64;
        assert_eq!(
            clife_new(0, 3, &mut h),
            ClifeStatus::InvalidArgument as i32
        );
        assert_eq!(
            clife_new(3, 3, ptr::null_mut()),
            ClifeStatus::InvalidArgument as i32
        );
    }

    #[test]
    fn cell_access_and_bounds() {
        let h = new_grid(3, 2);
        assert_eq!(clife_set_cell(h, 2, 1, true), 0);
        assert!(cell(h, 2, 1));
        assert!(!cell(h, 1, 1));
        let mut state = false;
        assert_eq!(
            clife_get_cell(h, 3, 0, &mut state),
            ClifeStatus::OutOfBounds as i32
        );
        assert_eq!(
            clife_set_cell(h, 0, 2, true),
            ClifeStatus::OutOfBounds as i32
        );
        clife_delete(h);
    }

    #[test]
    fn step_requires_rule() {
        let h = new_grid(3, 3);
        assert_eq!(clife_step(h), ClifeStatus::RuleNotConfigured as i32);
        assert_eq!(clife_set_default_rule(h), 0);
        assert_eq!(clife_step(h), 0);
        clife_delete(h);
    }

    #[test]
    fn step_get_updates_reports_blinker() {
        let h = new_grid(5, 5);
        clife_set_rule(h, 8, 12);
        for x in 1..4 {
            clife_set_cell(h, x, 2, true);
        }

        let mut buf = [ClifePointState::default(); 25];
        let mut n = 99u64;
        assert_eq!(
            clife_step_get_updates(h, buf.as_mut_ptr(), buf.len() as u64, &mut n),
            0
        );
        assert_eq!(n, 4);
        assert_eq!(
            buf[0],
            ClifePointState {
                state: true,
                x: 2,
                y: 1
            }
        );
        assert!(cell(h, 2, 1));
        assert!(!cell(h, 1, 2));
        clife_delete(h);
    }

    #[test]
    #[allow(unsafe_code)]
    fn step_get_updates_fills_uninitialised_buffer() {
        let h = new_grid(5, 5);
        clife_set_default_rule(h);
        for x in 1..4 {
            clife_set_cell(h, x, 2, true);
        }

        let mut buf: Vec<ClifePointState> = Vec::with_capacity(25);
        let mut n = 0u64;
        assert_eq!(
            clife_step_get_updates(h, buf.as_mut_ptr(), 25, &mut n),
            0
        );
        // SAFETY: the call reported n initialised records.
        unsafe { buf.set_len(n as usize) };
        assert_eq!(
            buf,
            [
                ClifePointState { state: true, x: 2, y: 1 },
                ClifePointState { state: false, x: 1, y: 2 },
                ClifePointState { state: false, x: 3, y: 2 },
                ClifePointState { state: true, x: 2, y: 3 },
            ]
        );
        clife_delete(h);
    }

    #[test]
    fn set_cell_after_step() {
        let h = new_grid(4, 4);
        clife_set_default_rule(h);
        clife_set_cell(h, 1, 1, true);
        assert_eq!(clife_step(h), 0);
        assert_eq!(clife_set_cell(h, 3, 3, true), 0);
        assert!(cell(h, 3, 3));
        assert!(!cell(h, 1, 1));

        let mut buf = [0u8; 4];
        let mut written = 0usize;
        clife_serialise(h, buf.as_mut_ptr(), buf.len(), &mut written);
        assert_eq!(buf, [0x00, 0x00, 0x00, 0x10]);
        clife_delete(h);
    }

    #[test]
    fn zero_and_stale_handles_are_rejected() {
        let mut w = 0u32;
        assert_eq!(
            clife_get_width(0, &mut w),
            ClifeStatus::InvalidHandle as i32
        );
        let h = new_grid(2, 2);
        assert_eq!(clife_delete(h), 0);
        let fresh = new_grid(2, 2);
        assert_ne!(fresh, h);
        assert_eq!(
            clife_set_cell(h, 0, 0, true),
            ClifeStatus::InvalidHandle as i32
        );
        clife_delete(fresh);
    }

    #[test]
    fn step_get_updates_short_buffer_is_atomic() {
        let h = new_grid(5, 5);
        clife_set_default_rule(h);
        for x in 1..4 {
            clife_set_cell(h, x, 2, true);
        }

        let mut buf = [ClifePointState::default(); 2];
        let mut n = 99u64;
        assert_eq!(
            clife_step_get_updates(h, buf.as_mut_ptr(), 2, &mut n),
            ClifeStatus::BufferTooSmall as i32
        );
        assert_eq!(n, 0);
        assert_eq!(
            clife_step_get_updates(h, ptr::null_mut(), 0, &mut n),
            ClifeStatus::BufferTooSmall as i32
        );
        assert!(cell(h, 1, 2));
        assert!(!cell(h, 2, 1));

        assert_eq!(
            clife_step_get_updates(h, ptr::null_mut(), 4, &mut n),
            ClifeStatus::InvalidArgument as i32
        );
        clife_delete(h);
    }

    #[test]
    fn serialise_and_deserialise() {
        let h = new_grid(9, 2);
        clife_set_cell(h, 8, 0, true);
        clife_set_cell(h, 0, 1, true);

        let mut buf = [0u8; 4];
        let mut written = 0usize;
        assert_eq!(
            clife_serialise(h, buf.as_mut_ptr(), buf.len(), &mut written),
            0
        );
        assert_eq!(written, 4);
        assert_eq!(buf, [0x00, 0x80, 0x80, 0x00]);

        let mut short = [0u8; 3];
        assert_eq!(
            clife_serialise(h, short.as_mut_ptr(), short.len(), &mut written),
            ClifeStatus::BufferTooSmall as i32
        );
        assert_eq!(written, 0);

        let other = new_grid(9, 2);
        let mut consumed = 0usize;
        assert_eq!(
            clife_deserialise(other, buf.as_ptr(), buf.len(), &mut consumed),
            0
        );
        assert_eq!(consumed, 4);
        assert!(cell(other, 8, 0));
        assert!(cell(other, 0, 1));

        assert_eq!(
            clife_deserialise(other, buf.as_ptr(), 3, &mut consumed),
            0
        );
        assert_eq!(consumed, 3);

        clife_delete(h);
        clife_delete(other);
    }
}
