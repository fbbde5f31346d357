//! C FFI bindings for the clife cellular automaton engine.
//!
//! Mirrors the classic `clife_*` C interface: grids are created and
//! destroyed explicitly, every call returns a [`ClifeStatus`] code, and
//! results travel through caller-owned out-parameters. Grids are addressed
//! by `u64` handles instead of raw pointers, so a stale or double-freed
//! handle yields `CLIFE_STATUS_INVALID_HANDLE` rather than undefined
//! behaviour.
//!
//! Every entry point catches panics and reports `CLIFE_STATUS_PANICKED`.
//! The grid registry is guarded by a single mutex; calls on the same grid
//! are serialised. Handles are issued from a forward-only counter, so a
//! deleted grid's handle never resolves again.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

/// Run an FFI body, converting a panic into `ClifeStatus::Panicked`.
macro_rules! ffi_guard {
    ($body:block) => {
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| -> i32 { $body })) {
            Ok(status) => status,
            Err(_) => {
                tracing::warn!("panic caught at FFI boundary");
                $crate::status::ClifeStatus::Panicked as i32
            }
        }
    };
}

/// Lock a mutex, returning `ClifeStatus::InternalError` if it is poisoned.
macro_rules! ffi_lock {
    ($mutex:expr) => {
        match $mutex.lock() {
            Ok(guard) => guard,
            Err(_) => return $crate::status::ClifeStatus::InternalError as i32,
        }
    };
}

/// Unwrap a `Result<T, ClifeStatus>`, returning the status code on error.
macro_rules! ffi_try {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(status) => {
                let status: $crate::status::ClifeStatus = status;
                return status as i32;
            }
        }
    };
}

mod registry;
pub mod grid;
pub mod status;
pub mod types;

pub use grid::{
    clife_delete, clife_deserialise, clife_get_cell, clife_get_height, clife_get_width,
    clife_new, clife_serialise, clife_set_cell, clife_set_default_rule, clife_set_rule,
    clife_step, clife_step_get_updates,
};
pub use status::ClifeStatus;
pub use types::ClifePointState;
