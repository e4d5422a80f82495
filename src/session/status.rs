//! Busy-state projection.
//!
//! The visible busy/success/failure indicator is never stored; it is derived
//! on demand from the readiness and outcome flags of the snapshot. While a
//! pipeline runs, both outcome flags are cleared, so the projection falls
//! through to `Busy` without any dedicated "compiling" arm.

use crate::utils::plural::plural_s;

/// What the status indicator shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusyState {
    /// Backend loading, or a compile in flight.
    Busy,
    Success,
    Failure,
}

/// Project readiness and outcome flags onto the indicator state.
pub fn busy_state(backend_ready: bool, success: bool, failure: bool) -> BusyState {
    if backend_ready && failure && !success {
        BusyState::Failure
    } else if backend_ready && success && !failure {
        BusyState::Success
    } else {
        BusyState::Busy
    }
}

/// Status-bar message for the given state.
pub fn status_message(state: BusyState, error_count: usize) -> String {
    match state {
        BusyState::Busy => "Processing...".to_string(),
        BusyState::Success => "Compiled successfully".to_string(),
        BusyState::Failure => format!("({error_count}) Error{}", plural_s(error_count)),
    }
}
