//! Lifecycle state machine: the transition table and its errors.
//!
//! The machine is pure data, a [`TransitionTable`] mapping `(state, kind)`
//! pairs to successor states, plus resolution logic that distinguishes
//! terminal absorption from a plain missing mapping.

mod table;

pub use table::{TableBuildError, TransitionEntry, TransitionTable, TransitionTableBuilder};

use crate::core::OperationKind;
use thiserror::Error;

/// Rejections produced by transition resolution.
///
/// Both variants are business outcomes, not faults: the engine returns them
/// to the caller without mutating anything.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransitionError {
    /// The current state defines no mapping for the requested kind.
    #[error("no transition from state '{from}' for {kind:?}")]
    InvalidTransition {
        /// Name of the current state.
        from: String,
        /// The requested operation kind.
        kind: OperationKind,
    },

    /// The current state is terminal; no further operation is legal.
    #[error("state '{state}' is terminal; no further operations are legal")]
    AlreadyTerminal {
        /// Name of the terminal state.
        state: String,
    },
}
