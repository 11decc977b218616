//! Core types for the reversible operation engine.
//!
//! This module contains the pure building blocks:
//! - Lifecycle states via the `State` trait
//! - Reversible operations via the `Operation` trait
//! - Submission requests and operation kinds
//!
//! All logic in this module is pure (no side effects); mutation happens only
//! when the engine applies an accepted operation.

mod operation;
mod state;

pub mod macros;

pub use operation::{Entity, Operation, OperationKind, OperationRequest};
pub use state::State;
