//! Error taxonomies for engine construction and submission.

use crate::machine::TransitionError;
use crate::validate::ValidationFailure;
use thiserror::Error;

/// Rejections returned by [`Engine::submit`](crate::engine::Engine::submit).
///
/// Every variant is a recoverable business outcome produced *before* any
/// mutation: a rejected submission leaves the entity, both histories, and
/// the current state untouched.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SubmitError {
    /// A validator rejected the raw input.
    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    /// The transition table rejected the requested kind
    /// (invalid transition or terminal state).
    #[error(transparent)]
    Transition(#[from] TransitionError),
}

/// Errors that can occur when building an engine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("initial state not specified. Call .initial_state(state) before .build()")]
    MissingInitialState,

    #[error("transition table not specified. Call .table(table) before .build()")]
    MissingTable,
}
