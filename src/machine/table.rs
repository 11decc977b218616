//! Transition table: pure data mapping `(state, kind)` to a successor.

use crate::core::{OperationKind, State};
use crate::machine::TransitionError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single legal transition entry.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionEntry<S: State> {
    /// State the entity must currently be in.
    pub from: S,
    /// Operation kind this entry responds to.
    pub kind: OperationKind,
    /// Successor state after a successful operation.
    pub to: S,
}

/// Errors raised while assembling a transition table.
#[derive(Debug, Error)]
pub enum TableBuildError {
    /// Two entries share the same `(from, kind)` pair.
    #[error("duplicate transition from '{from}' for {kind:?}")]
    DuplicateTransition {
        /// Name of the duplicated source state.
        from: String,
        /// Duplicated operation kind.
        kind: OperationKind,
    },

    /// The table has no entries at all.
    #[error("no transitions defined. Add at least one entry with .on()")]
    Empty,
}

/// Static mapping from `(state, kind)` to a successor state.
///
/// The table is pure data, shared read-only by the engine for its whole
/// lifetime. Lookup scans entries with `PartialEq`, so states need no `Hash`
/// or `Ord` implementation. Extending the lifecycle with a new state means
/// adding entries, never touching existing ones.
///
/// # Example
///
/// ```rust
/// use reverso::core::OperationKind;
/// use reverso::machine::TransitionTable;
/// use reverso::state_enum;
///
/// state_enum! {
///     enum OrderState {
///         Pending,
///         Payment,
///         Delivered,
///         Cancelled,
///     }
///     terminal: [Delivered, Cancelled]
/// }
///
/// let table = TransitionTable::builder()
///     .on(OrderState::Pending, OperationKind::Proceed, OrderState::Payment)
///     .on(OrderState::Pending, OperationKind::Cancel, OrderState::Cancelled)
///     .on(OrderState::Payment, OperationKind::Proceed, OrderState::Delivered)
///     .on(OrderState::Payment, OperationKind::Cancel, OrderState::Cancelled)
///     .build()
///     .unwrap();
///
/// let next = table
///     .resolve(&OrderState::Pending, OperationKind::Proceed)
///     .unwrap();
/// assert_eq!(next, OrderState::Payment);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionTable<S: State> {
    entries: Vec<TransitionEntry<S>>,
}

impl<S: State> TransitionTable<S> {
    /// Start building a table.
    pub fn builder() -> TransitionTableBuilder<S> {
        TransitionTableBuilder::new()
    }

    /// All entries, in declaration order.
    pub fn entries(&self) -> &[TransitionEntry<S>] {
        &self.entries
    }

    /// Resolve the successor for `(current, kind)`.
    ///
    /// Terminal states absorb every kind and reject with `AlreadyTerminal`.
    /// A non-terminal state with no entry for `kind` rejects with
    /// `InvalidTransition` rather than silently succeeding.
    pub fn resolve(&self, current: &S, kind: OperationKind) -> Result<S, TransitionError> {
        if current.is_terminal() {
            return Err(TransitionError::AlreadyTerminal {
                state: current.name().to_string(),
            });
        }

        self.entries
            .iter()
            .find(|entry| entry.from == *current && entry.kind == kind)
            .map(|entry| entry.to.clone())
            .ok_or_else(|| TransitionError::InvalidTransition {
                from: current.name().to_string(),
                kind,
            })
    }

    /// Check whether `(current, kind)` has a legal successor.
    pub fn permits(&self, current: &S, kind: OperationKind) -> bool {
        self.resolve(current, kind).is_ok()
    }
}

/// Builder for transition tables with a fluent API.
///
/// `build()` rejects duplicate `(from, kind)` pairs so each pair maps to
/// exactly one outcome, and rejects empty tables.
pub struct TransitionTableBuilder<S: State> {
    entries: Vec<TransitionEntry<S>>,
}

impl<S: State> TransitionTableBuilder<S> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Declare that `kind` moves the entity from `from` to `to`.
    pub fn on(mut self, from: S, kind: OperationKind, to: S) -> Self {
        self.entries.push(TransitionEntry { from, kind, to });
        self
    }

    /// Build the table, validating entry uniqueness.
    pub fn build(self) -> Result<TransitionTable<S>, TableBuildError> {
        if self.entries.is_empty() {
            return Err(TableBuildError::Empty);
        }

        for (i, entry) in self.entries.iter().enumerate() {
            let shadowed = self.entries[..i]
                .iter()
                .any(|prior| prior.from == entry.from && prior.kind == entry.kind);
            if shadowed {
                return Err(TableBuildError::DuplicateTransition {
                    from: entry.from.name().to_string(),
                    kind: entry.kind,
                });
            }
        }

        Ok(TransitionTable {
            entries: self.entries,
        })
    }
}

impl<S: State> Default for TransitionTableBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}
