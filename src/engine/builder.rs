//! Builder for constructing engines with a fluent API.

use crate::core::{Entity, Operation, OperationKind, State};
use crate::engine::error::BuildError;
use crate::engine::Engine;
use crate::machine::TransitionTable;
use crate::validate::{Validator, ValidatorChain};

/// Builder for [`Engine`].
///
/// The initial state and the transition table are required; everything else
/// has a default: `E::default()` entity, empty validator chain, unbounded
/// history, and no checkpoint-worthy kinds.
pub struct EngineBuilder<S: State, E: Entity, Op: Operation<E>> {
    initial_state: Option<S>,
    entity: Option<E>,
    table: Option<TransitionTable<S>>,
    validators: ValidatorChain<Op>,
    history_capacity: Option<usize>,
    checkpoint_kinds: Vec<OperationKind>,
}

impl<S: State, E: Entity, Op: Operation<E>> EngineBuilder<S, E, Op> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial_state: None,
            entity: None,
            table: None,
            validators: ValidatorChain::new(),
            history_capacity: None,
            checkpoint_kinds: Vec::new(),
        }
    }

    /// Set the initial lifecycle state (required).
    pub fn initial_state(mut self, state: S) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Set the initial entity data. Defaults to `E::default()`.
    pub fn entity(mut self, entity: E) -> Self {
        self.entity = Some(entity);
        self
    }

    /// Set the transition table (required).
    pub fn table(mut self, table: TransitionTable<S>) -> Self {
        self.table = Some(table);
        self
    }

    /// Append a validator to the chain. Order of calls is the order the
    /// chain runs in.
    pub fn validator(mut self, validator: Validator<Op>) -> Self {
        self.validators.push(validator);
        self
    }

    /// Replace the whole validator chain.
    pub fn validators(mut self, chain: ValidatorChain<Op>) -> Self {
        self.validators = chain;
        self
    }

    /// Bound the command history; the oldest command is evicted on overflow.
    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = Some(capacity);
        self
    }

    /// Mark an operation kind as checkpoint-worthy: every accepted
    /// submission of this kind also records a snapshot.
    pub fn checkpoint_on(mut self, kind: OperationKind) -> Self {
        if !self.checkpoint_kinds.contains(&kind) {
            self.checkpoint_kinds.push(kind);
        }
        self
    }

    /// Build the engine.
    /// Returns an error if required fields are missing.
    pub fn build(self) -> Result<Engine<S, E, Op>, BuildError> {
        let initial_state = self.initial_state.ok_or(BuildError::MissingInitialState)?;
        let table = self.table.ok_or(BuildError::MissingTable)?;
        let entity = self.entity.unwrap_or_default();

        Ok(Engine::assemble(
            entity,
            initial_state,
            table,
            self.validators,
            self.history_capacity,
            self.checkpoint_kinds,
        ))
    }
}

impl<S: State, E: Entity, Op: Operation<E>> Default for EngineBuilder<S, E, Op> {
    fn default() -> Self {
        Self::new()
    }
}
