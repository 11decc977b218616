//! The engine: composition root orchestrating validation, transition
//! legality, execution, and recording.
//!
//! A submission flows validate → resolve transition → execute → record.
//! The first two steps precede any mutation, so a rejected submission leaves
//! the engine byte-for-byte unchanged. The engine owns the entity, the
//! command history, and the snapshot store exclusively; `&mut self` on every
//! mutating method is the single-actor boundary; a multi-threaded host
//! wraps the whole engine in one lock rather than relying on interior
//! locking.

mod builder;
mod error;

pub use builder::EngineBuilder;
pub use error::{BuildError, SubmitError};

use crate::core::{Entity, Operation, OperationKind, OperationRequest, State};
use crate::history::{Command, CommandHistory};
use crate::machine::TransitionTable;
use crate::snapshot::SnapshotStore;
use crate::validate::ValidatorChain;
use chrono::Utc;
use tracing::{debug, trace};
use uuid::Uuid;

/// Successful submission outcome.
#[derive(Clone, Debug, PartialEq)]
pub struct Accepted<S: State> {
    /// Lifecycle state after the transition.
    pub new_state: S,
    /// Identifier of the recorded command.
    pub command_id: Uuid,
}

/// Result of an undo request. `Empty` is a defined result, not a failure.
#[derive(Clone, Debug, PartialEq)]
pub enum UndoOutcome<S: State> {
    /// The most recent command was reversed.
    Undone {
        /// Lifecycle state restored from before the command.
        restored_state: S,
        /// Identifier of the undone command.
        command_id: Uuid,
    },
    /// Nothing left to undo.
    Empty,
}

/// Result of a redo request. `Empty` is a defined result, not a failure.
#[derive(Clone, Debug, PartialEq)]
pub enum RedoOutcome<S: State> {
    /// The most recently undone command was reapplied.
    Redone {
        /// Lifecycle state after the reapplied command.
        new_state: S,
        /// Identifier of the redone command.
        command_id: Uuid,
    },
    /// Nothing left to redo.
    Empty,
}

/// Reversible operation engine.
///
/// Owns the entity and its lifecycle state for the duration of a session and
/// exposes the only mutation surface: [`submit`](Self::submit),
/// [`undo`](Self::undo), [`redo`](Self::redo),
/// [`checkpoint`](Self::checkpoint) and [`rollback_one`](Self::rollback_one).
///
/// # Example
///
/// ```rust
/// use reverso::core::{Operation, OperationKind, OperationRequest};
/// use reverso::engine::Engine;
/// use reverso::machine::TransitionTable;
/// use reverso::state_enum;
///
/// state_enum! {
///     enum OrderState {
///         Pending,
///         Payment,
///         Delivered,
///     }
///     terminal: [Delivered]
/// }
///
/// #[derive(Clone, Debug, PartialEq, Default, serde::Serialize, serde::Deserialize)]
/// struct Order {
///     total_cents: i64,
/// }
///
/// #[derive(Clone, Debug)]
/// struct SetTotal(i64);
///
/// impl Operation<Order> for SetTotal {
///     fn apply(&self, order: &mut Order) {
///         order.total_cents = self.0;
///     }
///
///     fn invert(&self, before: &Order) -> Self {
///         SetTotal(before.total_cents)
///     }
/// }
///
/// let table = TransitionTable::builder()
///     .on(OrderState::Pending, OperationKind::Proceed, OrderState::Payment)
///     .on(OrderState::Payment, OperationKind::Proceed, OrderState::Delivered)
///     .build()
///     .unwrap();
///
/// let mut engine = Engine::builder()
///     .initial_state(OrderState::Pending)
///     .table(table)
///     .build()
///     .unwrap();
///
/// let accepted = engine
///     .submit(OperationRequest::proceed(SetTotal(1250)))
///     .unwrap();
/// assert_eq!(accepted.new_state, OrderState::Payment);
/// assert_eq!(engine.entity().total_cents, 1250);
///
/// engine.undo();
/// assert_eq!(engine.current_state(), &OrderState::Pending);
/// assert_eq!(engine.entity().total_cents, 0);
/// ```
pub struct Engine<S: State, E: Entity, Op: Operation<E>> {
    entity: E,
    current: S,
    initial_state: S,
    table: TransitionTable<S>,
    validators: ValidatorChain<Op>,
    history: CommandHistory<E, S, Op>,
    snapshots: SnapshotStore<E>,
    checkpoint_kinds: Vec<OperationKind>,
}

impl<S: State, E: Entity, Op: Operation<E>> Engine<S, E, Op> {
    /// Start building an engine.
    pub fn builder() -> EngineBuilder<S, E, Op> {
        EngineBuilder::new()
    }

    pub(crate) fn assemble(
        entity: E,
        initial_state: S,
        table: TransitionTable<S>,
        validators: ValidatorChain<Op>,
        history_capacity: Option<usize>,
        checkpoint_kinds: Vec<OperationKind>,
    ) -> Self {
        let history = match history_capacity {
            Some(capacity) => CommandHistory::with_capacity(entity.clone(), capacity),
            None => CommandHistory::new(entity.clone()),
        };
        Self {
            current: initial_state.clone(),
            initial_state,
            entity,
            table,
            validators,
            history,
            snapshots: SnapshotStore::new(),
            checkpoint_kinds,
        }
    }

    /// Submit an operation request.
    ///
    /// Runs the validator chain, then checks transition legality, and only
    /// then executes: capture inverse, apply, record into the command
    /// history, checkpoint if the kind is configured checkpoint-worthy, and
    /// advance the lifecycle state. Both rejection paths return before any
    /// mutation.
    pub fn submit(&mut self, request: OperationRequest<Op>) -> Result<Accepted<S>, SubmitError> {
        self.validators.validate(&request)?;
        let next = self.table.resolve(&self.current, request.kind)?;

        let inverse = request.operation.invert(&self.entity);
        request.operation.apply(&mut self.entity);

        let command_id = Uuid::new_v4();
        self.history.record(Command {
            id: command_id,
            kind: request.kind,
            forward: request.operation,
            inverse,
            from_state: self.current.clone(),
            to_state: next.clone(),
            executed_at: Utc::now(),
        });

        if self.checkpoint_kinds.contains(&request.kind) {
            self.snapshots.checkpoint(&self.entity);
        }

        self.current = next.clone();
        debug!(
            command = %command_id,
            kind = request.kind.name(),
            state = self.current.name(),
            "operation accepted"
        );

        Ok(Accepted {
            new_state: next,
            command_id,
        })
    }

    /// Reverse the most recently applied command.
    ///
    /// Restores both the entity (via the captured inverse) and the lifecycle
    /// state from before the command. On an empty history this is a no-op
    /// reporting [`UndoOutcome::Empty`].
    pub fn undo(&mut self) -> UndoOutcome<S> {
        match self.history.undo(&mut self.entity) {
            Some(command) => {
                let restored_state = command.from_state.clone();
                let command_id = command.id;
                self.current = restored_state.clone();
                debug!(
                    command = %command_id,
                    state = restored_state.name(),
                    "command undone"
                );
                UndoOutcome::Undone {
                    restored_state,
                    command_id,
                }
            }
            None => {
                trace!("undo: nothing to undo");
                UndoOutcome::Empty
            }
        }
    }

    /// Reapply the most recently undone command.
    ///
    /// Any accepted submission since the undo has discarded the redo branch,
    /// in which case this reports [`RedoOutcome::Empty`].
    pub fn redo(&mut self) -> RedoOutcome<S> {
        match self.history.redo(&mut self.entity) {
            Some(command) => {
                let new_state = command.to_state.clone();
                let command_id = command.id;
                self.current = new_state.clone();
                debug!(command = %command_id, state = new_state.name(), "command redone");
                RedoOutcome::Redone {
                    new_state,
                    command_id,
                }
            }
            None => {
                trace!("redo: nothing to redo");
                RedoOutcome::Empty
            }
        }
    }

    /// Record a snapshot of the current entity data, returning its sequence
    /// number.
    ///
    /// Callers that want the pre-session state recoverable must checkpoint
    /// once at session start; see [`SnapshotStore::rollback_one`].
    pub fn checkpoint(&mut self) -> u64 {
        self.snapshots.checkpoint(&self.entity)
    }

    /// Roll the entity back to the most recent checkpoint, consuming it.
    ///
    /// Replaces the entity data with the restored snapshot (or `E::default()`
    /// past the last checkpoint). The lifecycle state and the command history
    /// are untouched: snapshots capture entity data only, and the two
    /// rollback mechanisms are deliberately independent.
    pub fn rollback_one(&mut self) -> &E {
        self.entity = self.snapshots.rollback_one();
        debug!(
            snapshots = self.snapshots.len(),
            "rolled back to checkpoint"
        );
        &self.entity
    }

    /// Current lifecycle state.
    pub fn current_state(&self) -> &S {
        &self.current
    }

    /// The lifecycle state the engine started in.
    pub fn initial_state(&self) -> &S {
        &self.initial_state
    }

    /// Current entity data.
    pub fn entity(&self) -> &E {
        &self.entity
    }

    /// Number of applied (still undoable) commands.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Number of undone commands available for redo.
    pub fn redo_len(&self) -> usize {
        self.history.redo_len()
    }

    /// Number of recorded snapshots.
    pub fn snapshot_count(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether undo is available.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether redo is available.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Replay every surviving command from the history baseline.
    ///
    /// For a correct engine this reproduces the current entity exactly;
    /// exposed for invariant checking and tests.
    pub fn replay(&self) -> E {
        self.history.replay()
    }
}
