//! Command history: fine-grained undo and redo over executed operations.
//!
//! Stores executed commands as forward/inverse operation pairs rather than
//! full entity snapshots. Undo always reverses the most recently applied
//! command (LIFO); commands are never reordered. Recording a new command
//! clears the redo stack: once a new operation lands after an undo, the
//! undone branch is unreachable (branching-history semantics).
//!
//! With a capacity set, the oldest command is evicted on overflow by folding
//! its forward operation into the replay baseline, so replaying the retained
//! suffix from the baseline still reproduces the current entity.

use crate::core::{Operation, OperationKind, State};
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use tracing::trace;
use uuid::Uuid;

/// An executed reversible command.
///
/// Owns the forward operation as applied, the inverse captured from the
/// pre-application entity, and the lifecycle states on either side of the
/// transition.
#[derive(Clone, Debug)]
pub struct Command<S: State, Op> {
    /// Unique identifier assigned at execution time.
    pub id: Uuid,
    /// The lifecycle kind this command was submitted as.
    pub kind: OperationKind,
    /// The operation as applied.
    pub forward: Op,
    /// The inverse operation, captured before application.
    pub inverse: Op,
    /// Lifecycle state before execution.
    pub from_state: S,
    /// Lifecycle state after execution.
    pub to_state: S,
    /// When the command was executed.
    pub executed_at: DateTime<Utc>,
}

/// LIFO history of executed commands with undo and redo.
///
/// The history does not execute forward operations itself; the engine
/// applies an accepted operation and then [`record`](Self::record)s the
/// resulting command. Undo and redo, by contrast, apply the stored inverse
/// or forward operation directly to the entity passed in.
#[derive(Clone, Debug)]
pub struct CommandHistory<E, S: State, Op> {
    applied: VecDeque<Command<S, Op>>,
    undone: Vec<Command<S, Op>>,
    capacity: Option<usize>,
    /// Entity value that replaying `applied` starts from. Advanced when an
    /// old command is evicted to keep replay faithful for the retained
    /// suffix.
    baseline: E,
}

impl<E, S, Op> CommandHistory<E, S, Op>
where
    E: Clone,
    S: State,
    Op: Operation<E>,
{
    /// Create an unbounded history whose replay starts from `initial`.
    pub fn new(initial: E) -> Self {
        Self {
            applied: VecDeque::new(),
            undone: Vec::new(),
            capacity: None,
            baseline: initial,
        }
    }

    /// Create a bounded history; the oldest command is evicted on overflow.
    pub fn with_capacity(initial: E, capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::new(initial)
        }
    }

    /// Number of applied (still undoable) commands.
    pub fn len(&self) -> usize {
        self.applied.len()
    }

    /// Whether no applied commands remain.
    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }

    /// Number of undone commands available for redo.
    pub fn redo_len(&self) -> usize {
        self.undone.len()
    }

    /// Whether undo is available.
    pub fn can_undo(&self) -> bool {
        !self.applied.is_empty()
    }

    /// Whether redo is available.
    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    /// Applied commands, oldest first.
    pub fn commands(&self) -> impl Iterator<Item = &Command<S, Op>> {
        self.applied.iter()
    }

    /// Record an already-applied command.
    ///
    /// Clears the redo stack: previously undone commands become unreachable
    /// once a new operation is executed. Evicts the oldest command if the
    /// capacity is exceeded.
    pub fn record(&mut self, command: Command<S, Op>) {
        if !self.undone.is_empty() {
            trace!(cleared = self.undone.len(), "redo stack cleared");
            self.undone.clear();
        }
        self.applied.push_back(command);
        self.enforce_capacity();
    }

    /// Evicts oldest commands until the capacity is met, folding their
    /// forward operations into the replay baseline.
    fn enforce_capacity(&mut self) {
        let Some(capacity) = self.capacity else {
            return;
        };
        while self.applied.len() > capacity {
            if let Some(oldest) = self.applied.pop_front() {
                oldest.forward.apply(&mut self.baseline);
                trace!(command = %oldest.id, "evicted oldest command into baseline");
            }
        }
    }

    /// Undo the most recently applied command.
    ///
    /// Applies the stored inverse to `entity`, moves the command to the redo
    /// stack, and returns a reference to it so the caller can restore the
    /// lifecycle state from `from_state`. Returns `None` on an empty
    /// history, a defined empty result rather than a failure.
    pub fn undo(&mut self, entity: &mut E) -> Option<&Command<S, Op>> {
        let command = self.applied.pop_back()?;
        command.inverse.apply(entity);
        self.undone.push(command);
        self.undone.last()
    }

    /// Redo the most recently undone command.
    ///
    /// Reapplies the stored forward operation to `entity`, moves the command
    /// back to the applied history, and returns a reference to it. Returns
    /// `None` when nothing has been undone.
    pub fn redo(&mut self, entity: &mut E) -> Option<&Command<S, Op>> {
        let command = self.undone.pop()?;
        command.forward.apply(entity);
        self.applied.push_back(command);
        self.enforce_capacity();
        self.applied.back()
    }

    /// Replay every surviving forward operation from the baseline.
    ///
    /// For a correctly captured history this reproduces the current entity
    /// exactly (replay determinism).
    pub fn replay(&self) -> E {
        let mut entity = self.baseline.clone();
        for command in &self.applied {
            command.forward.apply(&mut entity);
        }
        entity
    }
}
