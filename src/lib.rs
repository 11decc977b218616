//! Reverso: a reversible operation engine.
//!
//! Reverso unifies three mechanisms behind one composition root:
//!
//! - **Command history**: every accepted operation is recorded with captured
//!   inverse data, giving fine-grained undo (and redo with branch-discard
//!   semantics).
//! - **Snapshot store**: full-entity checkpoints usable as a coarser
//!   rollback mechanism, independent of the command history.
//! - **Lifecycle state machine**: a pure-data transition table deciding
//!   which operations are legal from the entity's current state, fed by an
//!   ordered, short-circuiting validator chain that gates whether a
//!   submission may be attempted at all.
//!
//! The engine is single-actor: all mutation goes through `&mut self` on one
//! [`Engine`](engine::Engine) instance, and every rejection is a typed value
//! returned before anything is touched.
//!
//! # Example
//!
//! ```rust
//! use reverso::core::{Operation, OperationKind, OperationRequest};
//! use reverso::engine::{Engine, UndoOutcome};
//! use reverso::machine::TransitionTable;
//! use reverso::state_enum;
//!
//! state_enum! {
//!     enum TicketState {
//!         Open,
//!         InReview,
//!         Closed,
//!     }
//!     terminal: [Closed]
//! }
//!
//! #[derive(Clone, Debug, PartialEq, Default, serde::Serialize, serde::Deserialize)]
//! struct Ticket {
//!     assignee: Option<String>,
//! }
//!
//! #[derive(Clone, Debug)]
//! struct Assign(Option<String>);
//!
//! impl Operation<Ticket> for Assign {
//!     fn apply(&self, ticket: &mut Ticket) {
//!         ticket.assignee = self.0.clone();
//!     }
//!
//!     fn invert(&self, before: &Ticket) -> Self {
//!         Assign(before.assignee.clone())
//!     }
//! }
//!
//! let table = TransitionTable::builder()
//!     .on(TicketState::Open, OperationKind::Proceed, TicketState::InReview)
//!     .on(TicketState::InReview, OperationKind::Proceed, TicketState::Closed)
//!     .build()
//!     .unwrap();
//!
//! let mut engine = Engine::builder()
//!     .initial_state(TicketState::Open)
//!     .table(table)
//!     .build()
//!     .unwrap();
//!
//! engine
//!     .submit(OperationRequest::proceed(Assign(Some("ana".into()))))
//!     .unwrap();
//! assert_eq!(engine.current_state(), &TicketState::InReview);
//!
//! let undone = engine.undo();
//! assert!(matches!(undone, UndoOutcome::Undone { .. }));
//! assert_eq!(engine.current_state(), &TicketState::Open);
//! ```

pub mod core;
pub mod engine;
pub mod history;
pub mod machine;
pub mod snapshot;
pub mod validate;

// Re-export commonly used types
pub use self::core::{Entity, Operation, OperationKind, OperationRequest, State};
pub use engine::{Accepted, Engine, EngineBuilder, RedoOutcome, SubmitError, UndoOutcome};
pub use history::{Command, CommandHistory};
pub use machine::{TransitionError, TransitionTable};
pub use snapshot::{Snapshot, SnapshotStore};
pub use validate::{ValidationFailure, Validator, ValidatorChain};
