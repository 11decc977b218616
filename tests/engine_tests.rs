//! End-to-end tests for the engine: submission gating, undo/redo semantics,
//! and checkpoint rollback over a realistic order workflow.

use reverso::core::{Operation, OperationKind, OperationRequest};
use reverso::engine::{Engine, RedoOutcome, SubmitError, UndoOutcome};
use reverso::machine::{TransitionError, TransitionTable};
use reverso::state_enum;
use reverso::validate::Validator;
use serde::{Deserialize, Serialize};

state_enum! {
    enum OrderState {
        Pending,
        Payment,
        Delivered,
        Cancelled,
    }
    terminal: [Delivered, Cancelled]
}

#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
struct Order {
    total_cents: i64,
    notes: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
enum OrderOp {
    SetTotal { cents: i64 },
    AddNote { text: String },
    RemoveLastNote,
}

impl Operation<Order> for OrderOp {
    fn apply(&self, order: &mut Order) {
        match self {
            Self::SetTotal { cents } => order.total_cents = *cents,
            Self::AddNote { text } => order.notes.push(text.clone()),
            Self::RemoveLastNote => {
                order.notes.pop();
            }
        }
    }

    fn invert(&self, before: &Order) -> Self {
        match self {
            Self::SetTotal { .. } => Self::SetTotal {
                cents: before.total_cents,
            },
            Self::AddNote { .. } => Self::RemoveLastNote,
            Self::RemoveLastNote => match before.notes.last() {
                Some(text) => Self::AddNote { text: text.clone() },
                None => Self::RemoveLastNote,
            },
        }
    }
}

fn order_table() -> TransitionTable<OrderState> {
    TransitionTable::builder()
        .on(
            OrderState::Pending,
            OperationKind::Proceed,
            OrderState::Payment,
        )
        .on(
            OrderState::Pending,
            OperationKind::Cancel,
            OrderState::Cancelled,
        )
        .on(
            OrderState::Payment,
            OperationKind::Proceed,
            OrderState::Delivered,
        )
        .on(
            OrderState::Payment,
            OperationKind::Cancel,
            OrderState::Cancelled,
        )
        .build()
        .unwrap()
}

fn order_engine() -> Engine<OrderState, Order, OrderOp> {
    Engine::builder()
        .initial_state(OrderState::Pending)
        .table(order_table())
        .build()
        .unwrap()
}

fn set_total(cents: i64) -> OperationRequest<OrderOp> {
    OperationRequest::proceed(OrderOp::SetTotal { cents })
}

fn add_note(text: &str) -> OperationRequest<OrderOp> {
    OperationRequest::proceed(OrderOp::AddNote {
        text: text.to_string(),
    })
}

#[test]
fn replaying_accepted_commands_reproduces_final_entity() {
    let mut engine = order_engine();
    engine.submit(set_total(1200)).unwrap();
    engine.submit(add_note("leave at door")).unwrap();

    assert_eq!(engine.replay(), engine.entity().clone());
}

#[test]
fn submit_then_undo_restores_entity_and_state_exactly() {
    let mut engine = order_engine();
    let entity_before = engine.entity().clone();
    let state_before = engine.current_state().clone();

    engine.submit(set_total(4200)).unwrap();
    let outcome = engine.undo();

    assert!(matches!(outcome, UndoOutcome::Undone { .. }));
    assert_eq!(engine.entity(), &entity_before);
    assert_eq!(engine.current_state(), &state_before);
}

#[test]
fn submitting_after_undo_discards_redo_branch() {
    let mut engine = order_engine();
    engine.submit(set_total(100)).unwrap(); // A
    engine.submit(add_note("gift wrap")).unwrap(); // B
    engine.undo(); // B undone, redoable
    engine.submit(add_note("no gift wrap")).unwrap(); // C discards B

    assert_eq!(engine.redo(), RedoOutcome::Empty);
    assert_eq!(engine.entity().notes, vec!["no gift wrap".to_string()]);
}

#[test]
fn unmapped_kind_rejects_without_mutating_anything() {
    // Table without a Cancel entry for Payment.
    let table = TransitionTable::builder()
        .on(
            OrderState::Pending,
            OperationKind::Proceed,
            OrderState::Payment,
        )
        .on(
            OrderState::Payment,
            OperationKind::Proceed,
            OrderState::Delivered,
        )
        .build()
        .unwrap();

    let mut engine: Engine<OrderState, Order, OrderOp> = Engine::builder()
        .initial_state(OrderState::Pending)
        .table(table)
        .build()
        .unwrap();

    engine.submit(set_total(500)).unwrap();
    let history_before = engine.history_len();
    let snapshots_before = engine.snapshot_count();
    let entity_before = engine.entity().clone();

    let err = engine
        .submit(OperationRequest::cancel(OrderOp::RemoveLastNote))
        .unwrap_err();

    assert!(matches!(
        err,
        SubmitError::Transition(TransitionError::InvalidTransition {
            kind: OperationKind::Cancel,
            ..
        })
    ));
    assert_eq!(engine.history_len(), history_before);
    assert_eq!(engine.snapshot_count(), snapshots_before);
    assert_eq!(engine.entity(), &entity_before);
    assert_eq!(engine.current_state(), &OrderState::Payment);
}

#[test]
fn terminal_state_absorbs_both_kinds_forever() {
    let mut engine = order_engine();
    engine.submit(set_total(100)).unwrap();
    engine.submit(add_note("on the way")).unwrap();
    assert_eq!(engine.current_state(), &OrderState::Delivered);

    let entity_before = engine.entity().clone();
    for _ in 0..3 {
        for request in [set_total(999), OperationRequest::cancel(OrderOp::RemoveLastNote)] {
            let err = engine.submit(request).unwrap_err();
            assert!(matches!(
                err,
                SubmitError::Transition(TransitionError::AlreadyTerminal { .. })
            ));
        }
    }
    assert_eq!(engine.entity(), &entity_before);
    assert_eq!(engine.current_state(), &OrderState::Delivered);
}

#[test]
fn rollback_restores_second_checkpoint_not_first() {
    let mut engine = order_engine();

    engine.submit(set_total(100)).unwrap();
    engine.checkpoint();
    engine.submit(add_note("first note")).unwrap();
    engine.checkpoint();

    // Further mutation after the second checkpoint, never checkpointed.
    let mut dirty = engine.entity().clone();
    assert_eq!(dirty.notes.len(), 1);
    dirty.notes.push("uncommitted".into());

    let restored = engine.rollback_one().clone();
    assert_eq!(restored.total_cents, 100);
    assert_eq!(restored.notes, vec!["first note".to_string()]);
    assert_eq!(engine.snapshot_count(), 1);

    // One more rollback steps back to the first checkpoint.
    let restored = engine.rollback_one().clone();
    assert_eq!(restored.total_cents, 100);
    assert!(restored.notes.is_empty());
}

#[test]
fn pending_to_delivered_walkthrough() {
    let mut engine = order_engine();
    assert_eq!(engine.current_state(), &OrderState::Pending);

    let accepted = engine.submit(set_total(2500)).unwrap();
    assert_eq!(accepted.new_state, OrderState::Payment);

    let accepted = engine.submit(add_note("paid in full")).unwrap();
    assert_eq!(accepted.new_state, OrderState::Delivered);

    let err = engine.submit(set_total(0)).unwrap_err();
    assert!(matches!(
        err,
        SubmitError::Transition(TransitionError::AlreadyTerminal { .. })
    ));

    assert_eq!(engine.history_len(), 2);
    let outcome = engine.undo();
    assert!(matches!(
        outcome,
        UndoOutcome::Undone {
            restored_state: OrderState::Payment,
            ..
        }
    ));
    assert_eq!(engine.current_state(), &OrderState::Payment);
    assert_eq!(engine.history_len(), 1);
}

#[test]
fn validator_rejection_reports_index_and_reason() {
    let mut engine: Engine<OrderState, Order, OrderOp> = Engine::builder()
        .initial_state(OrderState::Pending)
        .table(order_table())
        .validator(Validator::from_pred(
            "note-not-empty",
            |req: &OperationRequest<OrderOp>| {
                !matches!(&req.operation, OrderOp::AddNote { text } if text.is_empty())
            },
            "note must not be empty",
        ))
        .validator(Validator::new(
            "total-in-range",
            |req: &OperationRequest<OrderOp>| match req.operation {
                OrderOp::SetTotal { cents } if !(0..=1_000_000).contains(&cents) => {
                    Err(format!("total {cents} out of range"))
                }
                _ => Ok(()),
            },
        ))
        .build()
        .unwrap();

    let err = engine.submit(set_total(-5)).unwrap_err();
    match err {
        SubmitError::Validation(failure) => {
            assert_eq!(failure.index, 1);
            assert_eq!(failure.name, "total-in-range");
            assert!(failure.reason.contains("-5"));
        }
        other => panic!("expected validation failure, got {other:?}"),
    }

    // Rejected before any mutation.
    assert_eq!(engine.history_len(), 0);
    assert_eq!(engine.current_state(), &OrderState::Pending);
    assert_eq!(engine.entity(), &Order::default());
}

#[test]
fn cancel_path_is_undoable_like_any_command() {
    let mut engine = order_engine();
    engine.submit(set_total(100)).unwrap();
    engine
        .submit(OperationRequest::cancel(OrderOp::AddNote {
            text: "customer cancelled".into(),
        }))
        .unwrap();
    assert_eq!(engine.current_state(), &OrderState::Cancelled);

    let outcome = engine.undo();
    assert!(matches!(
        outcome,
        UndoOutcome::Undone {
            restored_state: OrderState::Payment,
            ..
        }
    ));
    assert!(engine.entity().notes.is_empty());
}

#[test]
fn bounded_history_still_replays_retained_suffix() {
    let mut engine: Engine<OrderState, Order, OrderOp> = Engine::builder()
        .initial_state(OrderState::Pending)
        .table(
            TransitionTable::builder()
                .on(
                    OrderState::Pending,
                    OperationKind::Proceed,
                    OrderState::Pending,
                )
                .build()
                .unwrap(),
        )
        .history_capacity(3)
        .build()
        .unwrap();

    for i in 0..10 {
        engine.submit(add_note(&format!("note {i}"))).unwrap();
    }

    assert_eq!(engine.history_len(), 3);
    assert_eq!(engine.replay(), engine.entity().clone());

    // Only the retained suffix is undoable.
    for _ in 0..3 {
        assert!(matches!(engine.undo(), UndoOutcome::Undone { .. }));
    }
    assert_eq!(engine.undo(), UndoOutcome::Empty);
    assert_eq!(engine.entity().notes.len(), 7);
}

#[test]
fn checkpoint_at_session_start_makes_initial_state_recoverable() {
    let mut engine = order_engine();
    engine.checkpoint(); // caller discipline from the store's contract

    engine.submit(set_total(800)).unwrap();
    engine.submit(add_note("x")).unwrap();

    let restored = engine.rollback_one().clone();
    assert_eq!(restored, Order::default());
}
