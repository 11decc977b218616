//! E-commerce Order Workflow
//!
//! This example walks an order through its lifecycle and demonstrates
//! the engine's three mechanisms working together:
//! - Validator chain gating raw submissions
//! - Transition-table gating per lifecycle state
//! - Fine-grained undo/redo and coarse checkpoint rollback
//!
//! Run with: cargo run --example order_workflow

use reverso::core::{Operation, OperationKind, OperationRequest};
use reverso::engine::{Engine, UndoOutcome};
use reverso::machine::TransitionTable;
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
    items: Vec<String>,
}

#[derive(Clone, Debug)]
enum OrderOp {
    AddItem { name: String, price_cents: i64 },
    RemoveLastItem { name: String, price_cents: i64 },
    MarkPaid,
    MarkUnpaid,
}

impl Operation<Order> for OrderOp {
    fn apply(&self, order: &mut Order) {
        match self {
            Self::AddItem { name, price_cents } => {
                order.items.push(name.clone());
                order.total_cents += price_cents;
            }
            Self::RemoveLastItem { price_cents, .. } => {
                order.items.pop();
                order.total_cents -= price_cents;
            }
            Self::MarkPaid | Self::MarkUnpaid => {}
        }
    }

    fn invert(&self, _before: &Order) -> Self {
        match self {
            Self::AddItem { name, price_cents } => Self::RemoveLastItem {
                name: name.clone(),
                price_cents: *price_cents,
            },
            Self::RemoveLastItem { name, price_cents } => Self::AddItem {
                name: name.clone(),
                price_cents: *price_cents,
            },
            Self::MarkPaid => Self::MarkUnpaid,
            Self::MarkUnpaid => Self::MarkPaid,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let table = TransitionTable::builder()
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
        .expect("order transition table is well-formed");

    let mut engine: Engine<OrderState, Order, OrderOp> = Engine::builder()
        .initial_state(OrderState::Pending)
        .table(table)
        .validator(Validator::from_pred(
            "positive-price",
            |req: &OperationRequest<OrderOp>| {
                !matches!(req.operation, OrderOp::AddItem { price_cents, .. } if price_cents <= 0)
            },
            "item price must be positive",
        ))
        .checkpoint_on(OperationKind::Proceed)
        .build()
        .expect("engine configuration is complete");

    println!("=== submitting items ===");
    let accepted = engine
        .submit(OperationRequest::proceed(OrderOp::AddItem {
            name: "keyboard".into(),
            price_cents: 4500,
        }))
        .expect("first item is valid");
    println!(
        "accepted: state={:?}, command={}",
        accepted.new_state, accepted.command_id
    );

    // Validation rejects bad input before anything is touched.
    let rejected = engine.submit(OperationRequest::proceed(OrderOp::AddItem {
        name: "freebie".into(),
        price_cents: 0,
    }));
    println!("rejected: {}", rejected.unwrap_err());

    println!("\n=== finishing the order ===");
    engine
        .submit(OperationRequest::proceed(OrderOp::MarkPaid))
        .expect("payment is legal from Payment state");
    println!(
        "state={:?}, total={} cents, snapshots={}",
        engine.current_state(),
        engine.entity().total_cents,
        engine.snapshot_count()
    );

    // Terminal absorption: Delivered rejects everything.
    let err = engine
        .submit(OperationRequest::proceed(OrderOp::MarkPaid))
        .unwrap_err();
    println!("terminal: {err}");

    println!("\n=== undoing the delivery ===");
    if let UndoOutcome::Undone { restored_state, .. } = engine.undo() {
        println!("undone, back to {restored_state:?}");
    }
    println!(
        "history={}, redo available={}",
        engine.history_len(),
        engine.can_redo()
    );

    println!("\n=== coarse rollback ===");
    let restored = engine.rollback_one();
    println!(
        "rolled back to checkpointed entity: {} item(s), {} cents",
        restored.items.len(),
        restored.total_cents
    );
}
