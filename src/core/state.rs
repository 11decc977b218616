//! Core State trait for lifecycle states.
//!
//! Every entity managed by the engine carries a lifecycle state implementing
//! this trait. All methods are pure inspections with no side effects.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for lifecycle states.
///
/// States are immutable values describing the entity's current position in
/// its lifecycle. The transition table decides which operations are legal
/// from each state; terminal states absorb every operation.
///
/// # Required Traits
///
/// - `Clone`: states are captured into commands for undo
/// - `PartialEq`: states are compared during transition resolution
/// - `Debug`: states must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: states must be serializable for persistence
///
/// # Example
///
/// ```rust
/// use reverso::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum OrderState {
///     Pending,
///     Payment,
///     Delivered,
///     Cancelled,
/// }
///
/// impl State for OrderState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Pending => "Pending",
///             Self::Payment => "Payment",
///             Self::Delivered => "Delivered",
///             Self::Cancelled => "Cancelled",
///         }
///     }
///
///     fn is_terminal(&self) -> bool {
///         matches!(self, Self::Delivered | Self::Cancelled)
///     }
/// }
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    ///
    /// Returns a static string reference for zero-cost naming.
    fn name(&self) -> &str;

    /// Check if this is a terminal state.
    ///
    /// Terminal states are absorbing: once reached, every further submission
    /// is rejected with `AlreadyTerminal` and never mutates the entity.
    ///
    /// Default implementation returns `false`.
    fn is_terminal(&self) -> bool {
        false
    }
}
