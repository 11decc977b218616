//! Reversible operations and submission requests.
//!
//! An [`Operation`] is a unit of work over an entity together with enough
//! captured data to reverse it. The engine calls `invert` against the entity
//! *before* applying the forward operation, so the inverse always restores
//! the pre-application value.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Bound alias for the mutable subject an engine operates on.
///
/// `Default` supplies the documented empty state returned when rolling back
/// past the last recorded checkpoint. Blanket-implemented: any type meeting
/// the bounds is an entity.
pub trait Entity:
    Clone + PartialEq + Debug + Default + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
}

impl<T> Entity for T where
    T: Clone + PartialEq + Debug + Default + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
}

/// The two operation kinds the lifecycle machine models.
///
/// `Proceed` is forward progress; `Cancel` is the abort path. The transition
/// table maps each `(state, kind)` pair to a successor state or a rejection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    /// Forward progress through the lifecycle.
    Proceed,
    /// Abort path out of the lifecycle.
    Cancel,
}

impl OperationKind {
    /// Get the kind's name for display/logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Proceed => "Proceed",
            Self::Cancel => "Cancel",
        }
    }
}

/// A reversible unit of work over an entity.
///
/// `apply` mutates the entity; `invert` captures inverse data from the
/// pre-application entity and returns the operation that undoes this one.
///
/// # Example
///
/// ```rust
/// use reverso::core::Operation;
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct SetTotal {
///     cents: i64,
/// }
///
/// impl Operation<i64> for SetTotal {
///     fn apply(&self, entity: &mut i64) {
///         *entity = self.cents;
///     }
///
///     fn invert(&self, before: &i64) -> Self {
///         SetTotal { cents: *before }
///     }
/// }
///
/// let mut total = 100_i64;
/// let op = SetTotal { cents: 250 };
/// let inverse = op.invert(&total);
/// op.apply(&mut total);
/// assert_eq!(total, 250);
/// inverse.apply(&mut total);
/// assert_eq!(total, 100);
/// ```
pub trait Operation<E>: Clone + Debug + Send + Sync {
    /// Apply this operation to the entity, mutating it in place.
    fn apply(&self, entity: &mut E);

    /// Build the inverse of this operation from the pre-application entity.
    ///
    /// The returned operation, applied to the post-application entity, must
    /// restore `before` exactly.
    fn invert(&self, before: &E) -> Self;
}

/// Raw submission input: the requested kind plus the operation payload.
///
/// This is what the validator chain sees, unmodified, before the engine
/// consults the transition table or touches the entity.
#[derive(Clone, Debug)]
pub struct OperationRequest<Op> {
    /// The lifecycle kind to resolve against the transition table.
    pub kind: OperationKind,
    /// The domain operation to apply if the request is accepted.
    pub operation: Op,
}

impl<Op> OperationRequest<Op> {
    /// Create a request.
    pub fn new(kind: OperationKind, operation: Op) -> Self {
        Self { kind, operation }
    }

    /// Shorthand for a `Proceed` request.
    pub fn proceed(operation: Op) -> Self {
        Self::new(OperationKind::Proceed, operation)
    }

    /// Shorthand for a `Cancel` request.
    pub fn cancel(operation: Op) -> Self {
        Self::new(OperationKind::Cancel, operation)
    }
}
