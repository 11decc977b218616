//! Ordered, short-circuiting validation of submission requests.
//!
//! A [`ValidatorChain`] is a runtime-configurable ordered list of named
//! checks over the raw [`OperationRequest`]. The first validator that
//! rejects stops the chain; later validators never run, so they can never
//! leak partial side effects. An empty chain always passes.
//!
//! Rejection is a first-class value ([`ValidationFailure`]), never a panic.
//! Validators receive the request by shared reference only, so they cannot
//! mutate the entity or any history.

use crate::core::OperationRequest;
use thiserror::Error;

/// Type alias for validation check functions.
type ValidationCheck<Op> = Box<dyn Fn(&OperationRequest<Op>) -> Result<(), String> + Send + Sync>;

/// Rejection reported by the chain: which validator rejected, and why.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("validator '{name}' (index {index}) rejected the request: {reason}")]
pub struct ValidationFailure {
    /// Position of the rejecting validator in the chain.
    pub index: usize,
    /// Name of the rejecting validator.
    pub name: String,
    /// Human-readable rejection reason.
    pub reason: String,
}

/// A single named check over a submission request.
///
/// # Example
///
/// ```rust
/// use reverso::core::{OperationKind, OperationRequest};
/// use reverso::validate::Validator;
///
/// #[derive(Clone, Debug)]
/// struct Adjust(i64);
///
/// let non_negative = Validator::new("non-negative", |req: &OperationRequest<Adjust>| {
///     if req.operation.0 >= 0 {
///         Ok(())
///     } else {
///         Err(format!("amount {} is negative", req.operation.0))
///     }
/// });
///
/// let ok = OperationRequest::new(OperationKind::Proceed, Adjust(5));
/// assert!(non_negative.check(&ok).is_ok());
///
/// let bad = OperationRequest::new(OperationKind::Proceed, Adjust(-1));
/// assert!(non_negative.check(&bad).is_err());
/// ```
pub struct Validator<Op> {
    name: String,
    check: ValidationCheck<Op>,
}

impl<Op> Validator<Op> {
    /// Create a validator from a full check function.
    ///
    /// The check returns `Ok(())` to pass or `Err(reason)` to reject.
    pub fn new<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&OperationRequest<Op>) -> Result<(), String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            check: Box::new(check),
        }
    }

    /// Create a validator from a predicate and a fixed rejection message.
    pub fn from_pred<F>(name: impl Into<String>, predicate: F, reason: impl Into<String>) -> Self
    where
        F: Fn(&OperationRequest<Op>) -> bool + Send + Sync + 'static,
    {
        let reason = reason.into();
        Self::new(name, move |req| {
            if predicate(req) {
                Ok(())
            } else {
                Err(reason.clone())
            }
        })
    }

    /// The validator's name, carried into rejection diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run this validator against a request.
    pub fn check(&self, request: &OperationRequest<Op>) -> Result<(), String> {
        (self.check)(request)
    }
}

impl<Op> std::fmt::Debug for Validator<Op> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator").field("name", &self.name).finish()
    }
}

/// Ordered sequence of validators with short-circuit semantics.
///
/// Order is fixed at configuration time and significant: validators run in
/// insertion order, and the first rejection wins. Adding a validator never
/// requires touching existing ones.
///
/// # Example
///
/// ```rust
/// use reverso::core::{OperationKind, OperationRequest};
/// use reverso::validate::{Validator, ValidatorChain};
///
/// #[derive(Clone, Debug)]
/// struct Note(String);
///
/// let chain = ValidatorChain::new()
///     .with(Validator::from_pred(
///         "non-empty",
///         |req: &OperationRequest<Note>| !req.operation.0.is_empty(),
///         "note must not be empty",
///     ))
///     .with(Validator::from_pred(
///         "short",
///         |req: &OperationRequest<Note>| req.operation.0.len() <= 80,
///         "note too long",
///     ));
///
/// let ok = OperationRequest::new(OperationKind::Proceed, Note("hi".into()));
/// assert!(chain.validate(&ok).is_ok());
///
/// let empty = OperationRequest::new(OperationKind::Proceed, Note(String::new()));
/// let failure = chain.validate(&empty).unwrap_err();
/// assert_eq!(failure.index, 0);
/// assert_eq!(failure.name, "non-empty");
/// ```
pub struct ValidatorChain<Op> {
    validators: Vec<Validator<Op>>,
}

impl<Op> ValidatorChain<Op> {
    /// Create an empty chain. An empty chain always passes.
    pub fn new() -> Self {
        Self {
            validators: Vec::new(),
        }
    }

    /// Append a validator, returning the chain (builder style).
    pub fn with(mut self, validator: Validator<Op>) -> Self {
        self.validators.push(validator);
        self
    }

    /// Append a validator in place.
    pub fn push(&mut self, validator: Validator<Op>) {
        self.validators.push(validator);
    }

    /// Number of validators in the chain.
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Whether the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Run the chain in order, short-circuiting on the first rejection.
    pub fn validate(&self, request: &OperationRequest<Op>) -> Result<(), ValidationFailure> {
        for (index, validator) in self.validators.iter().enumerate() {
            if let Err(reason) = validator.check(request) {
                return Err(ValidationFailure {
                    index,
                    name: validator.name.clone(),
                    reason,
                });
            }
        }
        Ok(())
    }
}

impl<Op> Default for ValidatorChain<Op> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Op> std::fmt::Debug for ValidatorChain<Op> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorChain")
            .field("len", &self.validators.len())
            .finish()
    }
}
