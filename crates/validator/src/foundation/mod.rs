//! Core validation types and traits
//!
//! - **Predicates**: [`Predicate`], [`Outcome`] and the closure adapters
//! - **Errors**: [`FieldError`], [`ValidationErrors`], [`ValidateError`],
//!   [`Defect`], [`PredicateError`]
//! - **Records**: [`Record`], the JSON object a rule map is applied to

pub mod error;
pub mod predicate;

pub use error::{
    Defect, ErrorOrigin, FieldError, PredicateError, ValidateError, ValidationErrors,
};
pub use predicate::{AsyncFnPredicate, FnPredicate, Outcome, Predicate, TryFnPredicate};

/// An input record: attribute name to value, in insertion order.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// A validation result using [`ValidateError`].
pub type ValidationResult<T = ()> = Result<T, ValidateError>;
