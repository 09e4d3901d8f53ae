//! Predicates and their outcomes
//!
//! A predicate looks at one attribute value and answers with an [`Outcome`].
//! Predicates are asynchronous: synchronous closures are lifted with
//! [`FnPredicate`] / [`TryFnPredicate`], asynchronous ones with
//! [`AsyncFnPredicate`].

use std::future::Future;

use futures::future::{BoxFuture, FutureExt, ready};
use serde_json::Value;

use crate::foundation::PredicateError;

// ============================================================================
// OUTCOME
// ============================================================================

/// The answer of a predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The value is valid.
    Pass,
    /// The value is invalid; one error formatted with the value itself.
    Fail,
    /// Specific parts of the value are invalid; one error per item, each
    /// formatted with that item. An empty list is a pass.
    Failures(Vec<Value>),
}

impl Outcome {
    /// Returns true if no error will be produced.
    #[must_use]
    pub fn is_pass(&self) -> bool {
        match self {
            Self::Pass => true,
            Self::Fail => false,
            Self::Failures(items) => items.is_empty(),
        }
    }

    /// Number of errors this outcome produces.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        match self {
            Self::Pass => 0,
            Self::Fail => 1,
            Self::Failures(items) => items.len(),
        }
    }
}

impl From<bool> for Outcome {
    fn from(valid: bool) -> Self {
        if valid { Self::Pass } else { Self::Fail }
    }
}

impl<T: Into<Value>> From<Vec<T>> for Outcome {
    fn from(items: Vec<T>) -> Self {
        Self::Failures(items.into_iter().map(Into::into).collect())
    }
}

// ============================================================================
// PREDICATE TRAIT
// ============================================================================

/// An asynchronous check over one attribute value.
///
/// `Err` means the predicate could not decide; the engine treats it as a
/// defect, never as a validation failure.
///
/// # Examples
///
/// ```
/// use futures::future::{BoxFuture, FutureExt};
/// use serde_json::Value;
/// use verity_validator::foundation::{Outcome, Predicate, PredicateError};
///
/// struct NonEmpty;
///
/// impl Predicate for NonEmpty {
///     fn check<'a>(&'a self, value: &'a Value) -> BoxFuture<'a, Result<Outcome, PredicateError>> {
///         let ok = value.as_str().is_some_and(|s| !s.is_empty());
///         async move { Ok(Outcome::from(ok)) }.boxed()
///     }
/// }
/// ```
pub trait Predicate: Send + Sync {
    /// Checks `value`.
    fn check<'a>(&'a self, value: &'a Value) -> BoxFuture<'a, Result<Outcome, PredicateError>>;
}

// ============================================================================
// ADAPTERS
// ============================================================================

/// Lifts an infallible synchronous closure into a [`Predicate`].
#[derive(Clone, Copy)]
pub struct FnPredicate<F>(F);

impl<F> FnPredicate<F> {
    /// Wraps `f`.
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F, O> Predicate for FnPredicate<F>
where
    F: Fn(&Value) -> O + Send + Sync,
    O: Into<Outcome>,
{
    fn check<'a>(&'a self, value: &'a Value) -> BoxFuture<'a, Result<Outcome, PredicateError>> {
        ready(Ok((self.0)(value).into())).boxed()
    }
}

/// Lifts a fallible synchronous closure into a [`Predicate`].
#[derive(Clone, Copy)]
pub struct TryFnPredicate<F>(F);

impl<F> TryFnPredicate<F> {
    /// Wraps `f`.
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F, O> Predicate for TryFnPredicate<F>
where
    F: Fn(&Value) -> Result<O, PredicateError> + Send + Sync,
    O: Into<Outcome>,
{
    fn check<'a>(&'a self, value: &'a Value) -> BoxFuture<'a, Result<Outcome, PredicateError>> {
        ready((self.0)(value).map(Into::into)).boxed()
    }
}

/// Lifts an asynchronous closure into a [`Predicate`].
///
/// The closure receives an owned copy of the value so the returned future
/// does not borrow from the record.
#[derive(Clone, Copy)]
pub struct AsyncFnPredicate<F>(F);

impl<F> AsyncFnPredicate<F> {
    /// Wraps `f`.
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F, Fut, O> Predicate for AsyncFnPredicate<F>
where
    F: Fn(Value) -> Fut + Send + Sync,
    Fut: Future<Output = Result<O, PredicateError>> + Send + 'static,
    O: Into<Outcome> + Send + 'static,
{
    fn check<'a>(&'a self, value: &'a Value) -> BoxFuture<'a, Result<Outcome, PredicateError>> {
        (self.0)(value.clone())
            .map(|result| result.map(Into::into))
            .boxed()
    }
}

// ============================================================================
// TESTS
// ============================================================================
