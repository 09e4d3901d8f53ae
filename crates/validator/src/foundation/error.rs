//! Error types for validation failures
//!
//! The engine separates four kinds of failure:
//!
//! - [`FieldError`] with [`ErrorOrigin::Field`]: a predicate rejected a value.
//! - [`FieldError`] with [`ErrorOrigin::Nested`]: an element of a sub-record
//!   failed its sub-schema; the key carries the full attribute path.
//! - [`ValidationErrors`]: the aggregate of every field error from one call.
//! - [`Defect`]: a predicate errored instead of answering.
//!
//! Only the aggregate (or a defect) ever reaches the caller of
//! [`validate`](crate::validate); individual field errors are collected,
//! never returned one by one.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// FIELD ERROR
// ============================================================================

/// Where a [`FieldError`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorOrigin {
    /// A predicate on the attribute itself returned a failure.
    #[default]
    Field,
    /// A nested sub-record failed; the key is prefixed with its parents.
    Nested,
    /// A predicate errored and the engine was configured to report it.
    Defect,
}

/// A single validation failure keyed by attribute path.
///
/// # Examples
///
/// ```
/// use verity_validator::foundation::{ErrorOrigin, FieldError};
///
/// let error = FieldError::new("city", "City is required").nested_under("addresses", ".");
/// assert_eq!(error.key, "addresses.city");
/// assert_eq!(error.origin, ErrorOrigin::Nested);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldError {
    /// Attribute path, e.g. `"email"` or `"children.name"`.
    pub key: String,

    /// Rendered message template.
    pub message: String,

    /// Failure category.
    #[serde(default)]
    pub origin: ErrorOrigin,
}

impl FieldError {
    /// Creates a field error for `key`.
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
            origin: ErrorOrigin::Field,
        }
    }

    /// Creates an error recording a reported predicate defect.
    pub fn defect(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
            origin: ErrorOrigin::Defect,
        }
    }

    /// Re-keys this error below `parent`.
    ///
    /// Field errors become [`ErrorOrigin::Nested`]; reported defects keep
    /// their origin.
    #[must_use = "builder methods must be chained or built"]
    pub fn nested_under(mut self, parent: &str, separator: &str) -> Self {
        self.key = join_key(parent, separator, &self.key);
        if self.origin == ErrorOrigin::Field {
            self.origin = ErrorOrigin::Nested;
        }
        self
    }

    /// Number of path segments in the key.
    #[must_use]
    pub fn depth(&self, separator: &str) -> usize {
        self.key.split(separator).count()
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.key, self.message)
    }
}

impl std::error::Error for FieldError {}

pub(crate) fn join_key(parent: &str, separator: &str, child: &str) -> String {
    let mut key = String::with_capacity(parent.len() + separator.len() + child.len());
    key.push_str(parent);
    key.push_str(separator);
    key.push_str(child);
    key
}

// ============================================================================
// AGGREGATE
// ============================================================================

/// The complete, ordered list of failures from one validation call.
///
/// Never empty: a call with no failures resolves `Ok(())` instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Wraps `errors`, or returns `None` when there is nothing to report.
    #[must_use]
    pub fn from_vec(errors: Vec<FieldError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self { errors })
        }
    }

    /// All errors, in attribute then rule order.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Number of errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Always false; present for API symmetry with collections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Iterates over the errors.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.errors.iter()
    }

    /// Errors recorded for exactly `key`.
    pub fn by_key<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a FieldError> + 'a {
        self.errors.iter().filter(move |e| e.key == key)
    }

    /// Distinct keys, in first-seen order.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for error in &self.errors {
            if !keys.contains(&error.key.as_str()) {
                keys.push(&error.key);
            }
        }
        keys
    }

    /// Extracts the underlying list.
    #[must_use]
    pub fn into_vec(self) -> Vec<FieldError> {
        self.errors
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation failed with {} error(s):", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            write!(f, "\n  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

// ============================================================================
// DEFECTS
// ============================================================================

/// A predicate failed to produce an answer.
///
/// This is not a validation failure: the value was never judged.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct PredicateError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl PredicateError {
    /// Creates a predicate error with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Wraps an underlying error.
    pub fn from_source<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }

    /// The error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A predicate defect, located at the attribute whose rule raised it.
#[derive(Debug, thiserror::Error)]
#[error("predicate for `{key}` failed: {source}")]
pub struct Defect {
    /// Attribute path of the failing rule.
    pub key: String,
    /// What went wrong inside the predicate.
    #[source]
    pub source: PredicateError,
}

impl Defect {
    pub(crate) fn new(key: impl Into<String>, source: PredicateError) -> Self {
        Self {
            key: key.into(),
            source,
        }
    }

    #[must_use]
    pub(crate) fn nested_under(mut self, parent: &str, separator: &str) -> Self {
        self.key = join_key(parent, separator, &self.key);
        self
    }
}

// ============================================================================
// TOP-LEVEL ERROR
// ============================================================================

/// Error returned by the validation entry points.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ValidateError {
    /// One or more rules failed (aggregate mode).
    #[error(transparent)]
    Invalid(ValidationErrors),

    /// One or more rules failed (raw mode, used for nested validation).
    #[error("Validation failed with {} error(s)", .0.len())]
    Raw(Vec<FieldError>),

    /// A predicate errored; no error list is produced.
    #[error(transparent)]
    Defect(#[from] Defect),
}

impl ValidateError {
    /// The collected field errors; empty for defects.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        match self {
            Self::Invalid(errors) => errors.errors(),
            Self::Raw(errors) => errors,
            Self::Defect(_) => &[],
        }
    }

    /// Returns true if this error is a predicate defect.
    #[must_use]
    pub fn is_defect(&self) -> bool {
        matches!(self, Self::Defect(_))
    }

    /// Splits into the field error list or the defect.
    pub fn into_errors(self) -> Result<Vec<FieldError>, Defect> {
        match self {
            Self::Invalid(errors) => Ok(errors.into_vec()),
            Self::Raw(errors) => Ok(errors),
            Self::Defect(defect) => Err(defect),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
