//! # verity-validator
//!
//! A declarative, asynchronous field-validation engine.
//!
//! Given a record (a JSON object) and a [`RuleMap`], every rule that applies
//! to an attribute present in the record runs concurrently; every failure is
//! collected into one ordered list, and the call either succeeds or fails
//! once with the complete list.
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::{json, Value};
//! use verity_validator::prelude::*;
//!
//! fn non_empty(message: &'static str) -> Rule {
//!     Rule::check(message, |v: &Value| v.as_str().is_some_and(|s| !s.is_empty()))
//! }
//!
//! let rules = RuleMap::new()
//!     .rule("name", non_empty("Name is required"))
//!     .rule("children", Rule::nested(RuleMap::new().rule("name", non_empty("Name is required"))));
//!
//! let record = json!({"name": "Ana", "children": [{"name": ""}]});
//!
//! # futures::executor::block_on(async {
//! let err = validate(&rules, record.as_object().unwrap()).await.unwrap_err();
//! assert_eq!(err.errors()[0].key, "children.name");
//! # });
//! ```
//!
//! ## Rules
//!
//! - [`Rule::check`]: synchronous predicate returning `bool`, [`Outcome`] or
//!   a list of failing items (one error per item)
//! - [`Rule::try_check`]: synchronous predicate that may fail to decide
//! - [`Rule::check_async`]: asynchronous predicate
//! - [`Rule::nested`]: sub-schema applied to each element of the value
//! - [`predicates`]: stock email, URL, alphanumeric, length and pattern rules
//!
//! ## Failures
//!
//! Field failures are collected as [`FieldError`]s and returned together in
//! [`ValidateError::Invalid`]. A predicate that errors is a [`Defect`], handled
//! according to [`config::DefectPolicy`].

pub mod config;
mod engine;
pub mod foundation;
pub mod predicates;
pub mod prelude;
pub mod rule;
pub mod template;

pub use config::{ConfigError, DefectPolicy, ValidatorConfig};
pub use engine::{Mode, Validator, validate, validate_raw};
pub use foundation::{
    Defect, ErrorOrigin, FieldError, Outcome, Predicate, PredicateError, Record, ValidateError,
    ValidationErrors, ValidationResult,
};
pub use rule::{Rule, RuleError, RuleKind, RuleMap, RuleSet};
