//! The validation engine
//!
//! ```text
//!   validate(rules, record)
//!         │
//!         ▼
//!   scheduler ── one future per (attribute, rule) pair, record order × rule order
//!         │
//!         ▼
//!   evaluator ── predicate outcome → field errors
//!         │      nested schema → run(schema, element, Raw) per element
//!         ▼
//!   join_all ── every future settles, errors concatenated in schedule order
//! ```
//!
//! All futures of one call are polled concurrently on the caller's task; no
//! evaluator is cancelled because another one failed, so the error list is
//! always complete and its order never depends on completion timing.

mod evaluator;
mod scheduler;

use futures::future::{BoxFuture, FutureExt, join_all};
use serde_json::Value;
use tracing::debug;

use crate::config::{ConfigError, ValidatorConfig};
use crate::foundation::{Defect, FieldError, Record, ValidateError, ValidationErrors, ValidationResult};
use crate::rule::RuleMap;

/// How failures are returned from [`Validator::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Wrap failures in [`ValidateError::Invalid`].
    #[default]
    Aggregate,
    /// Return the bare list in [`ValidateError::Raw`]; nested validation
    /// uses this so parents can re-key child errors.
    Raw,
}

/// Runs rule maps against records.
///
/// # Examples
///
/// ```
/// use serde_json::{json, Value};
/// use verity_validator::{Rule, RuleMap, Validator};
///
/// # futures::executor::block_on(async {
/// let rules = RuleMap::new().rule(
///     "email",
///     Rule::check("{} is not an email", |v: &Value| v.as_str().is_some_and(|s| s.contains('@'))),
/// );
///
/// let record = json!({"email": "nope"});
/// let err = Validator::default()
///     .validate(&rules, record.as_object().unwrap())
///     .await
///     .unwrap_err();
///
/// assert_eq!(err.errors()[0].key, "email");
/// assert_eq!(err.errors()[0].message, "nope is not an email");
/// # });
/// ```
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    /// Creates a validator after checking `config`.
    pub fn new(config: ValidatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validates `record`, failing with the aggregate on any error.
    pub async fn validate(&self, rules: &RuleMap, record: &Record) -> ValidationResult {
        self.run(rules, record, Mode::Aggregate).await
    }

    /// Validates `record`, failing with the raw error list on any error.
    pub async fn validate_raw(&self, rules: &RuleMap, record: &Record) -> ValidationResult {
        self.run(rules, record, Mode::Raw).await
    }

    /// Validates any JSON value; values other than objects have no
    /// attributes and always pass.
    pub async fn validate_value(&self, rules: &RuleMap, value: &Value) -> ValidationResult {
        match value {
            Value::Object(record) => self.validate(rules, record).await,
            _ => Ok(()),
        }
    }

    /// Validates `record`, reporting failures according to `mode`.
    ///
    /// A predicate defect under [`DefectPolicy::Fatal`](crate::config::DefectPolicy::Fatal)
    /// fails with [`ValidateError::Defect`] in either mode, after every other
    /// evaluator has settled.
    #[tracing::instrument(level = "debug", skip_all, fields(mode = ?mode, attributes = record.len()))]
    pub async fn run(&self, rules: &RuleMap, record: &Record, mode: Mode) -> ValidationResult {
        let errors = self.collect_errors(rules, record).await?;

        let Some(errors) = ValidationErrors::from_vec(errors) else {
            return Ok(());
        };
        debug!(count = errors.len(), "validation failed");

        match mode {
            Mode::Aggregate => Err(ValidateError::Invalid(errors)),
            Mode::Raw => Err(ValidateError::Raw(errors.into_vec())),
        }
    }

    /// Runs every applicable rule and returns the flat, possibly empty,
    /// error list.
    pub fn collect_errors<'a>(
        &'a self,
        rules: &'a RuleMap,
        record: &'a Record,
    ) -> BoxFuture<'a, Result<Vec<FieldError>, Defect>> {
        async move {
            let pending = scheduler::schedule(self, rules, record);
            let mut errors = Vec::new();
            for settled in join_all(pending).await {
                errors.extend(settled?);
            }
            Ok(errors)
        }
        .boxed()
    }
}

/// Validates `record` with the default configuration.
///
/// Fails with [`ValidateError::Invalid`] carrying every error.
pub async fn validate(rules: &RuleMap, record: &Record) -> ValidationResult {
    Validator::default().validate(rules, record).await
}

/// Validates `record` with the default configuration, failing with
/// [`ValidateError::Raw`].
pub async fn validate_raw(rules: &RuleMap, record: &Record) -> ValidationResult {
    Validator::default().validate_raw(rules, record).await
}
