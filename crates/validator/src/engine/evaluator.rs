//! Rule evaluation: one rule against one value.

use futures::future::join_all;
use serde_json::Value;
use tracing::{debug, warn};

use super::{Mode, Validator};
use crate::config::{DefectPolicy, ValidatorConfig};
use crate::foundation::{Defect, FieldError, Outcome, PredicateError};
use crate::rule::{Rule, RuleKind, RuleMap};
use crate::template::format_message;

/// Runs `rule` against `value`, the value of `attribute`.
///
/// Failures come back as field errors; only a fatal predicate defect is
/// returned as `Err`.
pub(super) async fn evaluate(
    validator: &Validator,
    attribute: &str,
    value: &Value,
    rule: &Rule,
) -> Result<Vec<FieldError>, Defect> {
    let errors = match rule.kind() {
        RuleKind::Nested(schema) => evaluate_nested(validator, attribute, value, schema).await?,
        RuleKind::Predicate(predicate) => match predicate.check(value).await {
            Ok(outcome) => report(attribute, rule.message(), value, outcome),
            Err(source) => on_defect(validator.config(), attribute, value, source)?,
        },
    };

    if !errors.is_empty() {
        debug!(attribute, count = errors.len(), "rule failed");
    }
    Ok(errors)
}

/// Turns a predicate outcome into field errors.
fn report(attribute: &str, template: &str, value: &Value, outcome: Outcome) -> Vec<FieldError> {
    match outcome {
        Outcome::Pass => Vec::new(),
        Outcome::Fail => vec![FieldError::new(attribute, format_message(template, value))],
        Outcome::Failures(items) => items
            .iter()
            .map(|item| FieldError::new(attribute, format_message(template, item)))
            .collect(),
    }
}

fn on_defect(
    config: &ValidatorConfig,
    attribute: &str,
    value: &Value,
    source: PredicateError,
) -> Result<Vec<FieldError>, Defect> {
    warn!(attribute, error = %source, policy = ?config.defect_policy, "predicate errored");
    match config.defect_policy {
        DefectPolicy::Fatal => Err(Defect::new(attribute, source)),
        DefectPolicy::Report => Ok(vec![FieldError::defect(
            attribute,
            format_message(&config.defect_message, value),
        )]),
    }
}

/// Validates every element of `value` against `schema`.
///
/// A non-array value is one element. Elements that are not objects have no
/// attributes to check. Child keys are prefixed with `attribute`.
async fn evaluate_nested(
    validator: &Validator,
    attribute: &str,
    value: &Value,
    schema: &RuleMap,
) -> Result<Vec<FieldError>, Defect> {
    let elements = match value {
        Value::Array(items) => items.as_slice(),
        single => std::slice::from_ref(single),
    };

    let runs = elements.iter().map(|element| async move {
        match element {
            Value::Object(record) => validator.run(schema, record, Mode::Raw).await,
            _ => Ok(()),
        }
    });

    let separator = validator.config().key_separator.as_str();
    let mut errors = Vec::new();
    for settled in join_all(runs).await {
        let Err(failure) = settled else {
            continue;
        };
        match failure.into_errors() {
            Ok(children) => errors.extend(
                children
                    .into_iter()
                    .map(|child| child.nested_under(attribute, separator)),
            ),
            Err(defect) => return Err(defect.nested_under(attribute, separator)),
        }
    }
    Ok(errors)
}
