//! Attribute scheduling: which rules run, and in what order.

use std::future::Future;

use super::Validator;
use super::evaluator::evaluate;
use crate::foundation::{Defect, FieldError, Record};
use crate::rule::RuleMap;

/// Builds one evaluator future per (attribute, rule) pair.
///
/// Only attributes present in both `record` and `rules` are scheduled.
/// Order is record order, then rule order within the attribute. Nothing is
/// polled here.
pub(super) fn schedule<'a>(
    validator: &'a Validator,
    rules: &'a RuleMap,
    record: &'a Record,
) -> Vec<impl Future<Output = Result<Vec<FieldError>, Defect>> + 'a> {
    record
        .iter()
        .filter_map(move |(attribute, value)| {
            rules
                .get(attribute)
                .map(|set| (attribute.as_str(), value, set))
        })
        .flat_map(move |(attribute, value, set)| {
            set.rules()
                .iter()
                .map(move |rule| evaluate(validator, attribute, value, rule))
        })
        .collect()
}
