use serde_json::Value;
use verity_validator::{Record, Rule};

pub fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

pub fn non_empty(message: &'static str) -> Rule {
    Rule::check(message, |v: &Value| v.as_str().is_some_and(|s| !s.is_empty()))
}

pub fn max_len(max: usize, message: &'static str) -> Rule {
    Rule::check(message, move |v: &Value| {
        v.as_str().is_none_or(|s| s.chars().count() <= max)
    })
}

pub fn keys(errors: &[verity_validator::FieldError]) -> Vec<&str> {
    errors.iter().map(|e| e.key.as_str()).collect()
}
