use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use verity_validator::prelude::*;

use crate::common::{keys, max_len, non_empty, record};

fn signup_rules() -> RuleMap {
    RuleMap::new()
        .rules(
            "name",
            vec![
                non_empty("Name is required"),
                max_len(5, "{} is longer than 5 characters"),
            ],
        )
        .rule(
            "email",
            Rule::check("{} is not an email", |v: &Value| {
                v.as_str().is_some_and(|s| s.contains('@'))
            }),
        )
}

#[tokio::test]
async fn valid_record_passes() {
    let input = record(json!({"name": "Ana", "email": "ana@example.com"}));
    assert!(validate(&signup_rules(), &input).await.is_ok());
}

#[tokio::test]
async fn every_failure_is_reported() {
    let input = record(json!({"name": "Bartholomew", "email": "nope"}));
    let err = validate(&signup_rules(), &input).await.unwrap_err();

    let ValidateError::Invalid(errors) = err else {
        panic!("expected aggregate failure, got {err:?}");
    };
    assert_eq!(
        errors.errors(),
        &[
            FieldError::new("name", "Bartholomew is longer than 5 characters"),
            FieldError::new("email", "nope is not an email"),
        ]
    );
}

#[tokio::test]
async fn order_follows_record_then_rules() {
    let input = record(json!({"email": "nope", "name": ""}));
    let err = validate(&signup_rules(), &input).await.unwrap_err();
    assert_eq!(keys(err.errors()), vec!["email", "name"]);
}

#[tokio::test]
async fn unruled_attributes_are_ignored() {
    let input = record(json!({"name": "Ana", "nickname": 12, "extra": {"deep": []}}));
    assert!(validate(&signup_rules(), &input).await.is_ok());
}

#[tokio::test]
async fn missing_attributes_are_skipped() {
    let input = record(json!({}));
    assert!(validate(&signup_rules(), &input).await.is_ok());
}

#[tokio::test]
async fn array_outcome_counts_each_item() {
    let rules = RuleMap::new().rule(
        "tags",
        Rule::check("tag {} is reserved", |v: &Value| {
            let reserved = ["admin", "root"];
            v.as_array()
                .into_iter()
                .flatten()
                .filter(|t| t.as_str().is_some_and(|s| reserved.contains(&s)))
                .cloned()
                .collect::<Vec<Value>>()
        }),
    );

    let input = record(json!({"tags": ["admin", "ok", "root"]}));
    let err = validate(&rules, &input).await.unwrap_err();
    let messages: Vec<&str> = err.errors().iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, vec!["tag admin is reserved", "tag root is reserved"]);

    let clean = record(json!({"tags": ["ok"]}));
    assert!(validate(&rules, &clean).await.is_ok());
}

#[tokio::test]
async fn async_predicates_are_awaited() {
    let rules = RuleMap::new().rule(
        "username",
        Rule::check_async("{} is taken", |v: Value| async move {
            tokio::task::yield_now().await;
            Ok::<_, PredicateError>(v.as_str() != Some("admin"))
        }),
    );

    let err = validate(&rules, &record(json!({"username": "admin"})))
        .await
        .unwrap_err();
    assert_eq!(err.errors()[0].message, "admin is taken");
    assert!(
        validate(&rules, &record(json!({"username": "ana"})))
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn defect_is_fatal_by_default() {
    let rules = RuleMap::new()
        .rule("name", non_empty("Name is required"))
        .rule(
            "cpf",
            Rule::try_check("invalid", |_: &Value| -> Result<bool, _> {
                Err(PredicateError::new("registry unavailable"))
            }),
        );

    let err = validate(&rules, &record(json!({"name": "", "cpf": "1"})))
        .await
        .unwrap_err();
    assert!(err.is_defect());
    let ValidateError::Defect(defect) = err else {
        unreachable!();
    };
    assert_eq!(defect.key, "cpf");
}

#[tokio::test]
async fn defect_can_be_reported() {
    let validator =
        Validator::new(ValidatorConfig::new().with_defect_policy(DefectPolicy::Report)).unwrap();
    let rules = RuleMap::new()
        .rule("name", non_empty("Name is required"))
        .rule(
            "cpf",
            Rule::try_check("invalid", |_: &Value| -> Result<bool, _> {
                Err(PredicateError::new("registry unavailable"))
            }),
        );

    let err = validator
        .validate(&rules, &record(json!({"name": "", "cpf": "1"})))
        .await
        .unwrap_err();
    let origins: Vec<ErrorOrigin> = err.errors().iter().map(|e| e.origin).collect();
    assert_eq!(origins, vec![ErrorOrigin::Field, ErrorOrigin::Defect]);
    assert_eq!(err.errors()[1].message, "could not be validated");
}

#[tokio::test]
async fn rerun_is_idempotent() {
    let rules = signup_rules();
    let input = record(json!({"name": "Bartholomew", "email": "x"}));

    let first = validate(&rules, &input).await.unwrap_err();
    let second = validate(&rules, &input).await.unwrap_err();
    assert_eq!(first.errors(), second.errors());
}

#[tokio::test]
async fn rule_map_is_reusable_across_calls() {
    let rules = RuleMap::new().rule("name", non_empty("required"));
    for _ in 0..3 {
        assert!(
            validate(&rules, &record(json!({"name": "x"})))
                .await
                .is_ok()
        );
    }
    assert!(matches!(rules.get("name"), Some(RuleSet::Single(_))));
}
