use pretty_assertions::assert_eq;
use serde_json::json;
use verity_validator::prelude::*;

use crate::common::{keys, non_empty, record};

fn child_rules() -> RuleMap {
    RuleMap::new().rule("name", non_empty("Name is required"))
}

#[tokio::test]
async fn nested_error_key_is_prefixed() {
    let rules = RuleMap::new().rule("children", Rule::nested(child_rules()));
    let input = record(json!({"children": [{"name": ""}]}));

    let err = validate(&rules, &input).await.unwrap_err();
    assert_eq!(
        err.errors(),
        &[FieldError {
            key: "children.name".to_owned(),
            message: "Name is required".to_owned(),
            origin: ErrorOrigin::Nested,
        }]
    );
}

#[tokio::test]
async fn every_failing_element_reports() {
    let rules = RuleMap::new().rule("children", Rule::nested(child_rules()));
    let input = record(json!({"children": [{"name": ""}, {"name": "ok"}, {"name": ""}]}));

    let err = validate(&rules, &input).await.unwrap_err();
    assert_eq!(keys(err.errors()), vec!["children.name", "children.name"]);
}

#[tokio::test]
async fn nesting_depth_is_visible() {
    let address = RuleMap::new().rule("city", non_empty("City is required"));
    let person = RuleMap::new()
        .rule("name", non_empty("Name is required"))
        .rule("addresses", Rule::nested(address));
    let rules = RuleMap::new().rule("people", Rule::nested(person));

    let input = record(json!({
        "people": [
            {"name": "Ana", "addresses": [{"city": "Recife"}, {"city": ""}]},
            {"name": "", "addresses": {"city": ""}}
        ]
    }));

    let err = validate(&rules, &input).await.unwrap_err();
    assert_eq!(
        keys(err.errors()),
        vec![
            "people.addresses.city",
            "people.name",
            "people.addresses.city",
        ]
    );
}

#[tokio::test]
async fn custom_separator() {
    let validator = Validator::new(ValidatorConfig::new().with_key_separator("/")).unwrap();
    let rules = RuleMap::new().rule("children", Rule::nested(child_rules()));

    let err = validator
        .validate(&rules, &record(json!({"children": [{"name": ""}]})))
        .await
        .unwrap_err();
    assert_eq!(err.errors()[0].key, "children/name");
}

#[tokio::test]
async fn nested_and_predicate_rules_mix() {
    let rules = RuleMap::new().rules(
        "children",
        vec![
            Rule::check("at most {} children", |v: &serde_json::Value| {
                v.as_array().is_none_or(|items| items.len() <= 1)
            })
            .with_message("too many children"),
            Rule::nested(child_rules()),
        ],
    );

    let err = validate(&rules, &record(json!({"children": [{"name": ""}, {"name": "b"}]})))
        .await
        .unwrap_err();
    assert_eq!(keys(err.errors()), vec!["children", "children.name"]);
    assert_eq!(err.errors()[0].message, "too many children");
}

#[tokio::test]
async fn valid_nested_records_pass() {
    let rules = RuleMap::new().rule("children", Rule::nested(child_rules()));
    let input = record(json!({"children": [{"name": "a"}, {"name": "b"}]}));
    assert!(validate(&rules, &input).await.is_ok());

    let empty = record(json!({"children": []}));
    assert!(validate(&rules, &empty).await.is_ok());
}
