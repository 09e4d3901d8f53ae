use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use verity_support::{IdentifierValidators, OtherPolicy, has_duplicates};
use verity_validator::prelude::*;

use crate::common::{keys, record};

/// Validates `document` according to the sibling `kind` carried in the value.
fn document_rule(validators: IdentifierValidators) -> Rule {
    Rule::check("{number} is not a valid {kind}", move |v: &Value| {
        let number = v.get("number").and_then(Value::as_str).unwrap_or_default();
        let kind = v.get("kind").and_then(Value::as_str).unwrap_or_default();
        validators.is_valid(number, kind)
    })
}

#[tokio::test]
async fn checksum_identifiers_as_rules() {
    let rules = RuleMap::new()
        .rule("cpf", Rule::check("invalid CPF", |v: &Value| v.as_str().is_some_and(verity_support::is_cpf)))
        .rule("cnpj", Rule::check("invalid CNPJ", |v: &Value| v.as_str().is_some_and(verity_support::is_cnpj)));

    let good = record(json!({"cpf": "11144477735", "cnpj": "11222333000181"}));
    assert!(validate(&rules, &good).await.is_ok());

    let bad = record(json!({"cpf": "11144477736", "cnpj": "00000000000000"}));
    let err = validate(&rules, &bad).await.unwrap_err();
    assert_eq!(keys(err.errors()), vec!["cpf", "cnpj"]);
}

#[tokio::test]
async fn dispatch_by_kind_inside_nested_documents() {
    let validators = IdentifierValidators::standard().with_other(OtherPolicy::default());
    let rules = RuleMap::new().rule(
        "documents",
        Rule::nested(RuleMap::new().rule("document", document_rule(validators))),
    );

    let input = record(json!({
        "documents": [
            {"document": {"kind": "cpf", "number": "11144477735"}},
            {"document": {"kind": "CNPJ", "number": "11222333000182"}},
            {"document": {"kind": "other", "number": "not alnum!"}},
            {"document": {"kind": "passport", "number": "anything"}}
        ]
    }));

    let err = validate(&rules, &input).await.unwrap_err();
    assert_eq!(
        err.errors().iter().map(|e| e.message.as_str()).collect::<Vec<_>>(),
        vec![
            "11222333000182 is not a valid CNPJ",
            "not alnum! is not a valid other",
        ]
    );
    assert_eq!(keys(err.errors()), vec!["documents.document", "documents.document"]);
}

#[tokio::test]
async fn duplicate_detection_as_array_outcome() {
    let rules = RuleMap::new().rule(
        "contacts",
        Rule::check("{email} is repeated", |v: &Value| {
            let mut contacts: Vec<Record> = v
                .as_array()
                .into_iter()
                .flatten()
                .filter_map(|c| c.as_object().cloned())
                .collect();
            if !has_duplicates("email", &mut contacts) {
                return Vec::<Value>::new();
            }
            contacts
                .into_iter()
                .filter(|c| c.contains_key(verity_support::DUPLICATE_MARKER))
                .map(Value::Object)
                .collect()
        }),
    );

    let input = record(json!({
        "contacts": [
            {"email": "a@x.io"},
            {"email": "b@x.io"},
            {"email": "a@x.io"}
        ]
    }));
    let err = validate(&rules, &input).await.unwrap_err();
    assert_eq!(
        err.errors().iter().map(|e| e.message.as_str()).collect::<Vec<_>>(),
        vec!["a@x.io is repeated", "a@x.io is repeated"]
    );
}
