use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use serde_json::{Value, json};
use tokio::sync::Barrier;
use verity_validator::prelude::*;

use crate::common::{keys, record};

fn sleeping_failure(millis: u64, message: &'static str) -> Rule {
    Rule::check_async(message, move |_: Value| async move {
        tokio::time::sleep(Duration::from_millis(millis)).await;
        Ok::<_, PredicateError>(false)
    })
}

#[tokio::test]
async fn order_does_not_depend_on_completion_time() {
    let rules = RuleMap::new()
        .rules(
            "first",
            vec![sleeping_failure(40, "slow"), sleeping_failure(0, "fast")],
        )
        .rule("second", sleeping_failure(5, "medium"));
    let input = record(json!({"first": 1, "second": 2}));

    let err = validate(&rules, &input).await.unwrap_err();
    let messages: Vec<&str> = err.errors().iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, vec!["slow", "fast", "medium"]);
}

#[tokio::test]
async fn attributes_are_evaluated_concurrently() {
    // Each predicate waits for the other; sequential evaluation would hang.
    let barrier = Arc::new(Barrier::new(2));
    let waiting = |barrier: Arc<Barrier>| {
        Rule::check_async("unused", move |_: Value| {
            let barrier = Arc::clone(&barrier);
            async move {
                barrier.wait().await;
                Ok::<_, PredicateError>(true)
            }
        })
    };

    let rules = RuleMap::new()
        .rule("a", waiting(Arc::clone(&barrier)))
        .rule("b", waiting(Arc::clone(&barrier)));
    let input = record(json!({"a": 1, "b": 2}));

    let result = tokio::time::timeout(Duration::from_secs(5), validate(&rules, &input))
        .await
        .expect("evaluators were not polled concurrently");
    assert!(result.is_ok());
}

#[tokio::test]
async fn nested_elements_are_evaluated_concurrently() {
    let barrier = Arc::new(Barrier::new(2));
    let item_barrier = Arc::clone(&barrier);
    let schema = RuleMap::new().rule(
        "id",
        Rule::check_async("unused", move |_: Value| {
            let barrier = Arc::clone(&item_barrier);
            async move {
                barrier.wait().await;
                Ok::<_, PredicateError>(true)
            }
        }),
    );
    let rules = RuleMap::new().rule("items", Rule::nested(schema));
    let input = record(json!({"items": [{"id": 1}, {"id": 2}]}));

    let result = tokio::time::timeout(Duration::from_secs(5), validate(&rules, &input))
        .await
        .expect("nested elements were not polled concurrently");
    assert!(result.is_ok());
}

#[tokio::test]
async fn failures_do_not_cancel_other_evaluators() {
    let finished = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&finished);

    let rules = RuleMap::new()
        .rule(
            "broken",
            Rule::try_check("x", |_: &Value| -> Result<bool, _> {
                Err(PredicateError::new("boom"))
            }),
        )
        .rule("fails", Rule::check("fails", |_: &Value| false))
        .rule(
            "slow",
            Rule::check_async("slow", move |_: Value| {
                let counter = Arc::clone(&counter);
                async move {
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, PredicateError>(true)
                }
            }),
        );

    let input = record(json!({"broken": 1, "fails": 2, "slow": 3}));
    let err = validate(&rules, &input).await.unwrap_err();

    assert!(err.is_defect());
    assert_eq!(finished.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn validation_future_is_send() {
    let rules = RuleMap::new().rule("a", Rule::check("bad", |_: &Value| false));
    let input = record(json!({"a": 1}));

    let handle = tokio::spawn(async move { validate(&rules, &input).await.map_err(|e| keys(e.errors()).len()) });
    assert_eq!(handle.await.unwrap(), Err(1));
}
