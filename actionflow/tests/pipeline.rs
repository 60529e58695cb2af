//! End-to-end tests for composed pipelines.

use actionflow::prelude::*;
use actionflow::retry::Backoff;
use actionflow::testing::{add, fail_with, is_odd, sum_reducer, CountingAction, FlakyAction, RecordingAction};
use actionflow::value::{self, typed, typed_condition, Value};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;

fn scenario() -> ActionRef<i64> {
    sequential(vec![
        add(1),
        parallel(
            sum_reducer,
            vec![
                add(1),
                add(2),
                sequential(vec![add(1), add(2), if_else(is_odd, add(2), add(3))]),
            ],
        ),
        if_else(is_odd, noop(), add(2)),
    ])
}

#[tokio::test]
async fn test_all_combinators() {
    assert_eq!(scenario().run(1).await.unwrap(), 16);
}

#[tokio::test]
async fn test_all_combinators_over_values() {
    let add = |n: i64| typed(move |x: i64| -> ActionResult<i64> { Ok(x + n) });
    let is_odd = || typed_condition(|x: &i64| Ok(x % 2 != 0));
    let sum = |results: Vec<ActionResult<Value>>| -> ActionResult<Value> {
        let mut total = 0_i64;
        for result in results {
            total += value::extract::<i64>(&result?)?;
        }
        value::to_value(total)
    };

    let action = sequential(vec![
        add(1),
        parallel(
            sum,
            vec![
                add(1),
                add(2),
                sequential(vec![add(1), add(2), if_else(is_odd(), add(2), add(3))]),
            ],
        ),
        if_else(is_odd(), noop(), add(2)),
    ]);

    assert_eq!(action.run(json!(1)).await.unwrap(), json!(16));
}

#[tokio::test]
async fn test_value_pipeline_reports_type_mismatch() {
    let action = sequential(vec![
        typed(|x: i64| -> ActionResult<String> { Ok(x.to_string()) }),
        typed(|x: i64| -> ActionResult<i64> { Ok(x + 1) }),
    ]);

    let err = action.run(json!(1)).await.unwrap_err();
    assert!(err.is_type_mismatch());
}

#[test]
fn test_definition_matches_scenario() {
    let definition = Definition::new("scenario")
        .next(add(1))
        .next(parallel(
            sum_reducer,
            vec![
                add(1),
                add(2),
                sequential(vec![add(1), add(2), if_else(is_odd, add(2), add(3))]),
            ],
        ))
        .next(if_else(is_odd, noop(), add(2)));

    assert_eq!(definition.len(), 3);
    assert_eq!(definition.run_blocking(1).unwrap(), 16);
}

#[tokio::test]
async fn test_retry_inside_parallel() {
    let flaky = FlakyAction::new(2, add(1));
    let options = RetryOptions::new()
        .with_max_retries(3)
        .with_initial_delay(Duration::from_millis(1))
        .with_jitter(Duration::ZERO);

    let action = parallel(
        sum_reducer,
        vec![retry(flaky.action(), Some(options)), add(2)],
    );

    assert_eq!(action.run(1).await.unwrap(), 5);
    assert_eq!(flaky.calls(), 3);
}

#[tokio::test]
async fn test_catch_after_exhausted_retry() {
    let failing = CountingAction::new(fail_with::<i64>("unavailable"));
    let options = RetryOptions::new()
        .with_max_retries(2)
        .with_initial_delay(Duration::from_millis(1))
        .with_backoff(Backoff::Linear(Duration::from_millis(1)))
        .with_jitter(Duration::ZERO);

    let action = failing
        .action()
        .retry(options)
        .catch(|err| {
            assert_eq!(err.to_string(), "unavailable");
            Ok(-1)
        });

    assert_eq!(action.run(1).await.unwrap(), -1);
    assert_eq!(failing.calls(), 3);
}

#[tokio::test]
async fn test_retry_from_config() {
    let config = RetryConfig::from_json(
        r#"{"max_retries": 1, "initial_delay_ms": 1, "jitter_ms": 0, "backoff": {"type": "constant"}}"#,
    )
    .unwrap();

    let failing = CountingAction::new(fail_with::<i64>("still failing"));
    let action = retry(failing.action(), Some(config.into()));

    assert!(action.run(1).await.is_err());
    assert_eq!(failing.calls(), 2);
}

#[tokio::test]
async fn test_sequential_passes_each_output_forward() {
    let second = RecordingAction::new(add(10));
    let third = RecordingAction::new(add(100));
    let action = sequential(vec![add(1), second.action(), third.action()]);

    assert_eq!(action.run(0).await.unwrap(), 111);
    assert_eq!(second.inputs(), vec![1]);
    assert_eq!(third.inputs(), vec![11]);
}

#[tokio::test]
async fn test_finally_observes_failure_in_branch() {
    let action = if_else(is_odd, fail_with("odd input"), add(1))
        .instrument("guarded")
        .finally(|result| match result {
            Ok(value) => Ok(value),
            Err(err) => Err(ActionError::failed(format!("guarded: {err}"))),
        });

    assert_eq!(action.run(2).await.unwrap(), 3);
    assert_eq!(action.run(3).await.unwrap_err().to_string(), "guarded: odd input");
}

#[tokio::test]
async fn test_composed_action_is_reusable_concurrently() {
    let action = scenario();
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let action = action.clone();
            tokio::spawn(async move { action.run(1).await })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), 16);
    }
}
