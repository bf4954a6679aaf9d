//! Tests for the assertion macros and the call counter.

use eitherway::prelude::*;
use eitherway::testing::CallCounter;
use eitherway::{assert_failed, assert_left, assert_right};
use std::num::ParseIntError;

fn parse(text: &str) -> Either<Failure, i32> {
    text.parse::<i32>().map_err(Failure::from).into()
}

#[test]
fn test_assert_right_with_value() {
    assert_right!(parse("12"), 12);
}

#[test]
fn test_assert_left_on_failure() {
    let parsed = parse("twelve");
    assert_left!(parsed);
    assert!(parsed.is::<ParseIntError>());
}

#[test]
fn test_assert_failed_with_cause_type() {
    let parsed = Failable::deferred(|| "twelve".parse::<i32>());
    assert_failed!(parsed, ParseIntError);
}

#[test]
#[should_panic(expected = "Expected Right(3), got Left")]
fn test_assert_right_reports_expected_value() {
    assert_right!(parse("x"), 3);
}

#[test]
fn test_counter_tracks_layers_and_final_calls() {
    let layers = CallCounter::new();
    let finals = CallCounter::new();

    let results: Vec<_> = ["1", "2", "x"]
        .into_iter()
        .with_layer(layers.layer())
        .try_deferred(finals.wrap(|s: &str| s.parse::<i32>()))
        .collect();

    assert_eq!(results.len(), 3);
    assert_eq!(layers.count(), 3);
    assert_eq!(finals.count(), 3);
    assert_left!(results[2]);
}

#[test]
fn test_counter_sees_only_pulled_elements() {
    let counter = CallCounter::new();
    let mut pending = ["1", "2", "3"]
        .into_iter()
        .with_layer(counter.layer())
        .try_deferred(|s: &str| s.parse::<i32>());

    assert_eq!(counter.count(), 0);
    assert_right!(pending.next().unwrap(), 1);
    assert_eq!(counter.count(), 1);
}
