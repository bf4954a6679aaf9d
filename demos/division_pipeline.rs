//! Division pipeline with logging and counting layers.
//!
//! Run with: cargo run --example division_pipeline --features tracing

use eitherway::prelude::*;
use eitherway::testing::CallCounter;
use std::fmt;

// ============================================================================
// Domain
// ============================================================================

#[derive(Debug)]
struct DivisionByZero;

impl fmt::Display for DivisionByZero {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("attempted to divide by zero")
    }
}

impl std::error::Error for DivisionByZero {}

#[derive(Debug)]
struct MissingInput;

impl fmt::Display for MissingInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("missing input")
    }
}

impl std::error::Error for MissingInput {}

fn calculate(text: Option<&str>) -> Result<i32, Failure> {
    let text = text.ok_or(MissingInput)?;
    let divisor = text.len() as i32 - 2;
    Ok(100_i32.checked_div(divisor).ok_or(DivisionByZero)?)
}

const INPUTS: [Option<&str>; 6] = [
    Some("1"),
    Some("12"),
    Some("123"),
    Some("1234"),
    None,
    Some("12345"),
];

// ============================================================================
// Pipelines
// ============================================================================

fn splitting_by_type() {
    tracing::info!("splitting results by type");

    let results: Vec<_> = INPUTS
        .into_iter()
        .try_each(calculate)
        .when_right(|v| tracing::info!("result is {}", v))
        .when_is(|e: &DivisionByZero| tracing::warn!("skipped: {}", e))
        .when_is(|e: &MissingInput| tracing::warn!("skipped: {}", e))
        .collect();

    let (failures, values) = results.into_iter().partition_either();
    tracing::info!("{} values, {} failures", values.len(), failures.len());
}

fn performing_actions() {
    tracing::info!("running calculations inside layers");

    let calls = CallCounter::new();
    let results: Vec<_> = INPUTS
        .into_iter()
        .with_layer(observe(|text: &Option<&str>| {
            tracing::debug!("calculating with {:?}", text)
        }))
        .add_layer(calls.layer())
        .skip(1)
        .try_deferred(calculate)
        .collect();

    tracing::info!(
        "{} layer calls for {} results ({} failed)",
        calls.count(),
        results.len(),
        results.iter().filter(|e| e.is_left()).count()
    );
}

fn lazy_failables() {
    tracing::info!("resolving lazy values");

    for failable in INPUTS.into_iter().map(|text| Failable::deferred(move || calculate(text))) {
        match failable.value() {
            Ok(v) => tracing::info!("result is {}", v),
            Err(_) => tracing::info!("result is undefined"),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    splitting_by_type();
    performing_actions();
    lazy_failables();
}
