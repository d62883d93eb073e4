#![cfg(feature = "catalog")]
//! Integration tests for the diagnostics emitted during evaluation.
//!
//! A `tracing_subscriber` formatter writes into a shared buffer so the
//! tests can assert on the events of a single evaluation.

use std::io;
use std::sync::{Arc, Mutex, PoisonError};

use lambars_fusion::prelude::*;
use rstest::rstest;
use tracing::Level;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn contents(&self) -> String {
        let buffer = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

impl io::Write for Captured {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture<T>(run: impl FnOnce() -> T) -> (T, String) {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let result = tracing::subscriber::with_default(subscriber, run);
    (result, captured.contents())
}

#[rstest]
fn test_plan_is_logged() {
    let (result, logs) = capture(|| {
        pipe!(
            Value::from(vec![1, 2, 3]),
            map(|value: Value| value),
            reverse(),
            take(1),
        )
    });

    assert_eq!(result.unwrap(), Value::from(vec![3]));
    assert!(logs.contains("evaluating pipeline"));
    assert!(logs.contains("stages=3"));
    assert!(logs.contains("segments=3"));
    assert!(logs.contains("fused=2"));
}

#[rstest]
fn test_short_circuit_is_logged() {
    let (result, logs) = capture(|| {
        Pipeline::new()
            .then(take(2))
            .evaluate_iter((0..).map(Value::Int))
    });

    assert_eq!(result.unwrap(), Value::from(vec![0, 1]));
    assert!(logs.contains("fused run finished"));
    assert!(logs.contains("consumed=2"));
    assert!(logs.contains("short_circuited=true"));
}

#[rstest]
fn test_stage_failure_is_logged() {
    let (result, logs) = capture(|| {
        pipe!(
            Value::from(vec![1, 2]),
            try_map(|value: Value| if value == Value::from(2) { Err("boom") } else { Ok(value) }),
        )
    });

    assert!(result.is_err());
    assert!(logs.contains("fused run failed"));
    assert!(logs.contains("boom"));
}

#[rstest]
fn test_evaluation_without_subscriber_is_silent() {
    let result = pipe!(Value::from(vec![1]), first());
    assert_eq!(result.unwrap(), Value::from(1));
}
