#![cfg(feature = "serde")]

//! Integration tests for serde support.
//!
//! Pipelines operate on [`Value`] trees decoded from JSON and their results
//! encode back to JSON.

use lambars_fusion::Value;
use lambars_fusion::pipe::{Fusion, PipeOptions};
use rstest::rstest;

// =============================================================================
// Value Tests
// =============================================================================

#[rstest]
#[case(r#"null"#, Value::Null)]
#[case(r#"true"#, Value::Bool(true))]
#[case(r#"-7"#, Value::Int(-7))]
#[case(r#"2.5"#, Value::Float(2.5))]
#[case(r#""text""#, Value::from("text"))]
#[case(r#"[1,2,3]"#, Value::from(vec![1, 2, 3]))]
fn test_value_from_json(#[case] json: &str, #[case] expected: Value) {
    let decoded: Value = serde_json::from_str(json).unwrap();
    assert_eq!(decoded, expected);
}

#[rstest]
fn test_value_nested_json_roundtrip() {
    let value = Value::record([
        ("name", Value::from("orders")),
        ("items", Value::list([Value::from(1), Value::from(2.5), Value::Null])),
        ("meta", Value::record([("active", true)])),
    ]);

    let json = serde_json::to_string(&value).unwrap();
    let restored: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value, restored);
}

#[rstest]
fn test_undefined_encodes_as_null() {
    assert_eq!(serde_json::to_string(&Value::Undefined).unwrap(), "null");
}

#[rstest]
fn test_large_unsigned_widens_to_float() {
    let decoded: Value = serde_json::from_str("18446744073709551615").unwrap();
    assert!(matches!(decoded, Value::Float(_)));
}

#[cfg(feature = "catalog")]
#[rstest]
fn test_pipeline_over_decoded_json() {
    use lambars_fusion::catalog::{filter, map, take};
    use lambars_fusion::pipe;

    let input: Value = serde_json::from_str(
        r#"[
            {"id": 1, "active": true},
            {"id": 2, "active": false},
            {"id": 3, "active": true},
            {"id": 4, "active": true}
        ]"#,
    )
    .unwrap();

    let result = pipe!(
        input,
        filter(|order: &Value| {
            order
                .as_record()
                .and_then(|record| record.get("active"))
                .and_then(Value::as_bool)
                .unwrap_or(false)
        }),
        map(|order: Value| {
            order
                .as_record()
                .and_then(|record| record.get("id"))
                .cloned()
                .unwrap_or(Value::Null)
        }),
        take(2),
    )
    .unwrap();

    assert_eq!(serde_json::to_string(&result).unwrap(), "[1,3]");
}

// =============================================================================
// PipeOptions Tests
// =============================================================================

#[rstest]
fn test_options_json_roundtrip() {
    let options = PipeOptions::eager();
    let json = serde_json::to_string(&options).unwrap();
    assert_eq!(json, r#"{"fusion":"disabled"}"#);

    let restored: PipeOptions = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, options);
}

#[rstest]
fn test_options_missing_fields_use_default() {
    let restored: PipeOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(restored.fusion, Fusion::Enabled);
}
