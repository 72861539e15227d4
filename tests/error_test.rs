//! Integration tests for error reporting.

use serde_json::json;
use shapecheck::{shape, validate_schema, Schema, SchemaError, SchemaErrors, ValuePath};
use stillwater::prelude::*;

fn failing_errors() -> SchemaErrors {
    let schema = shape! {
        "name" => Schema::string(),
        "tags" => Schema::array(Schema::string()),
        "address" => shape! { "city" => Schema::string(), "zip" => Schema::number() },
    };
    validate_schema(
        &schema,
        &json!({"name": 7, "tags": ["a", 1], "address": {"city": null}}),
    )
    .into_result()
    .unwrap_err()
}

#[test]
fn test_error_fields() {
    let errors = failing_errors();
    let first = errors.first();

    assert_eq!(first.path, ValuePath::root().push_field("name"));
    assert_eq!(first.code, "invalid_type");
    assert_eq!(first.expected.as_deref(), Some("string"));
    assert_eq!(first.got.as_deref(), Some("number"));
}

#[test]
fn test_error_lookup_by_path_and_code() {
    let errors = failing_errors();
    assert_eq!(errors.len(), 4);

    let city = ValuePath::root().push_field("address").push_field("city");
    let at_city = errors.at_path(&city);
    assert_eq!(at_city.len(), 1);
    assert_eq!(at_city[0].got.as_deref(), Some("null"));

    assert_eq!(errors.with_code("required").len(), 1);
    assert_eq!(errors.with_code("invalid_type").len(), 3);
    assert!(errors.with_code("missing_key").is_empty());
}

#[test]
fn test_error_display() {
    let errors = failing_errors();
    let rendered = errors.to_string();

    assert!(rendered.starts_with("schema validation failed with 4 error(s):"));
    assert!(rendered.contains("1. name: invalid type for field \"name\": expected string, got number"));
    assert!(rendered.contains("4. address.zip: non-optional field \"zip\" of type number is missing"));
}

#[test]
fn test_root_errors_render_root_marker() {
    let errors = validate_schema(&Schema::boolean(), &json!("yes"))
        .into_result()
        .unwrap_err();

    assert_eq!(
        errors.messages(),
        vec!["(root): invalid value: expected boolean, got string (expected: boolean) (got: string)"]
    );
}

#[test]
fn test_errors_combine_in_order() {
    let first = SchemaErrors::single(SchemaError::new(ValuePath::root().push_field("a"), "first"));
    let rest = failing_errors();

    let combined = first.combine(rest);
    assert_eq!(combined.len(), 5);

    let messages: Vec<_> = combined.into_iter().map(|e| e.message).collect();
    assert_eq!(messages[0], "first");
    assert_eq!(messages[1], "invalid type for field \"name\": expected string, got number");
}

#[test]
fn test_errors_are_std_errors() {
    fn boxed(errors: SchemaErrors) -> Box<dyn std::error::Error + Send + Sync> {
        Box::new(errors)
    }

    let error = boxed(failing_errors());
    assert!(error.to_string().contains("4 error(s)"));
}

#[test]
fn test_from_vec() {
    assert!(SchemaErrors::from_vec(Vec::new()).is_none());

    let errors = SchemaErrors::from_vec(failing_errors().into_vec()).unwrap();
    assert_eq!(errors, failing_errors());
}
