//! The recursive validation engine.
//!
//! Validation walks the schema tree once and records every violation it
//! finds into a single ordered list: fields in declaration order, nested
//! shapes spliced in place. Field checks at one level never stop early.
//! Validator nodes themselves are pure predicates; the engine turns a `false`
//! into one error at the position that invoked the validator.

use serde_json::Value;
use stillwater::Validation;
use tracing::{debug, trace};

use crate::error::{SchemaError, SchemaErrors};
use crate::path::ValuePath;
use crate::schema::{Schema, SchemaLike, ShapeSchema};
use crate::ValidationResult;

/// Checks `value` against `schema`, returning the unmodified value on success
/// or every collected violation on failure.
///
/// ```rust
/// use shapecheck::{shape, validate_schema, Schema};
/// use serde_json::json;
///
/// let schema = shape! {
///     "a" => Schema::string(),
///     "b" => Schema::number(),
///     "c" => shape! { "test" => Schema::string(), "bob" => Schema::number() },
/// };
///
/// let errors = validate_schema(&schema, &json!({"a": 0, "b": "test", "c": {"test": 123, "bob": "test"}}))
///     .into_result()
///     .unwrap_err();
/// assert_eq!(errors.len(), 4);
/// ```
pub fn validate_schema(schema: &Schema, value: &Value) -> ValidationResult<Value> {
    schema.validate(value)
}

/// Adapts a schema into a step for [`ResultPipe`](crate::ResultPipe) or
/// [`AsyncResultPipe`](crate::AsyncResultPipe).
pub fn validation_step<S>(schema: S) -> impl Fn(Value) -> Result<S::Output, SchemaErrors>
where
    S: SchemaLike,
{
    move |value| schema.validate(&value).into_result()
}

pub(crate) fn validate_slot(schema: &Schema, value: Option<&Value>) -> ValidationResult<()> {
    let mut errors = Vec::new();
    check_entry(schema, value, &ValuePath::root(), &mut errors);

    match SchemaErrors::from_vec(errors) {
        Some(errors) => {
            debug!(errors = errors.len(), schema = %schema, "schema validation failed");
            Validation::Failure(errors)
        }
        None => {
            trace!(schema = %schema, "schema validation passed");
            Validation::Success(())
        }
    }
}

pub(crate) fn shape_accepts(shape: &ShapeSchema, value: Option<&Value>) -> bool {
    let mut errors = Vec::new();
    check_shape(shape, value, &ValuePath::root(), &mut errors);
    errors.is_empty()
}

/// Checks a whole value against an entry that is not reached through a field.
fn check_entry(
    schema: &Schema,
    value: Option<&Value>,
    path: &ValuePath,
    errors: &mut Vec<SchemaError>,
) {
    match schema {
        Schema::Null => {
            if !matches!(value, Some(Value::Null)) {
                errors.push(
                    SchemaError::new(
                        path.clone(),
                        format!("expected null value, received {}", render(value)),
                    )
                    .with_code("expected_null")
                    .with_expected("null")
                    .with_got(render(value)),
                );
            }
        }
        Schema::Undefined => {
            if value.is_some() {
                errors.push(
                    SchemaError::new(
                        path.clone(),
                        format!("expected undefined value, received {}", render(value)),
                    )
                    .with_code("expected_undefined")
                    .with_expected("undefined")
                    .with_got(render(value)),
                );
            }
        }
        Schema::Validator(validator) => {
            if !value.is_some_and(|v| validator.accepts(v)) {
                errors.push(
                    SchemaError::new(
                        path.clone(),
                        format!(
                            "invalid value: expected {}, got {}",
                            validator,
                            type_name(value)
                        ),
                    )
                    .with_code("invalid_type")
                    .with_expected(validator.to_string())
                    .with_got(type_name(value)),
                );
            }
        }
        Schema::Shape(shape) => check_shape(shape, value, path, errors),
    }
}

fn check_shape(
    shape: &ShapeSchema,
    value: Option<&Value>,
    path: &ValuePath,
    errors: &mut Vec<SchemaError>,
) {
    let object = match value {
        Some(Value::Object(object)) => object,
        other => {
            errors.push(
                SchemaError::new(path.clone(), format!("expected object, got {}", type_name(other)))
                    .with_code("not_an_object")
                    .with_expected("object")
                    .with_got(type_name(other)),
            );
            return;
        }
    };

    for (key, entry) in &shape.fields {
        let field_path = path.push_field(key);
        let field = object.get(key);

        match entry {
            Schema::Null => {
                if !matches!(field, Some(Value::Null)) {
                    errors.push(
                        SchemaError::new(
                            field_path,
                            format!(
                                "expected null value for field \"{}\", received {}",
                                key,
                                render(field)
                            ),
                        )
                        .with_code("expected_null")
                        .with_expected("null")
                        .with_got(render(field)),
                    );
                }
            }
            Schema::Undefined => {
                if field.is_some() {
                    errors.push(
                        SchemaError::new(
                            field_path,
                            format!(
                                "expected undefined value for field \"{}\", received {}",
                                key,
                                render(field)
                            ),
                        )
                        .with_code("expected_undefined")
                        .with_expected("undefined")
                        .with_got(render(field)),
                    );
                }
            }
            Schema::Validator(validator) => match field {
                None if validator.is_optional() => {}
                None => {
                    errors.push(
                        SchemaError::new(
                            field_path,
                            format!(
                                "non-optional field \"{}\" of type {} is missing",
                                key, validator
                            ),
                        )
                        .with_code("required")
                        .with_expected(validator.to_string()),
                    );
                }
                Some(field_value) if !validator.accepts(field_value) => {
                    errors.push(
                        SchemaError::new(
                            field_path,
                            format!(
                                "invalid type for field \"{}\": expected {}, got {}",
                                key,
                                validator,
                                type_name(field)
                            ),
                        )
                        .with_code("invalid_type")
                        .with_expected(validator.to_string())
                        .with_got(type_name(field)),
                    );
                }
                Some(_) => {}
            },
            Schema::Shape(nested) => match field {
                None if nested.is_optional() => {}
                // Reported here rather than descending into an absent value.
                None => {
                    errors.push(
                        SchemaError::new(
                            field_path,
                            format!("provided value is missing key \"{}\"", key),
                        )
                        .with_code("missing_key")
                        .with_expected("object"),
                    );
                }
                Some(_) => check_shape(nested, field, &field_path, errors),
            },
        }
    }
}

/// JSON type name of a possibly absent value.
fn type_name(value: Option<&Value>) -> &'static str {
    match value {
        None => "undefined",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}

fn render(value: Option<&Value>) -> String {
    value.map_or_else(|| "undefined".to_string(), Value::to_string)
}
