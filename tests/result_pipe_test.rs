//! Integration tests for the value pipe and the synchronous result pipe.

use std::cell::Cell;

use serde_json::{json, Value};
use shapecheck::{pipe, result_pipe, shape, validation_step, Pipe, Schema, SchemaErrors};

fn add_one(n: i32) -> Result<i32, String> {
    Ok(n + 1)
}

fn multiply_by_two(n: i32) -> Result<i32, String> {
    Ok(n * 2)
}

fn fail_at_five(n: i32) -> Result<i32, String> {
    if n == 5 {
        Err("Failed at 5".to_string())
    } else {
        Ok(n)
    }
}

#[test]
fn test_value_pipe() {
    let trimmed = pipe!("  Hello  ", str::trim, str::to_lowercase, |s: String| s.len());
    assert_eq!(trimmed, 5);
}

#[test]
fn test_value_pipe_via_trait() {
    let result = 2_i32.pipe(|n| n + 1).pipe(|n| n * 10);
    assert_eq!(result, 30);
}

#[test]
fn test_short_circuit_skips_later_steps() {
    let spy_called = Cell::new(false);
    let pipeline = result_pipe::<String>()
        .first(add_one)
        .then(fail_at_five)
        .then(|n| {
            spy_called.set(true);
            Ok(n)
        })
        .then(multiply_by_two);

    let result = pipeline.call(4);
    assert_eq!(result, Err("Failed at 5".to_string()));
    assert!(!spy_called.get());
}

#[test]
fn test_no_failure_runs_every_step() {
    let pipeline = result_pipe::<String>()
        .first(add_one)
        .then(fail_at_five)
        .then(multiply_by_two)
        .then(|n| Ok(n.to_string()));

    assert_eq!(pipeline.call(1), Ok("4".to_string()));
}

#[test]
fn test_multiple_initial_arguments() {
    let pipeline = result_pipe::<String>()
        .first(|(a, b): (i32, i32)| Ok(a + b))
        .then(multiply_by_two)
        .then(|n| Ok(n.to_string()));

    assert_eq!(pipeline.call((2, 3)), Ok("10".to_string()));
}

#[test]
fn test_error_passes_through_unchanged() {
    #[derive(Debug, Clone, PartialEq)]
    struct CustomError {
        code: u16,
        message: String,
    }

    let pipeline = result_pipe::<CustomError>()
        .first(|n: i32| Ok(n + 1))
        .then(|_: i32| -> Result<i32, CustomError> {
            Err(CustomError {
                code: 400,
                message: "Custom error".to_string(),
            })
        })
        .then(|n| Ok(n * 2));

    assert_eq!(
        pipeline.call(1),
        Err(CustomError {
            code: 400,
            message: "Custom error".to_string()
        })
    );
}

#[test]
fn test_first_step_failure() {
    let pipeline = result_pipe::<String>()
        .first(|_: ()| Err::<i32, _>("no input".to_string()))
        .then(add_one);

    assert_eq!(pipeline.call(()), Err("no input".to_string()));
}

#[test]
fn test_ten_steps() {
    let pipeline = result_pipe::<String>()
        .first(add_one)
        .then(multiply_by_two)
        .then(add_one)
        .then(multiply_by_two)
        .then(add_one)
        .then(multiply_by_two)
        .then(add_one)
        .then(multiply_by_two)
        .then(add_one)
        .then(|n| Ok(n.to_string()));

    assert_eq!(pipeline.steps(), 10);
    assert_eq!(pipeline.call(1), Ok("47".to_string()));
}

#[test]
#[should_panic(expected = "step exploded")]
fn test_panics_are_not_caught() {
    let pipeline = result_pipe::<String>()
        .first(add_one)
        .then(|_: i32| -> Result<i32, String> { panic!("step exploded") });

    let _ = pipeline.call(1);
}

#[test]
fn test_validation_as_a_step() {
    let pipeline = result_pipe::<SchemaErrors>()
        .first(|raw: &str| {
            Ok(serde_json::from_str::<Value>(raw).unwrap_or(Value::Null))
        })
        .then(validation_step(shape! {
            "name" => Schema::string(),
            "age" => Schema::number(),
        }))
        .then(|user: Value| Ok(user["name"].as_str().map(str::to_uppercase)));

    assert_eq!(
        pipeline.call(r#"{"name": "ada", "age": 36}"#),
        Ok(Some("ADA".to_string()))
    );

    let errors = pipeline.call(r#"{"name": 1}"#).unwrap_err();
    assert_eq!(errors.len(), 2);

    let errors = pipeline.call("not json").unwrap_err();
    assert_eq!(errors.first().code, "not_an_object");
}

#[test]
fn test_typed_validation_step() {
    #[derive(Debug, serde::Deserialize, PartialEq)]
    struct Point {
        x: i64,
        y: i64,
    }

    let schema = shape! { "x" => Schema::number(), "y" => Schema::number() };
    let schema = schema.typed::<Point>();
    let pipeline = result_pipe::<SchemaErrors>()
        .first(validation_step(schema))
        .then(|p: Point| Ok(p.x + p.y));

    assert_eq!(pipeline.call(json!({"x": 2, "y": 3})), Ok(5));
    assert!(pipeline.call(json!({"x": 2})).is_err());
}
