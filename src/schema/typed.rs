//! Schemas bound to a caller-declared output type.
//!
//! The validated value's Rust type is not computed from the schema tree;
//! the caller declares it and serde checks that it agrees. The expected
//! correspondence is:
//!
//! | schema entry | Rust type |
//! |---|---|
//! | `Schema::null()` | `()` or `Option<_>` |
//! | `Schema::undefined()` field | `Option<_>` (absent) |
//! | `Schema::string()` / `number()` / `boolean()` | `String` / numeric / `bool` |
//! | `.optional()` | `Option<_>` |
//! | `Schema::array(item)` | `Vec<item type>` |
//! | `Schema::union(..)` | an untagged enum |
//! | `Schema::shape()` | a struct with the same field names |

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::Value;
use stillwater::Validation;

use crate::error::{SchemaError, SchemaErrors};
use crate::path::ValuePath;
use crate::ValidationResult;

use super::{Schema, SchemaLike};

/// A [`Schema`] whose successful output is deserialized into `T`.
///
/// Structural validation runs first and reports every violation. Only a
/// structurally valid value is handed to serde; a mismatch between the schema
/// and `T` then surfaces as a single `deserialize` error.
///
/// ```rust
/// use serde::Deserialize;
/// use shapecheck::{shape, Schema};
/// use serde_json::json;
///
/// #[derive(Debug, Deserialize, PartialEq)]
/// struct User {
///     name: String,
///     age: Option<u32>,
/// }
///
/// let user_shape = shape! {
///     "name" => Schema::string(),
///     "age" => Schema::number().optional(),
/// };
/// let schema = user_shape.typed::<User>();
///
/// let user = schema.validate(&json!({"name": "Ada"})).into_result().unwrap();
/// assert_eq!(user, User { name: "Ada".to_string(), age: None });
/// ```
pub struct TypedSchema<T> {
    schema: Schema,
    _output: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> TypedSchema<T> {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            _output: PhantomData,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn validate(&self, value: &Value) -> ValidationResult<T> {
        match self.schema.validate(value) {
            Validation::Failure(errors) => Validation::Failure(errors),
            Validation::Success(value) => match serde_json::from_value::<T>(value) {
                Ok(typed) => Validation::Success(typed),
                Err(err) => Validation::Failure(SchemaErrors::single(
                    SchemaError::new(
                        ValuePath::root(),
                        format!("value matches the schema but not the declared type: {}", err),
                    )
                    .with_code("deserialize")
                    .with_expected(std::any::type_name::<T>()),
                )),
            },
        }
    }
}

impl<T> Clone for TypedSchema<T> {
    fn clone(&self) -> Self {
        Self {
            schema: self.schema.clone(),
            _output: PhantomData,
        }
    }
}

impl<T> fmt::Debug for TypedSchema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedSchema")
            .field("schema", &self.schema)
            .field("output", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T: DeserializeOwned> SchemaLike for TypedSchema<T> {
    type Output = T;

    fn validate(&self, value: &Value) -> ValidationResult<T> {
        TypedSchema::validate(self, value)
    }
}
