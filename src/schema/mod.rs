//! Declarative schema descriptions.
//!
//! A [`Schema`] is a finite tree of entries:
//!
//! - `Null` / `Undefined` markers match exactly null / an absent value
//! - validator nodes ([`Validator`]) wrap a predicate: string, number,
//!   boolean, array, union or a custom function
//! - nested shapes ([`ShapeSchema`]) map field names to further entries
//!
//! The entry kind is an explicit enum tag, so a validator node can never be
//! confused with a shape that happens to have similarly named fields.
//!
//! # Example
//!
//! ```rust
//! use shapecheck::Schema;
//! use serde_json::json;
//!
//! let schema: Schema = Schema::shape()
//!     .field("tags", Schema::array(Schema::union([Schema::string(), Schema::number()])))
//!     .field("owner", Schema::null())
//!     .into();
//!
//! assert!(schema.validate(&json!({"tags": ["a", 1], "owner": null})).is_success());
//! assert!(schema.validate(&json!({"tags": ["a", [1]], "owner": null})).is_failure());
//! ```

mod shape;
mod traits;
mod typed;
mod validator;

use std::fmt;

use rayon::prelude::*;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::validation;
use crate::ValidationResult;

pub use shape::ShapeSchema;
pub use traits::SchemaLike;
pub use typed::TypedSchema;
pub use validator::Validator;

use validator::{Predicate, ValidatorKind};

/// A schema entry: marker, validator node or nested shape.
#[derive(Debug, Clone)]
pub enum Schema {
    /// Matches only `null`.
    Null,
    /// Matches only an absent value.
    Undefined,
    /// A predicate-backed leaf.
    Validator(Validator),
    /// An object described field by field.
    Shape(ShapeSchema),
}

impl Schema {
    pub fn null() -> Self {
        Schema::Null
    }

    pub fn undefined() -> Self {
        Schema::Undefined
    }

    /// Matches JSON strings.
    pub fn string() -> Self {
        Schema::Validator(Validator::new(ValidatorKind::String))
    }

    /// Matches any JSON number, integer or floating point.
    pub fn number() -> Self {
        Schema::Validator(Validator::new(ValidatorKind::Number))
    }

    pub fn boolean() -> Self {
        Schema::Validator(Validator::new(ValidatorKind::Boolean))
    }

    /// Matches arrays whose every element matches `item`.
    ///
    /// The check is a single yes/no: one bad element fails the whole array
    /// with one error at the array's position.
    pub fn array(item: impl Into<Schema>) -> Self {
        Schema::Validator(Validator::new(ValidatorKind::Array(Box::new(item.into()))))
    }

    /// Matches values accepted by at least one alternative, tried in order.
    pub fn union<I>(alternatives: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Schema>,
    {
        Schema::Validator(Validator::new(ValidatorKind::Union(
            alternatives.into_iter().map(Into::into).collect(),
        )))
    }

    /// A validator node backed by an arbitrary predicate.
    ///
    /// `name` stands for the validator in error messages.
    ///
    /// ```rust
    /// use shapecheck::Schema;
    /// use serde_json::json;
    ///
    /// let positive = Schema::custom("positive number", |v| v.as_f64().is_some_and(|n| n > 0.0));
    /// assert!(positive.validate(&json!(3)).is_success());
    /// assert!(positive.validate(&json!(-3)).is_failure());
    /// ```
    pub fn custom<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Schema::Validator(Validator::new(ValidatorKind::Custom {
            name: name.into(),
            predicate: Predicate::new(predicate),
        }))
    }

    /// Starts a nested shape.
    pub fn shape() -> ShapeSchema {
        ShapeSchema::new()
    }

    /// Marks the entry optional: a missing object field for it is accepted.
    ///
    /// Markers are returned unchanged; absence already is their exact contract.
    pub fn optional(self) -> Self {
        match self {
            Schema::Validator(mut validator) => {
                validator.optional = true;
                Schema::Validator(validator)
            }
            Schema::Shape(mut shape) => {
                shape.optional = true;
                Schema::Shape(shape)
            }
            marker => marker,
        }
    }

    pub fn is_optional(&self) -> bool {
        match self {
            Schema::Validator(validator) => validator.is_optional(),
            Schema::Shape(shape) => shape.is_optional(),
            Schema::Null | Schema::Undefined => false,
        }
    }

    /// Pairs this schema with the Rust type its validated values deserialize into.
    pub fn typed<T: DeserializeOwned>(self) -> TypedSchema<T> {
        TypedSchema::new(self)
    }

    /// Yes/no match of a possibly absent value, as used inside arrays and unions.
    pub fn accepts(&self, value: Option<&Value>) -> bool {
        match self {
            Schema::Null => matches!(value, Some(Value::Null)),
            Schema::Undefined => value.is_none(),
            Schema::Validator(validator) => value.is_some_and(|v| validator.accepts(v)),
            Schema::Shape(shape) => validation::shape_accepts(shape, value),
        }
    }

    /// Validates `value`, collecting every violation.
    ///
    /// Success returns the input unchanged.
    pub fn validate(&self, value: &Value) -> ValidationResult<Value> {
        validation::validate_slot(self, Some(value)).map(|_| value.clone())
    }

    /// Validates a value that may be absent (`None` plays the role of undefined).
    pub fn validate_slot(&self, value: Option<&Value>) -> ValidationResult<Option<Value>> {
        validation::validate_slot(self, value).map(|_| value.cloned())
    }

    /// Validates each value against this schema in parallel.
    ///
    /// Results are returned in input order.
    pub fn validate_batch(&self, values: &[Value]) -> Vec<ValidationResult<Value>> {
        values.par_iter().map(|value| self.validate(value)).collect()
    }
}

impl From<ShapeSchema> for Schema {
    fn from(shape: ShapeSchema) -> Self {
        Schema::Shape(shape)
    }
}

impl From<Validator> for Schema {
    fn from(validator: Validator) -> Self {
        Schema::Validator(validator)
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Schema::Null => f.write_str("null"),
            Schema::Undefined => f.write_str("undefined"),
            Schema::Validator(validator) => write!(f, "{}", validator),
            Schema::Shape(_) => f.write_str("object"),
        }
    }
}
