//! The common interface of untyped and typed schemas.

use serde_json::Value;

use crate::ValidationResult;

/// Something that validates a runtime value into `Output`.
///
/// Implemented by [`Schema`](crate::Schema) (output: the unmodified
/// [`Value`]) and [`TypedSchema<T>`](crate::TypedSchema) (output: `T`).
/// The `Send + Sync` bounds let one schema serve concurrent validations.
///
/// ```rust
/// use shapecheck::{Schema, SchemaLike};
/// use serde_json::json;
///
/// fn count_valid<S: SchemaLike>(schema: &S, values: &[serde_json::Value]) -> usize {
///     values.iter().filter(|v| schema.validate(v).is_success()).count()
/// }
///
/// let values = [json!(1), json!("two"), json!(3)];
/// assert_eq!(count_valid(&Schema::number(), &values), 2);
/// assert_eq!(count_valid(&Schema::number().typed::<u8>(), &values), 2);
/// ```
pub trait SchemaLike: Send + Sync {
    type Output;

    /// Validates `value`, accumulating every violation.
    fn validate(&self, value: &Value) -> ValidationResult<Self::Output>;
}

impl SchemaLike for super::Schema {
    type Output = Value;

    fn validate(&self, value: &Value) -> ValidationResult<Value> {
        super::Schema::validate(self, value)
    }
}
