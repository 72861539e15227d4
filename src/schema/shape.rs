//! Nested shapes: field name to schema entry mappings.

use indexmap::IndexMap;

use super::Schema;

/// A schema describing an object by its fields.
///
/// Fields are checked in the order they were added. The shape is a floor:
/// keys present in the value but not declared here are ignored.
///
/// ```rust
/// use shapecheck::{validate_schema, Schema};
/// use serde_json::json;
///
/// let schema = Schema::shape()
///     .field("a", Schema::string())
///     .field("c", Schema::shape().field("bob", Schema::number()));
///
/// let result = validate_schema(&schema.into(), &json!({"a": "x", "c": {"bob": 2}, "extra": true}));
/// assert!(result.is_success());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ShapeSchema {
    pub(crate) fields: IndexMap<String, Schema>,
    pub(crate) optional: bool,
}

impl ShapeSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a field. Re-declaring a name replaces its entry but keeps its position.
    pub fn field(mut self, name: impl Into<String>, entry: impl Into<Schema>) -> Self {
        self.fields.insert(name.into(), entry.into());
        self
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Declared fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Schema)> {
        self.fields.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }
}

/// Builds a nested-shape [`Schema`](crate::Schema) from `"key" => entry` pairs.
///
/// ```rust
/// use shapecheck::{shape, Schema};
///
/// let schema = shape! {
///     "a" => Schema::string(),
///     "c" => shape! {
///         "test" => Schema::string(),
///         "bob" => Schema::number().optional(),
///     },
/// };
/// assert_eq!(schema.to_string(), "object");
/// ```
#[macro_export]
macro_rules! shape {
    ($($key:expr => $entry:expr),* $(,)?) => {
        $crate::Schema::from($crate::ShapeSchema::new()$(.field($key, $entry))*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_keep_declaration_order() {
        let shape = ShapeSchema::new()
            .field("z", Schema::string())
            .field("a", Schema::number())
            .field("m", Schema::boolean());

        let names: Vec<_> = shape.fields().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["z", "a", "m"]);
        assert_eq!(shape.len(), 3);
    }

    #[test]
    fn test_redeclared_field_keeps_position() {
        let shape = ShapeSchema::new()
            .field("a", Schema::string())
            .field("b", Schema::string())
            .field("a", Schema::number());

        let fields: Vec<_> = shape
            .fields()
            .map(|(name, entry)| format!("{}:{}", name, entry))
            .collect();
        assert_eq!(fields, vec!["a:number", "b:string"]);
    }

    #[test]
    fn test_macro_builds_same_shape() {
        let from_macro = shape! { "a" => Schema::string(), "b" => Schema::null() };
        let Schema::Shape(shape) = from_macro else {
            panic!("expected a shape");
        };
        assert_eq!(shape.len(), 2);
        assert!(!shape.is_optional());
    }
}
