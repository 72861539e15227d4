//! Validator nodes: schema leaves that wrap a boolean predicate.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::Schema;

/// A shareable predicate over a single runtime value.
#[derive(Clone)]
pub(crate) struct Predicate(Arc<dyn Fn(&Value) -> bool + Send + Sync>);

impl Predicate {
    pub(crate) fn new<F>(f: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    fn test(&self, value: &Value) -> bool {
        (self.0)(value)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

#[derive(Debug, Clone)]
pub(crate) enum ValidatorKind {
    String,
    Number,
    Boolean,
    Array(Box<Schema>),
    Union(Vec<Schema>),
    Custom { name: String, predicate: Predicate },
}

/// A schema leaf: a predicate plus the `optional` field flag.
///
/// Built through [`Schema::string`], [`Schema::number`], [`Schema::boolean`],
/// [`Schema::array`], [`Schema::union`] and [`Schema::custom`]. Evaluating a
/// validator never records errors by itself; it answers yes or no and the
/// engine reports the mismatch at the call site.
#[derive(Debug, Clone)]
pub struct Validator {
    pub(crate) kind: ValidatorKind,
    pub(crate) optional: bool,
}

impl Validator {
    pub(crate) fn new(kind: ValidatorKind) -> Self {
        Self {
            kind,
            optional: false,
        }
    }

    /// Whether a missing field for this validator is accepted.
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Evaluates the predicate against a present value.
    ///
    /// The `optional` flag only matters for missing object fields, so it
    /// plays no part here.
    pub fn accepts(&self, value: &Value) -> bool {
        match &self.kind {
            ValidatorKind::String => value.is_string(),
            ValidatorKind::Number => value.is_number(),
            ValidatorKind::Boolean => value.is_boolean(),
            ValidatorKind::Array(item) => value
                .as_array()
                .is_some_and(|items| items.iter().all(|element| item.accepts(Some(element)))),
            ValidatorKind::Union(alternatives) => alternatives
                .iter()
                .any(|alternative| alternative.accepts(Some(value))),
            ValidatorKind::Custom { predicate, .. } => predicate.test(value),
        }
    }
}

impl fmt::Display for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ValidatorKind::String => f.write_str("string"),
            ValidatorKind::Number => f.write_str("number"),
            ValidatorKind::Boolean => f.write_str("boolean"),
            ValidatorKind::Array(item) => write!(f, "array<{}>", item),
            ValidatorKind::Union(alternatives) => {
                f.write_str("union<")?;
                for (i, alternative) in alternatives.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{}", alternative)?;
                }
                f.write_str(">")
            }
            ValidatorKind::Custom { name, .. } => f.write_str(name),
        }
    }
}
