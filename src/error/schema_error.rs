//! Schema violation types.
//!
//! [`SchemaError`] describes one violation; [`SchemaErrors`] is the ordered,
//! never-empty set of violations produced by one validation pass.

use std::fmt::{self, Display};

use stillwater::prelude::*;

use crate::path::ValuePath;

/// A single schema violation.
///
/// - **path**: where in the value the violation was found
/// - **message**: human-readable description
/// - **code**: machine-readable kind (`invalid_type`, `required`, `missing_key`, ...)
/// - **expected** / **got**: optional descriptions of the mismatch
///
/// ```rust
/// use shapecheck::{SchemaError, ValuePath};
///
/// let error = SchemaError::new(ValuePath::root().push_field("age"), "invalid type for field \"age\"")
///     .with_code("invalid_type")
///     .with_expected("number")
///     .with_got("string");
///
/// assert_eq!(error.to_string(), "age: invalid type for field \"age\" (expected: number) (got: string)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    pub path: ValuePath,
    pub message: String,
    pub got: Option<String>,
    pub expected: Option<String>,
    pub code: String,
}

impl SchemaError {
    /// Creates an error with the generic `validation_error` code.
    pub fn new(path: ValuePath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
            got: None,
            expected: None,
            code: "validation_error".to_string(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_got(mut self, got: impl Into<String>) -> Self {
        self.got = Some(got.into());
        self
    }

    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "(root): {}", self.message)?;
        } else {
            write!(f, "{}: {}", self.path, self.message)?;
        }
        if let Some(expected) = &self.expected {
            write!(f, " (expected: {})", expected)?;
        }
        if let Some(got) = &self.got {
            write!(f, " (got: {})", got)?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaError {}

/// The violations collected by one validation pass, in traversal order.
///
/// Backed by a `NonEmptyVec`, so a failed validation always carries at least
/// one error. Error sets from separate passes combine through `Semigroup`:
///
/// ```rust
/// use shapecheck::{SchemaError, SchemaErrors, ValuePath};
/// use stillwater::prelude::*;
///
/// let first = SchemaErrors::single(SchemaError::new(ValuePath::root().push_field("a"), "missing"));
/// let second = SchemaErrors::single(SchemaError::new(ValuePath::root().push_field("b"), "missing"));
///
/// assert_eq!(first.combine(second).len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaErrors(NonEmptyVec<SchemaError>);

impl SchemaErrors {
    pub fn single(error: SchemaError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Wraps collected errors, or returns `None` when nothing was collected.
    pub fn from_vec(errors: Vec<SchemaError>) -> Option<Self> {
        let mut errors = errors.into_iter();
        let head = NonEmptyVec::singleton(errors.next()?);
        Some(Self(errors.fold(head, |acc, error| {
            acc.combine(NonEmptyVec::singleton(error))
        })))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &SchemaError> {
        self.0.iter()
    }

    pub fn first(&self) -> &SchemaError {
        self.0.head()
    }

    /// Errors recorded at exactly `path`.
    pub fn at_path(&self, path: &ValuePath) -> Vec<&SchemaError> {
        self.0.iter().filter(|e| &e.path == path).collect()
    }

    /// Errors carrying the given code.
    pub fn with_code(&self, code: &str) -> Vec<&SchemaError> {
        self.0.iter().filter(|e| e.code == code).collect()
    }

    /// One human-readable line per violation, in traversal order.
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }

    pub fn into_vec(self) -> Vec<SchemaError> {
        self.0.into_vec()
    }
}

impl Semigroup for SchemaErrors {
    fn combine(self, other: Self) -> Self {
        SchemaErrors(self.0.combine(other.0))
    }
}

impl Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "schema validation failed with {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaErrors {}

impl IntoIterator for SchemaErrors {
    type Item = SchemaError;
    type IntoIter = std::vec::IntoIter<SchemaError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

// Validation results cross thread boundaries in batch validation.
const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SchemaError>();
    assert_send_sync::<SchemaErrors>();
};
