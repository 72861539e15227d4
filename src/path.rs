//! Locations inside a runtime value.
//!
//! A [`ValuePath`] names the field or element a [`SchemaError`](crate::SchemaError)
//! refers to, e.g. `c.test` or `items[2]`.

use std::fmt::{self, Display};

/// One step into a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object key access.
    Field(String),
    /// Array element access.
    Index(usize),
}

/// A path from the validated root down to a nested value.
///
/// Paths are immutable; `push_*` returns an extended copy so sibling fields
/// can share the same parent.
///
/// ```rust
/// use shapecheck::ValuePath;
///
/// let path = ValuePath::root().push_field("c").push_index(1).push_field("test");
/// assert_eq!(path.to_string(), "c[1].test");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ValuePath {
    segments: Vec<PathSegment>,
}

impl ValuePath {
    /// The empty path: the value handed to the validator.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns this path extended by an object key.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        self.push(PathSegment::Field(name.into()))
    }

    /// Returns this path extended by an array index.
    pub fn push_index(&self, index: usize) -> Self {
        self.push(PathSegment::Index(index))
    }

    fn push(&self, segment: PathSegment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(segment);
        Self { segments }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }
}

impl Display for ValuePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if i == 0 => write!(f, "{}", name)?,
                PathSegment::Field(name) => write!(f, ".{}", name)?,
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}
