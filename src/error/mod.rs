//! Error types for schema violations.

mod schema_error;

pub use schema_error::{SchemaError, SchemaErrors};
