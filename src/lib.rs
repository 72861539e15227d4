//! # Shapecheck
//!
//! Result-based composition and schema validation for untyped values.
//!
//! ## Overview
//!
//! - [`result`]: unwrapping with a typed [`UnwrapError`], and `safe_*`
//!   wrappers that turn panics into `Err(CaughtPanic)`
//! - [`pipe`]: `pipe!`, [`ResultPipe`] and [`AsyncResultPipe`], which chain
//!   `Result`-returning steps and stop at the first failure
//! - [`schema`] + [`validation`]: declarative schemas checked against
//!   `serde_json::Value`, reporting every violation in one pass
//!
//! ## Example
//!
//! ```rust
//! use shapecheck::{result_pipe, shape, validation_step, Schema, SchemaErrors};
//! use serde_json::{json, Value};
//!
//! let user = shape! {
//!     "name" => Schema::string(),
//!     "email" => Schema::string().optional(),
//!     "roles" => Schema::array(Schema::string()),
//! };
//!
//! let count_roles = result_pipe::<SchemaErrors>()
//!     .first(validation_step(user))
//!     .then(|value: Value| Ok(value["roles"].as_array().map_or(0, Vec::len)));
//!
//! assert_eq!(count_roles.call(json!({"name": "Ada", "roles": ["admin"]})).unwrap(), 1);
//!
//! let errors = count_roles.call(json!({"roles": "admin"})).unwrap_err();
//! assert_eq!(errors.len(), 2);
//! ```

pub mod error;
pub mod path;
pub mod pipe;
pub mod result;
pub mod schema;
pub mod validation;

pub use error::{SchemaError, SchemaErrors};
pub use path::{PathSegment, ValuePath};
#[cfg(feature = "async")]
pub use pipe::{async_result_pipe, AsyncResultPipe, AsyncResultPipeBuilder};
pub use pipe::{result_pipe, Pipe, ResultPipe, ResultPipeBuilder};
#[cfg(feature = "async")]
pub use result::safe_wrap_async;
pub use result::{safe_call, safe_wrap, CaughtPanic, ResultExt, UnwrapError};
pub use schema::{Schema, SchemaLike, ShapeSchema, TypedSchema, Validator};
pub use validation::{validate_schema, validation_step};

/// Validation outcome: the validated value, or every collected violation.
pub type ValidationResult<T> = stillwater::Validation<T, SchemaErrors>;
