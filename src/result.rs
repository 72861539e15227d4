//! Helpers around `std::result::Result`.
//!
//! `Result<T, E>` already is the two-variant success/failure union this crate
//! is built on; this module adds the pieces around it:
//!
//! - [`ResultExt`]: unwrapping that fails with a typed [`UnwrapError`]
//! - [`safe_call`] / [`safe_wrap`]: turn a panicking call into `Err(CaughtPanic)`
//! - [`safe_wrap_async`]: the same for futures (feature `async`)
//!
//! ```rust
//! use shapecheck::{safe_wrap, ResultExt};
//!
//! let parse = safe_wrap(|input: &str| input.parse::<i32>().unwrap_or_raise());
//!
//! assert_eq!(parse("42").unwrap(), 42);
//! assert!(parse("forty-two").is_err());
//! ```

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use tracing::debug;

/// Raised by [`ResultExt::unwrap_or_raise`] when the result is a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("called unwrap on a failed result")]
pub struct UnwrapError;

/// Unwrapping with a typed failure instead of a formatted panic message.
pub trait ResultExt<T, E> {
    /// Returns the success value, or [`UnwrapError`] for a failure.
    ///
    /// The failure payload is dropped; match on the result to keep it.
    fn try_unwrap(self) -> Result<T, UnwrapError>;

    /// Returns the success value, or panics with an [`UnwrapError`] payload.
    ///
    /// The payload can be recovered with `catch_unwind` or [`safe_call`] and
    /// `downcast_ref::<UnwrapError>()`.
    ///
    /// # Panics
    ///
    /// Panics when called on `Err`.
    fn unwrap_or_raise(self) -> T;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn try_unwrap(self) -> Result<T, UnwrapError> {
        self.map_err(|_| UnwrapError)
    }

    fn unwrap_or_raise(self) -> T {
        match self {
            Ok(value) => value,
            Err(_) => panic::panic_any(UnwrapError),
        }
    }
}

/// The payload of a panic caught by one of the `safe_*` wrappers.
///
/// The payload is kept as-is; callers inspect it with [`downcast_ref`](Self::downcast_ref)
/// or [`message`](Self::message).
#[derive(Debug)]
pub struct CaughtPanic {
    payload: Box<dyn Any + Send>,
}

impl CaughtPanic {
    pub fn new(payload: Box<dyn Any + Send>) -> Self {
        Self { payload }
    }

    pub fn payload(&self) -> &(dyn Any + Send) {
        &*self.payload
    }

    pub fn into_payload(self) -> Box<dyn Any + Send> {
        self.payload
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref::<T>()
    }

    /// The panic message, when the payload is a string (`panic!` with a message).
    pub fn message(&self) -> Option<&str> {
        self.downcast_ref::<&'static str>()
            .copied()
            .or_else(|| self.downcast_ref::<String>().map(String::as_str))
    }
}

impl fmt::Display for CaughtPanic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message() {
            Some(message) => write!(f, "wrapped call panicked: {}", message),
            None if self.downcast_ref::<UnwrapError>().is_some() => {
                write!(f, "wrapped call panicked: {}", UnwrapError)
            }
            None => write!(f, "wrapped call panicked with a non-string payload"),
        }
    }
}

impl std::error::Error for CaughtPanic {}

/// Runs `f` once, converting a panic into `Err(CaughtPanic)`.
pub fn safe_call<T, F>(f: F) -> Result<T, CaughtPanic>
where
    F: FnOnce() -> T,
{
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        let caught = CaughtPanic::new(payload);
        debug!(error = %caught, "wrapped call panicked");
        caught
    })
}

/// Adapts `f` into a function that returns `Ok(output)` or `Err(CaughtPanic)`.
///
/// The wrapper takes the same argument as `f`; pass a tuple for several.
///
/// ```rust
/// use shapecheck::safe_wrap;
///
/// let divide = safe_wrap(|(a, b): (i32, i32)| a / b);
///
/// assert_eq!(divide((10, 2)).unwrap(), 5);
/// assert!(divide((1, 0)).is_err());
/// ```
pub fn safe_wrap<A, T, F>(f: F) -> impl Fn(A) -> Result<T, CaughtPanic>
where
    F: Fn(A) -> T,
{
    move |args| safe_call(|| f(args))
}

/// Async counterpart of [`safe_wrap`].
///
/// Panics raised while creating the future and while polling it are both
/// reported as `Err(CaughtPanic)`.
#[cfg(feature = "async")]
pub fn safe_wrap_async<A, T, F, Fut>(
    f: F,
) -> impl Fn(A) -> futures::future::BoxFuture<'static, Result<T, CaughtPanic>>
where
    F: Fn(A) -> Fut,
    Fut: std::future::Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    use futures::future::{self, FutureExt};

    move |args| match safe_call(|| f(args)) {
        Ok(fut) => AssertUnwindSafe(fut)
            .catch_unwind()
            .map(|outcome| {
                outcome.map_err(|payload| {
                    let caught = CaughtPanic::new(payload);
                    debug!(error = %caught, "wrapped future panicked");
                    caught
                })
            })
            .boxed(),
        Err(caught) => future::ready(Err(caught)).boxed(),
    }
}
