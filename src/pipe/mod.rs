//! Function composition helpers.
//!
//! - [`pipe!`](crate::pipe!) and [`Pipe`]: plain left-to-right application,
//!   no error handling
//! - [`ResultPipe`]: a chain of `Result`-returning steps that stops at the
//!   first `Err`
//! - [`AsyncResultPipe`]: the same for steps that may be async (feature `async`)
//!
//! Result pipes compose explicit failures only. A step that panics unwinds
//! through the pipe untouched; wrap it with [`safe_wrap`](crate::safe_wrap)
//! if the panic should become a value.

#[cfg(feature = "async")]
mod async_pipe;
mod result_pipe;

#[cfg(feature = "async")]
pub use async_pipe::{async_result_pipe, AsyncResultPipe, AsyncResultPipeBuilder};
pub use result_pipe::{result_pipe, ResultPipe, ResultPipeBuilder};

/// Method-call form of function application: `value.pipe(f)` is `f(value)`.
///
/// ```rust
/// use shapecheck::Pipe;
///
/// let shout = "hello".pipe(str::to_uppercase).pipe(|s| s + "!");
/// assert_eq!(shout, "HELLO!");
/// ```
pub trait Pipe: Sized {
    fn pipe<R>(self, f: impl FnOnce(Self) -> R) -> R {
        f(self)
    }
}

impl<T> Pipe for T {}

/// Threads a value through a list of functions, left to right.
///
/// `pipe!(x, f, g, h)` expands to `h(g(f(x)))`; each step is statically typed
/// against the previous one's output. Panics propagate to the caller.
///
/// ```rust
/// use shapecheck::pipe;
///
/// let add_one = |n: i32| n + 1;
/// let result = pipe!(1, add_one, |n: i32| n * 2, |n: i32| n.to_string());
/// assert_eq!(result, "4");
/// assert_eq!(pipe!(7), 7);
/// ```
#[macro_export]
macro_rules! pipe {
    ($value:expr $(,)?) => {
        $value
    };
    ($value:expr, $step:expr $(, $rest:expr)* $(,)?) => {
        $crate::pipe!(($step)($value) $(, $rest)*)
    };
}

/// Captures the log output `f` emits at debug level and below.
#[cfg(test)]
pub(crate) fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Buffer {
        fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(bytes);
            Ok(bytes.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    let buffer = Buffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    let output = String::from_utf8_lossy(&buffer.0.lock().unwrap()).into_owned();
    (result, output)
}
