//! Synchronous short-circuiting pipelines.

use std::marker::PhantomData;

use tracing::{debug, trace};

/// Starts a [`ResultPipe`] whose steps all fail with `E`.
///
/// ```rust
/// use shapecheck::result_pipe;
///
/// let pipeline = result_pipe::<String>()
///     .first(|(a, b): (i32, i32)| Ok(a + b))
///     .then(|n| if n == 5 { Err(format!("failed at {}", n)) } else { Ok(n) })
///     .then(|n| Ok(n * 2));
///
/// assert_eq!(pipeline.call((1, 2)), Ok(6));
/// assert_eq!(pipeline.call((2, 3)), Err("failed at 5".to_string()));
/// ```
pub fn result_pipe<E>() -> ResultPipeBuilder<E> {
    ResultPipeBuilder {
        _error: PhantomData,
    }
}

/// Fixes the error type before the first step is given.
#[derive(Debug, Clone, Copy)]
pub struct ResultPipeBuilder<E> {
    _error: PhantomData<fn() -> E>,
}

impl<E> ResultPipeBuilder<E> {
    /// Sets the first step. Its input is the pipeline's input; pass a tuple
    /// to start from several arguments.
    pub fn first<A, T, F>(self, step: F) -> ResultPipe<A, T, E, F>
    where
        F: Fn(A) -> Result<T, E>,
    {
        ResultPipe {
            run: step,
            steps: 1,
            _types: PhantomData,
        }
    }
}

/// A composed chain of steps from `A` to `Result<T, E>`.
///
/// Each step receives the previous step's success value. The first `Err`
/// becomes the pipeline's result unchanged, and no later step runs.
/// Building a pipe has no side effects; [`call`](Self::call) runs it and can
/// be repeated.
pub struct ResultPipe<A, T, E, F> {
    run: F,
    steps: usize,
    _types: PhantomData<fn(A) -> Result<T, E>>,
}

impl<A, T, E, F> ResultPipe<A, T, E, F>
where
    F: Fn(A) -> Result<T, E>,
{
    /// Appends a step.
    pub fn then<U, G>(self, step: G) -> ResultPipe<A, U, E, impl Fn(A) -> Result<U, E>>
    where
        G: Fn(T) -> Result<U, E>,
    {
        let run = self.run;
        ResultPipe {
            run: move |input: A| run(input).and_then(&step),
            steps: self.steps + 1,
            _types: PhantomData,
        }
    }

    /// Number of steps in the pipeline.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Runs the pipeline on `input`.
    pub fn call(&self, input: A) -> Result<T, E> {
        trace!(steps = self.steps, "running result pipeline");
        let result = (self.run)(input);
        if result.is_err() {
            debug!(steps = self.steps, "result pipeline failed");
        }
        result
    }

    /// Turns the pipeline into a plain function.
    pub fn into_fn(self) -> impl Fn(A) -> Result<T, E> {
        move |input| self.call(input)
    }
}
