//! Short-circuiting pipelines over sync and async steps.

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use futures::future::{self, BoxFuture, FutureExt};
use tracing::{debug, trace};

type StepFn<A, T, E> = Arc<dyn Fn(A) -> BoxFuture<'static, Result<T, E>> + Send + Sync>;

/// Starts an [`AsyncResultPipe`] whose steps all fail with `E`.
///
/// ```rust
/// use futures::executor::block_on;
/// use shapecheck::async_result_pipe;
///
/// let pipeline = async_result_pipe::<String>()
///     .first_async(|n: i32| async move { Ok::<_, String>(n + 1) })
///     .then(|n| Ok(n * 2))
///     .then_async(|n: i32| async move { Ok::<_, String>(n.to_string()) });
///
/// assert_eq!(block_on(pipeline.call(1)), Ok("4".to_string()));
/// ```
pub fn async_result_pipe<E>() -> AsyncResultPipeBuilder<E> {
    AsyncResultPipeBuilder {
        _error: PhantomData,
    }
}

/// Fixes the error type before the first step is given.
#[derive(Debug, Clone, Copy)]
pub struct AsyncResultPipeBuilder<E> {
    _error: PhantomData<fn() -> E>,
}

impl<E: Send + 'static> AsyncResultPipeBuilder<E> {
    /// Sets a synchronous first step.
    pub fn first<A, T, F>(self, step: F) -> AsyncResultPipe<A, T, E>
    where
        F: Fn(A) -> Result<T, E> + Send + Sync + 'static,
        A: Send + 'static,
        T: Send + 'static,
    {
        let step = Arc::new(step);
        AsyncResultPipe {
            run: Arc::new(move |input: A| {
                let step = Arc::clone(&step);
                async move { step(input) }.boxed()
            }),
            steps: 1,
        }
    }

    /// Sets an async first step.
    pub fn first_async<A, T, F, Fut>(self, step: F) -> AsyncResultPipe<A, T, E>
    where
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        A: Send + 'static,
        T: Send + 'static,
    {
        let step = Arc::new(step);
        AsyncResultPipe {
            run: Arc::new(move |input: A| {
                let step = Arc::clone(&step);
                async move { step(input).await }.boxed()
            }),
            steps: 1,
        }
    }
}

/// A composed chain of sync and async steps from `A` to `Result<T, E>`.
///
/// Steps run strictly one after another: a step starts only after the
/// previous one has resolved, whether it was sync or async. The first `Err`
/// is returned unchanged and no later step runs. Nothing executes until the
/// future returned by [`call`](Self::call) is polled.
///
/// There is no built-in timeout or cancellation. Dropping the future stops
/// the pipeline between steps; steps that need cooperative cancellation
/// must carry their own signal in their input.
pub struct AsyncResultPipe<A, T, E> {
    run: StepFn<A, T, E>,
    steps: usize,
}

impl<A, T, E> AsyncResultPipe<A, T, E>
where
    A: Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    /// Appends a synchronous step.
    pub fn then<U, G>(self, step: G) -> AsyncResultPipe<A, U, E>
    where
        G: Fn(T) -> Result<U, E> + Send + Sync + 'static,
        U: Send + 'static,
    {
        self.then_async(move |value| future::ready(step(value)))
    }

    /// Appends an async step.
    pub fn then_async<U, G, Fut>(self, step: G) -> AsyncResultPipe<A, U, E>
    where
        G: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<U, E>> + Send + 'static,
        U: Send + 'static,
    {
        let previous = self.run;
        let step = Arc::new(step);
        AsyncResultPipe {
            run: Arc::new(move |input: A| {
                let previous = Arc::clone(&previous);
                let step = Arc::clone(&step);
                async move {
                    let value = previous(input).await?;
                    step(value).await
                }
                .boxed()
            }),
            steps: self.steps + 1,
        }
    }

    /// Number of steps in the pipeline.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Runs the pipeline on `input`.
    pub fn call(&self, input: A) -> BoxFuture<'static, Result<T, E>> {
        let steps = self.steps;
        let run = (self.run)(input);
        async move {
            trace!(steps, "running async result pipeline");
            let result = run.await;
            if result.is_err() {
                debug!(steps, "async result pipeline failed");
            }
            result
        }
        .boxed()
    }

    /// Turns the pipeline into a plain function returning futures.
    pub fn into_fn(self) -> impl Fn(A) -> BoxFuture<'static, Result<T, E>> {
        move |input| self.call(input)
    }
}

impl<A, T, E> Clone for AsyncResultPipe<A, T, E> {
    fn clone(&self) -> Self {
        Self {
            run: Arc::clone(&self.run),
            steps: self.steps,
        }
    }
}
