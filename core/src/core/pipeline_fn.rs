// flo/src/core/pipeline_fn.rs

//! The composed, callable product of a builder.

use crate::core::handler::BoxFuture;
use crate::error::FloError;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

type PipelineFnInner<TIn, TOut, Err> = dyn Fn(TIn) -> BoxFuture<'static, Result<TOut, Err>> + Send + Sync;

/// An immutable `TIn -> Result<TOut, Err>` computation that may suspend before producing
/// its result.
///
/// Cloning is cheap (one `Arc`), and clones share the same composition. A pipeline holds
/// no mutable state of its own, so it may be invoked repeatedly and concurrently; any
/// shared state lives in the handlers it was composed from.
pub struct Pipeline<TIn, TOut = TIn, Err = FloError> {
  func: Arc<PipelineFnInner<TIn, TOut, Err>>,
}

/// The continuation passed to every step: "the rest of the pipeline after this step".
pub type Next<TIn, TOut = TIn, Err = FloError> = Pipeline<TIn, TOut, Err>;

impl<TIn, TOut, Err> Pipeline<TIn, TOut, Err>
where
  TIn: Send + 'static,
  TOut: Send + 'static,
  Err: Send + 'static,
{
  /// Wraps an async function as a pipeline.
  pub fn from_fn<F, Fut>(f: F) -> Self
  where
    F: Fn(TIn) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<TOut, Err>> + Send + 'static,
  {
    Self::from_boxed(move |input| Box::pin(f(input)))
  }

  pub(crate) fn from_boxed<F>(f: F) -> Self
  where
    F: Fn(TIn) -> BoxFuture<'static, Result<TOut, Err>> + Send + Sync + 'static,
  {
    Self { func: Arc::new(f) }
  }

  /// Runs the pipeline on `input`.
  pub fn invoke(&self, input: TIn) -> BoxFuture<'static, Result<TOut, Err>> {
    (self.func)(input)
  }
}

impl<TIn, TOut, Err> Clone for Pipeline<TIn, TOut, Err> {
  fn clone(&self) -> Self {
    Self {
      func: Arc::clone(&self.func),
    }
  }
}

impl<TIn, TOut, Err> fmt::Debug for Pipeline<TIn, TOut, Err> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Pipeline")
      .field("input", &std::any::type_name::<TIn>())
      .field("output", &std::any::type_name::<TOut>())
      .field("error", &std::any::type_name::<Err>())
      .finish()
  }
}
