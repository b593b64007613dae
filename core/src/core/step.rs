// flo/src/core/step.rs

//! Defines the shape of a single registered pipeline step.

use super::handler::BoxFuture;
use super::pipeline_fn::Next;
use std::sync::Arc;

/// One registered unit of a pipeline: `(input, next) -> output`.
///
/// Steps are stored behind an `Arc` so that every `build()` can snapshot the registration
/// list without consuming it.
pub type Step<TIn, TOut, Err> =
  Arc<dyn Fn(TIn, Next<TIn, TOut, Err>) -> BoxFuture<'static, Result<TOut, Err>> + Send + Sync>;
