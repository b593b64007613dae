// flo/src/pipeline/builder.rs

//! The construction-time state shared by every builder flavor, and the composition
//! algorithm that turns it into a single `Pipeline`.

use crate::core::handler::BoxFuture;
use crate::core::pipeline_fn::{Next, Pipeline};
use crate::core::step::Step;
use crate::resolver::SharedResolver;
use std::sync::Arc;
use tracing::{event, instrument, Level};

/// Ordered step registrations, the terminal handler reached when every step continues, and
/// the resolver used for type-based registrations.
///
/// Registrations are append-only and always execute in registration order.
pub struct Builder<TIn, TOut, Err> {
  steps: Vec<Step<TIn, TOut, Err>>,
  inner: Pipeline<TIn, TOut, Err>,
  resolver: SharedResolver,
}

impl<TIn, TOut, Err> Builder<TIn, TOut, Err>
where
  TIn: Send + 'static,
  TOut: Send + 'static,
  Err: Send + 'static,
{
  /// Creates an empty builder. `inner` is the terminal handler: it runs when the last step
  /// invokes its continuation, or on its own when no steps are registered.
  pub fn new(inner: Pipeline<TIn, TOut, Err>, resolver: SharedResolver) -> Self {
    Self {
      steps: Vec::new(),
      inner,
      resolver,
    }
  }

  pub fn resolver(&self) -> &SharedResolver {
    &self.resolver
  }

  /// Number of registered steps, including any made unreachable by a terminal step.
  pub fn len(&self) -> usize {
    self.steps.len()
  }

  pub fn is_empty(&self) -> bool {
    self.steps.is_empty()
  }

  pub fn push_step(&mut self, step: Step<TIn, TOut, Err>) {
    self.steps.push(step);
  }

  /// Composes the current registrations into one pipeline.
  ///
  /// Folds right-to-left starting from the terminal handler, so the first registered step
  /// runs first and receives everything after it as `next`. The registrations are only
  /// read: building twice yields two independent pipelines over the same snapshot, and
  /// steps added afterwards do not affect pipelines already built.
  #[instrument(
        name = "Builder::build",
        level = "trace",
        skip_all,
        fields(
            input_type = %std::any::type_name::<TIn>(),
            output_type = %std::any::type_name::<TOut>(),
            num_steps = self.steps.len(),
        )
    )]
  pub fn build(&self) -> Pipeline<TIn, TOut, Err> {
    let mut pipeline = self.inner.clone();
    for step in self.steps.iter().rev() {
      let step = Arc::clone(step);
      let next = pipeline;
      pipeline = Pipeline::from_boxed(move |input| step(input, next.clone()));
    }
    event!(Level::TRACE, "Pipeline composed.");
    pipeline
  }
}

impl<TIn, TOut, Err> std::fmt::Debug for Builder<TIn, TOut, Err> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Builder")
      .field("num_steps", &self.steps.len())
      .field("inner", &self.inner)
      .finish()
  }
}

/// Boxes a step closure. The closure's return type is fixed by the bound, so bodies can
/// return `Box::pin(async move { .. })` directly.
pub(crate) fn step_fn<TIn, TOut, Err, F>(f: F) -> Step<TIn, TOut, Err>
where
  F: Fn(TIn, Next<TIn, TOut, Err>) -> BoxFuture<'static, Result<TOut, Err>> + Send + Sync + 'static,
{
  Arc::new(f)
}
