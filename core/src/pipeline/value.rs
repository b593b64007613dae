// flo/src/pipeline/value.rs

//! The value-threading flavor: input and output share one type, the terminal handler is
//! the identity, and `when` branches always hand control back to the parent pipeline.

use crate::conditional::combinator::thread;
use crate::conditional::condition::Condition;
use crate::core::pipeline_fn::Pipeline;
use crate::error::FloError;
use crate::pipeline::builder::Builder;
use crate::pipeline::composable::Composable;
use crate::resolver::{DefaultResolver, SharedResolver};
use std::future::Future;

/// Builder for `Pipeline<T, T, Err>`.
///
/// ```ignore
/// let pipeline = PipelineBuilder::<Order, AppError>::new()
///   .add_type::<Validate>()
///   .when(|order| order.is_priority(), |branch| {
///     branch.add_handler(Expedite);
///   })
///   .add_type::<Persist>()
///   .build();
/// ```
pub struct PipelineBuilder<T, Err = FloError> {
  builder: Builder<T, T, Err>,
}

impl<T, Err> PipelineBuilder<T, Err>
where
  T: Send + 'static,
  Err: std::error::Error + From<FloError> + Send + Sync + 'static,
{
  /// A builder whose `add_type` registrations use `DefaultResolver`.
  pub fn new() -> Self {
    Self::with_resolver(DefaultResolver::shared())
  }

  pub fn with_resolver(resolver: SharedResolver) -> Self {
    let identity = Pipeline::from_fn(|input: T| std::future::ready(Ok(input)));
    Self {
      builder: Builder::new(identity, resolver),
    }
  }

  /// Branch-and-thread: when `predicate` holds, the child pipeline transforms the value
  /// before it continues into the rest of this pipeline. The rest of the pipeline runs in
  /// either case.
  pub fn when<P, F>(&mut self, predicate: P, configure: F) -> &mut Self
  where
    P: Fn(&T) -> bool + Send + Sync + 'static,
    F: Fn(&mut Self) + Send + Sync + 'static,
  {
    self.branch(Condition::sync(predicate), thread::<T, Err>, configure)
  }

  /// [`PipelineBuilder::when`] with an asynchronous predicate.
  pub fn when_async<P, PFut, F>(&mut self, predicate: P, configure: F) -> &mut Self
  where
    P: Fn(&T) -> PFut + Send + Sync + 'static,
    PFut: Future<Output = bool> + Send + 'static,
    F: Fn(&mut Self) + Send + Sync + 'static,
  {
    self.branch(Condition::from_async(predicate), thread::<T, Err>, configure)
  }
}

impl<T, Err> Default for PipelineBuilder<T, Err>
where
  T: Send + 'static,
  Err: std::error::Error + From<FloError> + Send + Sync + 'static,
{
  fn default() -> Self {
    Self::new()
  }
}

impl<T, Err> Composable for PipelineBuilder<T, Err>
where
  T: Send + 'static,
  Err: std::error::Error + From<FloError> + Send + Sync + 'static,
{
  type Input = T;
  type Output = T;
  type Error = Err;

  fn builder(&self) -> &Builder<T, T, Err> {
    &self.builder
  }

  fn builder_mut(&mut self) -> &mut Builder<T, T, Err> {
    &mut self.builder
  }

  fn create_child(resolver: SharedResolver) -> Self {
    Self::with_resolver(resolver)
  }
}
