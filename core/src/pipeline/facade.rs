// flo/src/pipeline/facade.rs

//! One-call construction: create a builder, configure it, build it.

use crate::core::pipeline_fn::Pipeline;
use crate::error::FloError;
use crate::pipeline::composable::Composable;
use crate::pipeline::output::OutputPipelineBuilder;
use crate::pipeline::value::PipelineBuilder;
use crate::resolver::{DefaultResolver, SharedResolver};

impl<T, Err> Pipeline<T, T, Err>
where
  T: Send + 'static,
  Err: std::error::Error + From<FloError> + Send + Sync + 'static,
{
  /// Builds a value-threading pipeline.
  pub fn build<F>(configure: F) -> Self
  where
    F: FnOnce(&mut PipelineBuilder<T, Err>),
  {
    Self::build_with_resolver(DefaultResolver::shared(), configure)
  }

  pub fn build_with_resolver<F>(resolver: SharedResolver, configure: F) -> Self
  where
    F: FnOnce(&mut PipelineBuilder<T, Err>),
  {
    let mut builder = PipelineBuilder::with_resolver(resolver);
    configure(&mut builder);
    builder.build()
  }
}

impl<TIn, TOut, Err> Pipeline<TIn, TOut, Err>
where
  TIn: Send + 'static,
  TOut: Default + Send + 'static,
  Err: std::error::Error + From<FloError> + Send + Sync + 'static,
{
  /// Builds an output-producing pipeline.
  pub fn build_output<F>(configure: F) -> Self
  where
    F: FnOnce(&mut OutputPipelineBuilder<TIn, TOut, Err>),
  {
    Self::build_output_with_resolver(DefaultResolver::shared(), configure)
  }

  pub fn build_output_with_resolver<F>(resolver: SharedResolver, configure: F) -> Self
  where
    F: FnOnce(&mut OutputPipelineBuilder<TIn, TOut, Err>),
  {
    let mut builder = OutputPipelineBuilder::with_resolver(resolver);
    configure(&mut builder);
    builder.build()
  }
}
