// flo/src/pipeline/output.rs

//! The output-producing flavor: a chain of responsibility where the terminal handler yields
//! the absence value (`TOut::default()`) and `when` branches fall through to the parent
//! pipeline when they do not produce a definitive answer.
//!
//! What counts as "no answer" is decided by [`Absence`].

use crate::conditional::combinator::fall_through;
use crate::conditional::condition::Condition;
use crate::core::pipeline_fn::Pipeline;
use crate::error::FloError;
use crate::pipeline::builder::Builder;
use crate::pipeline::composable::Composable;
use crate::resolver::{DefaultResolver, SharedResolver};
use std::future::Future;

/// Outputs that can signal "not handled".
///
/// `Option<T>` is absent when `None`, whatever `T` is. Strings, collections and numbers are
/// absent when empty or zero.
pub trait Absence {
  fn is_absent(&self) -> bool;
}

impl<T> Absence for Option<T> {
  fn is_absent(&self) -> bool {
    self.is_none()
  }
}

impl Absence for String {
  fn is_absent(&self) -> bool {
    self.is_empty()
  }
}

impl<T> Absence for Vec<T> {
  fn is_absent(&self) -> bool {
    self.is_empty()
  }
}

impl Absence for bool {
  fn is_absent(&self) -> bool {
    !*self
  }
}

macro_rules! zero_is_absent {
  ($($ty:ty),* $(,)?) => {
    $(
      impl Absence for $ty {
        fn is_absent(&self) -> bool {
          *self == <$ty>::default()
        }
      }
    )*
  };
}

zero_is_absent!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64);

/// Builder for `Pipeline<TIn, TOut, Err>` where handlers compete to produce the output.
///
/// Use `Option<_>` outputs when "no answer" must be distinguishable from a zero value.
pub struct OutputPipelineBuilder<TIn, TOut, Err = FloError> {
  builder: Builder<TIn, TOut, Err>,
}

impl<TIn, TOut, Err> OutputPipelineBuilder<TIn, TOut, Err>
where
  TIn: Send + 'static,
  TOut: Default + Send + 'static,
  Err: std::error::Error + From<FloError> + Send + Sync + 'static,
{
  pub fn new() -> Self {
    Self::with_resolver(DefaultResolver::shared())
  }

  pub fn with_resolver(resolver: SharedResolver) -> Self {
    let absent = Pipeline::from_fn(|_input: TIn| std::future::ready(Ok(TOut::default())));
    Self {
      builder: Builder::new(absent, resolver),
    }
  }

  /// Branch-with-fallthrough: when `predicate` holds, the child pipeline gets first refusal.
  /// If the child's result is absent (see [`Absence`]), the rest of this pipeline runs on the
  /// original input.
  pub fn when<P, F>(&mut self, predicate: P, configure: F) -> &mut Self
  where
    TIn: Clone,
    TOut: Absence,
    P: Fn(&TIn) -> bool + Send + Sync + 'static,
    F: Fn(&mut Self) + Send + Sync + 'static,
  {
    self.when_continue_if(predicate, configure, <TOut as Absence>::is_absent)
  }

  /// [`OutputPipelineBuilder::when`] with an asynchronous predicate.
  pub fn when_async<P, PFut, F>(&mut self, predicate: P, configure: F) -> &mut Self
  where
    TIn: Clone,
    TOut: Absence,
    P: Fn(&TIn) -> PFut + Send + Sync + 'static,
    PFut: Future<Output = bool> + Send + 'static,
    F: Fn(&mut Self) + Send + Sync + 'static,
  {
    self.when_async_continue_if(predicate, configure, <TOut as Absence>::is_absent)
  }

  /// Like [`OutputPipelineBuilder::when`], with `continue_if` deciding which child results
  /// count as "not handled".
  pub fn when_continue_if<P, F, C>(&mut self, predicate: P, configure: F, continue_if: C) -> &mut Self
  where
    TIn: Clone,
    P: Fn(&TIn) -> bool + Send + Sync + 'static,
    F: Fn(&mut Self) + Send + Sync + 'static,
    C: Fn(&TOut) -> bool + Send + Sync + 'static,
  {
    self.branch(Condition::sync(predicate), fall_through::<TIn, TOut, Err, C>(continue_if), configure)
  }

  pub fn when_async_continue_if<P, PFut, F, C>(&mut self, predicate: P, configure: F, continue_if: C) -> &mut Self
  where
    TIn: Clone,
    P: Fn(&TIn) -> PFut + Send + Sync + 'static,
    PFut: Future<Output = bool> + Send + 'static,
    F: Fn(&mut Self) + Send + Sync + 'static,
    C: Fn(&TOut) -> bool + Send + Sync + 'static,
  {
    self.branch(Condition::from_async(predicate), fall_through::<TIn, TOut, Err, C>(continue_if), configure)
  }
}

impl<TIn, TOut, Err> Default for OutputPipelineBuilder<TIn, TOut, Err>
where
  TIn: Send + 'static,
  TOut: Default + Send + 'static,
  Err: std::error::Error + From<FloError> + Send + Sync + 'static,
{
  fn default() -> Self {
    Self::new()
  }
}

impl<TIn, TOut, Err> Composable for OutputPipelineBuilder<TIn, TOut, Err>
where
  TIn: Send + 'static,
  TOut: Default + Send + 'static,
  Err: std::error::Error + From<FloError> + Send + Sync + 'static,
{
  type Input = TIn;
  type Output = TOut;
  type Error = Err;

  fn builder(&self) -> &Builder<TIn, TOut, Err> {
    &self.builder
  }

  fn builder_mut(&mut self) -> &mut Builder<TIn, TOut, Err> {
    &mut self.builder
  }

  fn create_child(resolver: SharedResolver) -> Self {
    Self::with_resolver(resolver)
  }
}
