// flo/src/pipeline/composable.rs

//! The `Composable` trait: registration operations shared by every builder flavor.
//!
//! A flavor implements the trait once, pointing it at its `Builder` and telling it how to
//! create an empty child of the same flavor. Fluent calls and branch configuration callbacks
//! then stay typed to that flavor: `fork` on a `PipelineBuilder<T>` configures a
//! `PipelineBuilder<T>`, and so on.

use crate::conditional::combinator::commit;
use crate::conditional::condition::Condition;
use crate::core::handler::Handler;
use crate::core::pipeline_fn::{Next, Pipeline};
use crate::core::step::Step;
use crate::error::FloError;
use crate::pipeline::builder::{step_fn, Builder};
use crate::resolver::{resolve_as, SharedResolver, TypeKey};
use std::future::Future;
use std::sync::Arc;
use tracing::{event, Level};

pub trait Composable: Sized + 'static {
  type Input: Send + 'static;
  type Output: Send + 'static;
  type Error: std::error::Error + From<FloError> + Send + Sync + 'static;

  fn builder(&self) -> &Builder<Self::Input, Self::Output, Self::Error>;

  fn builder_mut(&mut self) -> &mut Builder<Self::Input, Self::Output, Self::Error>;

  /// Creates an empty builder of this flavor that resolves types through `resolver`.
  /// Branches call this every time they are taken.
  fn create_child(resolver: SharedResolver) -> Self;

  /// Appends a step. The step either returns a result itself or delegates to `next`.
  fn add_step<F, Fut>(&mut self, step: F) -> &mut Self
  where
    F: Fn(Self::Input, Next<Self::Input, Self::Output, Self::Error>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Self::Output, Self::Error>> + Send + 'static,
  {
    self
      .builder_mut()
      .push_step(step_fn(move |input, next| Box::pin(step(input, next))));
    self
  }

  /// Appends a handler instance shared by every invocation of the pipeline.
  fn add_handler<H>(&mut self, handler: H) -> &mut Self
  where
    H: Handler<Self::Input, Self::Output, Self::Error> + 'static,
  {
    let handler = Arc::new(handler);
    self.builder_mut().push_step(step_fn(move |input, next| {
      let handler = Arc::clone(&handler);
      Box::pin(async move { handler.handle(input, next).await })
    }));
    self
  }

  /// Appends a step that calls `factory` once per pipeline invocation, never at build time.
  /// When the factory returns `None` the step passes the input straight to `next`.
  fn add_factory<H, F>(&mut self, factory: F) -> &mut Self
  where
    H: Handler<Self::Input, Self::Output, Self::Error> + 'static,
    F: Fn() -> Option<H> + Send + Sync + 'static,
  {
    self.builder_mut().push_step(factory_step(move || Ok(factory())));
    self
  }

  /// Appends a step that asks the builder's resolver for an `H` on every invocation.
  ///
  /// The request carries `H::default` as the type's constructor, which is what
  /// `DefaultResolver` uses. Resolution failures surface as `FloError::UnresolvableType`
  /// (converted into `Self::Error`) when the step runs.
  fn add_type<H>(&mut self) -> &mut Self
  where
    H: Handler<Self::Input, Self::Output, Self::Error> + Default + 'static,
  {
    let step = resolved_step::<_, _, _, H>(Arc::clone(self.builder().resolver()), TypeKey::constructible::<H>());
    self.builder_mut().push_step(step);
    self
  }

  /// Like [`Composable::add_type`] for handlers without a zero-argument constructor. Only a
  /// resolver that knows the type (a `TypeRegistry` entry, a custom closure) can produce one;
  /// `DefaultResolver` fails with `FloError::UnresolvableType` when the step runs.
  fn add_resolved<H>(&mut self) -> &mut Self
  where
    H: Handler<Self::Input, Self::Output, Self::Error> + 'static,
  {
    let step = resolved_step::<_, _, _, H>(Arc::clone(self.builder().resolver()), TypeKey::of::<H>());
    self.builder_mut().push_step(step);
    self
  }

  /// Appends a terminal step that never invokes its continuation.
  ///
  /// Registration continues to be accepted afterwards; such steps stay in the list but are
  /// unreachable at run time.
  fn set_final<F, Fut>(&mut self, terminal: F) -> &mut Self
  where
    F: Fn(Self::Input) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Self::Output, Self::Error>> + Send + 'static,
  {
    self
      .builder_mut()
      .push_step(step_fn(move |input, _next| Box::pin(terminal(input))));
    self
  }

  /// Branch-and-commit: when `predicate` holds, the child pipeline configured by `configure`
  /// produces the final result and the rest of this pipeline is skipped.
  fn fork<P, F>(&mut self, predicate: P, configure: F) -> &mut Self
  where
    P: Fn(&Self::Input) -> bool + Send + Sync + 'static,
    F: Fn(&mut Self) + Send + Sync + 'static,
  {
    self.branch(
      Condition::sync(predicate),
      commit::<Self::Input, Self::Output, Self::Error>,
      configure,
    )
  }

  /// [`Composable::fork`] with an asynchronous predicate.
  fn fork_async<P, PFut, F>(&mut self, predicate: P, configure: F) -> &mut Self
  where
    P: Fn(&Self::Input) -> PFut + Send + Sync + 'static,
    PFut: Future<Output = bool> + Send + 'static,
    F: Fn(&mut Self) + Send + Sync + 'static,
  {
    self.branch(
      Condition::from_async(predicate),
      commit::<Self::Input, Self::Output, Self::Error>,
      configure,
    )
  }

  /// The branching primitive every `fork`/`when` variant is built on.
  ///
  /// On each invocation the step evaluates `condition`. If it does not hold, the step is a
  /// pass-through to `next`. If it holds, a fresh child builder is created with this
  /// builder's resolver, `configure` registers its steps, and the built child pipeline is
  /// handed to `combinator` together with the input and `next`. Nothing is cached between
  /// invocations: `configure` runs exactly once per taken branch.
  fn branch<C, Fut, F>(&mut self, condition: Condition<Self::Input>, combinator: C, configure: F) -> &mut Self
  where
    C: Fn(
        Self::Input,
        Pipeline<Self::Input, Self::Output, Self::Error>,
        Next<Self::Input, Self::Output, Self::Error>,
      ) -> Fut
      + Send
      + Sync
      + 'static,
    Fut: Future<Output = Result<Self::Output, Self::Error>> + Send + 'static,
    F: Fn(&mut Self) + Send + Sync + 'static,
  {
    let resolver = Arc::clone(self.builder().resolver());
    let combinator = Arc::new(combinator);
    let configure = Arc::new(configure);

    self.builder_mut().push_step(step_fn(move |input, next| {
      let condition = condition.clone();
      let resolver = Arc::clone(&resolver);
      let combinator = Arc::clone(&combinator);
      let configure = Arc::clone(&configure);

      Box::pin(async move {
        let check = condition.evaluate(&input);
        if !check.await {
          event!(Level::TRACE, "Branch condition not met; continuing with the parent pipeline.");
          return next.invoke(input).await;
        }

        event!(Level::TRACE, "Branch condition met; building child pipeline.");
        let child = {
          let mut child_builder = Self::create_child(resolver);
          configure(&mut child_builder);
          child_builder.build()
        };
        combinator(input, child, next).await
      })
    }));
    self
  }

  /// Number of registered steps, including unreachable ones after `set_final`.
  fn step_count(&self) -> usize {
    self.builder().len()
  }

  /// Composes the registered steps into a pipeline. See [`Builder::build`].
  fn build(&self) -> Pipeline<Self::Input, Self::Output, Self::Error> {
    self.builder().build()
  }
}

/// A step that resolves an `H` through `resolver` each time it runs.
fn resolved_step<TIn, TOut, Err, H>(resolver: SharedResolver, key: TypeKey) -> Step<TIn, TOut, Err>
where
  TIn: Send + 'static,
  TOut: Send + 'static,
  Err: From<FloError> + Send + 'static,
  H: Handler<TIn, TOut, Err> + 'static,
{
  factory_step(move || resolve_as::<H>(&*resolver, &key).map_err(Into::into))
}

/// A step around a fallible, per-invocation handler factory. The factory runs when the
/// step's future is first polled.
fn factory_step<TIn, TOut, Err, H, F>(factory: F) -> Step<TIn, TOut, Err>
where
  TIn: Send + 'static,
  TOut: Send + 'static,
  Err: Send + 'static,
  H: Handler<TIn, TOut, Err> + 'static,
  F: Fn() -> Result<Option<H>, Err> + Send + Sync + 'static,
{
  let factory = Arc::new(factory);
  step_fn(move |input, next| {
    let factory = Arc::clone(&factory);
    Box::pin(async move {
      let produced = factory();
      match produced? {
        Some(handler) => handler.handle(input, next).await,
        None => {
          event!(
            Level::TRACE,
            handler_type = %std::any::type_name::<H>(),
            "Factory produced no handler; passing through."
          );
          next.invoke(input).await
        }
      }
    })
  })
}
