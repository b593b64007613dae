// flo/src/core/handler.rs

//! Defines the `Handler` contract: one unit of work in a pipeline.

use crate::core::pipeline_fn::Next;
use crate::error::FloError;
use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed, `Send` future used wherever a pipeline stage hands back its result.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A handler receives the input and the continuation (`next`) representing the rest of
/// the pipeline assembled after it.
///
/// A handler either returns a value of its own, or returns whatever `next.invoke(..)`
/// produces (possibly transforming the input beforehand or the output afterwards). Not
/// invoking `next` terminates the chain at this handler.
///
/// Failures are returned as `Err` and reach the pipeline's caller unchanged.
///
/// `Handler<T>` is the value-threading form where input and output share one type.
#[async_trait]
pub trait Handler<TIn, TOut = TIn, Err = FloError>: Send + Sync
where
  TIn: Send + 'static,
  TOut: Send + 'static,
  Err: Send + 'static,
{
  async fn handle(&self, input: TIn, next: Next<TIn, TOut, Err>) -> Result<TOut, Err>;
}

#[async_trait]
impl<H, TIn, TOut, Err> Handler<TIn, TOut, Err> for Arc<H>
where
  H: Handler<TIn, TOut, Err> + ?Sized,
  TIn: Send + 'static,
  TOut: Send + 'static,
  Err: Send + 'static,
{
  async fn handle(&self, input: TIn, next: Next<TIn, TOut, Err>) -> Result<TOut, Err> {
    (**self).handle(input, next).await
  }
}
