// flo/src/conditional/combinator.rs

//! How a taken branch's child pipeline relates to the parent's continuation.
//!
//! A combinator receives the input, the freshly built child pipeline and the parent's
//! `next`. Child failures are returned with `?` and abort the whole invocation; they never
//! trigger a fall-through.

use crate::core::handler::BoxFuture;
use crate::core::pipeline_fn::{Next, Pipeline};
use std::sync::Arc;

/// Branch-and-commit: the child's result is final and `next` is never invoked.
pub fn commit<TIn, TOut, Err>(
  input: TIn,
  child: Pipeline<TIn, TOut, Err>,
  _next: Next<TIn, TOut, Err>,
) -> BoxFuture<'static, Result<TOut, Err>>
where
  TIn: Send + 'static,
  TOut: Send + 'static,
  Err: Send + 'static,
{
  child.invoke(input)
}

/// Branch-and-thread: the child transforms the value, which then always continues into `next`.
pub fn thread<T, Err>(input: T, child: Pipeline<T, T, Err>, next: Next<T, T, Err>) -> BoxFuture<'static, Result<T, Err>>
where
  T: Send + 'static,
  Err: Send + 'static,
{
  Box::pin(async move {
    let transformed = child.invoke(input).await?;
    next.invoke(transformed).await
  })
}

/// Branch-with-fallthrough: the child gets first refusal. When `continue_if` holds for its
/// result, `next` runs on the *original* input instead.
pub fn fall_through<TIn, TOut, Err, P>(
  continue_if: P,
) -> impl Fn(TIn, Pipeline<TIn, TOut, Err>, Next<TIn, TOut, Err>) -> BoxFuture<'static, Result<TOut, Err>> + Send + Sync + 'static
where
  TIn: Clone + Send + 'static,
  TOut: Send + 'static,
  Err: Send + 'static,
  P: Fn(&TOut) -> bool + Send + Sync + 'static,
{
  let continue_if = Arc::new(continue_if);
  move |input: TIn, child: Pipeline<TIn, TOut, Err>, next: Next<TIn, TOut, Err>| -> BoxFuture<'static, Result<TOut, Err>> {
    let continue_if = Arc::clone(&continue_if);
    Box::pin(async move {
      let result = child.invoke(input.clone()).await?;
      if continue_if(&result) {
        return next.invoke(input).await;
      }
      Ok(result)
    })
  }
}
