// flo/src/conditional/condition.rs

//! Branch predicates, synchronous or asynchronous.

use crate::core::handler::BoxFuture;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

/// The predicate guarding a branch, evaluated once per invocation of the branch step.
pub enum Condition<TIn> {
  Sync(Arc<dyn Fn(&TIn) -> bool + Send + Sync>),
  Async(Arc<dyn Fn(&TIn) -> BoxFuture<'static, bool> + Send + Sync>),
}

impl<TIn> Condition<TIn> {
  pub fn sync<P>(predicate: P) -> Self
  where
    P: Fn(&TIn) -> bool + Send + Sync + 'static,
  {
    Condition::Sync(Arc::new(predicate))
  }

  /// An asynchronous predicate. It only borrows the input while creating its future, so the
  /// future must own whatever it needs.
  pub fn from_async<P, Fut>(predicate: P) -> Self
  where
    P: Fn(&TIn) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = bool> + Send + 'static,
  {
    Condition::Async(Arc::new(move |input: &TIn| -> BoxFuture<'static, bool> { Box::pin(predicate(input)) }))
  }

  /// Starts evaluating the predicate. Synchronous predicates are decided here.
  pub fn evaluate(&self, input: &TIn) -> ConditionCheck {
    match self {
      Condition::Sync(predicate) => ConditionCheck::Decided(predicate(input)),
      Condition::Async(predicate) => ConditionCheck::Pending(predicate(input)),
    }
  }
}

impl<TIn> Clone for Condition<TIn> {
  fn clone(&self) -> Self {
    match self {
      Condition::Sync(predicate) => Condition::Sync(Arc::clone(predicate)),
      Condition::Async(predicate) => Condition::Async(Arc::clone(predicate)),
    }
  }
}

impl<TIn> std::fmt::Debug for Condition<TIn> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Condition::Sync(_) => f.write_str("Condition::Sync"),
      Condition::Async(_) => f.write_str("Condition::Async"),
    }
  }
}

/// Outcome of [`Condition::evaluate`]; await it for the decision.
pub enum ConditionCheck {
  Decided(bool),
  Pending(BoxFuture<'static, bool>),
}

impl Future for ConditionCheck {
  type Output = bool;

  fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<bool> {
    match self.get_mut() {
      ConditionCheck::Decided(decision) => Poll::Ready(*decision),
      ConditionCheck::Pending(future) => future.as_mut().poll(cx),
    }
  }
}
