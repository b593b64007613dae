// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use async_trait::async_trait;
use flo::{FloError, Handler, Next};
use parking_lot::Mutex;
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use tracing::Level;

// --- Common Context ---

/// Shared, insertion-ordered key/value context. Clones share the same entries, so a
/// handler mutating it is visible to whoever holds the original.
#[derive(Clone, Debug, Default)]
pub struct TestContext {
  entries: Arc<Mutex<Vec<(String, String)>>>,
}

impl TestContext {
  pub fn add(&self, key: impl Into<String>, value: impl Into<String>) {
    self.entries.lock().push((key.into(), value.into()));
  }

  pub fn get(&self, key: &str) -> Option<String> {
    self
      .entries
      .lock()
      .iter()
      .find(|(k, _)| k == key)
      .map(|(_, v)| v.clone())
  }

  pub fn contains_key(&self, key: &str) -> bool {
    self.entries.lock().iter().any(|(k, _)| k == key)
  }

  pub fn keys(&self) -> Vec<String> {
    self.entries.lock().iter().map(|(k, _)| k.clone()).collect()
  }

  pub fn entries(&self) -> Vec<(String, String)> {
    self.entries.lock().clone()
  }

  pub fn len(&self) -> usize {
    self.entries.lock().len()
  }
}

// --- Common Error Type for Tests ---
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("Flo framework error: {0}")]
  Flo(String), // Stored as String for Eq comparison

  #[error("Test handler failed: {0}")]
  Handler(String),
}

impl From<FloError> for TestError {
  fn from(fe: FloError) -> Self {
    TestError::Flo(format!("{:?}", fe))
  }
}

// --- Common Handlers ---

pub static TEST_HANDLER_CONSTRUCTED: Lazy<Arc<AtomicUsize>> = Lazy::new(|| Arc::new(AtomicUsize::new(0)));

/// Adds one uniquely keyed entry and continues. Counts its constructions.
pub struct TestHandler {
  id: usize,
}

impl Default for TestHandler {
  fn default() -> Self {
    let id = TEST_HANDLER_CONSTRUCTED.fetch_add(1, Ordering::SeqCst);
    TestHandler { id }
  }
}

#[async_trait]
impl Handler<TestContext, TestContext, TestError> for TestHandler {
  async fn handle(&self, ctx: TestContext, next: Next<TestContext, TestContext, TestError>) -> Result<TestContext, TestError> {
    ctx.add(format!("TestHandler{}", self.id), "handled");
    next.invoke(ctx).await
  }
}

/// Appends `marker` to the trail and continues.
pub struct MarkerHandler {
  pub marker: &'static str,
}

#[async_trait]
impl Handler<Vec<&'static str>, Vec<&'static str>, TestError> for MarkerHandler {
  async fn handle(
    &self,
    mut trail: Vec<&'static str>,
    next: Next<Vec<&'static str>, Vec<&'static str>, TestError>,
  ) -> Result<Vec<&'static str>, TestError> {
    trail.push(self.marker);
    next.invoke(trail).await
  }
}

/// Terminates with the input's length.
#[derive(Default)]
pub struct StringLengthHandler;

#[async_trait]
impl Handler<String, usize, TestError> for StringLengthHandler {
  async fn handle(&self, input: String, _next: Next<String, usize, TestError>) -> Result<usize, TestError> {
    Ok(input.len())
  }
}

/// Terminates with its configured output.
pub struct OverridingHandler {
  pub output: String,
}

impl OverridingHandler {
  pub fn new(output: &str) -> Self {
    OverridingHandler {
      output: output.to_string(),
    }
  }
}

impl Default for OverridingHandler {
  fn default() -> Self {
    OverridingHandler::new("Default")
  }
}

#[async_trait]
impl Handler<String, String, TestError> for OverridingHandler {
  async fn handle(&self, _input: String, _next: Next<String, String, TestError>) -> Result<String, TestError> {
    Ok(self.output.clone())
  }
}

/// Always fails.
#[derive(Default)]
pub struct FailingHandler;

#[async_trait]
impl Handler<TestContext, TestContext, TestError> for FailingHandler {
  async fn handle(&self, ctx: TestContext, _next: Next<TestContext, TestContext, TestError>) -> Result<TestContext, TestError> {
    ctx.add("Failing", "attempted");
    Err(TestError::Handler("intentional failure".to_string()))
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::TRACE)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

pub fn reset_counters() {
  TEST_HANDLER_CONSTRUCTED.store(0, Ordering::SeqCst);
}
