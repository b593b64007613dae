// flo/examples/resolver_registry.rs

use async_trait::async_trait;
use flo::{Composable, FloError, Handler, Next, Pipeline, PipelineBuilder, TypeRegistry};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone, Debug, Default)]
struct Job {
  name: String,
  steps: Vec<String>,
}

/// Gets a fresh sequence number each time it is resolved.
#[derive(Default)]
struct Stamp {
  sequence: u64,
}

#[async_trait]
impl Handler<Job> for Stamp {
  async fn handle(&self, mut job: Job, next: Next<Job>) -> Result<Job, FloError> {
    job.steps.push(format!("stamp #{}", self.sequence));
    next.invoke(job).await
  }
}

#[derive(Default)]
struct Notify;

#[async_trait]
impl Handler<Job> for Notify {
  async fn handle(&self, mut job: Job, next: Next<Job>) -> Result<Job, FloError> {
    job.steps.push("notify".to_string());
    next.invoke(job).await
  }
}

#[tokio::main]
async fn main() -> Result<(), FloError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();
  info!("--- Resolver Registry Example ---");

  let counter = Arc::new(AtomicU64::new(1));
  let registry = Arc::new(TypeRegistry::new());
  registry.register(move || Stamp {
    sequence: counter.fetch_add(1, Ordering::SeqCst),
  });

  // Types are resolved when the step runs, so registering after build is fine.
  let pipeline = Pipeline::build_with_resolver(registry.clone(), |cfg: &mut PipelineBuilder<Job>| {
    cfg.add_type::<Stamp>().when(
      |job| job.name.ends_with("!"),
      |branch| {
        // Child builders share the parent's resolver.
        branch.add_type::<Notify>();
      },
    );
  });

  let first = pipeline
    .invoke(Job {
      name: "nightly".to_string(),
      ..Default::default()
    })
    .await?;
  info!("{} -> {:?}", first.name, first.steps);

  match pipeline
    .invoke(Job {
      name: "urgent!".to_string(),
      ..Default::default()
    })
    .await
  {
    Ok(job) => info!("{} -> {:?}", job.name, job.steps),
    Err(e) => info!("Expected failure before Notify is registered: {}", e),
  }

  registry.register_default::<Notify>();
  let urgent = pipeline
    .invoke(Job {
      name: "urgent!".to_string(),
      ..Default::default()
    })
    .await?;
  info!("{} -> {:?}", urgent.name, urgent.steps);

  info!("--- Resolver Registry Example Finished ---");
  Ok(())
}
