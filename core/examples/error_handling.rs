// flo/examples/error_handling.rs

use flo::{Composable, FloError, Pipeline, PipelineBuilder, TypeRegistry};
use std::sync::Arc;
use tracing::{error, info};

// 1. Define a custom application error type
#[derive(Debug, thiserror::Error)]
enum ExampleAppError {
  #[error("A custom application error occurred: {0}")]
  CustomError(String),

  #[error("Flo framework error during pipeline execution: {0}")]
  Framework(#[from] FloError), // Required: builders need `Err: From<FloError>`
}

#[derive(Clone, Debug, Default)]
struct Payment {
  amount: i64,
  processed_steps: Vec<&'static str>,
}

#[derive(Default)]
struct Settle;

#[async_trait::async_trait]
impl flo::Handler<Payment, Payment, ExampleAppError> for Settle {
  async fn handle(
    &self,
    mut payment: Payment,
    next: flo::Next<Payment, Payment, ExampleAppError>,
  ) -> Result<Payment, ExampleAppError> {
    payment.processed_steps.push("settle");
    next.invoke(payment).await
  }
}

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Error Handling Example ---");

  // Scenario 1: Handler returns a custom error
  info!("\nScenario 1: Handler returns a custom error");
  run_pipeline_with_handler_error().await;

  // Scenario 2: Framework error (UnresolvableType)
  info!("\nScenario 2: Flo framework error (UnresolvableType)");
  run_pipeline_with_framework_error().await;
}

async fn run_pipeline_with_handler_error() {
  let pipeline = Pipeline::build(|cfg: &mut PipelineBuilder<Payment, ExampleAppError>| {
    cfg
      .add_step(|mut payment, next| {
        info!("Executing validate");
        payment.processed_steps.push("validate");
        next.invoke(payment)
      })
      .add_step(|payment: Payment, next| async move {
        if payment.amount <= 0 {
          return Err(ExampleAppError::CustomError(format!(
            "amount must be positive, got {}",
            payment.amount
          )));
        }
        next.invoke(payment).await
      })
      .add_type::<Settle>(); // Should not run for the failing payment
  });

  for amount in [250, -5] {
    match pipeline
      .invoke(Payment {
        amount,
        ..Default::default()
      })
      .await
    {
      Ok(payment) => info!("Payment {} processed: {:?}", amount, payment.processed_steps),
      Err(e) => error!("Payment {} failed: {}", amount, e),
    }
  }
}

async fn run_pipeline_with_framework_error() {
  // The registry knows nothing about `Settle`; building still succeeds.
  let registry = Arc::new(TypeRegistry::new());
  let pipeline = Pipeline::build_with_resolver(registry, |cfg: &mut PipelineBuilder<Payment, ExampleAppError>| {
    cfg.add_type::<Settle>();
  });

  match pipeline.invoke(Payment::default()).await {
    Ok(_) => info!("Unexpected success"),
    Err(ExampleAppError::Framework(FloError::UnresolvableType { type_name, .. })) => {
      error!("Pipeline could not resolve {}", type_name)
    }
    Err(e) => error!("Pipeline failed with a different error: {}", e),
  }
}
