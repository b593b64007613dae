// flo/examples/basic_pipeline.rs

use async_trait::async_trait;
use flo::{Composable, FloError, Handler, Next, Pipeline, PipelineBuilder};
use tracing::info;

// 1. Define the value that flows through the pipeline
#[derive(Clone, Debug, Default)]
struct Order {
  id: u32,
  amount_cents: u64,
  audit_log: Vec<String>,
}

// 2. Define a reusable handler
//    Handler<T> defaults to Handler<T, T, FloError>: the value-threading form.
struct ApplyDiscount {
  percent: u64,
}

#[async_trait]
impl Handler<Order> for ApplyDiscount {
  async fn handle(&self, mut order: Order, next: Next<Order>) -> Result<Order, FloError> {
    order.amount_cents -= order.amount_cents * self.percent / 100;
    order.audit_log.push(format!("discount {}%", self.percent));
    next.invoke(order).await
  }
}

// A handler that can be created on demand (`add_type`) needs a zero-argument constructor.
#[derive(Default)]
struct AddShipping;

#[async_trait]
impl Handler<Order> for AddShipping {
  async fn handle(&self, mut order: Order, next: Next<Order>) -> Result<Order, FloError> {
    order.amount_cents += 499;
    order.audit_log.push("shipping".to_string());
    next.invoke(order).await
  }
}

#[tokio::main]
async fn main() -> Result<(), FloError> {
  // Initialize tracing (optional, for demonstration)
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Basic Pipeline Example ---");

  // 3. Register steps in execution order
  let pipeline = Pipeline::build(|cfg: &mut PipelineBuilder<Order>| {
    cfg
      .add_step(|mut order, next| {
        info!(order_id = order.id, "Validating order");
        order.audit_log.push("validated".to_string());
        next.invoke(order)
      })
      .add_handler(ApplyDiscount { percent: 10 })
      .add_type::<AddShipping>()
      .add_step(|order, next| async move {
        // Work after `next` sees the downstream result.
        let order = next.invoke(order).await?;
        info!(order_id = order.id, total = order.amount_cents, "Order priced");
        Ok::<_, FloError>(order)
      });
  });

  // 4. Invoke it as often as needed; the pipeline is immutable.
  for (id, amount_cents) in [(1, 10_000), (2, 2_500)] {
    let order = pipeline
      .invoke(Order {
        id,
        amount_cents,
        ..Default::default()
      })
      .await?;
    info!("Order {}: {} cents via {:?}", order.id, order.amount_cents, order.audit_log);
  }

  // 5. An empty pipeline is the identity.
  let identity = PipelineBuilder::<Order>::new().build();
  let untouched = identity.invoke(Order::default()).await?;
  assert!(untouched.audit_log.is_empty());

  info!("--- Basic Pipeline Example Finished ---");
  Ok(())
}
