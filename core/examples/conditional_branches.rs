// flo/examples/conditional_branches.rs

use flo::{Composable, FloError, Pipeline, PipelineBuilder};
use tracing::info;

#[derive(Clone, Debug, Default)]
struct Request {
  path: String,
  authenticated: bool,
  trail: Vec<&'static str>,
}

#[tokio::main]
async fn main() -> Result<(), FloError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Conditional Branches Example ---");

  let pipeline = Pipeline::build(|cfg: &mut PipelineBuilder<Request>| {
    cfg
      .add_step(|mut req, next| {
        req.trail.push("log");
        next.invoke(req)
      })
      // `fork`: health checks are answered by the branch alone; nothing after it runs.
      .fork(
        |req| req.path == "/health",
        |branch| {
          branch.set_final(|mut req: Request| async move {
            req.trail.push("health");
            Ok(req)
          });
        },
      )
      // `when`: unauthenticated requests get an extra step, then rejoin the main chain.
      .when(
        |req| !req.authenticated,
        |branch| {
          branch.add_step(|mut req: Request, next| {
            req.trail.push("guest-session");
            next.invoke(req)
          });
        },
      )
      // Predicates may also be asynchronous.
      .when_async(
        |req: &Request| {
          let is_admin = req.path.starts_with("/admin");
          async move { is_admin }
        },
        |branch| {
          branch.add_step(|mut req: Request, next| {
            req.trail.push("admin-audit");
            next.invoke(req)
          });
        },
      )
      .add_step(|mut req, next| {
        req.trail.push("route");
        next.invoke(req)
      });
  });

  for (path, authenticated) in [("/health", false), ("/items", false), ("/admin/users", true)] {
    let req = pipeline
      .invoke(Request {
        path: path.to_string(),
        authenticated,
        ..Default::default()
      })
      .await?;
    info!("{} -> {:?}", req.path, req.trail);
  }

  info!("--- Conditional Branches Example Finished ---");
  Ok(())
}
