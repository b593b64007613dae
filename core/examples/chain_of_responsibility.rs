// flo/examples/chain_of_responsibility.rs

use flo::{Composable, FloError, OutputPipelineBuilder, Pipeline};
use tracing::info;

#[derive(Clone, Debug)]
struct Query {
  key: String,
}

#[tokio::main]
async fn main() -> Result<(), FloError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Chain of Responsibility Example ---");

  // Handlers compete to answer; `None` means "not mine".
  let lookup = Pipeline::build_output(|cfg: &mut OutputPipelineBuilder<Query, Option<String>>| {
    cfg
      // A cache that only knows some keys. Misses fall through to the next source.
      .when(
        |q| q.key.starts_with("user:"),
        |branch| {
          branch.add_step(|q: Query, _next| async move {
            let hit = (q.key == "user:1").then(|| "alice (cached)".to_string());
            Ok(hit)
          });
        },
      )
      // Config keys are answered here and nowhere else, even when missing.
      .fork(
        |q| q.key.starts_with("config:"),
        |branch| {
          branch.add_step(|q: Query, _next| async move {
            Ok((q.key == "config:mode").then(|| "production".to_string()))
          });
        },
      )
      .add_step(|q: Query, next| async move {
        if q.key.starts_with("user:") {
          return Ok(Some(format!("{} (database)", q.key)));
        }
        // Unknown keys reach the terminal default: `None`.
        next.invoke(q).await
      });
  });

  for key in ["user:1", "user:2", "config:mode", "config:other", "misc"] {
    let answer = lookup.invoke(Query { key: key.to_string() }).await?;
    info!("{} -> {:?}", key, answer);
  }

  // Numeric outputs use the zero value as "no answer". `when_continue_if` picks another rule.
  let scorer = Pipeline::build_output(|cfg: &mut OutputPipelineBuilder<String, u32>| {
    cfg
      .when_continue_if(
        |_| true,
        |branch| {
          branch.add_step(|word: String, _next| async move { Ok(word.len() as u32) });
        },
        |score| *score < 4,
      )
      .set_final(|_word: String| async move { Ok(1) });
  });

  for word in ["hi", "hello"] {
    info!("score({}) = {}", word, scorer.invoke(word.to_string()).await?);
  }

  info!("--- Chain of Responsibility Example Finished ---");
  Ok(())
}
