// tests/fork_tests.rs
mod common;

use common::*;
use flo::{Composable, OutputPipelineBuilder, Pipeline, PipelineBuilder};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

#[tokio::test]
async fn test_fork_is_skipped_when_predicate_is_false() {
  setup_tracing();
  let pipeline = Pipeline::build(|cfg: &mut PipelineBuilder<TestContext, TestError>| {
    cfg
      .add_step(|ctx, next| {
        ctx.add("Item1", "Item1Value");
        next.invoke(ctx)
      })
      .fork(
        |ctx| ctx.contains_key("Item2"),
        |branch| {
          branch.add_step(|ctx, next| {
            ctx.add("Item3", "Item3Value");
            next.invoke(ctx)
          });
        },
      )
      .set_final(|ctx| async move {
        ctx.add("Item4", "Item4Value");
        Ok(ctx)
      });
  });

  let ctx = pipeline.invoke(TestContext::default()).await.unwrap();
  assert_eq!(ctx.keys(), vec!["Item1", "Item4"]);
}

#[tokio::test]
async fn test_fork_commits_and_skips_parent_when_predicate_is_true() {
  setup_tracing();
  let pipeline = Pipeline::build(|cfg: &mut PipelineBuilder<TestContext, TestError>| {
    cfg
      .add_step(|ctx, next| {
        ctx.add("Item1", "Item1Value");
        next.invoke(ctx)
      })
      .fork(
        |ctx| ctx.contains_key("Item1"),
        |branch| {
          branch.set_final(|ctx| async move {
            ctx.add("Item2", "Item2Value");
            Ok(ctx)
          });
        },
      )
      .add_step(|ctx, next| {
        ctx.add("Item3", "Item3Value");
        next.invoke(ctx)
      });
  });

  let ctx = pipeline.invoke(TestContext::default()).await.unwrap();
  assert_eq!(ctx.keys(), vec!["Item1", "Item2"]);
}

#[tokio::test]
async fn test_fork_child_that_continues_ends_at_its_own_terminal() {
  setup_tracing();
  // The child's `next` is the child's identity terminal, not the parent's remaining chain.
  let pipeline = Pipeline::build(|cfg: &mut PipelineBuilder<Vec<&'static str>, TestError>| {
    cfg
      .fork(
        |_| true,
        |branch| {
          branch.add_handler(MarkerHandler { marker: "child" });
        },
      )
      .add_handler(MarkerHandler { marker: "parent" });
  });

  assert_eq!(pipeline.invoke(vec![]).await.unwrap(), vec!["child"]);
}

#[tokio::test]
async fn test_fork_async_predicate() {
  setup_tracing();
  let pipeline = Pipeline::build(|cfg: &mut PipelineBuilder<TestContext, TestError>| {
    cfg
      .fork_async(
        |ctx: &TestContext| {
          let matched = ctx.contains_key("Route");
          async move {
            tokio::task::yield_now().await;
            matched
          }
        },
        |branch| {
          branch.set_final(|ctx| async move {
            ctx.add("Forked", "yes");
            Ok(ctx)
          });
        },
      )
      .add_step(|ctx, next| {
        ctx.add("Parent", "yes");
        next.invoke(ctx)
      });
  });

  let routed = TestContext::default();
  routed.add("Route", "1");
  let routed = pipeline.invoke(routed).await.unwrap();
  assert_eq!(routed.keys(), vec!["Route", "Forked"]);

  let unrouted = pipeline.invoke(TestContext::default()).await.unwrap();
  assert_eq!(unrouted.keys(), vec!["Parent"]);
}

#[tokio::test]
async fn test_false_fork_is_equivalent_to_no_fork() {
  setup_tracing();
  let with_fork = Pipeline::build(|cfg: &mut PipelineBuilder<Vec<&'static str>, TestError>| {
    cfg
      .add_handler(MarkerHandler { marker: "A" })
      .fork(
        |_| false,
        |branch| {
          branch.add_handler(MarkerHandler { marker: "X" });
        },
      )
      .add_handler(MarkerHandler { marker: "B" });
  });
  let without_fork = Pipeline::build(|cfg: &mut PipelineBuilder<Vec<&'static str>, TestError>| {
    cfg
      .add_handler(MarkerHandler { marker: "A" })
      .add_handler(MarkerHandler { marker: "B" });
  });

  for input in [vec![], vec!["x"], vec!["y", "z"]] {
    assert_eq!(
      with_fork.invoke(input.clone()).await.unwrap(),
      without_fork.invoke(input).await.unwrap()
    );
  }
}

#[tokio::test]
async fn test_fork_configures_a_fresh_child_each_time_it_is_taken() {
  setup_tracing();
  let configured = Arc::new(AtomicUsize::new(0));
  let configured_in_branch = configured.clone();

  let pipeline = Pipeline::build(|cfg: &mut PipelineBuilder<u32, TestError>| {
    cfg.fork(
      |n| n % 2 == 0,
      move |branch| {
        configured_in_branch.fetch_add(1, Ordering::SeqCst);
        branch.add_step(|n, next| next.invoke(n * 100));
      },
    );
  });

  // Branch children are only built when the branch is taken.
  assert_eq!(configured.load(Ordering::SeqCst), 0);

  assert_eq!(pipeline.invoke(1).await.unwrap(), 1);
  assert_eq!(pipeline.invoke(2).await.unwrap(), 200);
  assert_eq!(pipeline.invoke(3).await.unwrap(), 3);
  assert_eq!(pipeline.invoke(4).await.unwrap(), 400);
  assert_eq!(configured.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_output_fork_is_skipped_when_predicate_is_false() {
  setup_tracing();
  let pipeline = Pipeline::build_output(|cfg: &mut OutputPipelineBuilder<String, usize, TestError>| {
    cfg.fork(
      |input| input == "hello world",
      |branch| {
        branch.add_step(|input: String, _next| async move { Ok(input.len()) });
      },
    );
  });

  assert_eq!(pipeline.invoke("hello".to_string()).await.unwrap(), 0);
  assert_eq!(pipeline.invoke("hello world".to_string()).await.unwrap(), 11);
}

#[tokio::test]
async fn test_output_fork_commits_even_to_absent_result() {
  setup_tracing();
  // Unlike output-flavor `when`, a taken fork never falls through.
  let pipeline = Pipeline::build_output(|cfg: &mut OutputPipelineBuilder<TestContext, Option<TestContext>, TestError>| {
    cfg
      .fork(
        |_| true,
        |branch| {
          branch.add_step(|_ctx, _next| async move { Ok(None) });
        },
      )
      .set_final(|ctx| async move {
        ctx.add("Test", "TestValue");
        Ok(Some(ctx))
      });
  });

  let input = TestContext::default();
  let result = pipeline.invoke(input.clone()).await.unwrap();
  assert!(result.is_none());
  assert!(!input.contains_key("Test"));
}

#[tokio::test]
async fn test_output_fork_result_replaces_parent_result() {
  setup_tracing();
  let pipeline = Pipeline::build_output(|cfg: &mut OutputPipelineBuilder<TestContext, Option<TestContext>, TestError>| {
    cfg
      .fork(
        |_| true,
        |branch| {
          branch.add_step(|ctx, _next| async move { Ok(Some(ctx)) });
        },
      )
      .set_final(|ctx| async move {
        ctx.add("Test", "TestValue");
        Ok(Some(ctx))
      });
  });

  let result = pipeline.invoke(TestContext::default()).await.unwrap();
  let result = result.expect("fork branch produced a context");
  assert!(!result.contains_key("Test"));
}

#[tokio::test]
async fn test_predicate_does_not_run_for_dropped_continuation() {
  setup_tracing();
  let evaluated = Arc::new(AtomicUsize::new(0));
  let evaluated_in_predicate = evaluated.clone();

  let pipeline = Pipeline::build(move |cfg: &mut PipelineBuilder<u32, TestError>| {
    let evaluated_in_predicate = evaluated_in_predicate.clone();
    cfg
      .add_step(|n, next| {
        drop(next.invoke(n));
        std::future::ready(Ok::<_, TestError>(n))
      })
      .fork(
        move |_| {
          evaluated_in_predicate.fetch_add(1, Ordering::SeqCst);
          true
        },
        |branch| {
          branch.add_step(|n, next| next.invoke(n + 1));
        },
      );
  });

  assert_eq!(pipeline.invoke(5).await.unwrap(), 5);
  assert_eq!(evaluated.load(Ordering::SeqCst), 0);
}
