pub mod handler;
pub mod pipeline_fn;
pub mod step;

// Re-export key types for easier access from other flo modules (and lib.rs)
pub use handler::{BoxFuture, Handler};
pub use pipeline_fn::{Next, Pipeline};
pub use step::Step;
