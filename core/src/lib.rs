// src/lib.rs

//! Flo: composable, asynchronous middleware pipelines for Rust.
//!
//! Flo assembles an ordered list of handlers into a single callable `Pipeline`, with:
//!  - Handlers that receive the input and a continuation (`next`) for the rest of the chain.
//!  - Lazily created handlers (per-invocation factories and type-based resolution).
//!  - Terminal steps that end the chain.
//!  - Conditional child pipelines that either commit (`fork`), thread their result back into
//!    the parent (`PipelineBuilder::when`), or fall through when they have no answer
//!    (`OutputPipelineBuilder::when`).
//!
//! Failures are never caught or translated by the composition: whatever a handler returns as
//! `Err` is what the pipeline's caller receives.

pub mod conditional;
pub mod core;
pub mod error;
pub mod pipeline;
pub mod registry;
pub mod resolver;

// --- Re-exports for the Public API ---

pub use crate::core::handler::{BoxFuture, Handler};
pub use crate::core::pipeline_fn::{Next, Pipeline};

// Builders and the registration API shared by both flavors
pub use crate::pipeline::builder::Builder;
pub use crate::pipeline::composable::Composable;
pub use crate::pipeline::output::{Absence, OutputPipelineBuilder};
pub use crate::pipeline::value::PipelineBuilder;

pub use crate::conditional::condition::Condition;

pub use crate::registry::TypeRegistry;
pub use crate::resolver::{DefaultResolver, Resolved, Resolver, SharedResolver, TypeKey};

pub use crate::error::{FloError, FloResult};

/*
    Core Workflow:
    1. Pick a flavor:
       - `PipelineBuilder<T, Err>` when every handler passes a `T` along (middleware style).
       - `OutputPipelineBuilder<TIn, TOut, Err>` when handlers compete to produce a `TOut`.
    2. Register steps in execution order with `add_step`, `add_handler`, `add_factory`,
       `add_type::<H>()`, `add_resolved::<H>()` and `set_final`.
    3. Add branches with `fork` / `when` (or their `_async` variants). The configure closure
       runs every time the branch is taken and registers steps on a fresh child builder.
    4. Call `build()` (or use `Pipeline::build` / `Pipeline::build_output`) and `invoke` the
       result as often as needed, from as many tasks as needed.
*/
