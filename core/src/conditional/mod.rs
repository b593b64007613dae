// flo/src/conditional/mod.rs

//! Conditional sub-pipelines.
//!
//! A branch step evaluates its `Condition` on every invocation. When it holds, a fresh child
//! builder of the same flavor is created, configured and built, and a combinator decides
//! how the child's result relates to the rest of the parent pipeline.

pub mod combinator;
pub mod condition;

pub use condition::{Condition, ConditionCheck};
