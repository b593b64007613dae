// flo/src/pipeline/mod.rs

//! Pipeline construction: the shared builder core, the `Composable` registration API, the
//! value-threading and output-producing flavors, and the one-call façade.

pub mod builder;
pub mod composable;
pub mod facade;
pub mod output;
pub mod value;

pub use builder::Builder;
pub use composable::Composable;
pub use output::{Absence, OutputPipelineBuilder};
pub use value::PipelineBuilder;
