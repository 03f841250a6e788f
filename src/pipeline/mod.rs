//! Pipeline orchestration.

pub mod orchestrator;

pub use orchestrator::{CatalogPipeline, PipelineError, PipelineOutcome, PipelineReport};
