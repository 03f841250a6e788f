//! ClearOrbit — near-Earth object catalog pipeline.
//!
//! Converts publicly published two-line element (TLE) sets into a ranked,
//! classified catalog of near-Earth objects — active satellites, rocket
//! bodies, and debris — for downstream visualization.
//!
//! ## Pipeline
//!
//! Data flows one way:
//!
//! raw TLE text → parsed records → propagated states (SGP4) →
//! classified + scored entries → ranked catalog → sink
//!
//! Each run is stateless and produces one snapshot. Orbital-prediction
//! accuracy is whatever standard SGP4 provides; there is no cross-source
//! deduplication and no historical catalog versioning.

pub mod acquisition;
pub mod classify;
pub mod demo;
pub mod output;
pub mod pipeline;
pub mod propagation;
pub mod scoring;
pub mod types;

// Re-export the pipeline surface
pub use pipeline::{CatalogPipeline, PipelineError, PipelineOutcome, PipelineReport};

// Re-export acquisition seams
pub use acquisition::{
    parse_tle_text, CelestrakClient, FetchError, FetchStrategy, ParseReport, StaticSource,
    TleSource,
};

// Re-export sinks and demo providers
pub use demo::{DemoEntryProvider, FragmentationCatalog, NoDemoEntries};
pub use output::{CatalogSink, InMemorySink, JsonFileSink, SinkError};

// Re-export the data model
pub use types::{CatalogEntry, Epoch, ObjectType, OrbitClass, PhysicalState, TleRecord};
