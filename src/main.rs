//! ClearOrbit — near-Earth object catalog pipeline.
//!
//! Fetches TLE data from CelesTrak (or a local file), propagates each
//! object to the current instant with SGP4, classifies and scores it, and
//! writes a ranked JSON catalog for the visualization frontend.
//!
//! # Usage
//!
//! ```bash
//! # Live run: ~50 objects to debris.json
//! clearorbit
//!
//! # Offline run against a saved TLE file, reproducible scores
//! clearorbit --input active.tle --seed 42 --max-objects 100
//!
//! # Live data only, no synthetic demonstration entries
//! clearorbit --no-demo
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Logging level (default: info)
//! - `CLEARORBIT_MAX_OBJECTS`: Object budget (default: 50)
//! - `CLEARORBIT_OUTPUT`: Catalog output path (default: debris.json)

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use clearorbit::{
    CatalogPipeline, CelestrakClient, DemoEntryProvider, FetchStrategy, FragmentationCatalog,
    JsonFileSink, NoDemoEntries, PipelineOutcome, StaticSource, TleSource,
};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "clearorbit")]
#[command(about = "ClearOrbit near-Earth object catalog pipeline")]
#[command(version)]
struct CliArgs {
    /// Target object budget for the catalog
    #[arg(long, env = "CLEARORBIT_MAX_OBJECTS", default_value = "50")]
    max_objects: usize,

    /// Output path for the ranked JSON catalog
    #[arg(short, long, env = "CLEARORBIT_OUTPUT", default_value = "debris.json")]
    output: String,

    /// Read TLE data from a local file instead of CelesTrak
    #[arg(long)]
    input: Option<String>,

    /// CelesTrak group to query, in priority order (repeatable;
    /// default: active, stations, last-30-days)
    #[arg(long, conflicts_with = "input")]
    group: Vec<String>,

    /// Source-selection strategy across the group list
    #[arg(long, value_enum, default_value_t = StrategyArg::FirstSuccess, conflicts_with = "input")]
    strategy: StrategyArg,

    /// Seed the run RNG for reproducible scores and jitter
    #[arg(long)]
    seed: Option<u64>,

    /// Skip the synthetic demonstration entries
    #[arg(long)]
    no_demo: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum StrategyArg {
    FirstSuccess,
    MergeAll,
    PriorityOrder,
}

impl From<StrategyArg> for FetchStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::FirstSuccess => FetchStrategy::FirstSuccess,
            StrategyArg::MergeAll => FetchStrategy::MergeAll,
            StrategyArg::PriorityOrder => FetchStrategy::PriorityOrder,
        }
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();

    let source: Box<dyn TleSource> = match &args.input {
        Some(path) => Box::new(
            StaticSource::from_file(path)
                .with_context(|| format!("failed to read TLE file {path}"))?,
        ),
        None => {
            let mut client = CelestrakClient::new()
                .context("failed to build HTTP client")?
                .with_strategy(args.strategy.into());
            if !args.group.is_empty() {
                client = client.with_groups(args.group.clone());
            }
            Box::new(client)
        }
    };

    let demo: Box<dyn DemoEntryProvider> = if args.no_demo {
        Box::new(NoDemoEntries)
    } else {
        Box::new(FragmentationCatalog)
    };

    info!(
        source = source.source_name(),
        demo = demo.provider_name(),
        "Pipeline inputs configured"
    );

    let mut pipeline = CatalogPipeline::new(source, demo);
    if let Some(seed) = args.seed {
        pipeline = pipeline.with_seed(seed);
    }

    let sink = JsonFileSink::new(&args.output);
    info!(
        max_objects = args.max_objects,
        output = %args.output,
        "Starting catalog pipeline"
    );
    let outcome = pipeline
        .run_to_sink(args.max_objects, &sink)
        .await
        .context("pipeline run failed")?;

    if outcome.report.no_data {
        warn!("No TLE data available from any source — wrote an empty catalog");
    }

    summarize(&outcome);
    Ok(())
}

/// Log the run summary and the top high-priority objects.
fn summarize(outcome: &PipelineOutcome) {
    let report = &outcome.report;
    info!(
        entries = report.entries_returned,
        real = report.real_entries,
        demo = report.demo_entries,
        debris = report.debris_count,
        rocket_bodies = report.rocket_body_count,
        satellites = report.satellite_count,
        parse_skips = report.parse.skipped_lines,
        propagation_failures = report.propagation_failures,
        "Catalog summary"
    );

    for entry in outcome.entries.iter().take(3) {
        info!(
            id = entry.id,
            name = %entry.name,
            object_type = ?entry.object_type,
            orbit = ?entry.orbit_type,
            altitude_km = entry.altitude,
            urgency = entry.urgency_score,
            "High-priority object"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let args = CliArgs::try_parse_from(["clearorbit"]).unwrap();
        assert_eq!(args.strategy, StrategyArg::FirstSuccess);
        assert!(args.group.is_empty());
        assert!(args.input.is_none());
        assert!(!args.no_demo);
    }

    #[test]
    fn test_env_overrides_budget_and_output() {
        std::env::set_var("CLEARORBIT_MAX_OBJECTS", "25");
        std::env::set_var("CLEARORBIT_OUTPUT", "catalog.json");
        let args = CliArgs::try_parse_from(["clearorbit"]).unwrap();
        std::env::remove_var("CLEARORBIT_MAX_OBJECTS");
        std::env::remove_var("CLEARORBIT_OUTPUT");

        assert_eq!(args.max_objects, 25);
        assert_eq!(args.output, "catalog.json");
    }

    #[test]
    fn test_live_source_flags_conflict_with_input() {
        // --strategy and --group only shape the CelesTrak query; combined
        // with --input they would be silently dead, so reject them.
        assert!(CliArgs::try_parse_from([
            "clearorbit",
            "--input",
            "saved.tle",
            "--strategy",
            "merge-all"
        ])
        .is_err());
        assert!(
            CliArgs::try_parse_from(["clearorbit", "--input", "saved.tle", "--group", "active"])
                .is_err()
        );
        // --input on its own stays valid.
        assert!(CliArgs::try_parse_from(["clearorbit", "--input", "saved.tle"]).is_ok());
    }
}
