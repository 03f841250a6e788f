//! End-to-end catalog pipeline.
//!
//! Sequences one snapshot run: fetch raw TLE text → parse → propagate an
//! oversampled prefix → classify and score survivors → append synthetic
//! demonstration entries → truncate to budget → rank by urgency. The whole
//! pipeline is single-threaded and sequential; only the fetch awaits.
//!
//! Per-record processing is one-shot: a candidate is either propagated and
//! continues to classification/scoring, or dropped with no retry. Failures
//! are counted (with capped samples) in the [`PipelineReport`] so callers
//! can assert on data quality instead of parsing log output.

use crate::acquisition::tle_parser::{parse_tle_text, ParseReport};
use crate::acquisition::TleSource;
use crate::classify;
use crate::demo::DemoEntryProvider;
use crate::output::{CatalogSink, SinkError};
use crate::propagation;
use crate::scoring;
use crate::types::{CatalogEntry, ObjectType};
use chrono::NaiveDateTime;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::cmp::Ordering;
use thiserror::Error;

/// Oversampling multiplier applied to the object budget before propagation,
/// absorbing per-record propagation failures.
const OVERSAMPLE_FACTOR: usize = 3;

/// Demo entries are capped to `budget / DEMO_BUDGET_DIVISOR` (integer
/// division).
const DEMO_BUDGET_DIVISOR: usize = 4;

/// Cap on propagation-failure samples retained in the report.
const MAX_FAILURE_SAMPLES: usize = 5;

/// Catastrophic pipeline failures. Everything recoverable (source
/// fallback, per-record skips, budget shortfall) is reported, not raised.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("output sink failure: {0}")]
    Sink(#[from] SinkError),
}

/// Structured run report: counts and capped samples per failure kind, plus
/// the output distribution.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineReport {
    /// Raw blobs obtained from the source.
    pub source_blobs: usize,
    /// True when every source failed; the run still returns (empty).
    pub no_data: bool,
    /// Merged parse statistics across all blobs.
    pub parse: ParseReport,
    /// Records for which propagation was attempted.
    pub propagation_attempts: usize,
    /// Records dropped by propagation.
    pub propagation_failures: usize,
    /// First few `(name: error)` propagation failures.
    pub failure_samples: Vec<String>,
    /// Entries built from live data.
    pub real_entries: usize,
    /// Synthetic demonstration entries appended (pre-truncation).
    pub demo_entries: usize,
    /// Final entry count handed back (may be below the budget — a
    /// shortfall is not an error).
    pub entries_returned: usize,
    pub debris_count: usize,
    pub rocket_body_count: usize,
    pub satellite_count: usize,
}

/// One finished run: the ranked entries plus the report.
#[derive(Debug)]
pub struct PipelineOutcome {
    pub entries: Vec<CatalogEntry>,
    pub report: PipelineReport,
}

/// The pipeline orchestrator. Owns the source, the demo provider, the run
/// RNG, and the propagation instant.
pub struct CatalogPipeline {
    source: Box<dyn TleSource>,
    demo: Box<dyn DemoEntryProvider>,
    rng: StdRng,
    instant: NaiveDateTime,
}

impl CatalogPipeline {
    /// Build a pipeline with an entropy-seeded RNG and the current UTC
    /// instant.
    pub fn new(source: Box<dyn TleSource>, demo: Box<dyn DemoEntryProvider>) -> Self {
        Self {
            source,
            demo,
            rng: StdRng::from_entropy(),
            instant: chrono::Utc::now().naive_utc(),
        }
    }

    /// Seed the run RNG for reproducible scoring and jitter.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Pin the propagation instant (tests pair this with a known epoch).
    pub fn with_instant(mut self, instant: NaiveDateTime) -> Self {
        self.instant = instant;
        self
    }

    /// Run one snapshot with the given object budget.
    ///
    /// Never fails: an all-sources-down run yields an empty outcome with
    /// `report.no_data` set, and a shortfall yields fewer entries than
    /// requested.
    pub async fn run(&mut self, max_objects: usize) -> PipelineOutcome {
        let mut report = PipelineReport::default();

        // Step 1: fetch raw text blobs.
        let blobs = match self.source.fetch().await {
            Ok(blobs) => blobs,
            Err(e) => {
                tracing::error!(
                    source = self.source.source_name(),
                    error = %e,
                    "No TLE data available from any source"
                );
                report.no_data = true;
                return PipelineOutcome {
                    entries: Vec::new(),
                    report,
                };
            }
        };
        report.source_blobs = blobs.len();

        // Step 2: parse every blob, concatenating in source order.
        let mut records = Vec::new();
        for blob in &blobs {
            let (mut blob_records, blob_report) = parse_tle_text(blob);
            records.append(&mut blob_records);
            report.parse.merge(blob_report);
        }
        tracing::info!(
            records = records.len(),
            skipped_lines = report.parse.skipped_lines,
            "Parsed TLE records"
        );

        // Step 3: propagate an oversampled prefix, one-shot per record,
        // until the budget is met or the prefix is exhausted.
        let prefix = max_objects
            .saturating_mul(OVERSAMPLE_FACTOR)
            .min(records.len());
        let mut entries: Vec<CatalogEntry> = Vec::with_capacity(max_objects);

        for record in &records[..prefix] {
            if entries.len() >= max_objects {
                break;
            }
            report.propagation_attempts += 1;

            let propagated = match propagation::propagate(record, self.instant) {
                Ok(p) => p,
                Err(e) => {
                    report.propagation_failures += 1;
                    if report.failure_samples.len() < MAX_FAILURE_SAMPLES {
                        report.failure_samples.push(format!("{}: {e}", record.name));
                    }
                    tracing::warn!(
                        name = %record.name,
                        error = %e,
                        "Dropping record — propagation failed"
                    );
                    continue;
                }
            };

            // Step 4: classify and score the survivor.
            let object_type = classify::object_type(&record.name);
            let altitude_km = propagated.state.altitude_km;
            let urgency_score = scoring::urgency_score(altitude_km, object_type, &mut self.rng);

            entries.push(CatalogEntry {
                id: propagated.catalog_number,
                name: record.name.clone(),
                tle_line1: record.line1.clone(),
                tle_line2: record.line2.clone(),
                orbit_type: classify::orbit_class(altitude_km),
                altitude: scoring::round1(altitude_km),
                object_type,
                urgency_score,
            });
        }
        report.real_entries = entries.len();

        // Step 5: append up to budget/4 demo entries.
        let mut demo_entries = self.demo.entries(&mut self.rng);
        demo_entries.truncate(max_objects / DEMO_BUDGET_DIVISOR);
        report.demo_entries = demo_entries.len();
        entries.extend(demo_entries);

        // Step 6: hard cutoff BEFORE ranking — demo entries are cut first
        // when real entries already fill the budget.
        entries.truncate(max_objects);

        // Step 7: rank by urgency, descending. The sort is stable, so
        // equal scores keep their processing order.
        sort_by_urgency(&mut entries);

        report.entries_returned = entries.len();
        for entry in &entries {
            match entry.object_type {
                ObjectType::Debris => report.debris_count += 1,
                ObjectType::RocketBody => report.rocket_body_count += 1,
                ObjectType::Satellite => report.satellite_count += 1,
            }
        }

        tracing::info!(
            entries = report.entries_returned,
            real = report.real_entries,
            demo = report.demo_entries,
            propagation_failures = report.propagation_failures,
            "Pipeline run complete"
        );

        PipelineOutcome { entries, report }
    }

    /// Run one snapshot and hand the ranked sequence to the sink. A sink
    /// failure is catastrophic — surfaced as an error, distinct from an
    /// empty catalog.
    pub async fn run_to_sink(
        &mut self,
        max_objects: usize,
        sink: &dyn CatalogSink,
    ) -> Result<PipelineOutcome, PipelineError> {
        let outcome = self.run(max_objects).await;
        sink.write(&outcome.entries)?;
        Ok(outcome)
    }
}

/// Stable descending sort by urgency score. NaN never occurs (scores are
/// finite sums of bounded terms); incomparable pairs keep their order.
pub(crate) fn sort_by_urgency(entries: &mut [CatalogEntry]) {
    entries.sort_by(|a, b| {
        b.urgency_score
            .partial_cmp(&a.urgency_score)
            .unwrap_or(Ordering::Equal)
    });
}
