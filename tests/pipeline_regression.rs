//! Catalog pipeline regression tests.
//!
//! Drives the full pipeline with canned TLE blobs against a pinned
//! propagation instant near the element epoch. Asserts on budget
//! enforcement, demo-entry caps, malformed-input tolerance, ranking
//! order, and the failure report.

use chrono::{NaiveDate, NaiveDateTime};
use clearorbit::{
    CatalogPipeline, CatalogSink, DemoEntryProvider, FragmentationCatalog, InMemorySink,
    NoDemoEntries, ObjectType, OrbitClass, StaticSource,
};

const ISS_LINE1: &str =
    "1 25544U 98067A   19343.69339541  .00001764  00000-0  40967-4 0  9998";
const ISS_LINE2: &str =
    "2 25544  51.6439 211.2001 0007417  17.6667  85.6398 15.50103472202482";

/// An instant a couple of hours past the element epoch (2019 day 343.69).
fn instant() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2019, 12, 9)
        .unwrap()
        .and_hms_opt(18, 0, 0)
        .unwrap()
}

/// One well-formed triple. The element lines are shared; the name line is
/// free text, so each object classifies independently.
fn triple(name: &str) -> String {
    format!("{name}\n{ISS_LINE1}\n{ISS_LINE2}\n")
}

fn blob_of(count: usize) -> String {
    (0..count).map(|i| triple(&format!("OBJECT {i}"))).collect()
}

fn pipeline_with(blob: String, with_demo: bool) -> CatalogPipeline {
    let source = Box::new(StaticSource::new(vec![blob]));
    let demo: Box<dyn DemoEntryProvider> = if with_demo {
        Box::new(FragmentationCatalog)
    } else {
        Box::new(NoDemoEntries)
    };
    CatalogPipeline::new(source, demo)
        .with_seed(7)
        .with_instant(instant())
}

#[tokio::test]
async fn end_to_end_iss_snapshot() {
    let mut pipeline = pipeline_with(triple("ISS (ZARYA)"), false);
    let outcome = pipeline.run(10).await;

    assert_eq!(outcome.entries.len(), 1);
    let entry = &outcome.entries[0];
    assert_eq!(entry.id, 25544);
    assert_eq!(entry.name, "ISS (ZARYA)");
    assert_eq!(entry.object_type, ObjectType::Satellite);
    assert_eq!(entry.orbit_type, OrbitClass::Leo);
    assert!(
        (300.0..500.0).contains(&entry.altitude),
        "unexpected ISS altitude: {} km",
        entry.altitude
    );
    // altitude factor ~99.6 + satellite weight 10 + random [0, 10)
    assert!(entry.urgency_score >= 109.0 && entry.urgency_score < 120.0);

    let report = &outcome.report;
    assert_eq!(report.real_entries, 1);
    assert_eq!(report.propagation_attempts, 1);
    assert_eq!(report.propagation_failures, 0);
    assert!(!report.no_data);
}

#[tokio::test]
async fn budget_is_never_exceeded() {
    let mut pipeline = pipeline_with(blob_of(40), true);
    let outcome = pipeline.run(10).await;

    assert_eq!(outcome.entries.len(), 10);
    // Real entries fill the budget, so the appended demo entries fall to
    // the pre-ranking cutoff.
    assert!(outcome.entries.iter().all(|e| e.name.starts_with("OBJECT ")));
    assert_eq!(outcome.report.entries_returned, 10);
}

#[tokio::test]
async fn demo_contribution_capped_at_quarter_budget() {
    // Only 4 live objects: demo entries top up, but never beyond 10/4 = 2.
    let mut pipeline = pipeline_with(blob_of(4), true);
    let outcome = pipeline.run(10).await;

    let demo_count = outcome
        .entries
        .iter()
        .filter(|e| e.name.contains("DEB #"))
        .count();
    assert_eq!(demo_count, 2);
    assert_eq!(outcome.entries.len(), 6);
    assert_eq!(outcome.report.demo_entries, 2);
    assert_eq!(outcome.report.real_entries, 4);
}

#[tokio::test]
async fn corrupted_middle_triple_is_tolerated() {
    let corrupted = format!("BROKEN SAT\n{ISS_LINE1}\n2 25544  51.6439\n");
    let blob = format!("{}{}{}", triple("BEFORE"), corrupted, triple("AFTER"));

    let mut pipeline = pipeline_with(blob, false);
    let outcome = pipeline.run(10).await;

    let names: Vec<&str> = outcome.entries.iter().map(|e| e.name.as_str()).collect();
    // Ranked order may differ; both survivors must be present, the broken
    // one absent.
    assert_eq!(outcome.entries.len(), 2);
    assert!(names.contains(&"BEFORE"));
    assert!(names.contains(&"AFTER"));
    assert!(outcome.report.parse.skipped_lines > 0);
}

#[tokio::test]
async fn all_sources_failing_yields_empty_catalog() {
    let source = Box::new(StaticSource::new(Vec::new()));
    let mut pipeline =
        CatalogPipeline::new(source, Box::new(FragmentationCatalog)).with_instant(instant());
    let outcome = pipeline.run(50).await;

    assert!(outcome.entries.is_empty());
    assert!(outcome.report.no_data);
    assert_eq!(outcome.report.demo_entries, 0);
}

#[tokio::test]
async fn type_weights_dominate_ranking_at_equal_altitude() {
    // Same element lines, so identical altitude: the 10-point type-weight
    // gaps exceed the [0, 10) random term, fixing the type order.
    let blob = format!(
        "{}{}{}",
        triple("STARLINK-1"),
        triple("COSMOS 2251 DEB"),
        triple("SL-16 R/B")
    );
    let mut pipeline = pipeline_with(blob, false);
    let outcome = pipeline.run(10).await;

    let types: Vec<ObjectType> = outcome.entries.iter().map(|e| e.object_type).collect();
    assert_eq!(
        types,
        [
            ObjectType::Debris,
            ObjectType::RocketBody,
            ObjectType::Satellite
        ]
    );
    assert!(outcome
        .entries
        .windows(2)
        .all(|w| w[0].urgency_score >= w[1].urgency_score));

    let report = &outcome.report;
    assert_eq!(report.debris_count, 1);
    assert_eq!(report.rocket_body_count, 1);
    assert_eq!(report.satellite_count, 1);
}

#[tokio::test]
async fn seeded_runs_are_reproducible() {
    let outcome_a = pipeline_with(blob_of(6), true).run(10).await;
    let outcome_b = pipeline_with(blob_of(6), true).run(10).await;
    assert_eq!(outcome_a.entries, outcome_b.entries);
}

#[tokio::test]
async fn run_to_sink_hands_over_ranked_sequence() {
    let mut pipeline = pipeline_with(blob_of(5), false);
    let sink = InMemorySink::new();

    let outcome = pipeline.run_to_sink(10, &sink).await.unwrap();
    assert_eq!(sink.entries(), outcome.entries);
    assert_eq!(sink.sink_name(), "in-memory");
    assert!(outcome
        .entries
        .windows(2)
        .all(|w| w[0].urgency_score >= w[1].urgency_score));
}
