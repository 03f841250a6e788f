//! TLE text parser.
//!
//! Scans a provider-supplied text blob into an ordered sequence of
//! [`TleRecord`]s. The format is three consecutive lines per object: a
//! free-text name line followed by two fixed-column element lines.
//!
//! The scan is tolerant by design: a line that doesn't head a valid triple
//! advances the cursor by one and the scan retries, so a corrupted block in
//! the middle of a feed never aborts the rest. Parsing never errors —
//! instead every skip is counted in the returned [`ParseReport`] so callers
//! can assert on data quality rather than losing the signal to a log line.

use crate::types::TleRecord;
use serde::Serialize;

/// Minimum element-line length: fixed columns run through the checksum
/// digit at column 69.
const MIN_ELEMENT_LINE_LEN: usize = 69;

/// Cap on skipped-line samples retained in the report.
const MAX_SKIP_SAMPLES: usize = 5;

/// Outcome statistics for one parse pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseReport {
    /// Records emitted.
    pub records: usize,
    /// Blank lines skipped.
    pub blank_lines: usize,
    /// Non-blank lines that failed to head a valid triple.
    pub skipped_lines: usize,
    /// First few skipped lines, for diagnosis.
    pub skipped_samples: Vec<String>,
}

impl ParseReport {
    /// Fold another blob's report into this one (sample cap still applies).
    pub fn merge(&mut self, other: ParseReport) {
        self.records += other.records;
        self.blank_lines += other.blank_lines;
        self.skipped_lines += other.skipped_lines;
        for sample in other.skipped_samples {
            if self.skipped_samples.len() >= MAX_SKIP_SAMPLES {
                break;
            }
            self.skipped_samples.push(sample);
        }
    }
}

/// Check the element-line validity invariant: both lines at least 69
/// characters, line 1 starting `"1 "` and line 2 starting `"2 "`.
pub fn element_lines_valid(line1: &str, line2: &str) -> bool {
    line1.len() >= MIN_ELEMENT_LINE_LEN
        && line2.len() >= MIN_ELEMENT_LINE_LEN
        && line1.starts_with("1 ")
        && line2.starts_with("2 ")
}

/// Parse a block of TLE text into records.
///
/// Terminates when fewer than two lines remain past the cursor, so a
/// trailing partial triple emits nothing.
pub fn parse_tle_text(text: &str) -> (Vec<TleRecord>, ParseReport) {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    let mut records = Vec::new();
    let mut report = ParseReport::default();

    let mut i = 0;
    while i + 2 < lines.len() {
        if lines[i].is_empty() {
            report.blank_lines += 1;
            i += 1;
            continue;
        }

        let name = lines[i];
        let line1 = lines[i + 1];
        let line2 = lines[i + 2];

        if element_lines_valid(line1, line2) {
            records.push(TleRecord {
                name: name.to_string(),
                line1: line1.to_string(),
                line2: line2.to_string(),
            });
            i += 3;
        } else {
            report.skipped_lines += 1;
            if report.skipped_samples.len() < MAX_SKIP_SAMPLES {
                report.skipped_samples.push(name.to_string());
            }
            i += 1;
        }
    }

    report.records = records.len();
    (records, report)
}
