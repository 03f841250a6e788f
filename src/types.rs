//! Core data model for the catalog pipeline.
//!
//! Data flows one way through these types: raw TLE text is parsed into
//! [`TleRecord`]s, each record is propagated into a [`PhysicalState`], and
//! surviving records are assembled into [`CatalogEntry`]s — the final output
//! unit handed to the sink. Nothing here outlives a single pipeline run.

use serde::{Deserialize, Serialize};

/// Earth mean radius in kilometers, used to derive altitude from an
/// Earth-centered position vector.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// One three-line element record: a free-text name line plus the two
/// fixed-format element lines.
///
/// Both element lines are at least 69 characters, `line1` starts with `"1 "`
/// and `line2` with `"2 "` — the parser never emits a record that violates
/// this. Records are consumed once by propagation and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TleRecord {
    pub name: String,
    pub line1: String,
    pub line2: String,
}

/// Reference instant at which an element set's parameters are valid,
/// decoded from fixed offsets of line 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Epoch {
    /// Four-digit year (two-digit field expanded per the catalog convention:
    /// values below 57 belong to the 2000s, 57 and above to the 1900s).
    pub year: i32,
    /// Fractional day of year.
    pub day_of_year: f64,
}

/// Physical state derived from one successful propagation. Only exists when
/// the SGP4 call reports success; failed records carry no state downstream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalState {
    /// Position in the Earth-centered inertial frame (km).
    pub position: [f64; 3],
    /// Velocity in the same frame (km/s).
    pub velocity: [f64; 3],
    /// `|position| - EARTH_RADIUS_KM`, full precision (rounded only at
    /// catalog-entry assembly).
    pub altitude_km: f64,
}

/// Altitude band classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrbitClass {
    Leo,
    Meo,
    Geo,
}

/// Semantic object type derived from the name string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectType {
    Debris,
    #[serde(rename = "Rocket Body")]
    RocketBody,
    Satellite,
}

/// Final output unit: one classified, scored catalog object.
///
/// Field order here is the JSON field order the sink emits; `altitude` and
/// `urgency_score` are rounded to one decimal place before construction.
/// Entries are owned by the orchestrator until handed to the sink and are
/// immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// NORAD catalog number. Synthetic demonstration entries derive ids from
    /// their event seed and are not guaranteed unique against live data.
    pub id: u32,
    pub name: String,
    pub tle_line1: String,
    pub tle_line2: String,
    pub orbit_type: OrbitClass,
    pub altitude: f64,
    pub object_type: ObjectType,
    pub urgency_score: f64,
}
