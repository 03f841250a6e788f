//! TLE data acquisition: retrieval from CelesTrak and raw-text parsing.

pub mod celestrak;
pub mod tle_parser;

pub use celestrak::{CelestrakClient, FetchError, FetchStrategy, StaticSource, TleSource};
pub use tle_parser::{parse_tle_text, ParseReport};
