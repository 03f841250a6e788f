//! SGP4 state propagation and element-line field decoding.
//!
//! The catalog number and epoch are decoded from fixed character offsets of
//! line 1; the orbital mechanics itself is delegated to the `sgp4` crate
//! (the standard simplified-perturbation model). Every failure here —
//! offset decoding, model construction, epoch conversion, or the
//! propagation call — is fatal for the record only: the orchestrator drops
//! it, logs it, and moves on. There are no retries.

use crate::types::{Epoch, PhysicalState, TleRecord, EARTH_RADIUS_KM};
use chrono::NaiveDateTime;
use thiserror::Error;

/// Two-digit epoch years below this belong to the 2000s, the rest to the
/// 1900s. Anchored to the start of the catalog (1957), not calendar logic.
const EPOCH_YEAR_PIVOT: i32 = 57;

/// Per-record propagation errors.
#[derive(Debug, Error)]
pub enum PropagationError {
    #[error("element line too short for field decoding")]
    LineTooShort,

    #[error("catalog number field is not numeric: {0:?}")]
    CatalogNumber(String),

    #[error("epoch field is malformed: {0:?}")]
    EpochField(String),

    #[error("SGP4 rejected the element set: {0}")]
    Elements(String),

    #[error("instant not representable against this epoch: {0}")]
    EpochConversion(String),

    #[error("SGP4 propagation failed: {0}")]
    Propagation(String),
}

/// A record successfully propagated to the run instant.
#[derive(Debug, Clone)]
pub struct PropagatedObject {
    pub catalog_number: u32,
    pub epoch: Epoch,
    pub state: PhysicalState,
}

/// Decode the NORAD catalog number from line 1, columns 3-7.
pub fn decode_catalog_number(line1: &str) -> Result<u32, PropagationError> {
    let field = line1.get(2..7).ok_or(PropagationError::LineTooShort)?;
    field
        .trim()
        .parse()
        .map_err(|_| PropagationError::CatalogNumber(field.to_string()))
}

/// Decode the element-set epoch from line 1: two-digit year at columns
/// 19-20, fractional day of year at columns 21-32.
pub fn decode_epoch(line1: &str) -> Result<Epoch, PropagationError> {
    let year_field = line1.get(18..20).ok_or(PropagationError::LineTooShort)?;
    let day_field = line1.get(20..32).ok_or(PropagationError::LineTooShort)?;

    let raw_year: i32 = year_field
        .trim()
        .parse()
        .map_err(|_| PropagationError::EpochField(year_field.to_string()))?;
    let year = if raw_year < EPOCH_YEAR_PIVOT {
        raw_year + 2000
    } else {
        raw_year + 1900
    };

    let day_of_year: f64 = day_field
        .trim()
        .parse()
        .map_err(|_| PropagationError::EpochField(day_field.to_string()))?;

    Ok(Epoch { year, day_of_year })
}

/// Propagate one record to `instant` and derive its physical state.
///
/// One-shot: any error drops the record. Altitude comes back at full
/// precision; the one-decimal rounding happens at catalog-entry assembly.
pub fn propagate(
    record: &TleRecord,
    instant: NaiveDateTime,
) -> Result<PropagatedObject, PropagationError> {
    let catalog_number = decode_catalog_number(&record.line1)?;
    let epoch = decode_epoch(&record.line1)?;

    let elements = sgp4::Elements::from_tle(
        Some(record.name.clone()),
        record.line1.as_bytes(),
        record.line2.as_bytes(),
    )
    .map_err(|e| PropagationError::Elements(e.to_string()))?;

    let constants = sgp4::Constants::from_elements(&elements)
        .map_err(|e| PropagationError::Elements(e.to_string()))?;

    let minutes = elements
        .datetime_to_minutes_since_epoch(&instant)
        .map_err(|e| PropagationError::EpochConversion(e.to_string()))?;

    let prediction = constants
        .propagate(minutes)
        .map_err(|e| PropagationError::Propagation(e.to_string()))?;

    let [x, y, z] = prediction.position;
    let altitude_km = (x * x + y * y + z * z).sqrt() - EARTH_RADIUS_KM;

    Ok(PropagatedObject {
        catalog_number,
        epoch,
        state: PhysicalState {
            position: prediction.position,
            velocity: prediction.velocity,
            altitude_km,
        },
    })
}
