//! Urgency scoring.
//!
//! The urgency score is a synthetic ranking heuristic, not a physical
//! quantity: `max(0, 100 - altitude/1000) + type_weight + uniform(0, 10)`.
//! Lower orbits score higher, debris outranks rocket bodies outranks
//! satellites, and the random term injects variability so visually adjacent
//! objects don't tie.
//!
//! The random source is an explicit handle threaded in by the caller — there
//! is no process-global generator. A seeded `StdRng` makes a whole run
//! reproducible; tests assert on the bounded range of the random term rather
//! than exact values.

use crate::types::ObjectType;
use rand::Rng;

/// Upper bound (exclusive) of the uniform random tie-breaker term.
const RANDOM_FACTOR_MAX: f64 = 10.0;

/// Risk weight contributed by the object type.
pub fn type_weight(object_type: ObjectType) -> f64 {
    match object_type {
        ObjectType::Debris => 30.0,
        ObjectType::RocketBody => 20.0,
        ObjectType::Satellite => 10.0,
    }
}

/// Compute the urgency score for one object, rounded to one decimal place.
///
/// The altitude term floors at zero, so above 100 000 km equivalent the
/// score no longer decreases with altitude.
pub fn urgency_score<R: Rng>(altitude_km: f64, object_type: ObjectType, rng: &mut R) -> f64 {
    let altitude_factor = (100.0 - altitude_km / 1000.0).max(0.0);
    let random_factor = rng.gen_range(0.0..RANDOM_FACTOR_MAX);
    round1(altitude_factor + type_weight(object_type) + random_factor)
}

/// Round to one decimal place, the output resolution for altitude and score.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
