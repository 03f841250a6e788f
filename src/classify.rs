//! Object and orbit classification.
//!
//! Two pure, total functions: object type from the catalog name string, and
//! orbit class from altitude. Neither has failure cases — absence of keywords
//! yields [`ObjectType::Satellite`], and every altitude falls in a band.

use crate::types::{ObjectType, OrbitClass};

/// Name substrings indicating fragmentation debris.
const DEBRIS_KEYWORDS: [&str; 4] = ["DEB", "DEBRIS", "FRAG", "FRAGMENT"];

/// Name substrings indicating a spent rocket stage.
const ROCKET_KEYWORDS: [&str; 4] = ["R/B", "ROCKET BODY", "ROCKET", "BOOSTER"];

/// LEO/MEO boundary altitude (km). The boundary itself is MEO.
const LEO_CEILING_KM: f64 = 2000.0;

/// MEO/GEO boundary altitude (km) — geostationary altitude. The boundary
/// itself is GEO.
const MEO_CEILING_KM: f64 = 35_786.0;

/// Classify an object from its name. Case-insensitive substring match;
/// debris keywords take precedence over rocket-body keywords.
pub fn object_type(name: &str) -> ObjectType {
    let upper = name.to_uppercase();
    if DEBRIS_KEYWORDS.iter().any(|k| upper.contains(k)) {
        ObjectType::Debris
    } else if ROCKET_KEYWORDS.iter().any(|k| upper.contains(k)) {
        ObjectType::RocketBody
    } else {
        ObjectType::Satellite
    }
}

/// Classify an orbit from altitude (km). Bands are closed on the lower side,
/// open on the upper.
pub fn orbit_class(altitude_km: f64) -> OrbitClass {
    if altitude_km < LEO_CEILING_KM {
        OrbitClass::Leo
    } else if altitude_km < MEO_CEILING_KM {
        OrbitClass::Meo
    } else {
        OrbitClass::Geo
    }
}
