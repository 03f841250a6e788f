//! Synthetic demonstration entries.
//!
//! A small fixed catalog of known historical fragmentation events, expanded
//! into altitude-jittered variants and scored exactly like real entries.
//! This is a demo-data injection point, not a physical observation: it
//! guarantees visually interesting high-urgency entries even when the live
//! feed is sparse. The provider sits behind a trait so tests (and the
//! `--no-demo` flag) can substitute an empty provider without touching the
//! live-data path.

use crate::classify;
use crate::scoring;
use crate::types::{CatalogEntry, ObjectType};
use rand::{Rng, RngCore};

/// Variants generated per fragmentation event.
const VARIANTS_PER_EVENT: u32 = 2;

/// Altitude jitter half-range applied per variant (km).
const ALTITUDE_JITTER_KM: i32 = 30;

/// One historical breakup event seeding demo entries.
struct FragmentationEvent {
    base_name: &'static str,
    base_id: u32,
    base_altitude_km: f64,
}

/// The four events: the Cosmos 2251 / Iridium 33 collision pair, the
/// Fengyun 1C ASAT test, and the Cosmos 1408 ASAT test.
const FRAGMENTATION_EVENTS: [FragmentationEvent; 4] = [
    FragmentationEvent {
        base_name: "COSMOS 2251 DEB",
        base_id: 33757,
        base_altitude_km: 785.0,
    },
    FragmentationEvent {
        base_name: "FENGYUN 1C DEB",
        base_id: 33441,
        base_altitude_km: 850.0,
    },
    FragmentationEvent {
        base_name: "IRIDIUM 33 DEB",
        base_id: 24946,
        base_altitude_km: 790.0,
    },
    FragmentationEvent {
        base_name: "COSMOS 1408 DEB",
        base_id: 82915,
        base_altitude_km: 470.0,
    },
];

/// Provider seam for synthetic demonstration entries.
pub trait DemoEntryProvider: Send + Sync {
    /// Produce the full demo set; the orchestrator truncates to its budget
    /// share. Draws (jitter, score randomness) come from the shared run RNG.
    fn entries(&self, rng: &mut dyn RngCore) -> Vec<CatalogEntry>;

    /// Provider name for logging.
    fn provider_name(&self) -> &'static str;
}

/// The fixed fragmentation-event catalog.
pub struct FragmentationCatalog;

impl DemoEntryProvider for FragmentationCatalog {
    fn entries(&self, rng: &mut dyn RngCore) -> Vec<CatalogEntry> {
        let mut out = Vec::new();

        for event in &FRAGMENTATION_EVENTS {
            for variant in 0..VARIANTS_PER_EVENT {
                // Ids derive from the event seed; uniqueness against live
                // data is a documented non-goal.
                let id = event.base_id + variant + 1;
                let jitter = rng.gen_range(-ALTITUDE_JITTER_KM..=ALTITUDE_JITTER_KM);
                let altitude_km = event.base_altitude_km + f64::from(jitter);

                // Simplified element lines for display only — these are
                // never propagated.
                let series = char::from(b'A' + variant as u8);
                let tle_line1 = format!(
                    "1 {id:5}U 93036{series} 25260.47336218  .00001534  00000-0  35580-4 0  9996"
                );
                let tle_line2 = format!(
                    "2 {id:5}  51.6453  57.0843 0001671  64.9808  73.0513 15.49338189252428"
                );

                let mut draw = &mut *rng;
                let urgency_score =
                    scoring::urgency_score(altitude_km, ObjectType::Debris, &mut draw);

                out.push(CatalogEntry {
                    id,
                    name: format!("{} #{}", event.base_name, variant + 1),
                    tle_line1,
                    tle_line2,
                    orbit_type: classify::orbit_class(altitude_km),
                    altitude: scoring::round1(altitude_km),
                    object_type: ObjectType::Debris,
                    urgency_score,
                });
            }
        }

        out
    }

    fn provider_name(&self) -> &'static str {
        "fragmentation-catalog"
    }
}

/// Empty provider for tests and `--no-demo` runs.
pub struct NoDemoEntries;

impl DemoEntryProvider for NoDemoEntries {
    fn entries(&self, _rng: &mut dyn RngCore) -> Vec<CatalogEntry> {
        Vec::new()
    }

    fn provider_name(&self) -> &'static str {
        "none"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OrbitClass;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_catalog_shape() {
        let mut rng = StdRng::seed_from_u64(1);
        let entries = FragmentationCatalog.entries(&mut rng);
        assert_eq!(entries.len(), 8);
        assert!(entries.iter().all(|e| e.object_type == ObjectType::Debris));
        assert!(entries.iter().all(|e| e.orbit_type == OrbitClass::Leo));
        assert!(entries.iter().all(|e| e.name.contains("DEB #")));
    }

    #[test]
    fn test_altitude_jitter_bounded() {
        let mut rng = StdRng::seed_from_u64(2);
        let entries = FragmentationCatalog.entries(&mut rng);
        let bases = [785.0, 850.0, 790.0, 470.0];
        for (i, entry) in entries.iter().enumerate() {
            let base = bases[i / 2];
            assert!(
                (entry.altitude - base).abs() <= 30.0,
                "{} jittered beyond 30 km of {base}: {}",
                entry.name,
                entry.altitude
            );
        }
    }

    #[test]
    fn test_variant_ids_offset_from_event_seed() {
        let mut rng = StdRng::seed_from_u64(3);
        let entries = FragmentationCatalog.entries(&mut rng);
        assert_eq!(entries[0].id, 33758);
        assert_eq!(entries[1].id, 33759);
        assert_eq!(entries[6].id, 82916);
        assert_eq!(entries[7].id, 82917);
    }

    #[test]
    fn test_scores_match_debris_formula_bounds() {
        let mut rng = StdRng::seed_from_u64(4);
        for entry in FragmentationCatalog.entries(&mut rng) {
            let altitude_factor = (100.0 - entry.altitude / 1000.0).max(0.0);
            let floor = altitude_factor + 30.0;
            assert!(
                entry.urgency_score >= floor - 0.1 && entry.urgency_score < floor + 10.1,
                "{}: score {} outside [{floor}, {})",
                entry.name,
                entry.urgency_score,
                floor + 10.0
            );
        }
    }

    #[test]
    fn test_empty_provider() {
        let mut rng = StdRng::seed_from_u64(5);
        assert!(NoDemoEntries.entries(&mut rng).is_empty());
    }
}
