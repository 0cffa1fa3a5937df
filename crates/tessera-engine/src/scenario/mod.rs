//! Parameter-scan drivers.
//!
//! Each driver validates its scan, runs one independent simulation per
//! parameter point through a sampler, reduces the samples with the
//! estimators, and returns a typed result that converts to a
//! [`ResultRecord`](tessera_record::ResultRecord) with the standard
//! labels.
//!
//! Point `i` is seeded with `seed ^ i`, so a scan gives the same result
//! whether its points run sequentially or on a worker pool.

pub mod epidemic;
pub mod life;
pub mod spin;

pub use epidemic::{
    phase_diagram, slice_scan, vaccination_scan, PhaseDiagram, SlicePoint, SliceResult,
    VaccinationCurve, VaccinationPoint,
};
pub use life::{centre_of_mass, steady_state_histogram, track_glider, GliderTrack, HistogramResult};
pub use spin::{temperature_scan, TemperaturePoint, TemperatureResult};

/// Seed of the run at `index` within a scan seeded with `seed`.
pub fn point_seed(seed: u64, index: usize) -> u64 {
    seed ^ index as u64
}

/// Count of scan points, as the worker pool takes it.
fn point_count(count: u64) -> usize {
    usize::try_from(count).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_seeds_are_distinct_per_index() {
        let seeds: Vec<u64> = (0..64).map(|i| point_seed(0xDEAD_BEEF, i)).collect();
        let mut unique = seeds.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), seeds.len());
        assert_eq!(point_seed(7, 0), 7);
    }
}
