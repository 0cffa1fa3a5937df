//! Single-spin-flip (Glauber) dynamics with Metropolis acceptance.
//!
//! Constructed via the builder pattern: [`Glauber::builder`].

use crate::rule::UpdateRule;
use crate::spin::{self, flip_energy, metropolis_accept, SpinInit};
use tessera_core::{ConfigError, RandomSource, Spin, SpinSummary};
use tessera_space::Lattice;

/// Glauber dynamics at a fixed temperature.
///
/// Each sweep makes `N²` trials. A trial picks a column then a row
/// uniformly, computes the flip cost, and flips in place if the
/// Metropolis test passes.
#[derive(Clone, Debug, PartialEq)]
pub struct Glauber {
    temperature: f64,
}

/// Builder for [`Glauber`].
///
/// Required field: `temperature`.
#[derive(Clone, Debug, Default)]
pub struct GlauberBuilder {
    temperature: Option<f64>,
}

impl Glauber {
    /// Create a new builder for configuring a `Glauber` rule.
    pub fn builder() -> GlauberBuilder {
        GlauberBuilder::default()
    }

    /// The configured temperature.
    pub fn temperature(&self) -> f64 {
        self.temperature
    }
}

impl GlauberBuilder {
    /// Set the temperature. Must be finite and positive.
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Build the rule, validating the temperature.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Missing`] if no temperature was set,
    /// [`ConfigError::InvalidTemperature`] if it is not a finite positive
    /// number.
    pub fn build(self) -> Result<Glauber, ConfigError> {
        Ok(Glauber {
            temperature: spin::validate_temperature(self.temperature)?,
        })
    }
}

impl UpdateRule for Glauber {
    type State = Spin;
    type Summary = SpinSummary;
    type Init = SpinInit;

    fn name(&self) -> &str {
        "glauber"
    }

    fn initialize(
        &self,
        size: usize,
        init: &SpinInit,
        rng: &mut dyn RandomSource,
    ) -> Result<Lattice<Spin>, ConfigError> {
        spin::initialize(size, init, rng)
    }

    fn sweep(&mut self, lattice: &mut Lattice<Spin>, rng: &mut dyn RandomSource) -> SpinSummary {
        let n = lattice.size();
        for _ in 0..lattice.cell_count() {
            let c = rng.index(n);
            let r = rng.index(n);
            if metropolis_accept(flip_energy(lattice, r, c), self.temperature, rng) {
                lattice.set(r, c, lattice.get(r, c).flipped());
            }
        }
        spin::summarize(lattice)
    }

    fn summarize(&self, lattice: &Lattice<Spin>) -> SpinSummary {
        spin::summarize(lattice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use tessera_test_utils::{lattice_from_glyphs, ScriptedSource};

    fn rule(t: f64) -> Glauber {
        Glauber::builder().temperature(t).build().unwrap()
    }

    #[test]
    fn builder_requires_temperature() {
        assert_eq!(
            Glauber::builder().build(),
            Err(ConfigError::Missing { name: "temperature" })
        );
        assert_eq!(
            Glauber::builder().temperature(-1.0).build(),
            Err(ConfigError::InvalidTemperature { value: -1.0 })
        );
        assert_eq!(rule(2.0).temperature(), 2.0);
    }

    #[test]
    fn downhill_flip_is_always_taken() {
        // 2x2 sweep = 4 trials; the first flips the lone down spin back up
        // at zero cost in draws, the rest are uphill and rejected.
        let mut l: Lattice<Spin> = lattice_from_glyphs(&["-+", "++"]);
        let mut rng = ScriptedSource::new(vec![0, 0, 1, 1, 0, 1, 1, 0], vec![0.99]).cycling();
        let summary = rule(1.0).sweep(&mut l, &mut rng);
        assert_eq!(l.count(Spin::Up), 4);
        assert_eq!(summary.magnetization, 4);
        assert_eq!(summary.energy, -8);
    }

    #[test]
    fn trial_draws_column_before_row() {
        let mut l: Lattice<Spin> = lattice_from_glyphs(&[
            "+++", //
            "++-",
            "+++",
        ]);
        // Column 2, row 1 is the down spin; the other trials hit (0, 0)
        // and are rejected by a high draw.
        let mut rng = ScriptedSource::new(vec![2, 1, 0, 0], vec![0.999]).cycling();
        rule(1.0).sweep(&mut l, &mut rng);
        assert_eq!(l.count(Spin::Down), 0);
    }

    #[test]
    fn low_temperature_keeps_ordered_state() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut g = rule(0.5);
        let mut l = g.initialize(16, &SpinInit::AllUp, &mut rng).unwrap();
        for _ in 0..20 {
            g.sweep(&mut l, &mut rng);
        }
        let m = spin::total_magnetization(&l) as f64 / 256.0;
        assert!(m > 0.95, "magnetisation per spin {m}");
    }

    #[test]
    fn high_temperature_disorders() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut g = rule(50.0);
        let mut l = g.initialize(20, &SpinInit::AllUp, &mut rng).unwrap();
        for _ in 0..50 {
            g.sweep(&mut l, &mut rng);
        }
        let m = spin::total_magnetization(&l).abs() as f64 / 400.0;
        assert!(m < 0.3, "magnetisation per spin {m}");
    }

    #[test]
    fn sweep_summary_matches_lattice() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut g = rule(2.27);
        let mut l = g.initialize(10, &SpinInit::Random, &mut rng).unwrap();
        let s = g.sweep(&mut l, &mut rng);
        assert_eq!(s, g.summarize(&l));
    }
}
