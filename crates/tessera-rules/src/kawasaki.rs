//! Spin-exchange (Kawasaki) dynamics with Metropolis acceptance.
//!
//! Magnetisation is conserved: every accepted move swaps one up spin with
//! one down spin.

use crate::rule::UpdateRule;
use crate::spin::{self, exchange_energy, metropolis_accept, SpinInit};
use tessera_core::{ConfigError, RandomSource, Spin, SpinSummary};
use tessera_space::Lattice;

/// Kawasaki dynamics at a fixed temperature.
#[derive(Clone, Debug, PartialEq)]
pub struct Kawasaki {
    temperature: f64,
}

/// Builder for [`Kawasaki`].
///
/// Required field: `temperature`.
#[derive(Clone, Debug, Default)]
pub struct KawasakiBuilder {
    temperature: Option<f64>,
}

impl Kawasaki {
    /// Create a new builder for configuring a `Kawasaki` rule.
    pub fn builder() -> KawasakiBuilder {
        KawasakiBuilder::default()
    }

    /// The configured temperature.
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Draw two sites of opposite spin, each as column then row,
    /// redrawing the whole pair until they differ.
    ///
    /// The caller guarantees both spin values are present.
    fn pick_pair(
        lattice: &Lattice<Spin>,
        rng: &mut dyn RandomSource,
    ) -> ((usize, usize), (usize, usize)) {
        let n = lattice.size();
        loop {
            let c1 = rng.index(n);
            let r1 = rng.index(n);
            let c2 = rng.index(n);
            let r2 = rng.index(n);
            if lattice.get(r1, c1) != lattice.get(r2, c2) {
                return ((r1, c1), (r2, c2));
            }
        }
    }
}

impl KawasakiBuilder {
    /// Set the temperature. Must be finite and positive.
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Build the rule, validating the temperature.
    pub fn build(self) -> Result<Kawasaki, ConfigError> {
        Ok(Kawasaki {
            temperature: spin::validate_temperature(self.temperature)?,
        })
    }
}

impl UpdateRule for Kawasaki {
    type State = Spin;
    type Summary = SpinSummary;
    type Init = SpinInit;

    fn name(&self) -> &str {
        "kawasaki"
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
        let up = lattice.count(Spin::Up);
        // A uniform lattice has no opposite pair to exchange.
        if up == 0 || up == lattice.cell_count() {
            return spin::summarize(lattice);
        }
        for _ in 0..lattice.cell_count() {
            let (a, b) = Self::pick_pair(lattice, rng);
            if metropolis_accept(exchange_energy(lattice, a, b), self.temperature, rng) {
                let sa = lattice.get(a.0, a.1);
                lattice.set(a.0, a.1, sa.flipped());
                lattice.set(b.0, b.1, sa);
            }
        }
        spin::summarize(lattice)
    }

    fn summarize(&self, lattice: &Lattice<Spin>) -> SpinSummary {
        spin::summarize(lattice)
    }
}
