//! Ising energy bookkeeping and the Metropolis test.
//!
//! Coupling `J = 1`, no external field. The total energy counts each bond
//! once through the forward (right and down) neighbours:
//!
//! ```text
//! E = -sum_{i,j} s(i,j) * (s(i,j+1) + s(i+1,j))
//! ```

use serde::{Deserialize, Serialize};
use tessera_core::{ConfigError, RandomSource, Spin, SpinSummary};
use tessera_space::{local_field, Lattice, VON_NEUMANN};

/// Initial conditions for the spin rules.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpinInit {
    /// Each spin up or down with probability 1/2.
    #[default]
    Random,
    /// Every spin up.
    AllUp,
    /// Every spin down.
    AllDown,
}

pub(crate) fn initialize(
    size: usize,
    init: &SpinInit,
    rng: &mut dyn RandomSource,
) -> Result<Lattice<Spin>, ConfigError> {
    let lattice = match init {
        SpinInit::Random => Lattice::from_fn(size, |_, _| {
            if rng.uniform() < 0.5 {
                Spin::Up
            } else {
                Spin::Down
            }
        })?,
        SpinInit::AllUp => Lattice::filled(size, Spin::Up)?,
        SpinInit::AllDown => Lattice::filled(size, Spin::Down)?,
    };
    Ok(lattice)
}

pub(crate) fn validate_temperature(temperature: Option<f64>) -> Result<f64, ConfigError> {
    let t = temperature.ok_or(ConfigError::Missing {
        name: "temperature",
    })?;
    if !t.is_finite() || t <= 0.0 {
        return Err(ConfigError::InvalidTemperature { value: t });
    }
    Ok(t)
}

/// Total energy of the lattice.
pub fn total_energy(lattice: &Lattice<Spin>) -> i64 {
    let n = lattice.size();
    let mut energy = 0i64;
    for r in 0..n {
        let down = (r + 1) % n;
        for c in 0..n {
            let right = (c + 1) % n;
            let s = lattice.get(r, c).value();
            let bonds = lattice.get(r, right).value() + lattice.get(down, c).value();
            energy -= i64::from(s * bonds);
        }
    }
    energy
}

/// Sum of all spins.
pub fn total_magnetization(lattice: &Lattice<Spin>) -> i64 {
    lattice.cells().iter().map(|s| i64::from(s.value())).sum()
}

/// Energy and magnetisation together.
pub fn summarize(lattice: &Lattice<Spin>) -> SpinSummary {
    SpinSummary {
        energy: total_energy(lattice),
        magnetization: total_magnetization(lattice),
    }
}

/// Energy change of flipping the spin at `(r, c)`: `2 * s * (sum of the
/// four neighbours)`.
pub fn flip_energy(lattice: &Lattice<Spin>, r: usize, c: usize) -> i32 {
    2 * lattice.get(r, c).value() * local_field(lattice, r, c)
}

/// Energy change of exchanging the spins at `a` and `b`.
///
/// Only meaningful for opposite spins, where the exchange is the same as
/// flipping both. The two single-site terms each count every bond joining
/// `a` and `b` as if its partner stayed put; the real bond energy is
/// unchanged by the swap, so `4 * s_a * s_b` is removed once per joining
/// bond. On lattices of size 2 a pair can share two bonds.
pub fn exchange_energy(lattice: &Lattice<Spin>, a: (usize, usize), b: (usize, usize)) -> i32 {
    let sa = lattice.get(a.0, a.1).value();
    let sb = lattice.get(b.0, b.1).value();
    let shared_bonds = lattice
        .neighbours(a.0, a.1, &VON_NEUMANN)
        .iter()
        .filter(|&&nb| nb == b)
        .count() as i32;
    flip_energy(lattice, a.0, a.1) + flip_energy(lattice, b.0, b.1) - 4 * sa * sb * shared_bonds
}

/// Metropolis acceptance probability `min(1, exp(-dE / T))`.
pub fn acceptance_probability(delta_e: f64, temperature: f64) -> f64 {
    if delta_e <= 0.0 {
        1.0
    } else {
        (-delta_e / temperature).exp()
    }
}

/// Metropolis test. Draws a uniform only when `delta_e > 0`.
pub fn metropolis_accept(delta_e: i32, temperature: f64, rng: &mut dyn RandomSource) -> bool {
    delta_e <= 0 || rng.uniform() <= acceptance_probability(f64::from(delta_e), temperature)
}
