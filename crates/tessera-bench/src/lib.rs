//! Benchmark profiles for the Tessera lattice simulations.
//!
//! Each profile is a ready-to-advance [`Simulation`] in a representative
//! regime:
//!
//! - [`life_profile`]: random automaton start
//! - [`glauber_profile`] / [`kawasaki_profile`]: random spins near the
//!   critical temperature
//! - [`sirs_profile`]: the dynamic-equilibrium epidemic

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use tessera_core::ConfigError;
use tessera_engine::{SirPreset, Simulation};
use tessera_rules::{Glauber, Kawasaki, Life, LifeInit, SirInit, Sirs, SpinInit};

/// Temperature used by the spin profiles, close to T_c ≈ 2.269.
pub const CRITICAL_TEMPERATURE: f64 = 2.27;

/// Random `size x size` automaton.
pub fn life_profile(size: usize, seed: u64) -> Result<Simulation<Life>, ConfigError> {
    Simulation::new(Life::new(), size, &LifeInit::Random, seed)
}

/// Random spins under single-flip dynamics at [`CRITICAL_TEMPERATURE`].
pub fn glauber_profile(size: usize, seed: u64) -> Result<Simulation<Glauber>, ConfigError> {
    let rule = Glauber::builder().temperature(CRITICAL_TEMPERATURE).build()?;
    Simulation::new(rule, size, &SpinInit::Random, seed)
}

/// Random spins under exchange dynamics at [`CRITICAL_TEMPERATURE`].
pub fn kawasaki_profile(size: usize, seed: u64) -> Result<Simulation<Kawasaki>, ConfigError> {
    let rule = Kawasaki::builder().temperature(CRITICAL_TEMPERATURE).build()?;
    Simulation::new(rule, size, &SpinInit::Random, seed)
}

/// Random epidemic with the equilibrium preset probabilities.
pub fn sirs_profile(size: usize, seed: u64) -> Result<Simulation<Sirs>, ConfigError> {
    let rule = Sirs::new(SirPreset::Equilibrium.params())?;
    Simulation::new(rule, size, &SirInit::random(), seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_build_and_advance() {
        let mut life = life_profile(16, 1).unwrap();
        life.advance();
        let mut g = glauber_profile(16, 1).unwrap();
        g.advance();
        let mut k = kawasaki_profile(16, 1).unwrap();
        k.advance();
        let mut s = sirs_profile(16, 1).unwrap();
        s.advance();
        assert_eq!(s.sweep().0, 1);
    }
}
