//! Scalar counters reported by an update rule after each sweep.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-sweep counters produced by an update rule.
///
/// The [`Display`](fmt::Display) form is the one-line status a renderer
/// shows under each frame.
pub trait SweepSummary: Copy + fmt::Debug + fmt::Display + Send + 'static {
    /// `true` when the run has reached a state it can never leave, so
    /// sampling should stop.
    fn is_absorbing(&self) -> bool {
        false
    }
}

/// Counters of the Conway automaton.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeSummary {
    /// Live cells after the sweep.
    pub active_sites: usize,
}

impl SweepSummary for LifeSummary {}

impl fmt::Display for LifeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Active Sites: {}", self.active_sites)
    }
}

/// Total energy and magnetisation of a spin lattice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinSummary {
    /// `-sum s(i,j) * (s(i,j+1) + s(i+1,j))` over the torus.
    pub energy: i64,
    /// Sum of all spins.
    pub magnetization: i64,
}

impl SweepSummary for SpinSummary {}

impl fmt::Display for SpinSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Energy: {}, Magnetisation: {}",
            self.energy, self.magnetization
        )
    }
}

/// Susceptible / infected / recovered counts of the epidemic automaton.
///
/// After a sweep these are tallies over the N² visited trials, not a
/// census of distinct cells; see the SIRS rule for details.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SirCounts {
    /// Susceptible tally.
    pub susceptible: usize,
    /// Infected tally.
    pub infected: usize,
    /// Recovered tally.
    pub recovered: usize,
}

impl SweepSummary for SirCounts {
    fn is_absorbing(&self) -> bool {
        self.infected == 0
    }
}

impl fmt::Display for SirCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Susceptible: {}, Infected: {}, Recovered: {}",
            self.susceptible, self.infected, self.recovered
        )
    }
}
