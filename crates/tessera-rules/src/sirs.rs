//! Stochastic SIRS epidemic automaton.
//!
//! A sweep is `N²` independent trials. Each trial draws a column, a row
//! and a uniform `u`, then applies one transition to that cell:
//!
//! | From | To | When |
//! |------|----|------|
//! | Susceptible | Infected | `u <= p_infection` and an infected cell in the window |
//! | Infected | Recovered | `u <= p_recovery` |
//! | Recovered | Susceptible | `u <= p_immunity_loss` |
//! | Vaccinated | (never) | |
//!
//! The infection window is [`INFECTION_WINDOW`](tessera_space::INFECTION_WINDOW).

use crate::rule::UpdateRule;
use serde::{Deserialize, Serialize};
use tessera_core::{CellState, ConfigError, RandomSource, SirCounts, SirState};
use tessera_space::{has_infected_neighbour, Lattice};

/// Transition probabilities `(p1, p2, p3)`, each in (0, 1].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SirParams {
    /// S -> I, given an infected cell in the window.
    pub p_infection: f64,
    /// I -> R.
    pub p_recovery: f64,
    /// R -> S.
    pub p_immunity_loss: f64,
}

impl SirParams {
    /// Parameters in `(p1, p2, p3)` order. Not validated until
    /// [`validate`](Self::validate).
    pub const fn new(p_infection: f64, p_recovery: f64, p_immunity_loss: f64) -> Self {
        Self {
            p_infection,
            p_recovery,
            p_immunity_loss,
        }
    }

    /// Check every probability lies in (0, 1].
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_probability("p_infection", self.p_infection)?;
        check_probability("p_recovery", self.p_recovery)?;
        check_probability("p_immunity_loss", self.p_immunity_loss)
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidProbability { name, value })
    }
}

/// Initial conditions for [`Sirs`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SirInit {
    /// Each cell vaccinated with probability `vaccinated_fraction`,
    /// otherwise susceptible, infected or recovered with equal odds.
    Random {
        /// Fraction of permanently immune cells, in [0, 1].
        vaccinated_fraction: f64,
    },
    /// Every cell susceptible. No infection can ever start.
    AllSusceptible,
}

impl SirInit {
    /// Random start with no vaccination.
    pub const fn random() -> Self {
        Self::Random {
            vaccinated_fraction: 0.0,
        }
    }
}

impl Default for SirInit {
    fn default() -> Self {
        Self::random()
    }
}

/// The SIRS rule.
#[derive(Clone, Debug, PartialEq)]
pub struct Sirs {
    params: SirParams,
}

/// Builder for [`Sirs`].
///
/// Required fields: all three probabilities.
#[derive(Clone, Debug, Default)]
pub struct SirsBuilder {
    p_infection: Option<f64>,
    p_recovery: Option<f64>,
    p_immunity_loss: Option<f64>,
}

impl Sirs {
    /// Create a new builder for configuring a `Sirs` rule.
    pub fn builder() -> SirsBuilder {
        SirsBuilder::default()
    }

    /// Build directly from a parameter set.
    pub fn new(params: SirParams) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self { params })
    }

    /// The configured probabilities.
    pub fn params(&self) -> SirParams {
        self.params
    }
}

impl SirsBuilder {
    /// Set `p1`, the S -> I probability.
    pub fn p_infection(mut self, p: f64) -> Self {
        self.p_infection = Some(p);
        self
    }

    /// Set `p2`, the I -> R probability.
    pub fn p_recovery(mut self, p: f64) -> Self {
        self.p_recovery = Some(p);
        self
    }

    /// Set `p3`, the R -> S probability.
    pub fn p_immunity_loss(mut self, p: f64) -> Self {
        self.p_immunity_loss = Some(p);
        self
    }

    /// Build the rule, validating all three probabilities.
    pub fn build(self) -> Result<Sirs, ConfigError> {
        let params = SirParams {
            p_infection: self.p_infection.ok_or(ConfigError::Missing {
                name: "p_infection",
            })?,
            p_recovery: self.p_recovery.ok_or(ConfigError::Missing { name: "p_recovery" })?,
            p_immunity_loss: self.p_immunity_loss.ok_or(ConfigError::Missing {
                name: "p_immunity_loss",
            })?,
        };
        Sirs::new(params)
    }
}

impl UpdateRule for Sirs {
    type State = SirState;
    type Summary = SirCounts;
    type Init = SirInit;

    fn name(&self) -> &str {
        "sirs"
    }

    fn initialize(
        &self,
        size: usize,
        init: &SirInit,
        rng: &mut dyn RandomSource,
    ) -> Result<Lattice<SirState>, ConfigError> {
        match *init {
            SirInit::AllSusceptible => Ok(Lattice::filled(size, SirState::Susceptible)?),
            SirInit::Random {
                vaccinated_fraction: v,
            } => {
                if !(0.0..=1.0).contains(&v) {
                    return Err(ConfigError::InvalidFraction {
                        name: "vaccinated_fraction",
                        value: v,
                    });
                }
                let lattice = Lattice::from_fn(size, |_, _| {
                    let u = rng.uniform();
                    if u < v {
                        return SirState::Vaccinated;
                    }
                    let third = ((u - v) * 3.0 / (1.0 - v)) as usize;
                    match third {
                        0 => SirState::Susceptible,
                        1 => SirState::Infected,
                        _ => SirState::Recovered,
                    }
                })?;
                Ok(lattice)
            }
        }
    }

    /// Counts are tallies over the `N²` trials using each visited cell's
    /// post-transition state, so a cell visited twice counts twice and
    /// vaccinated cells are never counted. Use
    /// [`summarize`](UpdateRule::summarize) for an exact census.
    fn sweep(&mut self, lattice: &mut Lattice<SirState>, rng: &mut dyn RandomSource) -> SirCounts {
        let n = lattice.size();
        let p = self.params;
        let mut counts = SirCounts::default();
        for _ in 0..lattice.cell_count() {
            let c = rng.index(n);
            let r = rng.index(n);
            let dice = rng.uniform();
            match lattice.get(r, c) {
                SirState::Susceptible => {
                    if dice <= p.p_infection && has_infected_neighbour(lattice, r, c) {
                        lattice.set(r, c, SirState::Infected);
                        counts.infected += 1;
                    } else {
                        counts.susceptible += 1;
                    }
                }
                SirState::Infected => {
                    if dice <= p.p_recovery {
                        lattice.set(r, c, SirState::Recovered);
                        counts.recovered += 1;
                    } else {
                        counts.infected += 1;
                    }
                }
                SirState::Recovered => {
                    if dice <= p.p_immunity_loss {
                        lattice.set(r, c, SirState::Susceptible);
                        counts.susceptible += 1;
                    } else {
                        counts.recovered += 1;
                    }
                }
                SirState::Vaccinated => {}
            }
        }
        counts
    }

    fn summarize(&self, lattice: &Lattice<SirState>) -> SirCounts {
        let census = lattice.census();
        SirCounts {
            susceptible: census[SirState::Susceptible.index()],
            infected: census[SirState::Infected.index()],
            recovered: census[SirState::Recovered.index()],
        }
    }
}
