//! A single simulation run and its pull-based frame cursor.
//!
//! [`Simulation`] owns one lattice, one update rule and one seeded
//! random stream. Each [`advance()`](Simulation::advance) runs exactly one
//! sweep and returns a [`Frame`] that borrows the lattice, so the caller
//! cannot advance again while still holding the previous frame. Readers
//! only ever see the lattice between sweeps.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tessera_core::{CellState, ConfigError, SweepId};
use tessera_rules::UpdateRule;
use tessera_space::Lattice;

// Compile-time assertion: a Simulation can be moved to a worker thread.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<Simulation<tessera_rules::Life>>();
        assert_send::<Simulation<tessera_rules::Sirs>>();
    }
};

// ── Frame ───────────────────────────────────────────────────────────

/// The lattice and counters after one sweep.
#[derive(Debug)]
pub struct Frame<'s, S: CellState, M> {
    /// Sweeps completed so far, including this one.
    pub sweep: SweepId,
    /// Read-only view of the lattice after the sweep.
    pub lattice: &'s Lattice<S>,
    /// Counters reported by the sweep.
    pub summary: M,
}

/// The frame type of a rule.
pub type RuleFrame<'s, R> = Frame<'s, <R as UpdateRule>::State, <R as UpdateRule>::Summary>;

// ── Simulation ──────────────────────────────────────────────────────

/// One run of one update rule over one lattice.
///
/// # Example
///
/// ```
/// use tessera_engine::Simulation;
/// use tessera_rules::{Life, LifeInit};
///
/// let mut sim = Simulation::new(Life::new(), 16, &LifeInit::Glider, 0).unwrap();
/// let frame = sim.advance();
/// assert_eq!(frame.summary.active_sites, 5);
/// ```
pub struct Simulation<R: UpdateRule> {
    rule: R,
    lattice: Lattice<R::State>,
    rng: ChaCha8Rng,
    sweep: SweepId,
    summary: R::Summary,
}

impl<R: UpdateRule> Simulation<R> {
    /// Start a run from one of the rule's initial conditions.
    ///
    /// Checks the state lookup tables, then builds the lattice from the
    /// same random stream the sweeps will use.
    pub fn new(rule: R, size: usize, init: &R::Init, seed: u64) -> Result<Self, ConfigError> {
        R::State::check_tables()?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let lattice = rule.initialize(size, init, &mut rng)?;
        Ok(Self::assemble(rule, lattice, rng))
    }

    /// Start a run from an existing lattice, e.g. the final state of a
    /// previous run or a hand-built configuration.
    pub fn from_lattice(rule: R, lattice: Lattice<R::State>, seed: u64) -> Result<Self, ConfigError> {
        R::State::check_tables()?;
        Ok(Self::assemble(rule, lattice, ChaCha8Rng::seed_from_u64(seed)))
    }

    fn assemble(rule: R, lattice: Lattice<R::State>, rng: ChaCha8Rng) -> Self {
        let summary = rule.summarize(&lattice);
        Self {
            rule,
            lattice,
            rng,
            sweep: SweepId(0),
            summary,
        }
    }

    /// Run one sweep and return the resulting frame.
    pub fn advance(&mut self) -> RuleFrame<'_, R> {
        self.summary = self.rule.sweep(&mut self.lattice, &mut self.rng);
        self.sweep = self.sweep.next();
        Frame {
            sweep: self.sweep,
            lattice: &self.lattice,
            summary: self.summary,
        }
    }

    /// The current lattice.
    pub fn lattice(&self) -> &Lattice<R::State> {
        &self.lattice
    }

    /// Counters from the last sweep, or of the initial lattice before the
    /// first sweep.
    pub fn summary(&self) -> R::Summary {
        self.summary
    }

    /// Sweeps completed.
    pub fn sweep(&self) -> SweepId {
        self.sweep
    }

    /// The update rule.
    pub fn rule(&self) -> &R {
        &self.rule
    }

    /// The run's random stream, for estimators that resample its output.
    pub fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// End the run, keeping its lattice.
    pub fn into_lattice(self) -> Lattice<R::State> {
        self.lattice
    }

    /// Turn the run into a cursor yielding at most `limit` frames.
    pub fn frames(self, limit: u64) -> Frames<R> {
        Frames {
            sim: self,
            remaining: limit,
        }
    }
}

impl<R: UpdateRule> std::fmt::Debug for Simulation<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("rule", &self.rule.name())
            .field("size", &self.lattice.size())
            .field("sweep", &self.sweep)
            .field("summary", &self.summary)
            .finish()
    }
}

// ── Frames ──────────────────────────────────────────────────────────

/// Bounded, single-pass frame cursor over a [`Simulation`].
///
/// Not restartable: once exhausted it only returns `None`. Build a fresh
/// simulation to replay.
#[derive(Debug)]
pub struct Frames<R: UpdateRule> {
    sim: Simulation<R>,
    remaining: u64,
}

impl<R: UpdateRule> Frames<R> {
    /// Advance one sweep, or `None` once the limit is reached.
    pub fn advance(&mut self) -> Option<RuleFrame<'_, R>> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.sim.advance())
    }

    /// Frames still to come.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// The underlying simulation, e.g. to render the starting lattice.
    pub fn simulation(&self) -> &Simulation<R> {
        &self.sim
    }
}
