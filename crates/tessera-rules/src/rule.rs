//! The [`UpdateRule`] trait.

use std::fmt;
use tessera_core::{CellState, ConfigError, RandomSource, SweepSummary};
use tessera_space::Lattice;

/// One model's transition function over a lattice.
///
/// # Contract
///
/// - `initialize()` validates its inputs and returns a fully populated
///   lattice; it never hands back a partially built grid.
/// - `sweep()` is the only writer of the lattice during a run. It never
///   fails: every parameter it depends on was validated when the rule was
///   built.
/// - `summarize()` is a pure read of the lattice.
///
/// Rules take `&mut self` in `sweep()` so they can reuse scratch buffers
/// between sweeps. They carry no other state, so the same rule value can
/// drive several lattices one after another.
pub trait UpdateRule: Send + 'static {
    /// Cell state set the rule operates on.
    type State: CellState;
    /// Counters reported after each sweep.
    type Summary: SweepSummary;
    /// Initial-condition selector.
    type Init: Clone + fmt::Debug;

    /// Short human-readable name for logging.
    fn name(&self) -> &str;

    /// Build a `size x size` starting lattice.
    fn initialize(
        &self,
        size: usize,
        init: &Self::Init,
        rng: &mut dyn RandomSource,
    ) -> Result<Lattice<Self::State>, ConfigError>;

    /// Advance the lattice by one sweep and report its counters.
    fn sweep(
        &mut self,
        lattice: &mut Lattice<Self::State>,
        rng: &mut dyn RandomSource,
    ) -> Self::Summary;

    /// Counters of a lattice as it stands, without advancing it.
    fn summarize(&self, lattice: &Lattice<Self::State>) -> Self::Summary;
}
