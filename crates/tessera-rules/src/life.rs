//! Conway's automaton (B3/S23) on the torus.
//!
//! The sweep is synchronous: every next state is computed from a frozen
//! copy of the current lattice, then the whole lattice is replaced at
//! once. No randomness is consumed except by [`LifeInit::Random`].

use crate::rule::UpdateRule;
use serde::{Deserialize, Serialize};
use tessera_core::{ConfigError, LifeCell, LifeSummary, RandomSource};
use tessera_space::{live_neighbour_count, Lattice, Pattern};

/// The glider, moving one cell down and right every 4 sweeps.
pub const GLIDER: [[u8; 3]; 3] = [
    [0, 1, 0], //
    [0, 0, 1],
    [1, 1, 1],
];

/// The period-3 pulsar oscillator.
pub const PULSAR: [[u8; 13]; 13] = [
    [0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
    [0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0],
    [1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0],
];

/// Initial conditions for [`Life`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifeInit {
    /// Each cell alive with probability 1/2.
    #[default]
    Random,
    /// A [`GLIDER`] with its top-left corner at the origin.
    Glider,
    /// A [`PULSAR`] centred on the lattice, top-left at `(N/2 - 6, N/2 - 6)`.
    Pulsar,
    /// No live cells.
    Empty,
}

/// The life rule with a reusable next-generation buffer.
#[derive(Clone, Debug, Default)]
pub struct Life {
    next: Vec<LifeCell>,
}

impl Life {
    /// A rule with an empty scratch buffer; it grows on first use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Next state of a cell given its current state and live neighbours.
    pub fn next_state(current: LifeCell, live_neighbours: usize) -> LifeCell {
        LifeCell::from(live_neighbours == 3 || (live_neighbours == 2 && current.is_alive()))
    }
}

impl UpdateRule for Life {
    type State = LifeCell;
    type Summary = LifeSummary;
    type Init = LifeInit;

    fn name(&self) -> &str {
        "life"
    }

    fn initialize(
        &self,
        size: usize,
        init: &LifeInit,
        rng: &mut dyn RandomSource,
    ) -> Result<Lattice<LifeCell>, ConfigError> {
        let mut lattice = match init {
            LifeInit::Random => Lattice::from_fn(size, |_, _| LifeCell::from(rng.uniform() < 0.5))?,
            _ => Lattice::filled(size, LifeCell::Dead)?,
        };
        match init {
            LifeInit::Glider => {
                lattice.stamp(&Pattern::from_rows(&GLIDER), 0, 0, LifeCell::Alive, LifeCell::Dead);
            }
            LifeInit::Pulsar => {
                let corner = (size / 2) as isize - 6;
                lattice.stamp(
                    &Pattern::from_rows(&PULSAR),
                    corner,
                    corner,
                    LifeCell::Alive,
                    LifeCell::Dead,
                );
            }
            LifeInit::Random | LifeInit::Empty => {}
        }
        Ok(lattice)
    }

    fn sweep(
        &mut self,
        lattice: &mut Lattice<LifeCell>,
        _rng: &mut dyn RandomSource,
    ) -> LifeSummary {
        let n = lattice.size();
        self.next.clear();
        self.next.reserve(lattice.cell_count());
        let mut active_sites = 0;
        for r in 0..n {
            for c in 0..n {
                let next = Self::next_state(lattice.get(r, c), live_neighbour_count(lattice, r, c));
                active_sites += usize::from(next.is_alive());
                self.next.push(next);
            }
        }
        lattice.cells_mut().copy_from_slice(&self.next);
        LifeSummary { active_sites }
    }

    fn summarize(&self, lattice: &Lattice<LifeCell>) -> LifeSummary {
        LifeSummary {
            active_sites: lattice.count(LifeCell::Alive),
        }
    }
}
