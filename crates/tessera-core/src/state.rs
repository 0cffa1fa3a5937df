//! Closed cell-state sets and their parallel lookup tables.
//!
//! Each model has its own enumeration. Display labels, colour names,
//! numeric bins and terminal glyphs live in tables indexed by
//! [`CellState::index`], so adding a state means touching every table;
//! [`CellState::check_tables`] catches a missed one at startup.

use crate::error::TableError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A closed set of discrete cell states with parallel lookup tables.
pub trait CellState: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Name used in table diagnostics.
    const NAME: &'static str;
    /// Every state, ordered by [`index`](Self::index).
    const ALL: &'static [Self];
    /// Human-readable label per state.
    const LABELS: &'static [&'static str];
    /// Colour name per state, for renderers that want one.
    const COLORS: &'static [&'static str];
    /// Numeric bin value per state.
    const BINS: &'static [f64];
    /// Single-character glyph per state for text rendering.
    const GLYPHS: &'static [char];

    /// Position of this state in `ALL` and in every table.
    fn index(self) -> usize;

    /// Label from [`LABELS`](Self::LABELS).
    fn label(self) -> &'static str {
        Self::LABELS[self.index()]
    }

    /// Colour from [`COLORS`](Self::COLORS).
    fn color(self) -> &'static str {
        Self::COLORS[self.index()]
    }

    /// Bin value from [`BINS`](Self::BINS).
    fn bin(self) -> f64 {
        Self::BINS[self.index()]
    }

    /// Glyph from [`GLYPHS`](Self::GLYPHS).
    fn glyph(self) -> char {
        Self::GLYPHS[self.index()]
    }

    /// Verify that every table matches the enumeration.
    fn check_tables() -> Result<(), TableError> {
        let expected = Self::ALL.len();
        let lengths = [
            ("LABELS", Self::LABELS.len()),
            ("COLORS", Self::COLORS.len()),
            ("BINS", Self::BINS.len()),
            ("GLYPHS", Self::GLYPHS.len()),
        ];
        for (table, found) in lengths {
            if found != expected {
                return Err(TableError::LengthMismatch {
                    state: Self::NAME,
                    table,
                    expected,
                    found,
                });
            }
        }
        for (position, state) in Self::ALL.iter().enumerate() {
            let index = state.index();
            if index != position {
                return Err(TableError::IndexMismatch {
                    state: Self::NAME,
                    position,
                    index,
                });
            }
        }
        for (i, label) in Self::LABELS.iter().enumerate() {
            if Self::LABELS[..i].contains(label) {
                return Err(TableError::DuplicateLabel {
                    state: Self::NAME,
                    label,
                });
            }
        }
        Ok(())
    }
}

// ── Life ────────────────────────────────────────────────────────

/// Cell of the Conway automaton.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifeCell {
    /// Empty site.
    #[default]
    Dead,
    /// Occupied site.
    Alive,
}

impl LifeCell {
    /// `true` for [`LifeCell::Alive`].
    pub fn is_alive(self) -> bool {
        self == Self::Alive
    }
}

impl From<bool> for LifeCell {
    fn from(alive: bool) -> Self {
        if alive {
            Self::Alive
        } else {
            Self::Dead
        }
    }
}

impl CellState for LifeCell {
    const NAME: &'static str = "LifeCell";
    const ALL: &'static [Self] = &[Self::Dead, Self::Alive];
    const LABELS: &'static [&'static str] = &["Dead", "Alive"];
    const COLORS: &'static [&'static str] = &["white", "black"];
    const BINS: &'static [f64] = &[0.0, 1.0];
    const GLYPHS: &'static [char] = &['.', '#'];

    fn index(self) -> usize {
        match self {
            Self::Dead => 0,
            Self::Alive => 1,
        }
    }
}

// ── Ising ───────────────────────────────────────────────────────

/// Ising spin, `-1` or `+1`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Spin {
    /// `-1`.
    Down,
    /// `+1`.
    #[default]
    Up,
}

impl Spin {
    /// Numeric spin value.
    pub fn value(self) -> i32 {
        match self {
            Self::Down => -1,
            Self::Up => 1,
        }
    }

    /// The opposite spin.
    pub fn flipped(self) -> Self {
        match self {
            Self::Down => Self::Up,
            Self::Up => Self::Down,
        }
    }
}

impl CellState for Spin {
    const NAME: &'static str = "Spin";
    const ALL: &'static [Self] = &[Self::Down, Self::Up];
    const LABELS: &'static [&'static str] = &["Down", "Up"];
    const COLORS: &'static [&'static str] = &["#440154", "#fde725"];
    const BINS: &'static [f64] = &[-1.0, 1.0];
    const GLYPHS: &'static [char] = &['-', '+'];

    fn index(self) -> usize {
        match self {
            Self::Down => 0,
            Self::Up => 1,
        }
    }
}

// ── SIRS ────────────────────────────────────────────────────────

/// Compartment of the epidemic automaton.
///
/// [`SirState::Vaccinated`] is a permanently recovered site: the update
/// rule never changes it and the per-sweep tallies never count it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SirState {
    /// Can be infected by a neighbour.
    #[default]
    Susceptible,
    /// Infectious.
    Infected,
    /// Temporarily immune.
    Recovered,
    /// Permanently immune.
    Vaccinated,
}

impl CellState for SirState {
    const NAME: &'static str = "SirState";
    const ALL: &'static [Self] = &[
        Self::Susceptible,
        Self::Infected,
        Self::Recovered,
        Self::Vaccinated,
    ];
    const LABELS: &'static [&'static str] = &["Susceptible", "Infected", "Recovered", "Vaccinated"];
    const COLORS: &'static [&'static str] = &["white", "firebrick", "cornflowerblue", "cornflowerblue"];
    const BINS: &'static [f64] = &[1.0, 2.0, 3.0, 4.0];
    const GLYPHS: &'static [char] = &['.', '#', 'o', 'v'];

    fn index(self) -> usize {
        match self {
            Self::Susceptible => 0,
            Self::Infected => 1,
            Self::Recovered => 2,
            Self::Vaccinated => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_tables_are_consistent() {
        assert_eq!(LifeCell::check_tables(), Ok(()));
        assert_eq!(Spin::check_tables(), Ok(()));
        assert_eq!(SirState::check_tables(), Ok(()));
    }

    #[test]
    fn lookups_follow_index() {
        assert_eq!(SirState::Infected.label(), "Infected");
        assert_eq!(SirState::Infected.color(), "firebrick");
        assert_eq!(SirState::Recovered.bin(), 3.0);
        assert_eq!(LifeCell::Alive.glyph(), '#');
        assert_eq!(Spin::Down.bin(), -1.0);
    }

    #[test]
    fn spin_values_and_flip() {
        assert_eq!(Spin::Up.value(), 1);
        assert_eq!(Spin::Down.value(), -1);
        assert_eq!(Spin::Up.flipped(), Spin::Down);
        assert_eq!(Spin::Down.flipped().flipped(), Spin::Down);
    }

    #[test]
    fn life_from_bool() {
        assert_eq!(LifeCell::from(true), LifeCell::Alive);
        assert!(!LifeCell::from(false).is_alive());
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Broken {
        A,
        B,
    }

    impl CellState for Broken {
        const NAME: &'static str = "Broken";
        const ALL: &'static [Self] = &[Self::A, Self::B];
        const LABELS: &'static [&'static str] = &["A", "B"];
        const COLORS: &'static [&'static str] = &["red"];
        const BINS: &'static [f64] = &[0.0, 1.0];
        const GLYPHS: &'static [char] = &['a', 'b'];

        fn index(self) -> usize {
            match self {
                Self::A => 0,
                Self::B => 1,
            }
        }
    }

    #[test]
    fn missing_table_entry_is_reported() {
        assert_eq!(
            Broken::check_tables(),
            Err(TableError::LengthMismatch {
                state: "Broken",
                table: "COLORS",
                expected: 2,
                found: 1,
            })
        );
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Shuffled {
        A,
        B,
    }

    impl CellState for Shuffled {
        const NAME: &'static str = "Shuffled";
        const ALL: &'static [Self] = &[Self::B, Self::A];
        const LABELS: &'static [&'static str] = &["A", "A"];
        const COLORS: &'static [&'static str] = &["red", "blue"];
        const BINS: &'static [f64] = &[0.0, 1.0];
        const GLYPHS: &'static [char] = &['a', 'b'];

        fn index(self) -> usize {
            match self {
                Self::A => 0,
                Self::B => 1,
            }
        }
    }

    #[test]
    fn out_of_order_states_are_reported_before_labels() {
        assert!(matches!(
            Shuffled::check_tables(),
            Err(TableError::IndexMismatch { position: 0, index: 1, .. })
        ));
    }
}
