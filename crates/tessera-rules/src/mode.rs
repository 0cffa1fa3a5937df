//! Simulation mode tag.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tessera_core::ConfigError;

/// The four supported dynamics.
///
/// Single-letter codes are matched case-insensitively: `L`ife,
/// `G`lauber, `K`awasaki, `S`IRS. Longer names (`"life"`, `"glauber"`,
/// `"kawasaki"`, `"sirs"`) are accepted too.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimulationMode {
    /// Conway automaton.
    Life,
    /// Ising model, single-spin-flip dynamics.
    Glauber,
    /// Ising model, spin-exchange dynamics.
    Kawasaki,
    /// Susceptible / infected / recovered epidemic.
    Sirs,
}

impl SimulationMode {
    /// Every mode, in code order.
    pub const ALL: [Self; 4] = [Self::Life, Self::Glauber, Self::Kawasaki, Self::Sirs];

    /// Uppercase single-letter code.
    pub fn code(self) -> char {
        match self {
            Self::Life => 'L',
            Self::Glauber => 'G',
            Self::Kawasaki => 'K',
            Self::Sirs => 'S',
        }
    }

    /// Look a mode up by code or name, ignoring case and surrounding
    /// whitespace.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|m| {
                (code.len() == 1 && code.starts_with(m.code()))
                    || code == m.name().to_ascii_uppercase()
            })
    }

    /// Lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Life => "life",
            Self::Glauber => "glauber",
            Self::Kawasaki => "kawasaki",
            Self::Sirs => "sirs",
        }
    }

    /// `true` for the two Ising dynamics.
    pub fn is_spin(self) -> bool {
        matches!(self, Self::Glauber | Self::Kawasaki)
    }
}

impl fmt::Display for SimulationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SimulationMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| ConfigError::UnknownMode { code: s.to_string() })
    }
}
