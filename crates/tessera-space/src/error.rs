//! Error types for lattice construction.

use tessera_core::ConfigError;
use thiserror::Error;

/// Errors arising from lattice or pattern construction.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SpaceError {
    /// Attempted to construct a lattice with zero cells.
    #[error("lattice must have at least one cell")]
    EmptyLattice,
    /// `size * size` overflows `usize`.
    #[error("a {size}x{size} lattice has more cells than fit in memory")]
    TooLarge {
        /// Lattice side length.
        size: usize,
    },
    /// The supplied cell buffer does not hold `size * size` cells.
    #[error("expected {expected} cells for a {size}x{size} lattice, got {found}")]
    CellCountMismatch {
        /// Lattice side length.
        size: usize,
        /// `size * size`.
        expected: usize,
        /// Length of the supplied buffer.
        found: usize,
    },
    /// A pattern row is not as wide as the first row.
    #[error("pattern row {row} has {found} columns, expected {expected}")]
    RaggedPattern {
        /// Offending row.
        row: usize,
        /// Width of row 0.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
}

impl From<SpaceError> for ConfigError {
    fn from(e: SpaceError) -> Self {
        match e {
            SpaceError::EmptyLattice => ConfigError::InvalidSize { size: 0 },
            SpaceError::TooLarge { size } => ConfigError::LatticeTooLarge { size },
            other => ConfigError::InvalidLattice {
                reason: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_lattice_maps_to_invalid_size() {
        assert_eq!(
            ConfigError::from(SpaceError::EmptyLattice),
            ConfigError::InvalidSize { size: 0 }
        );
    }

    #[test]
    fn oversized_lattice_maps_to_too_large() {
        let err = ConfigError::from(SpaceError::TooLarge { size: 1 << 40 });
        assert_eq!(err, ConfigError::LatticeTooLarge { size: 1 << 40 });
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn mismatch_keeps_detail() {
        let err = ConfigError::from(SpaceError::CellCountMismatch {
            size: 3,
            expected: 9,
            found: 4,
        });
        assert!(err.to_string().contains("got 4"));
    }
}
