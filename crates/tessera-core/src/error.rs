//! Error types for the Tessera simulations.
//!
//! Split by the point at which a failure can occur: [`ConfigError`] at
//! construction time, [`TableError`] when the state lookup tables are
//! checked at startup, and [`StatsError`] when an estimator is handed a
//! series it cannot work with. Nothing in this crate fails mid-sweep.

use thiserror::Error;

/// Lookup tables attached to a [`CellState`](crate::CellState) disagree
/// with the state enumeration.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TableError {
    /// A table has a different number of entries than there are states.
    #[error("{state}: table '{table}' has {found} entries, expected {expected}")]
    LengthMismatch {
        /// Name of the state enumeration.
        state: &'static str,
        /// Name of the offending table.
        table: &'static str,
        /// Number of states in the enumeration.
        expected: usize,
        /// Number of entries in the table.
        found: usize,
    },
    /// `ALL[position].index()` does not equal `position`.
    #[error("{state}: ALL[{position}] reports index {index}")]
    IndexMismatch {
        /// Name of the state enumeration.
        state: &'static str,
        /// Position in `ALL`.
        position: usize,
        /// Index reported by the state at that position.
        index: usize,
    },
    /// Two states share a label.
    #[error("{state}: duplicate label '{label}'")]
    DuplicateLabel {
        /// Name of the state enumeration.
        state: &'static str,
        /// The repeated label.
        label: &'static str,
    },
}

/// Invalid simulation or scan configuration.
///
/// Returned by builders and `validate()` methods before any sweep runs.
/// Values are reported as given; nothing is clamped.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// Lattice size is zero.
    #[error("lattice size must be a positive integer, got {size}")]
    InvalidSize {
        /// The configured size.
        size: usize,
    },
    /// `size * size` does not fit in `usize`.
    #[error("lattice size {size} is too large: {size}x{size} cells overflow")]
    LatticeTooLarge {
        /// The configured size.
        size: usize,
    },
    /// A probability lies outside (0, 1] or is not finite.
    #[error("{name} must be a probability in (0, 1], got {value}")]
    InvalidProbability {
        /// Parameter name, e.g. `p_infection`.
        name: &'static str,
        /// The configured value.
        value: f64,
    },
    /// A lattice could not be built from the given cells.
    #[error("invalid lattice: {reason}")]
    InvalidLattice {
        /// What went wrong.
        reason: String,
    },
    /// A population fraction lies outside [0, 1] or is not finite.
    #[error("{name} must be a fraction in [0, 1], got {value}")]
    InvalidFraction {
        /// Parameter name, e.g. `vaccinated_fraction`.
        name: &'static str,
        /// The configured value.
        value: f64,
    },
    /// Temperature is zero, negative, or not finite.
    #[error("temperature must be finite and positive, got {value}")]
    InvalidTemperature {
        /// The configured temperature.
        value: f64,
    },
    /// A sweep count, stride, or repeat count is zero.
    #[error("{name} must be at least 1, got {value}")]
    InvalidCount {
        /// Parameter name, e.g. `sweeps`.
        name: &'static str,
        /// The configured value.
        value: u64,
    },
    /// A scan axis has an unusable range or resolution.
    #[error("invalid axis '{name}': [{start}, {end}] with {points} points")]
    InvalidAxis {
        /// Axis name.
        name: &'static str,
        /// First value on the axis.
        start: f64,
        /// Last value on the axis.
        end: f64,
        /// Number of points.
        points: usize,
    },
    /// A simulation mode code matched no known mode.
    #[error("unknown simulation mode '{code}'")]
    UnknownMode {
        /// The code as given.
        code: String,
    },
    /// A required builder field was not set.
    #[error("{name} is required")]
    Missing {
        /// Name of the missing field.
        name: &'static str,
    },
    /// The cell-state lookup tables are inconsistent.
    #[error("state table: {0}")]
    Table(#[from] TableError),
}

/// Precondition violations in the statistical estimators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum StatsError {
    /// The series has no samples.
    #[error("estimator called on an empty series")]
    EmptySeries,
    /// The bootstrap was asked for zero resamples.
    #[error("bootstrap requires at least one resample")]
    NoResamples,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probability_message_names_parameter() {
        let err = ConfigError::InvalidProbability {
            name: "p_recovery",
            value: 1.5,
        };
        let msg = err.to_string();
        assert!(msg.contains("p_recovery"));
        assert!(msg.contains("1.5"));
    }

    #[test]
    fn table_error_converts_into_config_error() {
        let table = TableError::DuplicateLabel {
            state: "Spin",
            label: "Up",
        };
        let err: ConfigError = table.clone().into();
        assert_eq!(err, ConfigError::Table(table));
        assert!(err.to_string().starts_with("state table:"));
    }

    #[test]
    fn empty_series_message() {
        assert_eq!(
            StatsError::EmptySeries.to_string(),
            "estimator called on an empty series"
        );
    }
}
