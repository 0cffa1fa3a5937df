//! Engine error type.

use tessera_core::{ConfigError, StatsError};
use thiserror::Error;

/// Failure of a run or scan.
///
/// Configuration problems surface before the first sweep; estimator
/// problems surface when a scan reduces its samples.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum EngineError {
    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// An estimator rejected its input.
    #[error(transparent)]
    Stats(#[from] StatsError),
}
