//! Core types and traits for the Tessera lattice simulations.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! closed cell-state sets of the three models together with their lookup
//! tables, the per-sweep counters each update rule reports, the
//! [`RandomSource`] abstraction, sweep identifiers, and the error types
//! shared across the workspace.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod random;
pub mod state;
pub mod summary;

pub use error::{ConfigError, StatsError, TableError};
pub use id::SweepId;
pub use random::RandomSource;
pub use state::{CellState, LifeCell, SirState, Spin};
pub use summary::{LifeSummary, SirCounts, SpinSummary, SweepSummary};
