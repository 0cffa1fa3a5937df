//! Tessera: stochastic lattice simulations on a torus.
//!
//! This is the facade crate that re-exports the public API of every
//! Tessera sub-crate. For most users, adding `tessera` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use tessera::prelude::*;
//!
//! // A Glauber run at T = 1.5 from an all-up 16×16 lattice.
//! let rule = Glauber::builder().temperature(1.5).build().unwrap();
//! let mut sim = Simulation::new(rule, 16, &SpinInit::AllUp, 42).unwrap();
//! assert_eq!(sim.summary().energy, -2 * 16 * 16);
//!
//! // Discard 50 sweeps, then record every 5th of the next 200.
//! let window = SamplingWindow { burn_in: 50, sweeps: 200, stride: 5, stop_on_absorption: false };
//! let samples = sample_window(&mut sim, &window);
//! let energies = samples.series(|s| s.energy as f64);
//! let c = specific_heat(&energies, 16, 1.5).unwrap();
//! assert!(c >= 0.0);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `tessera-core` | cell states, summaries, random source, errors |
//! | [`space`] | `tessera-space` | toroidal lattice, neighbourhoods, patterns |
//! | [`rules`] | `tessera-rules` | Life, Glauber, Kawasaki and SIRS update rules |
//! | [`stats`] | `tessera-stats` | estimators and the bootstrap |
//! | [`record`] | `tessera-record` | labelled result records and JSON I/O |
//! | [`engine`] | `tessera-engine` | runs, samplers and parameter scans |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Cell states, per-sweep summaries, randomness and errors (`tessera-core`).
pub use tessera_core as types;

/// Toroidal lattice and neighbour evaluators (`tessera-space`).
pub use tessera_space as space;

/// Update rules (`tessera-rules`).
///
/// [`rules::Life`], [`rules::Glauber`], [`rules::Kawasaki`] and
/// [`rules::Sirs`] all implement [`rules::UpdateRule`].
pub use tessera_rules as rules;

/// Estimators over sampled series (`tessera-stats`).
pub use tessera_stats as stats;

/// Result records (`tessera-record`).
pub use tessera_record as record;

/// Runs, samplers and scans (`tessera-engine`).
pub use tessera_engine as engine;

/// Common imports for typical Tessera usage.
///
/// ```rust
/// use tessera::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use tessera_core::{
        CellState, ConfigError, LifeCell, LifeSummary, RandomSource, SirCounts, SirState, Spin,
        SpinSummary, StatsError, SweepId, SweepSummary,
    };

    // Space
    pub use tessera_space::{Lattice, Pattern};

    // Rules
    pub use tessera_rules::{
        Glauber, Kawasaki, Life, LifeInit, SimulationMode, SirInit, SirParams, Sirs, SpinInit,
        UpdateRule,
    };

    // Estimators
    pub use tessera_stats::{
        fraction_variance, mean, mean_abs, specific_heat, susceptibility, variance, Bootstrap,
    };

    // Records
    pub use tessera_record::{keys, ResultRecord, Series};

    // Engine
    pub use tessera_engine::{
        sample_window, steady_state, EngineError, Frame, Frames, SamplingWindow, Simulation,
    };
}
