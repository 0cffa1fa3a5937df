//! Runs, samplers and scan drivers for the Tessera lattice models.
//!
//! The engine sits on top of the update rules and the estimators:
//!
//! - [`Simulation`] owns one lattice, one rule and one seeded random
//!   stream, and advances by pulling one sweep at a time.
//! - [`sampler`] decides when a run stops and which sweeps it records.
//! - [`scenario`] sweeps parameters, one independent run per point,
//!   optionally across a worker pool ([`parallel`]).
//!
//! All configuration is validated before the first sweep; see [`config`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod parallel;
pub mod sampler;
pub mod scenario;
pub mod simulation;

pub use config::{
    Axis, GliderScan, HistogramScan, PhaseScan, SamplingWindow, SirPreset, SliceScan,
    SpinDynamics, TemperatureScan, VaccinationPreset, VaccinationScan,
};
pub use error::EngineError;
pub use sampler::{sample_window, steady_state, Samples, SteadyState};
pub use simulation::{Frame, Frames, RuleFrame, Simulation};
