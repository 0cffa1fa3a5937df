//! Update rules for the Tessera lattice models.
//!
//! Every model implements [`UpdateRule`]: build an initial lattice, advance
//! it by one sweep, and report the model's counters.
//!
//! | Rule | State | Sweep |
//! |------|-------|-------|
//! | [`Life`] | [`LifeCell`](tessera_core::LifeCell) | synchronous, frozen snapshot |
//! | [`Glauber`] | [`Spin`](tessera_core::Spin) | N² single-site Metropolis flips |
//! | [`Kawasaki`] | [`Spin`](tessera_core::Spin) | N² pair-exchange Metropolis moves |
//! | [`Sirs`] | [`SirState`](tessera_core::SirState) | N² random single-cell transitions |
//!
//! The asynchronous rules mutate in place: a later trial in a sweep sees
//! the result of every earlier one.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod glauber;
pub mod kawasaki;
pub mod life;
pub mod mode;
pub mod rule;
pub mod sirs;
pub mod spin;

pub use glauber::{Glauber, GlauberBuilder};
pub use kawasaki::{Kawasaki, KawasakiBuilder};
pub use life::{Life, LifeInit, GLIDER, PULSAR};
pub use mode::SimulationMode;
pub use rule::UpdateRule;
pub use sirs::{SirInit, SirParams, Sirs, SirsBuilder};
pub use spin::{acceptance_probability, metropolis_accept, SpinInit};
