//! Spatial storage for Tessera simulations.
//!
//! This crate defines [`Lattice`], the square toroidal grid every model
//! evolves, together with the neighbourhood evaluators the update rules
//! query and the [`Pattern`] type used to seed structured initial
//! conditions.
//!
//! # Topology
//!
//! All addressing wraps modulo the lattice size: row or column `-1` is
//! the same cell as `N - 1`, so no neighbour lookup ever needs a bounds
//! check.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod lattice;
pub mod neighbourhood;
pub mod pattern;

pub use error::SpaceError;
pub use lattice::{checked_cell_count, wrap, Lattice};
pub use neighbourhood::{
    has_infected_neighbour, live_neighbour_count, local_field, INFECTION_WINDOW, MOORE,
    VON_NEUMANN,
};
pub use pattern::Pattern;
