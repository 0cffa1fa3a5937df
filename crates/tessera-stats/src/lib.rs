//! Estimators over sampled scalar series.
//!
//! All estimators are pure functions of a completed series and fail with
//! [`StatsError::EmptySeries`](tessera_core::StatsError::EmptySeries) when
//! handed no samples. Variances use the population form
//! `<x²> - <x>²`, evaluated about the first sample so a constant series
//! yields exactly zero.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bootstrap;
pub mod estimators;

pub use bootstrap::Bootstrap;
pub use estimators::{
    fraction_variance, linspace, mean, mean_abs, specific_heat, standard_error, std_dev,
    susceptibility, variance,
};
