//! Result records for Tessera scans.
//!
//! A [`ResultRecord`] maps exact label strings (see [`keys`]) to numeric
//! [`Series`], preserving insertion order. Records are persisted as a
//! single JSON object:
//!
//! ```text
//! {
//!   "Temperature": [1.0, 1.1, ...],
//!   "Histogram Data": [412, 97, ...],
//!   "Infected Fractions": [[0.0, 0.12, null, ...], ...]
//! }
//! ```
//!
//! Parameter points that produced no samples are stored as `null`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod keys;
pub mod record;
pub mod series;

pub use error::RecordError;
pub use record::ResultRecord;
pub use series::Series;
