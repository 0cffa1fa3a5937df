//! Numeric series stored under one record label.

use serde::{Deserialize, Serialize};

/// One labelled array in a record.
///
/// Serialized untagged, so the JSON shape alone decides the variant on
/// read: an array of integers is [`Integers`](Series::Integers), a flat
/// array containing any float or `null` is [`Numbers`](Series::Numbers),
/// and an array of arrays is a [`Matrix`](Series::Matrix). An empty array
/// reads back as `Integers`; every empty series compares equal to every
/// other, whatever its variant.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Series {
    /// Counts such as sweep indices.
    Integers(Vec<u64>),
    /// Per-point values; `None` marks a point with no data.
    Numbers(Vec<Option<f64>>),
    /// Rows of per-point values, e.g. a phase diagram or paired
    /// coordinate arrays.
    Matrix(Vec<Vec<Option<f64>>>),
}

impl Series {
    /// Number of top-level entries (rows, for a matrix).
    pub fn len(&self) -> usize {
        match self {
            Self::Integers(v) => v.len(),
            Self::Numbers(v) => v.len(),
            Self::Matrix(v) => v.len(),
        }
    }

    /// `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The integers, if this is an integer series.
    pub fn as_integers(&self) -> Option<&[u64]> {
        match self {
            Self::Integers(v) => Some(v),
            _ => None,
        }
    }

    /// The values, if this is a flat numeric series.
    pub fn as_numbers(&self) -> Option<&[Option<f64>]> {
        match self {
            Self::Numbers(v) => Some(v),
            _ => None,
        }
    }

    /// The rows, if this is a matrix.
    pub fn as_matrix(&self) -> Option<&[Vec<Option<f64>>]> {
        match self {
            Self::Matrix(v) => Some(v),
            _ => None,
        }
    }

    /// Equality with floats compared to within `tolerance` (absolute).
    /// Integers and `None` markers must match exactly.
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        fn close(a: &[Option<f64>], b: &[Option<f64>], tol: f64) -> bool {
            a.len() == b.len()
                && a.iter().zip(b).all(|(x, y)| match (x, y) {
                    (Some(x), Some(y)) => (x - y).abs() <= tol,
                    (None, None) => true,
                    _ => false,
                })
        }
        match (self, other) {
            _ if self.is_empty() && other.is_empty() => true,
            (Self::Integers(a), Self::Integers(b)) => a == b,
            (Self::Numbers(a), Self::Numbers(b)) => close(a, b, tolerance),
            (Self::Matrix(a), Self::Matrix(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| close(x, y, tolerance))
            }
            _ => false,
        }
    }
}

impl PartialEq for Series {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other, 0.0)
    }
}

impl From<Vec<u64>> for Series {
    fn from(v: Vec<u64>) -> Self {
        Self::Integers(v)
    }
}

impl From<Vec<Option<f64>>> for Series {
    fn from(v: Vec<Option<f64>>) -> Self {
        Self::Numbers(v)
    }
}

/// Non-finite values become `None`.
impl From<Vec<f64>> for Series {
    fn from(v: Vec<f64>) -> Self {
        Self::Numbers(v.into_iter().map(|x| x.is_finite().then_some(x)).collect())
    }
}

impl From<Vec<Vec<Option<f64>>>> for Series {
    fn from(v: Vec<Vec<Option<f64>>>) -> Self {
        Self::Matrix(v)
    }
}

/// Non-finite values become `None`.
impl From<Vec<Vec<f64>>> for Series {
    fn from(v: Vec<Vec<f64>>) -> Self {
        Self::Matrix(
            v.into_iter()
                .map(|row| row.into_iter().map(|x| x.is_finite().then_some(x)).collect())
                .collect(),
        )
    }
}
