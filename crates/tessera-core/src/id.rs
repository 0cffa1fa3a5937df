//! Strongly-typed sweep counter.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Monotonically increasing sweep counter.
///
/// `SweepId(0)` is the initial configuration; each completed sweep
/// advances the counter by one.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct SweepId(pub u64);

impl SweepId {
    /// The sweep after this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for SweepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for SweepId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_increments() {
        assert_eq!(SweepId(0).next(), SweepId(1));
        assert_eq!(SweepId::default(), SweepId(0));
    }
}
