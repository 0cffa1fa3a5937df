//! Rectangular bit patterns stamped onto a lattice.

use crate::error::SpaceError;

/// A rectangular block of on/off bits.
///
/// Stamped with [`Lattice::stamp`](crate::Lattice::stamp), which maps
/// the bits to concrete cell states.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    width: usize,
    bits: Vec<bool>,
}

impl Pattern {
    /// Build from rows of `0`/non-zero bytes.
    ///
    /// Every row must be as wide as the first.
    pub fn from_bits(rows: &[&[u8]]) -> Result<Self, SpaceError> {
        let width = rows.first().map_or(0, |r| r.len());
        let mut bits = Vec::with_capacity(width * rows.len());
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != width {
                return Err(SpaceError::RaggedPattern {
                    row,
                    expected: width,
                    found: cells.len(),
                });
            }
            bits.extend(cells.iter().map(|&b| b != 0));
        }
        Ok(Self { width, bits })
    }

    /// Build from fixed-width rows. Cannot be ragged, so cannot fail.
    pub fn from_rows<const W: usize>(rows: &[[u8; W]]) -> Self {
        Self {
            width: W,
            bits: rows.iter().flatten().map(|&b| b != 0).collect(),
        }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        if self.width == 0 {
            0
        } else {
            self.bits.len() / self.width
        }
    }

    /// Number of set bits.
    pub fn population(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Rows as bit slices, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        // chunks(0) panics, and an empty pattern has no rows anyway.
        self.bits.chunks(self.width.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_and_population() {
        let p = Pattern::from_bits(&[&[0, 1, 0], &[0, 0, 1], &[1, 1, 1]]).unwrap();
        assert_eq!((p.width(), p.height()), (3, 3));
        assert_eq!(p.population(), 5);
        let second: Vec<&[bool]> = p.rows().collect();
        assert_eq!(second[1], &[false, false, true]);
    }

    #[test]
    fn fixed_width_rows_match_byte_rows() {
        let a = Pattern::from_rows(&[[1, 0], [0, 1], [1, 1]]);
        let b = Pattern::from_bits(&[&[1, 0], &[0, 1], &[1, 1]]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.height(), 3);
    }

    #[test]
    fn ragged_rows_rejected() {
        let err = Pattern::from_bits(&[&[1, 1], &[1]]).unwrap_err();
        assert_eq!(
            err,
            SpaceError::RaggedPattern {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn empty_pattern_has_no_rows() {
        let p = Pattern::from_bits(&[]).unwrap();
        assert_eq!(p.height(), 0);
        assert_eq!(p.rows().count(), 0);
    }
}
