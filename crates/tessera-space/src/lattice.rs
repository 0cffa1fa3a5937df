//! Square toroidal lattice of discrete cell states.

use crate::error::SpaceError;
use crate::pattern::Pattern;
use smallvec::SmallVec;
use std::fmt;
use tessera_core::CellState;

/// Resolve a signed coordinate onto `[0, len)` with periodic wraparound.
///
/// `len` must be non-zero; every lattice guarantees that at construction.
pub fn wrap(val: isize, len: usize) -> usize {
    val.rem_euclid(len as isize) as usize
}

/// Number of cells in a `size x size` lattice.
///
/// Rejects zero and any size whose square overflows `usize`.
pub fn checked_cell_count(size: usize) -> Result<usize, SpaceError> {
    if size == 0 {
        return Err(SpaceError::EmptyLattice);
    }
    size.checked_mul(size).ok_or(SpaceError::TooLarge { size })
}

/// A square `N x N` grid of cell states with periodic boundaries.
///
/// Cells are stored row-major. Coordinates are `(row, col)`. The plain
/// accessors ([`get`](Self::get), [`set`](Self::set)) take in-range
/// indices; [`set_wrapped`](Self::set_wrapped) accepts any signed offset
/// and resolves it on the torus.
///
/// A lattice is owned by exactly one run: the active update rule is its
/// only writer, and readers see it between sweeps.
#[derive(Clone, PartialEq, Eq)]
pub struct Lattice<S> {
    size: usize,
    cells: Vec<S>,
}

impl<S: CellState> Lattice<S> {
    /// A lattice with every cell set to `state`.
    ///
    /// Fails if `size` is 0 or its square overflows.
    pub fn filled(size: usize, state: S) -> Result<Self, SpaceError> {
        let count = checked_cell_count(size)?;
        Ok(Self {
            size,
            cells: vec![state; count],
        })
    }

    /// A lattice whose cell `(r, c)` is `f(r, c)`, visited row-major.
    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> S) -> Result<Self, SpaceError> {
        let mut cells = Vec::with_capacity(checked_cell_count(size)?);
        for r in 0..size {
            for c in 0..size {
                cells.push(f(r, c));
            }
        }
        Ok(Self { size, cells })
    }

    /// Wrap an existing row-major buffer.
    pub fn from_cells(size: usize, cells: Vec<S>) -> Result<Self, SpaceError> {
        let expected = checked_cell_count(size)?;
        if cells.len() != expected {
            return Err(SpaceError::CellCountMismatch {
                size,
                expected,
                found: cells.len(),
            });
        }
        Ok(Self { size, cells })
    }

    /// Side length `N`.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells, `N * N`.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Always returns `false`; construction rejects empty lattices.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Row-major cell buffer.
    pub fn cells(&self) -> &[S] {
        &self.cells
    }

    /// Mutable row-major cell buffer.
    pub fn cells_mut(&mut self) -> &mut [S] {
        &mut self.cells
    }

    /// One row as a slice.
    pub fn row(&self, r: usize) -> &[S] {
        let start = r * self.size;
        &self.cells[start..start + self.size]
    }

    /// Flat index of `(r, c)`.
    #[inline]
    pub fn index(&self, r: usize, c: usize) -> usize {
        debug_assert!(r < self.size && c < self.size, "({r}, {c}) outside {}", self.size);
        r * self.size + c
    }

    /// State at an in-range `(r, c)`.
    #[inline]
    pub fn get(&self, r: usize, c: usize) -> S {
        self.cells[self.index(r, c)]
    }

    /// Overwrite the state at an in-range `(r, c)`.
    #[inline]
    pub fn set(&mut self, r: usize, c: usize, state: S) {
        let i = self.index(r, c);
        self.cells[i] = state;
    }

    /// Overwrite the state at any signed `(r, c)`, wrapped onto the torus.
    #[inline]
    pub fn set_wrapped(&mut self, r: isize, c: isize, state: S) {
        self.set(wrap(r, self.size), wrap(c, self.size), state);
    }

    /// Iterate `((row, col), state)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), S)> + '_ {
        let n = self.size;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &s)| ((i / n, i % n), s))
    }

    /// Number of cells holding `state`.
    pub fn count(&self, state: S) -> usize {
        self.cells.iter().filter(|&&s| s == state).count()
    }

    /// Number of cells per state, indexed by [`CellState::index`].
    pub fn census(&self) -> Vec<usize> {
        let mut counts = vec![0; S::ALL.len()];
        for s in &self.cells {
            counts[s.index()] += 1;
        }
        counts
    }

    /// Wrapped coordinates of `(r, c) + offset` for each offset.
    pub fn neighbours(
        &self,
        r: usize,
        c: usize,
        offsets: &[(isize, isize)],
    ) -> SmallVec<[(usize, usize); 8]> {
        offsets
            .iter()
            .map(|&(dr, dc)| {
                (
                    wrap(r as isize + dr, self.size),
                    wrap(c as isize + dc, self.size),
                )
            })
            .collect()
    }

    /// Stamp `pattern` with its top-left corner at column `x`, row `y`.
    ///
    /// Pattern row `j`, column `i` lands on `(y + j, x + i)` wrapped; set
    /// bits map to `on`, clear bits to `off`, so the stamp overwrites its
    /// whole footprint.
    pub fn stamp(&mut self, pattern: &Pattern, x: isize, y: isize, on: S, off: S) {
        for (j, row) in pattern.rows().enumerate() {
            for (i, &bit) in row.iter().enumerate() {
                let state = if bit { on } else { off };
                self.set_wrapped(y + j as isize, x + i as isize, state);
            }
        }
    }
}

impl<S: CellState> fmt::Display for Lattice<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.size {
            let line: String = self.row(r).iter().map(|s| s.glyph()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

impl<S: CellState> fmt::Debug for Lattice<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lattice")
            .field("size", &self.size)
            .field("census", &self.census())
            .finish()
    }
}
