//! Lattice fixtures built from glyph strings.
//!
//! Each row string uses the glyphs of the state's `GLYPHS` table, e.g.
//! `"#."` for life, `"+-"` for spins, `".#ov"` for the epidemic model.

use tessera_core::{CellState, LifeCell};
use tessera_space::Lattice;

/// Parse a square lattice from rows of state glyphs.
///
/// # Panics
///
/// If the rows are not square or contain an unknown glyph.
pub fn lattice_from_glyphs<S: CellState>(rows: &[&str]) -> Lattice<S> {
    let n = rows.len();
    let mut cells = Vec::with_capacity(n * n);
    for (r, row) in rows.iter().enumerate() {
        let glyphs: Vec<char> = row.chars().collect();
        assert_eq!(glyphs.len(), n, "row {r} has {} glyphs, expected {n}", glyphs.len());
        for g in glyphs {
            let state = S::ALL
                .iter()
                .copied()
                .find(|s| s.glyph() == g)
                .unwrap_or_else(|| panic!("unknown {} glyph {g:?} in row {r}", S::NAME));
            cells.push(state);
        }
    }
    Lattice::from_cells(n, cells).unwrap_or_else(|e| panic!("bad fixture: {e}"))
}

/// Coordinates of live cells, row-major.
pub fn live_cells(lattice: &Lattice<LifeCell>) -> Vec<(usize, usize)> {
    lattice
        .iter()
        .filter(|(_, s)| s.is_alive())
        .map(|(pos, _)| pos)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::{SirState, Spin};

    #[test]
    fn parses_each_model() {
        let l: Lattice<LifeCell> = lattice_from_glyphs(&["#.", ".#"]);
        assert_eq!(live_cells(&l), vec![(0, 0), (1, 1)]);

        let s: Lattice<Spin> = lattice_from_glyphs(&["+-", "--"]);
        assert_eq!(s.count(Spin::Up), 1);

        let e: Lattice<SirState> = lattice_from_glyphs(&[".#o", "v..", "..."]);
        assert_eq!(e.get(0, 2), SirState::Recovered);
        assert_eq!(e.get(1, 0), SirState::Vaccinated);
    }

    #[test]
    #[should_panic(expected = "unknown")]
    fn rejects_unknown_glyph() {
        let _: Lattice<LifeCell> = lattice_from_glyphs(&["x"]);
    }
}
