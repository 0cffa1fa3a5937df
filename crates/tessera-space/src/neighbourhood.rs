//! Neighbourhood offsets and the three model-specific evaluators.
//!
//! - [`live_neighbour_count`]: Moore (8-cell) count of live cells.
//! - [`local_field`]: von Neumann (4-cell) sum of spin values.
//! - [`has_infected_neighbour`]: infected test over the 2x2 block
//!   [`INFECTION_WINDOW`].

use crate::lattice::{wrap, Lattice};
use tessera_core::{LifeCell, SirState, Spin};

/// All 8 offsets: N, S, W, E, NW, NE, SW, SE.
pub const MOORE: [(isize, isize); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// The 4 cardinal offsets: N, S, W, E.
pub const VON_NEUMANN: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// The block `{r-1, r} x {c-1, c}` scanned for an infected site.
///
/// Asymmetric and smaller than the Moore neighbourhood, and it includes
/// the cell itself. Infection statistics depend on this exact footprint.
pub const INFECTION_WINDOW: [(isize, isize); 4] = [(-1, -1), (-1, 0), (0, -1), (0, 0)];

/// Live cells among the 8 Moore neighbours of `(r, c)`, excluding itself.
pub fn live_neighbour_count(lattice: &Lattice<LifeCell>, r: usize, c: usize) -> usize {
    let n = lattice.size();
    MOORE
        .iter()
        .filter(|&&(dr, dc)| {
            lattice
                .get(wrap(r as isize + dr, n), wrap(c as isize + dc, n))
                .is_alive()
        })
        .count()
}

/// Sum of the 4 von Neumann neighbour spins of `(r, c)`.
pub fn local_field(lattice: &Lattice<Spin>, r: usize, c: usize) -> i32 {
    let n = lattice.size();
    VON_NEUMANN
        .iter()
        .map(|&(dr, dc)| {
            lattice
                .get(wrap(r as isize + dr, n), wrap(c as isize + dc, n))
                .value()
        })
        .sum()
}

/// `true` if any cell of [`INFECTION_WINDOW`] around `(r, c)` is infected.
pub fn has_infected_neighbour(lattice: &Lattice<SirState>, r: usize, c: usize) -> bool {
    let n = lattice.size();
    INFECTION_WINDOW.iter().any(|&(dr, dc)| {
        lattice.get(wrap(r as isize + dr, n), wrap(c as isize + dc, n)) == SirState::Infected
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn life(rows: &[&str]) -> Lattice<LifeCell> {
        let n = rows.len();
        Lattice::from_fn(n, |r, c| LifeCell::from(rows[r].as_bytes()[c] == b'#')).unwrap()
    }

    #[test]
    fn count_excludes_self() {
        let l = life(&["###", "###", "###"]);
        assert_eq!(live_neighbour_count(&l, 1, 1), 8);
        let l = life(&["...", ".#.", "..."]);
        assert_eq!(live_neighbour_count(&l, 1, 1), 0);
    }

    #[test]
    fn count_wraps_around_corners() {
        let l = life(&[
            "....#", //
            ".....",
            ".....",
            ".....",
            "#...#",
        ]);
        // (0,0) sees (0,4), (4,0), (4,4) across the seams.
        assert_eq!(live_neighbour_count(&l, 0, 0), 3);
    }

    #[test]
    fn local_field_all_up_is_four() {
        let l = Lattice::filled(4, Spin::Up).unwrap();
        for r in 0..4 {
            for c in 0..4 {
                assert_eq!(local_field(&l, r, c), 4);
            }
        }
    }

    #[test]
    fn local_field_wraps() {
        let mut l = Lattice::filled(4, Spin::Up).unwrap();
        l.set(3, 0, Spin::Down);
        l.set(0, 3, Spin::Down);
        assert_eq!(local_field(&l, 0, 0), 0);
    }

    #[test]
    fn infection_window_is_the_upper_left_block() {
        let mut l = Lattice::filled(5, SirState::Susceptible).unwrap();
        l.set(1, 1, SirState::Infected);
        assert!(has_infected_neighbour(&l, 1, 1));
        assert!(has_infected_neighbour(&l, 2, 2));
        assert!(has_infected_neighbour(&l, 1, 2));
        assert!(has_infected_neighbour(&l, 2, 1));
        // Below-right of the infected cell only; not in the window.
        assert!(!has_infected_neighbour(&l, 0, 0));
        assert!(!has_infected_neighbour(&l, 0, 1));
        assert!(!has_infected_neighbour(&l, 3, 3));
    }

    #[test]
    fn infection_window_wraps() {
        let mut l = Lattice::filled(4, SirState::Susceptible).unwrap();
        l.set(3, 3, SirState::Infected);
        assert!(has_infected_neighbour(&l, 0, 0));
    }

    proptest! {
        #[test]
        fn live_count_matches_generic_neighbours(
            size in 1usize..8,
            bits in proptest::collection::vec(any::<bool>(), 64),
            r in 0usize..8,
            c in 0usize..8,
        ) {
            let l = Lattice::from_fn(size, |r, c| LifeCell::from(bits[r * 8 + c])).unwrap();
            let (r, c) = (r % size, c % size);
            let expected = l
                .neighbours(r, c, &MOORE)
                .into_iter()
                .filter(|&(nr, nc)| l.get(nr, nc).is_alive())
                .count();
            prop_assert_eq!(live_neighbour_count(&l, r, c), expected);
        }
    }
}
