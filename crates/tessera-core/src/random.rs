//! The randomness seam used by every stochastic update rule.
//!
//! Rules draw only two primitives: a uniform real in `[0, 1)` and a
//! uniform index in `[0, n)`. Any [`rand::Rng`] provides both through the
//! blanket impl, so production code passes a seeded `ChaCha8Rng` while
//! tests substitute a scripted source.

use rand::Rng;

/// Source of the two primitive draws needed by the update rules.
///
/// Object-safe: rules receive `&mut dyn RandomSource`.
pub trait RandomSource {
    /// Uniform real in `[0, 1)`.
    fn uniform(&mut self) -> f64;

    /// Uniform integer in `[0, n)`.
    ///
    /// # Panics
    ///
    /// Implementations may panic if `n == 0`. Callers only ask for
    /// indices into non-empty lattices and series.
    fn index(&mut self, n: usize) -> usize;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn uniform(&mut self) -> f64 {
        self.random::<f64>()
    }

    fn index(&mut self, n: usize) -> usize {
        self.random_range(0..n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn uniform_in_unit_interval() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..10_000 {
            let u = rng.uniform();
            assert!((0.0..1.0).contains(&u), "uniform draw {u} outside [0, 1)");
        }
    }

    #[test]
    fn index_in_range_and_covers_all_values() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut seen = [false; 5];
        for _ in 0..1_000 {
            let i = rng.index(5);
            assert!(i < 5);
            seen[i] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn works_through_trait_object() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let source: &mut dyn RandomSource = &mut rng;
        assert!(source.index(1) == 0);
    }

    #[test]
    fn same_seed_same_stream() {
        let mut a = ChaCha8Rng::seed_from_u64(42);
        let mut b = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..100 {
            assert_eq!(a.uniform().to_bits(), b.uniform().to_bits());
            assert_eq!(a.index(1000), b.index(1000));
        }
    }

    proptest! {
        #[test]
        fn index_below_bound_for_any_seed(seed in any::<u64>(), n in 1usize..10_000) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            for _ in 0..32 {
                prop_assert!(rng.index(n) < n);
            }
        }
    }
}
