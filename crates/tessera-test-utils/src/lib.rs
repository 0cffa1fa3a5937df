//! Test utilities for Tessera development.
//!
//! Provides [`ScriptedSource`], a [`RandomSource`] that replays fixed
//! draws so stochastic acceptance decisions can be asserted exactly, and
//! lattice fixtures in [`fixtures`] that build grids from glyph strings.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{lattice_from_glyphs, live_cells};

use tessera_core::RandomSource;

/// A [`RandomSource`] that replays scripted draws in order.
///
/// Uniform reals and indices come from two independent queues. Running
/// out of either queue panics unless the source was built with
/// [`cycling`](ScriptedSource::cycling), in which case it starts over.
/// `index(n)` panics if the scripted value is not below `n`, which
/// catches tests that script coordinates for the wrong lattice size.
#[derive(Clone, Debug, Default)]
pub struct ScriptedSource {
    uniforms: Vec<f64>,
    indices: Vec<usize>,
    next_uniform: usize,
    next_index: usize,
    cycle: bool,
}

impl ScriptedSource {
    pub fn new(indices: impl Into<Vec<usize>>, uniforms: impl Into<Vec<f64>>) -> Self {
        Self {
            uniforms: uniforms.into(),
            indices: indices.into(),
            ..Self::default()
        }
    }

    /// Source that only ever returns `u` from `uniform()` and `i` from
    /// `index(..)`.
    pub fn constant(i: usize, u: f64) -> Self {
        Self::new(vec![i], vec![u]).cycling()
    }

    /// Repeat the scripts from the start instead of panicking when they
    /// run out.
    pub fn cycling(mut self) -> Self {
        self.cycle = true;
        self
    }

    /// Number of `uniform()` draws consumed so far.
    pub fn uniforms_drawn(&self) -> usize {
        self.next_uniform
    }

    /// Number of `index()` draws consumed so far.
    pub fn indices_drawn(&self) -> usize {
        self.next_index
    }

    fn pick<T: Copy>(script: &[T], pos: usize, cycle: bool, what: &str) -> T {
        if script.is_empty() {
            panic!("ScriptedSource has no scripted {what} draws");
        }
        if cycle {
            script[pos % script.len()]
        } else {
            *script
                .get(pos)
                .unwrap_or_else(|| panic!("ScriptedSource ran out of {what} draws after {pos}"))
        }
    }
}

impl RandomSource for ScriptedSource {
    fn uniform(&mut self) -> f64 {
        let u = Self::pick(&self.uniforms, self.next_uniform, self.cycle, "uniform");
        self.next_uniform += 1;
        u
    }

    fn index(&mut self, n: usize) -> usize {
        let i = Self::pick(&self.indices, self.next_index, self.cycle, "index");
        self.next_index += 1;
        assert!(i < n, "scripted index {i} is out of range for n = {n}");
        i
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_in_order() {
        let mut s = ScriptedSource::new(vec![2, 0], vec![0.25, 0.75]);
        assert_eq!(s.index(3), 2);
        assert_eq!(s.uniform(), 0.25);
        assert_eq!(s.index(3), 0);
        assert_eq!(s.uniform(), 0.75);
        assert_eq!((s.indices_drawn(), s.uniforms_drawn()), (2, 2));
    }

    #[test]
    fn cycling_wraps() {
        let mut s = ScriptedSource::constant(1, 0.5);
        for _ in 0..10 {
            assert_eq!(s.index(2), 1);
            assert_eq!(s.uniform(), 0.5);
        }
    }

    #[test]
    #[should_panic(expected = "ran out of uniform")]
    fn exhausted_script_panics() {
        let mut s = ScriptedSource::new(vec![], vec![0.1]);
        s.uniform();
        s.uniform();
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn index_checks_bound() {
        let mut s = ScriptedSource::new(vec![5], vec![]);
        s.index(5);
    }
}
