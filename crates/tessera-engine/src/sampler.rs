//! Sweep drivers that decide when to stop and what to record.
//!
//! Two policies:
//!
//! - [`steady_state`]: run until a counter stays unchanged for a number
//!   of consecutive sweeps, or a cap is hit.
//! - [`sample_window`]: discard a burn-in, then record every
//!   `stride`-th summary, optionally stopping early on absorption.
//!
//! Samplers never touch rule parameters; they only advance the run.

use crate::config::SamplingWindow;
use crate::simulation::Simulation;
use tessera_core::SweepSummary;
use tessera_rules::UpdateRule;

/// Outcome of [`steady_state`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SteadyState {
    /// 0-based index of the sweep at which the counter had stayed
    /// unchanged for `patience` consecutive sweeps, if it did.
    pub settled_at: Option<u64>,
    /// Sweeps actually run.
    pub sweeps_run: u64,
}

/// Run until `key(summary)` is unchanged for `patience` consecutive
/// sweeps, at most `max_sweeps` sweeps.
///
/// The first comparison is against the run's current summary, so a
/// lattice that is already at a fixed point settles at index
/// `patience - 1`.
pub fn steady_state<R, K, F>(
    sim: &mut Simulation<R>,
    max_sweeps: u64,
    patience: u64,
    mut key: F,
) -> SteadyState
where
    R: UpdateRule,
    K: PartialEq,
    F: FnMut(&R::Summary) -> K,
{
    let mut previous = key(&sim.summary());
    let mut unchanged = 0;
    for j in 0..max_sweeps {
        let current = key(&sim.advance().summary);
        if current == previous {
            unchanged += 1;
        } else {
            unchanged = 0;
        }
        previous = current;
        if unchanged == patience {
            return SteadyState {
                settled_at: Some(j),
                sweeps_run: j + 1,
            };
        }
    }
    SteadyState {
        settled_at: None,
        sweeps_run: max_sweeps,
    }
}

/// Summaries recorded by [`sample_window`].
#[derive(Clone, Debug, PartialEq)]
pub struct Samples<M> {
    /// Recorded summaries, in sweep order.
    pub values: Vec<M>,
    /// 0-based index of the absorbing sweep that ended the run early.
    pub absorbed_at: Option<u64>,
}

impl<M> Samples<M> {
    /// Project the recorded summaries onto one scalar.
    pub fn series(&self, f: impl Fn(&M) -> f64) -> Vec<f64> {
        self.values.iter().map(f).collect()
    }

    /// `true` if the run stopped before its window ended.
    pub fn absorbed(&self) -> bool {
        self.absorbed_at.is_some()
    }
}

/// Run `window` over `sim` and collect the recorded summaries.
///
/// With `stop_on_absorption`, the first sweep whose summary is absorbing
/// ends the run and is not recorded; this can happen during burn-in, in
/// which case no samples are returned.
pub fn sample_window<R: UpdateRule>(
    sim: &mut Simulation<R>,
    window: &SamplingWindow,
) -> Samples<R::Summary> {
    let recorded = window.sweeps.div_ceil(window.stride);
    let mut values = Vec::with_capacity(usize::try_from(recorded).unwrap_or(0));
    for i in 0..window.total_sweeps() {
        let summary = sim.advance().summary;
        if window.stop_on_absorption && summary.is_absorbing() {
            return Samples {
                values,
                absorbed_at: Some(i),
            };
        }
        if window.records(i) {
            values.push(summary);
        }
    }
    Samples {
        values,
        absorbed_at: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tessera_core::{LifeCell, SirState};
    use tessera_rules::{Glauber, Life, LifeInit, SirInit, SirParams, Sirs, SpinInit};
    use tessera_space::Lattice;
    use tessera_test_utils::lattice_from_glyphs;

    fn life(init: LifeInit, size: usize) -> Simulation<Life> {
        Simulation::new(Life::new(), size, &init, 0).unwrap()
    }

    #[test]
    fn all_dead_settles_after_ten_unchanged_sweeps() {
        let mut sim = life(LifeInit::Empty, 8);
        let s = steady_state(&mut sim, 6000, 10, |m| m.active_sites);
        assert_eq!(s.settled_at, Some(9));
        assert_eq!(s.sweeps_run, 10);
    }

    #[test]
    fn blinker_two_cycle_settles_on_constant_count() {
        let lattice: Lattice<LifeCell> = lattice_from_glyphs(&[
            ".....", //
            "..#..",
            "..#..",
            "..#..",
            ".....",
        ]);
        let mut sim = Simulation::from_lattice(Life::new(), lattice, 0).unwrap();
        let s = steady_state(&mut sim, 100, 10, |m| m.active_sites);
        assert_eq!(s.settled_at, Some(9));
    }

    #[test]
    fn change_resets_the_counter() {
        // A lone glider on a big torus keeps 5 cells but the counter is
        // compared against the initial count, which is also 5.
        let mut sim = life(LifeInit::Glider, 20);
        assert_eq!(steady_state(&mut sim, 100, 10, |m| m.active_sites).settled_at, Some(9));

        // A dying configuration: 2 cells vanish on the first sweep, so the
        // count changes once before holding at zero.
        let lattice: Lattice<LifeCell> = lattice_from_glyphs(&["##..", "....", "....", "...."]);
        let mut sim = Simulation::from_lattice(Life::new(), lattice, 0).unwrap();
        let s = steady_state(&mut sim, 100, 10, |m| m.active_sites);
        assert_eq!(s.settled_at, Some(10));
    }

    #[test]
    fn cap_without_settling() {
        // Key that changes every sweep.
        let mut sim = life(LifeInit::Empty, 4);
        let mut calls = 0u64;
        let s = steady_state(&mut sim, 25, 10, |_| {
            calls += 1;
            calls
        });
        assert_eq!(s.settled_at, None);
        assert_eq!(s.sweeps_run, 25);
    }

    #[test]
    fn window_records_at_stride_after_burn_in() {
        let g = Glauber::builder().temperature(1.5).build().unwrap();
        let mut sim = Simulation::new(g, 6, &SpinInit::AllUp, 1).unwrap();
        let window = SamplingWindow {
            burn_in: 5,
            sweeps: 21,
            stride: 10,
            stop_on_absorption: false,
        };
        let samples = sample_window(&mut sim, &window);
        // Sweeps 5, 15 and 25 are recorded.
        assert_eq!(samples.values.len(), 3);
        assert!(!samples.absorbed());
        assert_eq!(sim.sweep().0, 26);
        assert_eq!(samples.values[2], sim.summary());
    }

    #[test]
    fn extinction_stops_the_window() {
        let sirs = Sirs::new(SirParams::new(0.5, 0.5, 0.5)).unwrap();
        let mut sim = Simulation::new(sirs, 5, &SirInit::AllSusceptible, 0).unwrap();
        let samples = sample_window(&mut sim, &SamplingWindow::epidemic(50));
        assert_eq!(samples.absorbed_at, Some(0));
        assert!(samples.values.is_empty());
        assert_eq!(sim.sweep().0, 1);
    }

    #[test]
    fn absorption_is_ignored_unless_requested() {
        let sirs = Sirs::new(SirParams::new(0.5, 0.5, 0.5)).unwrap();
        let mut sim = Simulation::new(sirs, 4, &SirInit::AllSusceptible, 0).unwrap();
        let window = SamplingWindow {
            burn_in: 2,
            sweeps: 3,
            stride: 1,
            stop_on_absorption: false,
        };
        let samples = sample_window(&mut sim, &window);
        assert_eq!(samples.values.len(), 3);
        assert!(samples.values.iter().all(|c| c.infected == 0));
        assert_eq!(sim.lattice().count(SirState::Susceptible), 16);
    }

    proptest! {
        #[test]
        fn recorded_count_matches_window(
            burn_in in 0u64..20,
            sweeps in 1u64..40,
            stride in 1u64..7,
        ) {
            let mut sim = life(LifeInit::Random, 6);
            let window = SamplingWindow { burn_in, sweeps, stride, stop_on_absorption: false };
            let samples = sample_window(&mut sim, &window);
            prop_assert_eq!(samples.values.len() as u64, sweeps.div_ceil(stride));
            prop_assert_eq!(sim.sweep().0, burn_in + sweeps);
        }
    }

    #[test]
    fn series_projects_summaries() {
        let samples = Samples {
            values: vec![1u32, 2, 3],
            absorbed_at: None,
        };
        assert_eq!(samples.series(|&v| f64::from(v) * 2.0), vec![2.0, 4.0, 6.0]);
    }
}
