//! Automaton scans: time to steady state, and glider tracking.

use crate::config::{GliderScan, HistogramScan};
use crate::error::EngineError;
use crate::parallel::run_points;
use crate::sampler::steady_state;
use crate::scenario::{point_count, point_seed};
use crate::simulation::Simulation;
use tessera_core::{ConfigError, LifeCell};
use tessera_record::{keys, ResultRecord};
use tessera_rules::{Life, LifeInit};
use tessera_space::Lattice;
use tracing::{debug, info, warn};

// ── Steady-state histogram ─────────────────────────────────────────

/// Settling times of random starts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HistogramResult {
    /// Detected settle index of every trial that settled, in trial order.
    pub settle_sweeps: Vec<u64>,
    /// Trials that hit the sweep cap without settling.
    pub unsettled: u64,
}

impl HistogramResult {
    /// `"Histogram Data"`: the settle indices.
    pub fn to_record(&self) -> ResultRecord {
        ResultRecord::new().with(keys::HISTOGRAM_DATA, self.settle_sweeps.clone())
    }
}

/// Run `scan.trials` random starts through steady-state detection.
pub fn steady_state_histogram(scan: &HistogramScan) -> Result<HistogramResult, EngineError> {
    scan.validate()?;
    info!(
        size = scan.size,
        trials = scan.trials,
        max_sweeps = scan.max_sweeps,
        "steady-state histogram started"
    );

    let outcomes = run_points(point_count(scan.trials), scan.workers, |i| {
        let seed = point_seed(scan.seed, i);
        let mut sim = Simulation::new(Life::new(), scan.size, &LifeInit::Random, seed)?;
        let outcome = steady_state(&mut sim, scan.max_sweeps, scan.patience, |m| m.active_sites);
        debug!(trial = i, settled_at = ?outcome.settled_at, "trial finished");
        Ok::<_, ConfigError>(outcome)
    });

    let mut result = HistogramResult::default();
    for outcome in outcomes {
        match outcome?.settled_at {
            Some(j) => result.settle_sweeps.push(j),
            None => result.unsettled += 1,
        }
    }
    if result.unsettled > 0 {
        warn!(
            unsettled = result.unsettled,
            cap = scan.max_sweeps,
            "trials did not settle"
        );
    }
    info!(settled = result.settle_sweeps.len(), "steady-state histogram finished");
    Ok(result)
}

// ── Glider tracking ────────────────────────────────────────────────

/// Centre of mass of the live cells as `(x, y)` = (mean column, mean
/// row).
///
/// `None` if nothing is alive, or if the live cells span more than half
/// the lattice in either direction (the pattern straddles the seam, so
/// the plain mean is meaningless).
pub fn centre_of_mass(lattice: &Lattice<LifeCell>) -> Option<(f64, f64)> {
    let size = lattice.size();
    let (mut rows, mut cols) = (Vec::new(), Vec::new());
    for ((r, c), cell) in lattice.iter() {
        if cell.is_alive() {
            rows.push(r);
            cols.push(c);
        }
    }
    let fits = |v: &[usize]| {
        let lo = v.iter().min();
        let hi = v.iter().max();
        matches!((lo, hi), (Some(lo), Some(hi)) if 2 * (hi - lo) <= size)
    };
    if !fits(&rows) || !fits(&cols) {
        return None;
    }
    let mean = |v: &[usize]| v.iter().sum::<usize>() as f64 / v.len() as f64;
    Some((mean(&cols), mean(&rows)))
}

/// Centre-of-mass samples of a glider run.
#[derive(Clone, Debug, PartialEq)]
pub struct GliderTrack {
    /// Lattice size the glider moved on.
    pub size: usize,
    /// Sampling cadence the track was recorded with.
    pub sample_every: u64,
    /// 0-based sweep index of each kept sample.
    pub sweeps: Vec<u64>,
    /// Mean column of each kept sample.
    pub x: Vec<f64>,
    /// Mean row of each kept sample.
    pub y: Vec<f64>,
}

impl GliderTrack {
    /// Mean speed in cells per sweep over consecutive kept samples.
    ///
    /// Displacements take the shortest way round the torus. Intervals
    /// spanning a dropped sample are skipped. `None` with fewer than two
    /// adjacent samples.
    pub fn speed(&self) -> Option<f64> {
        let n = self.size as f64;
        let shortest = |d: f64| d - n * (d / n).round();
        let speeds: Vec<f64> = (1..self.sweeps.len())
            .filter(|&k| self.sweeps[k] - self.sweeps[k - 1] == self.sample_every)
            .map(|k| {
                let dx = shortest(self.x[k] - self.x[k - 1]);
                let dy = shortest(self.y[k] - self.y[k - 1]);
                dx.hypot(dy) / self.sample_every as f64
            })
            .collect();
        tessera_stats::mean(&speeds).ok()
    }

    /// `"Glider Data"` as `[x, y]`, and `"Glider Sweeps"`.
    pub fn to_record(&self) -> ResultRecord {
        ResultRecord::new()
            .with(keys::GLIDER_DATA, vec![self.x.clone(), self.y.clone()])
            .with(keys::GLIDER_SWEEPS, self.sweeps.clone())
    }
}

/// Follow a glider from the origin, sampling its centre of mass.
pub fn track_glider(scan: &GliderScan) -> Result<GliderTrack, EngineError> {
    scan.validate()?;
    info!(size = scan.size, sweeps = scan.sweeps, "glider tracking started");

    let mut frames = Simulation::new(Life::new(), scan.size, &LifeInit::Glider, 0)?.frames(scan.sweeps);
    let mut track = GliderTrack {
        size: scan.size,
        sample_every: scan.sample_every,
        sweeps: Vec::new(),
        x: Vec::new(),
        y: Vec::new(),
    };
    let mut k = 0;
    while let Some(frame) = frames.advance() {
        if k % scan.sample_every == 0 {
            match centre_of_mass(frame.lattice) {
                Some((x, y)) => {
                    track.sweeps.push(k);
                    track.x.push(x);
                    track.y.push(y);
                }
                None => debug!(sweep = k, "glider straddles the seam, sample dropped"),
            }
        }
        k += 1;
    }

    info!(samples = track.sweeps.len(), speed = ?track.speed(), "glider tracking finished");
    Ok(track)
}
