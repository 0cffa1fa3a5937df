//! Run and scan configuration.
//!
//! Every scan is a plain struct with public fields, a [`Default`] holding
//! the standard experiment constants, and a `validate()` that rejects bad
//! values before any sweep runs. Nothing is clamped.

use serde::{Deserialize, Serialize};
use tessera_core::ConfigError;
use tessera_rules::{SirParams, SpinInit};
use tessera_stats::linspace;

fn positive(name: &'static str, value: u64) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::InvalidCount { name, value });
    }
    Ok(())
}

fn lattice_size(size: usize) -> Result<(), ConfigError> {
    tessera_space::checked_cell_count(size)?;
    Ok(())
}

// ── SamplingWindow ─────────────────────────────────────────────────

/// Burn-in, length and cadence of one sampling run.
///
/// Sweeps are numbered from 0. Sweeps `0..burn_in` are discarded; of the
/// following `sweeps` sweeps, every `stride`-th is recorded, starting with
/// sweep `burn_in` itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplingWindow {
    /// Discarded equilibration sweeps. Default: 100.
    pub burn_in: u64,
    /// Sweeps run after burn-in. Default: 10000.
    pub sweeps: u64,
    /// Record every `stride`-th sweep. Default: 10.
    pub stride: u64,
    /// Stop at the first absorbing sweep. Default: false.
    pub stop_on_absorption: bool,
}

impl Default for SamplingWindow {
    fn default() -> Self {
        Self {
            burn_in: 100,
            sweeps: 10_000,
            stride: 10,
            stop_on_absorption: false,
        }
    }
}

impl SamplingWindow {
    /// Epidemic window: burn-in 100, every sweep recorded, stop on
    /// extinction.
    pub fn epidemic(sweeps: u64) -> Self {
        Self {
            burn_in: 100,
            sweeps,
            stride: 1,
            stop_on_absorption: true,
        }
    }

    /// Total sweeps the window spans.
    pub fn total_sweeps(&self) -> u64 {
        self.burn_in + self.sweeps
    }

    /// `true` if sweep `index` is recorded.
    pub fn records(&self, index: u64) -> bool {
        index >= self.burn_in && (index - self.burn_in) % self.stride == 0
    }

    /// Reject zero sweeps or a zero stride.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("sweeps", self.sweeps)?;
        positive("stride", self.stride)
    }
}

// ── Axis ───────────────────────────────────────────────────────────

/// Evenly spaced parameter values, endpoints included.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    /// First value.
    pub start: f64,
    /// Last value.
    pub end: f64,
    /// Number of values.
    pub points: usize,
}

impl Axis {
    /// An axis from `start` to `end` with `points` values.
    pub const fn new(start: f64, end: f64, points: usize) -> Self {
        Self { start, end, points }
    }

    /// The axis values.
    pub fn values(&self) -> Vec<f64> {
        linspace(self.start, self.end, self.points)
    }

    /// Reject empty axes and non-finite endpoints.
    pub fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        if self.points == 0 || !self.start.is_finite() || !self.end.is_finite() {
            return Err(ConfigError::InvalidAxis {
                name,
                start: self.start,
                end: self.end,
                points: self.points,
            });
        }
        Ok(())
    }

    /// [`validate`](Self::validate), plus every value must be a
    /// probability in (0, 1].
    pub fn validate_probability(&self, name: &'static str) -> Result<(), ConfigError> {
        self.validate(name)?;
        for value in [self.start, self.end] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::InvalidProbability { name, value });
            }
        }
        Ok(())
    }

    /// [`validate`](Self::validate), plus every value must be a fraction
    /// in [0, 1].
    pub fn validate_fraction(&self, name: &'static str) -> Result<(), ConfigError> {
        self.validate(name)?;
        for value in [self.start, self.end] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidFraction { name, value });
            }
        }
        Ok(())
    }
}

// ── Presets ────────────────────────────────────────────────────────

/// Named epidemic regimes for visualisation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SirPreset {
    /// The infection dies out. N=50, p=(0.2, 0.3, 0.1).
    Absorption,
    /// Dynamic equilibrium. N=50, p=(0.7, 0.7, 0.7).
    Equilibrium,
    /// Travelling infection waves. N=100, p=(0.8, 0.1, 0.01).
    Wave,
}

impl SirPreset {
    /// Lattice size of the preset.
    pub fn size(self) -> usize {
        match self {
            Self::Absorption | Self::Equilibrium => 50,
            Self::Wave => 100,
        }
    }

    /// Transition probabilities of the preset.
    pub fn params(self) -> SirParams {
        match self {
            Self::Absorption => SirParams::new(0.2, 0.3, 0.1),
            Self::Equilibrium => SirParams::new(0.7, 0.7, 0.7),
            Self::Wave => SirParams::new(0.8, 0.1, 0.01),
        }
    }
}

/// Regimes for the vaccination scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VaccinationPreset {
    /// N=50, p=(0.5, 0.5, 0.5).
    Equilibrium,
    /// N=100, p=(0.8, 0.1, 0.02).
    Large,
}

impl VaccinationPreset {
    /// Lattice size of the preset.
    pub fn size(self) -> usize {
        match self {
            Self::Equilibrium => 50,
            Self::Large => 100,
        }
    }

    /// Transition probabilities of the preset.
    pub fn params(self) -> SirParams {
        match self {
            Self::Equilibrium => SirParams::new(0.5, 0.5, 0.5),
            Self::Large => SirParams::new(0.8, 0.1, 0.02),
        }
    }
}

// ── Life scans ─────────────────────────────────────────────────────

/// Time-to-steady-state histogram over random starts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistogramScan {
    /// Lattice size. Default: 50.
    pub size: usize,
    /// Independent random starts. Default: 200.
    pub trials: u64,
    /// Sweep cap per trial. Default: 6000.
    pub max_sweeps: u64,
    /// Consecutive unchanged active-site counts that mark a steady
    /// state. Default: 10.
    pub patience: u64,
    /// Base seed; trial `i` uses `seed ^ i`.
    pub seed: u64,
    /// Worker threads. Default: 1.
    pub workers: usize,
}

impl Default for HistogramScan {
    fn default() -> Self {
        Self {
            size: 50,
            trials: 200,
            max_sweeps: 6000,
            patience: 10,
            seed: 0,
            workers: 1,
        }
    }
}

impl HistogramScan {
    /// Check sizes and counts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        lattice_size(self.size)?;
        positive("trials", self.trials)?;
        positive("max_sweeps", self.max_sweeps)?;
        positive("patience", self.patience)
    }
}

/// Glider centre-of-mass tracking.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GliderScan {
    /// Lattice size. Default: 50.
    pub size: usize,
    /// Sweeps to run. Default: 301.
    pub sweeps: u64,
    /// Sample after every sweep whose 0-based index is a multiple of
    /// this. Default: 10.
    pub sample_every: u64,
}

impl Default for GliderScan {
    fn default() -> Self {
        Self {
            size: 50,
            sweeps: 301,
            sample_every: 10,
        }
    }
}

impl GliderScan {
    /// Check the size (at least 3, to hold the glider) and counts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size < 3 {
            return Err(ConfigError::InvalidSize { size: self.size });
        }
        lattice_size(self.size)?;
        positive("sweeps", self.sweeps)?;
        positive("sample_every", self.sample_every)
    }
}

// ── Spin scans ─────────────────────────────────────────────────────

/// Which spin dynamics a scan uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpinDynamics {
    /// Single spin flips.
    #[default]
    Glauber,
    /// Spin exchanges.
    Kawasaki,
}

impl SpinDynamics {
    /// Standard starting lattice: all up for Glauber (magnetisation is
    /// free to relax), random for Kawasaki (magnetisation is conserved,
    /// so all-up would never move).
    pub fn default_init(self) -> SpinInit {
        match self {
            Self::Glauber => SpinInit::AllUp,
            Self::Kawasaki => SpinInit::Random,
        }
    }
}

/// Equilibrium observables across a temperature range.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TemperatureScan {
    /// Dynamics. Default: Glauber.
    pub dynamics: SpinDynamics,
    /// Lattice size. Default: 50.
    pub size: usize,
    /// Temperatures. Default: 21 points over [1, 3].
    pub temperatures: Axis,
    /// Starting lattice; `None` uses [`SpinDynamics::default_init`].
    pub init: Option<SpinInit>,
    /// Per-temperature sampling. Default: burn-in 100, 10000 sweeps,
    /// stride 10.
    pub window: SamplingWindow,
    /// Anneal: start each temperature from the previous one's final
    /// lattice. Forces sequential execution. Default: true.
    pub carry_lattice: bool,
    /// Bootstrap resamples for the specific-heat error. Default: 500.
    pub resamples: usize,
    /// Base seed; temperature `i` uses `seed ^ i`.
    pub seed: u64,
    /// Worker threads when `carry_lattice` is off. Default: 1.
    pub workers: usize,
}

impl Default for TemperatureScan {
    fn default() -> Self {
        Self {
            dynamics: SpinDynamics::Glauber,
            size: 50,
            temperatures: Axis::new(1.0, 3.0, 21),
            init: None,
            window: SamplingWindow::default(),
            carry_lattice: true,
            resamples: 500,
            seed: 0,
            workers: 1,
        }
    }
}

impl TemperatureScan {
    /// Check size, temperatures, window and resamples.
    pub fn validate(&self) -> Result<(), ConfigError> {
        lattice_size(self.size)?;
        self.temperatures.validate("temperatures")?;
        for value in [self.temperatures.start, self.temperatures.end] {
            if value <= 0.0 {
                return Err(ConfigError::InvalidTemperature { value });
            }
        }
        self.window.validate()?;
        positive("resamples", self.resamples as u64)
    }

    /// The starting lattice this scan uses.
    pub fn resolved_init(&self) -> SpinInit {
        self.init.unwrap_or(self.dynamics.default_init())
    }
}

// ── Epidemic scans ─────────────────────────────────────────────────

/// Infected fraction along a line of infection probabilities.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SliceScan {
    /// Lattice size. Default: 50.
    pub size: usize,
    /// Infection probabilities. Default: 25 points over [0.2, 0.5].
    pub p_infection: Axis,
    /// Fixed recovery probability. Default: 0.5.
    pub p_recovery: f64,
    /// Fixed immunity-loss probability. Default: 0.5.
    pub p_immunity_loss: f64,
    /// Per-point sampling. Default: epidemic window of 10000 sweeps.
    pub window: SamplingWindow,
    /// Bootstrap resamples for the variance error. Default: 500.
    pub resamples: usize,
    /// Base seed; point `i` uses `seed ^ i`.
    pub seed: u64,
    /// Worker threads. Default: 1.
    pub workers: usize,
}

impl Default for SliceScan {
    fn default() -> Self {
        Self {
            size: 50,
            p_infection: Axis::new(0.2, 0.5, 25),
            p_recovery: 0.5,
            p_immunity_loss: 0.5,
            window: SamplingWindow::epidemic(10_000),
            resamples: 500,
            seed: 0,
            workers: 1,
        }
    }
}

impl SliceScan {
    /// Check size, probabilities, window and resamples.
    pub fn validate(&self) -> Result<(), ConfigError> {
        lattice_size(self.size)?;
        self.p_infection.validate_probability("p_infection")?;
        SirParams::new(self.p_infection.start, self.p_recovery, self.p_immunity_loss).validate()?;
        self.window.validate()?;
        positive("resamples", self.resamples as u64)
    }
}

/// Infected fraction over the (p1, p3) plane.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhaseScan {
    /// Lattice size. Default: 50.
    pub size: usize,
    /// Rows of the diagram. Default: 25 points over [0.04, 1].
    pub p_infection: Axis,
    /// Columns of the diagram. Default: 25 points over [0.04, 1].
    pub p_immunity_loss: Axis,
    /// Fixed recovery probability. Default: 0.5.
    pub p_recovery: f64,
    /// Per-point sampling. Default: epidemic window of 1000 sweeps.
    pub window: SamplingWindow,
    /// Base seed; point `(i, j)` uses `seed ^ (i * columns + j)`.
    pub seed: u64,
    /// Worker threads. Default: 1.
    pub workers: usize,
}

impl Default for PhaseScan {
    fn default() -> Self {
        let axis = Axis::new(1.0 / 25.0, 1.0, 25);
        Self {
            size: 50,
            p_infection: axis,
            p_immunity_loss: axis,
            p_recovery: 0.5,
            window: SamplingWindow::epidemic(1000),
            seed: 0,
            workers: 1,
        }
    }
}

impl PhaseScan {
    /// Check size, probabilities and window.
    pub fn validate(&self) -> Result<(), ConfigError> {
        lattice_size(self.size)?;
        self.p_infection.validate_probability("p_infection")?;
        self.p_immunity_loss.validate_probability("p_immunity_loss")?;
        SirParams::new(self.p_infection.start, self.p_recovery, self.p_immunity_loss.start)
            .validate()?;
        self.window.validate()
    }
}

/// Infected fraction against the vaccinated fraction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VaccinationScan {
    /// Lattice size. Default: 50.
    pub size: usize,
    /// Transition probabilities. Default: (0.5, 0.5, 0.5).
    pub params: SirParams,
    /// Vaccinated fractions. Default: 25 points over [0, 1].
    pub fractions: Axis,
    /// Independent runs per fraction. Default: 5.
    pub repeats: u64,
    /// Per-run sampling. Default: epidemic window of 1000 sweeps.
    pub window: SamplingWindow,
    /// Base seed; run `r` of point `i` uses `seed ^ (i * repeats + r)`.
    pub seed: u64,
    /// Worker threads. Default: 1.
    pub workers: usize,
}

impl Default for VaccinationScan {
    fn default() -> Self {
        Self::preset(VaccinationPreset::Equilibrium)
    }
}

impl VaccinationScan {
    /// Standard scan for a preset regime.
    pub fn preset(preset: VaccinationPreset) -> Self {
        Self {
            size: preset.size(),
            params: preset.params(),
            fractions: Axis::new(0.0, 1.0, 25),
            repeats: 5,
            window: SamplingWindow::epidemic(1000),
            seed: 0,
            workers: 1,
        }
    }

    /// Check size, probabilities, fractions, repeats and window.
    pub fn validate(&self) -> Result<(), ConfigError> {
        lattice_size(self.size)?;
        self.params.validate()?;
        self.fractions.validate_fraction("vaccinated_fraction")?;
        positive("repeats", self.repeats)?;
        self.window.validate()
    }
}
