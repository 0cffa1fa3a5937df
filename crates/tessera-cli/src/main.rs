//! `tessera`: run, watch and scan the Tessera lattice simulations.
//!
//! ```text
//! tessera life watch --start glider
//! tessera ising scan --dynamics kawasaki --workers 4
//! tessera sirs phase --output phase_data.json
//! tessera interactive
//! ```
//!
//! Logging goes to stderr; set `RUST_LOG` to change the level (default
//! `info`).

mod commands;
mod interactive;
mod prompt;
mod render;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use render::Playback;
use std::path::PathBuf;
use std::time::Duration;
use tessera_engine::{
    Axis, GliderScan, HistogramScan, PhaseScan, SamplingWindow, SirPreset, Simulation, SliceScan,
    SpinDynamics, TemperatureScan, VaccinationPreset, VaccinationScan,
};
use tessera_rules::{Glauber, Kawasaki, Life, LifeInit, SirInit, SirParams, Sirs, SpinInit};

#[derive(Parser, Debug)]
#[command(
    name = "tessera",
    version,
    about = "Stochastic lattice simulations: Conway automaton, Ising model, SIRS epidemic"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Conway automaton.
    #[command(subcommand)]
    Life(LifeCommand),
    /// Ising model under Glauber or Kawasaki dynamics.
    #[command(subcommand)]
    Ising(IsingCommand),
    /// SIRS epidemic automaton.
    #[command(subcommand)]
    Sirs(SirsCommand),
    /// Answer questions instead of passing flags.
    Interactive,
}

// ── Shared arguments ───────────────────────────────────────────────

#[derive(Args, Debug, Clone)]
struct WatchArgs {
    /// Sweeps to run.
    #[arg(long, default_value_t = 1000)]
    sweeps: u64,
    /// Pause after each drawn frame, in milliseconds.
    #[arg(long, default_value_t = 50)]
    delay_ms: u64,
    /// Draw only every N-th sweep.
    #[arg(long, default_value_t = 1)]
    every: u64,
    /// Keep scrolling instead of redrawing in place.
    #[arg(long)]
    no_clear: bool,
    /// Random seed.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

impl WatchArgs {
    fn playback(&self) -> Playback {
        Playback {
            delay: Duration::from_millis(self.delay_ms),
            every: self.every,
            clear: !self.no_clear,
        }
    }
}

#[derive(Args, Debug, Clone)]
struct ScanArgs {
    /// Base random seed; point i runs with seed ^ i.
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Worker threads for independent points.
    #[arg(long, default_value_t = 1)]
    workers: usize,
    /// JSON file to write the results to.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl ScanArgs {
    fn output_or(&self, default: &str) -> PathBuf {
        self.output.clone().unwrap_or_else(|| PathBuf::from(default))
    }
}

// ── Life ───────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LifeStart {
    Random,
    Glider,
    Pulsar,
    Empty,
}

impl From<LifeStart> for LifeInit {
    fn from(start: LifeStart) -> Self {
        match start {
            LifeStart::Random => Self::Random,
            LifeStart::Glider => Self::Glider,
            LifeStart::Pulsar => Self::Pulsar,
            LifeStart::Empty => Self::Empty,
        }
    }
}

#[derive(Subcommand, Debug)]
enum LifeCommand {
    /// Animate the automaton.
    Watch {
        /// Lattice size.
        #[arg(long, default_value_t = 50)]
        size: usize,
        /// Initial condition.
        #[arg(long, value_enum, default_value_t = LifeStart::Random)]
        start: LifeStart,
        #[command(flatten)]
        watch: WatchArgs,
    },
    /// Histogram of sweeps to a steady state over random starts.
    Histogram {
        /// Lattice size.
        #[arg(long, default_value_t = 50)]
        size: usize,
        /// Random starts.
        #[arg(long, default_value_t = 200)]
        trials: u64,
        /// Sweep cap per start.
        #[arg(long, default_value_t = 6000)]
        max_sweeps: u64,
        #[command(flatten)]
        scan: ScanArgs,
    },
    /// Track a glider's centre of mass and report its speed.
    Glider {
        /// Lattice size.
        #[arg(long, default_value_t = 50)]
        size: usize,
        /// Sweeps to run.
        #[arg(long, default_value_t = 301)]
        sweeps: u64,
        /// JSON file to write the track to.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

// ── Ising ──────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Dynamics {
    Glauber,
    Kawasaki,
}

impl From<Dynamics> for SpinDynamics {
    fn from(d: Dynamics) -> Self {
        match d {
            Dynamics::Glauber => Self::Glauber,
            Dynamics::Kawasaki => Self::Kawasaki,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SpinStart {
    Random,
    Up,
    Down,
}

impl From<SpinStart> for SpinInit {
    fn from(start: SpinStart) -> Self {
        match start {
            SpinStart::Random => Self::Random,
            SpinStart::Up => Self::AllUp,
            SpinStart::Down => Self::AllDown,
        }
    }
}

#[derive(Subcommand, Debug)]
enum IsingCommand {
    /// Animate the spin lattice at one temperature.
    Watch {
        /// Update dynamics.
        #[arg(long, value_enum, default_value_t = Dynamics::Glauber)]
        dynamics: Dynamics,
        /// Lattice size.
        #[arg(long, default_value_t = 50)]
        size: usize,
        /// Temperature, greater than zero.
        #[arg(long, default_value_t = 2.0)]
        temperature: f64,
        /// Initial spins; random by default.
        #[arg(long, value_enum, default_value_t = SpinStart::Random)]
        start: SpinStart,
        #[command(flatten)]
        watch: WatchArgs,
    },
    /// Energy, magnetisation, specific heat and susceptibility against
    /// temperature.
    Scan {
        /// Update dynamics.
        #[arg(long, value_enum, default_value_t = Dynamics::Glauber)]
        dynamics: Dynamics,
        /// Lattice size.
        #[arg(long, default_value_t = 50)]
        size: usize,
        /// Lowest temperature.
        #[arg(long, default_value_t = 1.0)]
        t_min: f64,
        /// Highest temperature.
        #[arg(long, default_value_t = 3.0)]
        t_max: f64,
        /// Temperatures in the scan.
        #[arg(long, default_value_t = 21)]
        points: usize,
        /// Discarded sweeps per temperature.
        #[arg(long, default_value_t = 100)]
        burn_in: u64,
        /// Sampled sweeps per temperature.
        #[arg(long, default_value_t = 10_000)]
        sweeps: u64,
        /// Record every N-th sweep.
        #[arg(long, default_value_t = 10)]
        stride: u64,
        /// Bootstrap resamples.
        #[arg(long, default_value_t = 500)]
        resamples: usize,
        /// Initial spins; all up for Glauber, random for Kawasaki by default.
        #[arg(long, value_enum)]
        start: Option<SpinStart>,
        /// Start every temperature from a fresh lattice instead of the
        /// previous temperature's final one (allows --workers).
        #[arg(long)]
        fresh: bool,
        #[command(flatten)]
        scan: ScanArgs,
    },
}

// ── SIRS ───────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Regime {
    Absorption,
    Equilibrium,
    Wave,
}

impl From<Regime> for SirPreset {
    fn from(r: Regime) -> Self {
        match r {
            Regime::Absorption => Self::Absorption,
            Regime::Equilibrium => Self::Equilibrium,
            Regime::Wave => Self::Wave,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum VaccinationRegime {
    Equilibrium,
    Large,
}

impl From<VaccinationRegime> for VaccinationPreset {
    fn from(r: VaccinationRegime) -> Self {
        match r {
            VaccinationRegime::Equilibrium => Self::Equilibrium,
            VaccinationRegime::Large => Self::Large,
        }
    }
}

#[derive(Subcommand, Debug)]
enum SirsCommand {
    /// Animate the epidemic.
    Watch {
        /// Preset regime; omit to give --p1, --p2 and --p3 yourself.
        #[arg(long, value_enum)]
        preset: Option<Regime>,
        /// Lattice size; overrides the preset's.
        #[arg(long)]
        size: Option<usize>,
        /// Infection probability.
        #[arg(long)]
        p1: Option<f64>,
        /// Recovery probability.
        #[arg(long)]
        p2: Option<f64>,
        /// Immunity-loss probability.
        #[arg(long)]
        p3: Option<f64>,
        /// Fraction of cells permanently immune at the start.
        #[arg(long, default_value_t = 0.0)]
        vaccinated: f64,
        #[command(flatten)]
        watch: WatchArgs,
    },
    /// Infected fraction, variance and its error along p1 with p2 = p3 = 0.5.
    Slice {
        /// Lattice size.
        #[arg(long, default_value_t = 50)]
        size: usize,
        /// Lowest p1.
        #[arg(long, default_value_t = 0.2)]
        p_min: f64,
        /// Highest p1.
        #[arg(long, default_value_t = 0.5)]
        p_max: f64,
        /// Points along p1.
        #[arg(long, default_value_t = 25)]
        points: usize,
        /// Sampled sweeps per point.
        #[arg(long, default_value_t = 10_000)]
        sweeps: u64,
        /// Bootstrap resamples.
        #[arg(long, default_value_t = 500)]
        resamples: usize,
        #[command(flatten)]
        scan: ScanArgs,
    },
    /// Infected fraction and variance over the (p1, p3) plane with p2 = 0.5.
    Phase {
        /// Lattice size.
        #[arg(long, default_value_t = 50)]
        size: usize,
        /// Points along each axis.
        #[arg(long, default_value_t = 25)]
        points: usize,
        /// Sampled sweeps per point.
        #[arg(long, default_value_t = 1000)]
        sweeps: u64,
        #[command(flatten)]
        scan: ScanArgs,
    },
    /// Infected fraction against the vaccinated fraction.
    Vaccination {
        /// Preset regime.
        #[arg(long, value_enum, default_value_t = VaccinationRegime::Equilibrium)]
        preset: VaccinationRegime,
        /// Vaccinated fractions in [0, 1].
        #[arg(long, default_value_t = 25)]
        points: usize,
        /// Independent runs per fraction.
        #[arg(long, default_value_t = 5)]
        repeats: u64,
        /// Sampled sweeps per run.
        #[arg(long, default_value_t = 1000)]
        sweeps: u64,
        #[command(flatten)]
        scan: ScanArgs,
    },
}

// ── Entry point ────────────────────────────────────────────────────

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    // A second initialisation fails harmlessly; the first subscriber stays.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Command::Life(cmd) => run_life(cmd),
        Command::Ising(cmd) => run_ising(cmd),
        Command::Sirs(cmd) => run_sirs(cmd),
        Command::Interactive => interactive::run(),
    }
}

fn run_life(cmd: LifeCommand) -> Result<()> {
    match cmd {
        LifeCommand::Watch { size, start, watch } => {
            let sim = Simulation::new(Life::new(), size, &start.into(), watch.seed)
                .context("invalid automaton setup")?;
            commands::watch(sim, watch.sweeps, &watch.playback())
        }
        LifeCommand::Histogram {
            size,
            trials,
            max_sweeps,
            scan,
        } => {
            let config = HistogramScan {
                size,
                trials,
                max_sweeps,
                seed: scan.seed,
                workers: scan.workers,
                ..HistogramScan::default()
            };
            commands::histogram(&config, &scan.output_or("histogram_data.json"))
        }
        LifeCommand::Glider {
            size,
            sweeps,
            output,
        } => {
            let config = GliderScan {
                size,
                sweeps,
                ..GliderScan::default()
            };
            let output = output.unwrap_or_else(|| PathBuf::from("glider_data.json"));
            commands::glider(&config, &output)
        }
    }
}

fn run_ising(cmd: IsingCommand) -> Result<()> {
    match cmd {
        IsingCommand::Watch {
            dynamics,
            size,
            temperature,
            start,
            watch,
        } => {
            let init = SpinInit::from(start);
            let playback = watch.playback();
            match dynamics {
                Dynamics::Glauber => {
                    let rule = Glauber::builder().temperature(temperature).build()?;
                    let sim = Simulation::new(rule, size, &init, watch.seed)?;
                    commands::watch(sim, watch.sweeps, &playback)
                }
                Dynamics::Kawasaki => {
                    let rule = Kawasaki::builder().temperature(temperature).build()?;
                    let sim = Simulation::new(rule, size, &init, watch.seed)?;
                    commands::watch(sim, watch.sweeps, &playback)
                }
            }
        }
        IsingCommand::Scan {
            dynamics,
            size,
            t_min,
            t_max,
            points,
            burn_in,
            sweeps,
            stride,
            resamples,
            start,
            fresh,
            scan,
        } => {
            let config = TemperatureScan {
                dynamics: dynamics.into(),
                size,
                temperatures: Axis::new(t_min, t_max, points),
                init: start.map(SpinInit::from),
                window: SamplingWindow {
                    burn_in,
                    sweeps,
                    stride,
                    stop_on_absorption: false,
                },
                carry_lattice: !fresh,
                resamples,
                seed: scan.seed,
                workers: scan.workers,
            };
            let default_output = match dynamics {
                Dynamics::Glauber => "glauber_data.json",
                Dynamics::Kawasaki => "kawasaki_data.json",
            };
            commands::temperatures(&config, &scan.output_or(default_output))
        }
    }
}

fn run_sirs(cmd: SirsCommand) -> Result<()> {
    match cmd {
        SirsCommand::Watch {
            preset,
            size,
            p1,
            p2,
            p3,
            vaccinated,
            watch,
        } => {
            let (size, params) = sirs_setup(preset.map(SirPreset::from), size, p1, p2, p3)?;
            let sim = Simulation::new(
                Sirs::new(params)?,
                size,
                &SirInit::Random {
                    vaccinated_fraction: vaccinated,
                },
                watch.seed,
            )?;
            commands::watch(sim, watch.sweeps, &watch.playback())
        }
        SirsCommand::Slice {
            size,
            p_min,
            p_max,
            points,
            sweeps,
            resamples,
            scan,
        } => {
            let config = SliceScan {
                size,
                p_infection: Axis::new(p_min, p_max, points),
                window: SamplingWindow::epidemic(sweeps),
                resamples,
                seed: scan.seed,
                workers: scan.workers,
                ..SliceScan::default()
            };
            commands::slice(&config, &scan.output_or("sliced_data.json"))
        }
        SirsCommand::Phase {
            size,
            points,
            sweeps,
            scan,
        } => {
            let axis = Axis::new(1.0 / points.max(1) as f64, 1.0, points);
            let config = PhaseScan {
                size,
                p_infection: axis,
                p_immunity_loss: axis,
                window: SamplingWindow::epidemic(sweeps),
                seed: scan.seed,
                workers: scan.workers,
                ..PhaseScan::default()
            };
            commands::phase(&config, &scan.output_or("phase_data.json"))
        }
        SirsCommand::Vaccination {
            preset,
            points,
            repeats,
            sweeps,
            scan,
        } => {
            let config = VaccinationScan {
                fractions: Axis::new(0.0, 1.0, points),
                repeats,
                window: SamplingWindow::epidemic(sweeps),
                seed: scan.seed,
                workers: scan.workers,
                ..VaccinationScan::preset(preset.into())
            };
            commands::vaccination(&config, &scan.output_or("vaccinated_data.json"))
        }
    }
}

/// Resolve a preset plus overrides, or a fully custom setup.
fn sirs_setup(
    preset: Option<SirPreset>,
    size: Option<usize>,
    p1: Option<f64>,
    p2: Option<f64>,
    p3: Option<f64>,
) -> Result<(usize, SirParams)> {
    match preset {
        Some(preset) => {
            let base = preset.params();
            Ok((
                size.unwrap_or(preset.size()),
                SirParams::new(
                    p1.unwrap_or(base.p_infection),
                    p2.unwrap_or(base.p_recovery),
                    p3.unwrap_or(base.p_immunity_loss),
                ),
            ))
        }
        None => match (p1, p2, p3) {
            (Some(p1), Some(p2), Some(p3)) => Ok((size.unwrap_or(50), SirParams::new(p1, p2, p3))),
            _ => bail!("without --preset, all of --p1, --p2 and --p3 are required"),
        },
    }
}
