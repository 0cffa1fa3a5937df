//! Question-driven mode: pick a model, then watch it or collect data.
//!
//! Data collection uses the standard scan settings and writes to the
//! standard file names in the working directory.

use crate::commands;
use crate::prompt::{PromptError, Prompter};
use crate::render::Playback;
use anyhow::Result;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tessera_engine::{
    GliderScan, HistogramScan, PhaseScan, SirPreset, Simulation, SliceScan, SpinDynamics,
    TemperatureScan, VaccinationPreset, VaccinationScan,
};
use tessera_rules::{
    Glauber, Kawasaki, Life, LifeInit, SimulationMode, SirInit, SirParams, Sirs, SpinInit,
};

/// What the answers asked for.
#[derive(Clone, Debug, PartialEq)]
pub enum Plan {
    /// Animate the automaton.
    WatchLife {
        size: usize,
        sweeps: u64,
        init: LifeInit,
    },
    /// Animate a spin lattice.
    WatchSpin {
        dynamics: SpinDynamics,
        size: usize,
        temperature: f64,
        sweeps: u64,
    },
    /// Animate an epidemic.
    WatchSirs {
        size: usize,
        sweeps: u64,
        params: SirParams,
    },
    /// Steady-state histogram.
    Histogram,
    /// Glider track.
    Glider,
    /// Temperature scan.
    Temperatures(SpinDynamics),
    /// p1 slice followed by the phase diagram.
    SliceAndPhase,
    /// Vaccination curve.
    Vaccination(VaccinationPreset),
}

const VISUALISE_OR_COLLECT: &str = "Run Visualisation or Data Collection? [V/D]: ";

/// Walk the question tree and return the chosen plan.
pub fn ask_plan<R: BufRead, W: Write>(p: &mut Prompter<R, W>) -> Result<Plan, PromptError> {
    let mode = ask_mode(p)?;
    let visualise = p.choice(VISUALISE_OR_COLLECT, &['V', 'D'])? == 'V';

    let plan = match (mode, visualise) {
        (SimulationMode::Life, true) => {
            let size = lattice_size(p)?;
            let sweeps = p.positive_integer("Loops: ")?;
            let init = match p.choice("Random, Glider, or Oscillator? [R/G/O]: ", &['R', 'G', 'O'])? {
                'G' => LifeInit::Glider,
                'O' => LifeInit::Pulsar,
                _ => LifeInit::Random,
            };
            Plan::WatchLife { size, sweeps, init }
        }
        (SimulationMode::Life, false) => match p.choice("Random or Glider? [R/G]: ", &['R', 'G'])? {
            'G' => Plan::Glider,
            _ => Plan::Histogram,
        },
        (SimulationMode::Glauber | SimulationMode::Kawasaki, true) => Plan::WatchSpin {
            dynamics: dynamics_of(mode),
            size: lattice_size(p)?,
            temperature: p.positive_number("Enter a temperature value for the simulation: ")?,
            sweeps: p.positive_integer("MonteCarlo loops: ")?,
        },
        (SimulationMode::Glauber | SimulationMode::Kawasaki, false) => {
            Plan::Temperatures(dynamics_of(mode))
        }
        (SimulationMode::Sirs, true) => {
            let preset = match p.choice(
                "Absorption, Equilibrium, Wave, or Custom? [A/E/W/C]: ",
                &['A', 'E', 'W', 'C'],
            )? {
                'A' => Some(SirPreset::Absorption),
                'E' => Some(SirPreset::Equilibrium),
                'W' => Some(SirPreset::Wave),
                _ => None,
            };
            match preset {
                Some(preset) => Plan::WatchSirs {
                    size: preset.size(),
                    sweeps: 10_000,
                    params: preset.params(),
                },
                None => Plan::WatchSirs {
                    size: lattice_size(p)?,
                    sweeps: p.positive_integer("MonteCarlo loops: ")?,
                    params: SirParams::new(
                        p.probability("Enter probability of infection (p1): ")?,
                        p.probability("Enter probability of recovery (p2): ")?,
                        p.probability("Enter probability of loss of immunity (p3): ")?,
                    ),
                },
            }
        }
        (SimulationMode::Sirs, false) => match p.choice(
            "Fraction of Infected & Sliced, or Permanent Immunity? [F/P]: ",
            &['F', 'P'],
        )? {
            'F' => Plan::SliceAndPhase,
            _ => match p.choice("Equilibrium or Large Lattice? [E/L]: ", &['E', 'L'])? {
                'L' => Plan::Vaccination(VaccinationPreset::Large),
                _ => Plan::Vaccination(VaccinationPreset::Equilibrium),
            },
        },
    };
    Ok(plan)
}

fn ask_mode<R: BufRead, W: Write>(p: &mut Prompter<R, W>) -> Result<SimulationMode, PromptError> {
    let options = SimulationMode::ALL.map(|m| (m.code(), m));
    let letters: Vec<String> = options.iter().map(|(c, _)| c.to_string()).collect();
    let prompt = format!("Life, Glauber, Kawasaki or SIRS? [{}]: ", letters.join("/"));
    p.select(&prompt, &options)
}

fn lattice_size<R: BufRead, W: Write>(p: &mut Prompter<R, W>) -> Result<usize, PromptError> {
    let size = p.positive_integer("Specify the size of the lattice: ")?;
    Ok(usize::try_from(size).unwrap_or(usize::MAX))
}

fn dynamics_of(mode: SimulationMode) -> SpinDynamics {
    match mode {
        SimulationMode::Kawasaki => SpinDynamics::Kawasaki,
        _ => SpinDynamics::Glauber,
    }
}

/// Carry out `plan`.
pub fn execute(plan: Plan) -> Result<()> {
    let playback = Playback::default();
    match plan {
        Plan::WatchLife { size, sweeps, init } => {
            commands::watch(Simulation::new(Life::new(), size, &init, 0)?, sweeps, &playback)
        }
        Plan::WatchSpin {
            dynamics,
            size,
            temperature,
            sweeps,
        } => match dynamics {
            SpinDynamics::Glauber => {
                let rule = Glauber::builder().temperature(temperature).build()?;
                commands::watch(Simulation::new(rule, size, &SpinInit::Random, 0)?, sweeps, &playback)
            }
            SpinDynamics::Kawasaki => {
                let rule = Kawasaki::builder().temperature(temperature).build()?;
                commands::watch(Simulation::new(rule, size, &SpinInit::Random, 0)?, sweeps, &playback)
            }
        },
        Plan::WatchSirs {
            size,
            sweeps,
            params,
        } => commands::watch(
            Simulation::new(Sirs::new(params)?, size, &SirInit::random(), 0)?,
            sweeps,
            &playback,
        ),
        Plan::Histogram => {
            commands::histogram(&HistogramScan::default(), Path::new("histogram_data.json"))
        }
        Plan::Glider => commands::glider(&GliderScan::default(), Path::new("glider_data.json")),
        Plan::Temperatures(dynamics) => {
            let scan = TemperatureScan {
                dynamics,
                ..TemperatureScan::default()
            };
            let output = match dynamics {
                SpinDynamics::Glauber => "glauber_data.json",
                SpinDynamics::Kawasaki => "kawasaki_data.json",
            };
            commands::temperatures(&scan, Path::new(output))
        }
        Plan::SliceAndPhase => {
            commands::slice(&SliceScan::default(), Path::new("sliced_data.json"))?;
            commands::phase(&PhaseScan::default(), Path::new("phase_data.json"))
        }
        Plan::Vaccination(preset) => commands::vaccination(
            &VaccinationScan::preset(preset),
            Path::new("vaccinated_data.json"),
        ),
    }
}

/// Ask on stdin/stdout, then run.
pub fn run() -> Result<()> {
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());
    let plan = ask_plan(&mut prompter)?;
    execute(plan)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(answers: &str) -> Result<Plan, PromptError> {
        let mut p = Prompter::new(answers.as_bytes(), Vec::new());
        ask_plan(&mut p)
    }

    #[test]
    fn life_visualisation_with_oscillator() {
        assert_eq!(
            plan("l\nv\n40\n200\no\n").unwrap(),
            Plan::WatchLife {
                size: 40,
                sweeps: 200,
                init: LifeInit::Pulsar
            }
        );
    }

    #[test]
    fn kawasaki_data_collection() {
        assert_eq!(
            plan("K\nd\n").unwrap(),
            Plan::Temperatures(SpinDynamics::Kawasaki)
        );
    }

    #[test]
    fn custom_epidemic_retries_bad_probability() {
        assert_eq!(
            plan("s\nv\nc\n30\n100\n0.5\n1.5\n0.25\n0.1\n").unwrap(),
            Plan::WatchSirs {
                size: 30,
                sweeps: 100,
                params: SirParams::new(0.5, 0.25, 0.1)
            }
        );
    }

    #[test]
    fn preset_epidemic_uses_preset_size() {
        match plan("S\nV\nw\n").unwrap() {
            Plan::WatchSirs { size, params, .. } => {
                assert_eq!(size, 100);
                assert_eq!(params, SirPreset::Wave.params());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn vaccination_large_lattice() {
        assert_eq!(
            plan("s\nd\np\nl\n").unwrap(),
            Plan::Vaccination(VaccinationPreset::Large)
        );
    }

    #[test]
    fn every_mode_is_offered_by_its_code() {
        for mode in SimulationMode::ALL {
            let answer = format!("{}\n", mode.code().to_ascii_lowercase());
            let mut p = Prompter::new(answer.as_bytes(), Vec::new());
            assert_eq!(ask_mode(&mut p).unwrap(), mode);
        }
        let mut p = Prompter::new(&b"x\n"[..], Vec::new());
        let _ = ask_mode(&mut p);
        let shown = String::from_utf8(p.output().clone()).unwrap();
        assert!(shown.contains("[L/G/K/S]"), "{shown}");
    }

    #[test]
    fn unknown_model_letter_is_asked_again() {
        assert_eq!(plan("x\nl\nd\ng\n").unwrap(), Plan::Glider);
    }
}
