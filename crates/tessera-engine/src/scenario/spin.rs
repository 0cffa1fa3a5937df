//! Spin-model temperature scan.

use crate::config::{SpinDynamics, TemperatureScan};
use crate::error::EngineError;
use crate::parallel::run_points;
use crate::sampler::sample_window;
use crate::scenario::point_seed;
use crate::simulation::Simulation;
use tessera_core::{ConfigError, Spin, SpinSummary};
use tessera_record::{keys, ResultRecord};
use tessera_rules::{Glauber, Kawasaki, SpinInit, UpdateRule};
use tessera_space::Lattice;
use tessera_stats::{mean, mean_abs, specific_heat, susceptibility, Bootstrap};
use tracing::{debug, info};

/// Equilibrium observables at one temperature.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TemperaturePoint {
    /// Temperature of the point.
    pub temperature: f64,
    /// Mean total energy.
    pub energy: f64,
    /// Mean absolute total magnetisation.
    pub magnetisation: f64,
    /// Specific heat per spin.
    pub specific_heat: f64,
    /// Susceptibility per spin, from the signed magnetisation.
    pub susceptibility: f64,
    /// Bootstrap error of the specific heat.
    pub specific_heat_error: f64,
}

/// All points of a temperature scan, in axis order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TemperatureResult {
    /// One entry per temperature.
    pub points: Vec<TemperaturePoint>,
}

impl TemperatureResult {
    fn column(&self, f: impl Fn(&TemperaturePoint) -> f64) -> Vec<f64> {
        self.points.iter().map(f).collect()
    }

    /// Temperature, Energy, Magnetisation, Specific Heat, Susceptibility
    /// and Specific Heat Error, aligned by temperature.
    pub fn to_record(&self) -> ResultRecord {
        ResultRecord::new()
            .with(keys::TEMPERATURE, self.column(|p| p.temperature))
            .with(keys::ENERGY, self.column(|p| p.energy))
            .with(keys::MAGNETISATION, self.column(|p| p.magnetisation))
            .with(keys::SPECIFIC_HEAT, self.column(|p| p.specific_heat))
            .with(keys::SUSCEPTIBILITY, self.column(|p| p.susceptibility))
            .with(keys::SPECIFIC_HEAT_ERROR, self.column(|p| p.specific_heat_error))
    }
}

/// Measure energy and magnetisation across `scan.temperatures`.
pub fn temperature_scan(scan: &TemperatureScan) -> Result<TemperatureResult, EngineError> {
    scan.validate()?;
    info!(
        dynamics = ?scan.dynamics,
        size = scan.size,
        points = scan.temperatures.points,
        carry_lattice = scan.carry_lattice,
        "temperature scan started"
    );
    let result = match scan.dynamics {
        SpinDynamics::Glauber => scan_with(scan, |t| Glauber::builder().temperature(t).build()),
        SpinDynamics::Kawasaki => scan_with(scan, |t| Kawasaki::builder().temperature(t).build()),
    }?;
    info!(points = result.points.len(), "temperature scan finished");
    Ok(result)
}

fn scan_with<R, B>(scan: &TemperatureScan, build: B) -> Result<TemperatureResult, EngineError>
where
    R: UpdateRule<State = Spin, Summary = SpinSummary, Init = SpinInit>,
    B: Fn(f64) -> Result<R, ConfigError> + Sync,
{
    let temperatures = scan.temperatures.values();
    let init = scan.resolved_init();

    let points = if scan.carry_lattice {
        let mut carried: Option<Lattice<Spin>> = None;
        let mut points = Vec::with_capacity(temperatures.len());
        for (i, &t) in temperatures.iter().enumerate() {
            let rule = build(t)?;
            let seed = point_seed(scan.seed, i);
            let mut sim = match carried.take() {
                Some(lattice) => Simulation::from_lattice(rule, lattice, seed)?,
                None => Simulation::new(rule, scan.size, &init, seed)?,
            };
            points.push(measure(&mut sim, scan, t)?);
            carried = Some(sim.into_lattice());
        }
        points
    } else {
        run_points(temperatures.len(), scan.workers, |i| {
            let t = temperatures[i];
            let mut sim = Simulation::new(build(t)?, scan.size, &init, point_seed(scan.seed, i))?;
            measure(&mut sim, scan, t)
        })
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?
    };
    Ok(TemperatureResult { points })
}

fn measure<R>(
    sim: &mut Simulation<R>,
    scan: &TemperatureScan,
    temperature: f64,
) -> Result<TemperaturePoint, EngineError>
where
    R: UpdateRule<Summary = SpinSummary>,
{
    let samples = sample_window(sim, &scan.window);
    let energies = samples.series(|s| s.energy as f64);
    let magnetisations = samples.series(|s| s.magnetization as f64);
    let size = scan.size;

    let bootstrap = Bootstrap::new(scan.resamples)?;
    let specific_heat_error = bootstrap.error(
        &energies,
        |e| specific_heat(e, size, temperature),
        sim.rng_mut(),
    )?;
    let point = TemperaturePoint {
        temperature,
        energy: mean(&energies)?,
        magnetisation: mean_abs(&magnetisations)?,
        specific_heat: specific_heat(&energies, size, temperature)?,
        susceptibility: susceptibility(&magnetisations, size, temperature)?,
        specific_heat_error,
    };
    debug!(
        temperature,
        samples = energies.len(),
        energy = point.energy,
        specific_heat = point.specific_heat,
        "temperature point measured"
    );
    Ok(point)
}
