//! Epidemic scans: a slice through p1, the (p1, p3) phase diagram, and
//! the vaccination curve.
//!
//! Every run samples the infected count with the epidemic window and
//! stops at extinction. Estimates use the samples recorded before
//! extinction; a run that recorded nothing is a no-data point and is
//! written as `null`.

use crate::config::{PhaseScan, SamplingWindow, SliceScan, VaccinationScan};
use crate::error::EngineError;
use crate::parallel::run_points;
use crate::sampler::{sample_window, Samples};
use crate::scenario::{point_count, point_seed};
use crate::simulation::Simulation;
use tessera_core::SirCounts;
use tessera_record::{keys, ResultRecord};
use tessera_rules::{SirInit, SirParams, Sirs};
use tessera_stats::{fraction_variance, mean, std_dev, Bootstrap};
use tracing::{debug, info, warn};

/// One sampled epidemic run.
struct EpidemicRun {
    sim: Simulation<Sirs>,
    infected: Vec<f64>,
    absorbed_at: Option<u64>,
}

fn run_epidemic(
    size: usize,
    params: SirParams,
    vaccinated_fraction: f64,
    window: &SamplingWindow,
    seed: u64,
) -> Result<EpidemicRun, EngineError> {
    let init = SirInit::Random {
        vaccinated_fraction,
    };
    let mut sim = Simulation::new(Sirs::new(params)?, size, &init, seed)?;
    let samples: Samples<SirCounts> = sample_window(&mut sim, window);
    Ok(EpidemicRun {
        infected: samples.series(|c| c.infected as f64),
        absorbed_at: samples.absorbed_at,
        sim,
    })
}

impl EpidemicRun {
    /// Mean infected fraction `<I> / N²`, or `None` without samples.
    fn infected_fraction(&self) -> Option<f64> {
        let sites = self.sim.lattice().cell_count() as f64;
        mean(&self.infected).ok().map(|m| m / sites)
    }

    fn variance(&self) -> Option<f64> {
        fraction_variance(&self.infected, self.sim.lattice().size()).ok()
    }
}

// ── Slice ──────────────────────────────────────────────────────────

/// One point of the p1 slice.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlicePoint {
    /// Infection probability of the point.
    pub p_infection: f64,
    /// Mean infected fraction.
    pub infected_fraction: Option<f64>,
    /// `(<I²> - <I>²) / N²`.
    pub variance: Option<f64>,
    /// Bootstrap error of the variance.
    pub error: Option<f64>,
    /// Sweep at which the epidemic died out, if it did.
    pub absorbed_at: Option<u64>,
}

/// All points of a slice scan, in axis order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SliceResult {
    /// One entry per infection probability.
    pub points: Vec<SlicePoint>,
}

impl SliceResult {
    /// P Infection plus the three sliced series, `null` where a point
    /// has no data.
    pub fn to_record(&self) -> ResultRecord {
        let column = |f: fn(&SlicePoint) -> Option<f64>| -> Vec<Option<f64>> {
            self.points.iter().map(f).collect()
        };
        ResultRecord::new()
            .with(keys::P_INFECTION, column(|p| Some(p.p_infection)))
            .with(keys::SLICE_INFECTED_FRACTIONS, column(|p| p.infected_fraction))
            .with(keys::SLICE_INFECTED_FRACTIONS_VARIANCE, column(|p| p.variance))
            .with(keys::SLICE_INFECTED_FRACTIONS_ERROR, column(|p| p.error))
    }
}

/// Infected fraction, its variance and the variance's bootstrap error
/// along `scan.p_infection`.
pub fn slice_scan(scan: &SliceScan) -> Result<SliceResult, EngineError> {
    scan.validate()?;
    info!(
        size = scan.size,
        points = scan.p_infection.points,
        sweeps = scan.window.sweeps,
        "slice scan started"
    );
    let axis = scan.p_infection.values();
    let bootstrap = Bootstrap::new(scan.resamples)?;
    let size = scan.size;

    let points = run_points(axis.len(), scan.workers, |i| {
        let p1 = axis[i];
        let params = SirParams::new(p1, scan.p_recovery, scan.p_immunity_loss);
        let mut run = run_epidemic(size, params, 0.0, &scan.window, point_seed(scan.seed, i))?;
        let error = if run.infected.is_empty() {
            None
        } else {
            Some(bootstrap.error(
                &run.infected,
                |s| fraction_variance(s, size),
                run.sim.rng_mut(),
            )?)
        };
        let point = SlicePoint {
            p_infection: p1,
            infected_fraction: run.infected_fraction(),
            variance: run.variance(),
            error,
            absorbed_at: run.absorbed_at,
        };
        log_point(p1, None, &run, point.infected_fraction);
        Ok::<_, EngineError>(point)
    })
    .into_iter()
    .collect::<Result<Vec<_>, _>>()?;

    info!(points = points.len(), "slice scan finished");
    Ok(SliceResult { points })
}

// ── Phase diagram ──────────────────────────────────────────────────

/// Infected fraction and variance over the (p1, p3) grid.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PhaseDiagram {
    /// Row axis.
    pub p_infection: Vec<f64>,
    /// Column axis.
    pub p_immunity_loss: Vec<f64>,
    /// `[p1 index][p3 index]` mean infected fraction.
    pub infected_fraction: Vec<Vec<Option<f64>>>,
    /// `[p1 index][p3 index]` variance.
    pub variance: Vec<Vec<Option<f64>>>,
}

impl PhaseDiagram {
    /// Both matrices plus their axes.
    pub fn to_record(&self) -> ResultRecord {
        ResultRecord::new()
            .with(keys::INFECTED_FRACTIONS, self.infected_fraction.clone())
            .with(keys::INFECTED_FRACTIONS_VARIANCE, self.variance.clone())
            .with(keys::P_INFECTION, self.p_infection.clone())
            .with(keys::P_IMMUNITY_LOSS, self.p_immunity_loss.clone())
    }
}

/// Sample every `(p1, p3)` pair of the scan's axes.
pub fn phase_diagram(scan: &PhaseScan) -> Result<PhaseDiagram, EngineError> {
    scan.validate()?;
    let rows = scan.p_infection.values();
    let cols = scan.p_immunity_loss.values();
    info!(
        size = scan.size,
        rows = rows.len(),
        columns = cols.len(),
        sweeps = scan.window.sweeps,
        "phase diagram started"
    );

    let cells = run_points(rows.len() * cols.len(), scan.workers, |k| {
        let (p1, p3) = (rows[k / cols.len()], cols[k % cols.len()]);
        let params = SirParams::new(p1, scan.p_recovery, p3);
        let run = run_epidemic(scan.size, params, 0.0, &scan.window, point_seed(scan.seed, k))?;
        let fraction = run.infected_fraction();
        log_point(p1, Some(p3), &run, fraction);
        Ok::<_, EngineError>((fraction, run.variance()))
    })
    .into_iter()
    .collect::<Result<Vec<_>, _>>()?;

    let mut diagram = PhaseDiagram {
        p_infection: rows,
        p_immunity_loss: cols,
        ..PhaseDiagram::default()
    };
    for row in cells.chunks(diagram.p_immunity_loss.len()) {
        diagram.infected_fraction.push(row.iter().map(|c| c.0).collect());
        diagram.variance.push(row.iter().map(|c| c.1).collect());
    }
    info!(points = cells.len(), "phase diagram finished");
    Ok(diagram)
}

// ── Vaccination ────────────────────────────────────────────────────

/// One vaccinated fraction of the vaccination curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VaccinationPoint {
    /// Fraction of cells vaccinated at the start.
    pub vaccinated_fraction: f64,
    /// Mean over repeats of each repeat's mean infected fraction.
    pub infected_fraction: Option<f64>,
    /// Population std of the repeat means over `sqrt(repeats)`.
    pub error: Option<f64>,
    /// Repeats that recorded at least one sample.
    pub repeats_with_data: u64,
}

/// All points of a vaccination scan, in axis order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VaccinationCurve {
    /// One entry per vaccinated fraction.
    pub points: Vec<VaccinationPoint>,
}

impl VaccinationCurve {
    /// Vaccinated Fraction plus the infected fraction and its error.
    pub fn to_record(&self) -> ResultRecord {
        let column = |f: fn(&VaccinationPoint) -> Option<f64>| -> Vec<Option<f64>> {
            self.points.iter().map(f).collect()
        };
        ResultRecord::new()
            .with(keys::VACCINATED_FRACTION, column(|p| Some(p.vaccinated_fraction)))
            .with(keys::VACCINATED_INFECTED_FRACTIONS, column(|p| p.infected_fraction))
            .with(keys::VACCINATED_INFECTED_FRACTIONS_ERROR, column(|p| p.error))
    }
}

/// Mean infected fraction against the vaccinated fraction, over
/// independent repeats.
pub fn vaccination_scan(scan: &VaccinationScan) -> Result<VaccinationCurve, EngineError> {
    scan.validate()?;
    let fractions = scan.fractions.values();
    let repeats = point_count(scan.repeats);
    info!(
        size = scan.size,
        points = fractions.len(),
        repeats,
        "vaccination scan started"
    );

    let means = run_points(fractions.len() * repeats, scan.workers, |k| {
        let v = fractions[k / repeats];
        let run = run_epidemic(scan.size, scan.params, v, &scan.window, point_seed(scan.seed, k))?;
        Ok::<_, EngineError>(run.infected_fraction())
    })
    .into_iter()
    .collect::<Result<Vec<_>, _>>()?;

    let mut points = Vec::with_capacity(fractions.len());
    for (&v, chunk) in fractions.iter().zip(means.chunks(repeats)) {
        let with_data: Vec<f64> = chunk.iter().flatten().copied().collect();
        let (infected_fraction, error) = if with_data.is_empty() {
            warn!(vaccinated_fraction = v, "no repeat recorded any samples");
            (None, None)
        } else {
            let spread = std_dev(&with_data)? / (with_data.len() as f64).sqrt();
            (Some(mean(&with_data)?), Some(spread))
        };
        debug!(vaccinated_fraction = v, infected_fraction = ?infected_fraction, "vaccination point");
        points.push(VaccinationPoint {
            vaccinated_fraction: v,
            infected_fraction,
            error,
            repeats_with_data: with_data.len() as u64,
        });
    }
    info!(points = points.len(), "vaccination scan finished");
    Ok(VaccinationCurve { points })
}

fn log_point(p_infection: f64, p_immunity_loss: Option<f64>, run: &EpidemicRun, fraction: Option<f64>) {
    match (run.absorbed_at, fraction) {
        (Some(sweep), None) => warn!(
            p_infection,
            p_immunity_loss = ?p_immunity_loss,
            sweep,
            "epidemic died out before sampling, no data"
        ),
        (Some(sweep), Some(_)) => debug!(
            p_infection,
            p_immunity_loss = ?p_immunity_loss,
            sweep,
            samples = run.infected.len(),
            "epidemic died out during sampling"
        ),
        (None, _) => debug!(
            p_infection,
            p_immunity_loss = ?p_immunity_loss,
            infected_fraction = ?fraction,
            "epidemic point sampled"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Axis;

    fn window(sweeps: u64) -> SamplingWindow {
        SamplingWindow {
            burn_in: 10,
            ..SamplingWindow::epidemic(sweeps)
        }
    }

    #[test]
    fn slice_points_align_with_axis() {
        let scan = SliceScan {
            size: 10,
            p_infection: Axis::new(0.2, 0.9, 3),
            window: window(60),
            resamples: 40,
            seed: 5,
            ..SliceScan::default()
        };
        let result = slice_scan(&scan).unwrap();
        assert_eq!(result.points.len(), 3);
        assert_eq!(result.points[2].p_infection, 0.9);
        for p in &result.points {
            match p.infected_fraction {
                Some(f) => {
                    assert!((0.0..=1.0).contains(&f));
                    assert!(p.variance.unwrap() >= 0.0);
                    assert!(p.error.unwrap() >= 0.0);
                }
                None => {
                    assert!(p.absorbed_at.is_some());
                    assert_eq!((p.variance, p.error), (None, None));
                }
            }
        }
        let record = result.to_record();
        assert_eq!(record.get(keys::SLICE_INFECTED_FRACTIONS).map(|s| s.len()), Some(3));
    }

    #[test]
    fn extinct_points_are_null() {
        // Low infection with fast recovery on a tiny lattice dies out
        // during burn-in.
        let scan = SliceScan {
            size: 3,
            p_infection: Axis::new(0.01, 0.01, 1),
            p_recovery: 1.0,
            p_immunity_loss: 0.01,
            window: SamplingWindow::epidemic(100),
            resamples: 10,
            ..SliceScan::default()
        };
        let result = slice_scan(&scan).unwrap();
        let p = result.points[0];
        assert!(p.absorbed_at.is_some_and(|s| s < 100));
        assert_eq!(p.infected_fraction, None);
        let json = serde_json::to_string(&result.to_record()).unwrap();
        assert!(json.contains(r#""Sliced Infected Fractions":[null]"#), "{json}");
    }

    #[test]
    fn phase_diagram_is_row_major_over_p1() {
        let scan = PhaseScan {
            size: 8,
            p_infection: Axis::new(0.2, 1.0, 3),
            p_immunity_loss: Axis::new(0.5, 1.0, 2),
            window: window(30),
            seed: 9,
            ..PhaseScan::default()
        };
        let diagram = phase_diagram(&scan).unwrap();
        assert_eq!(diagram.infected_fraction.len(), 3);
        assert!(diagram.infected_fraction.iter().all(|r| r.len() == 2));
        assert_eq!(diagram.variance.len(), 3);
        assert_eq!(diagram.p_immunity_loss, vec![0.5, 1.0]);

        // Same point, same seed, run on its own.
        let single = PhaseScan {
            p_infection: Axis::new(1.0, 1.0, 1),
            p_immunity_loss: Axis::new(1.0, 1.0, 1),
            ..scan.clone()
        };
        let lone = phase_diagram(&PhaseScan {
            seed: scan.seed ^ 5,
            ..single
        })
        .unwrap();
        assert_eq!(lone.infected_fraction[0][0], diagram.infected_fraction[2][1]);
    }

    #[test]
    fn full_vaccination_has_no_infection() {
        let scan = VaccinationScan {
            size: 6,
            fractions: Axis::new(0.0, 1.0, 2),
            repeats: 3,
            window: window(20),
            ..VaccinationScan::default()
        };
        let curve = vaccination_scan(&scan).unwrap();
        assert_eq!(curve.points.len(), 2);
        let full = curve.points[1];
        assert_eq!(full.vaccinated_fraction, 1.0);
        // Nobody can be infected, so every repeat dies out at once.
        assert_eq!(full.infected_fraction, None);
        assert_eq!(full.repeats_with_data, 0);
        let record = curve.to_record();
        assert_eq!(
            record.get(keys::VACCINATED_INFECTED_FRACTIONS).and_then(|s| s.as_numbers()).map(|v| v[1]),
            Some(None)
        );
    }

    #[test]
    fn vaccination_error_is_spread_over_root_repeats() {
        let scan = VaccinationScan {
            size: 10,
            params: SirParams::new(0.9, 0.2, 0.5),
            fractions: Axis::new(0.0, 0.0, 1),
            repeats: 4,
            window: window(40),
            seed: 21,
            ..VaccinationScan::default()
        };
        let p = vaccination_scan(&scan).unwrap().points[0];
        if let (Some(f), Some(e)) = (p.infected_fraction, p.error) {
            assert!((0.0..=1.0).contains(&f));
            assert!(e >= 0.0);
            assert!(p.repeats_with_data >= 1);
        }
    }

    #[test]
    fn invalid_probability_is_rejected() {
        let scan = SliceScan {
            p_recovery: 1.5,
            ..SliceScan::default()
        };
        assert!(matches!(
            slice_scan(&scan),
            Err(EngineError::Config(tessera_core::ConfigError::InvalidProbability { .. }))
        ));
    }
}
