//! Command bodies shared by the subcommands and the interactive mode.

use crate::render::{self, Playback};
use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::Path;
use tessera_engine::scenario::{
    phase_diagram, slice_scan, steady_state_histogram, temperature_scan, track_glider,
    vaccination_scan,
};
use tessera_engine::{
    GliderScan, HistogramScan, PhaseScan, Simulation, SliceScan, TemperatureScan,
    VaccinationScan,
};
use tessera_record::ResultRecord;
use tessera_rules::UpdateRule;
use tracing::info;

/// Write `record` as JSON to `path`.
pub fn save(record: &ResultRecord, path: &Path) -> Result<()> {
    record
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), series = record.len(), "record written");
    Ok(())
}

/// Animate `sim` on stdout for `sweeps` sweeps.
pub fn watch<R: UpdateRule>(sim: Simulation<R>, sweeps: u64, playback: &Playback) -> Result<()> {
    info!(rule = sim.rule().name(), size = sim.lattice().size(), sweeps, "watch started");
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let ran = render::play(sim.frames(sweeps), &mut out, playback).context("failed to draw frame")?;
    info!(sweeps = ran, "watch finished");
    Ok(())
}

/// Steady-state histogram of random automaton starts.
pub fn histogram(scan: &HistogramScan, output: &Path) -> Result<()> {
    let result = steady_state_histogram(scan).context("histogram scan failed")?;
    let mut out = io::stdout().lock();
    writeln!(
        out,
        "{} trials settled, {} hit the {}-sweep cap",
        result.settle_sweeps.len(),
        result.unsettled,
        scan.max_sweeps
    )?;
    save(&result.to_record(), output)
}

/// Glider centre-of-mass track and speed.
pub fn glider(scan: &GliderScan, output: &Path) -> Result<()> {
    let track = track_glider(scan).context("glider tracking failed")?;
    let mut out = io::stdout().lock();
    match track.speed() {
        Some(speed) => writeln!(out, "glider speed: {speed:.4} cells/sweep")?,
        None => writeln!(out, "glider speed: not enough samples")?,
    }
    save(&track.to_record(), output)
}

/// Temperature scan of the spin model.
pub fn temperatures(scan: &TemperatureScan, output: &Path) -> Result<()> {
    let result = temperature_scan(scan).context("temperature scan failed")?;
    let mut out = io::stdout().lock();
    writeln!(
        out,
        "{:>8} {:>12} {:>10} {:>10} {:>10} {:>10}",
        "T", "<E>", "<|M|>", "C", "chi", "C err"
    )?;
    for p in &result.points {
        writeln!(
            out,
            "{:>8.3} {:>12.2} {:>10.2} {:>10.4} {:>10.4} {:>10.4}",
            p.temperature,
            p.energy,
            p.magnetisation,
            p.specific_heat,
            p.susceptibility,
            p.specific_heat_error
        )?;
    }
    save(&result.to_record(), output)
}

/// Infected fraction along the p1 slice.
pub fn slice(scan: &SliceScan, output: &Path) -> Result<()> {
    let result = slice_scan(scan).context("slice scan failed")?;
    let mut out = io::stdout().lock();
    writeln!(out, "{:>8} {:>10} {:>12} {:>12}", "p1", "<I>/N^2", "variance", "error")?;
    for p in &result.points {
        writeln!(
            out,
            "{:>8.3} {:>10} {:>12} {:>12}",
            p.p_infection,
            show(p.infected_fraction),
            show(p.variance),
            show(p.error)
        )?;
    }
    save(&result.to_record(), output)
}

/// Phase diagram over (p1, p3).
pub fn phase(scan: &PhaseScan, output: &Path) -> Result<()> {
    let diagram = phase_diagram(scan).context("phase diagram failed")?;
    let empty = diagram
        .infected_fraction
        .iter()
        .flatten()
        .filter(|v| v.is_none())
        .count();
    writeln!(
        io::stdout().lock(),
        "{}x{} phase diagram, {} points without data",
        diagram.p_infection.len(),
        diagram.p_immunity_loss.len(),
        empty
    )?;
    save(&diagram.to_record(), output)
}

/// Infected fraction against the vaccinated fraction.
pub fn vaccination(scan: &VaccinationScan, output: &Path) -> Result<()> {
    let curve = vaccination_scan(scan).context("vaccination scan failed")?;
    let mut out = io::stdout().lock();
    writeln!(out, "{:>8} {:>10} {:>10}", "v", "<I>/N^2", "error")?;
    for p in &curve.points {
        writeln!(
            out,
            "{:>8.3} {:>10} {:>10}",
            p.vaccinated_fraction,
            show(p.infected_fraction),
            show(p.error)
        )?;
    }
    save(&curve.to_record(), output)
}

fn show(value: Option<f64>) -> String {
    value.map_or_else(|| "no data".to_owned(), |v| format!("{v:.5}"))
}
