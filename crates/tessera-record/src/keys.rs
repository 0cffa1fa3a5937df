//! Record labels. The exact strings are part of the file format.

/// Temperature axis of a spin scan.
pub const TEMPERATURE: &str = "Temperature";
/// Mean total energy per temperature.
pub const ENERGY: &str = "Energy";
/// Mean absolute magnetisation per temperature.
pub const MAGNETISATION: &str = "Magnetisation";
/// Specific heat per temperature.
pub const SPECIFIC_HEAT: &str = "Specific Heat";
/// Susceptibility per temperature.
pub const SUSCEPTIBILITY: &str = "Susceptibility";
/// Bootstrap error of the specific heat.
pub const SPECIFIC_HEAT_ERROR: &str = "Specific Heat Error";

/// Sweeps to steady state, one entry per settled trial.
pub const HISTOGRAM_DATA: &str = "Histogram Data";
/// Glider centre of mass: `[x means, y means]`.
pub const GLIDER_DATA: &str = "Glider Data";
/// Sweep index of each glider sample.
pub const GLIDER_SWEEPS: &str = "Glider Sweeps";

/// Phase diagram of mean infected fraction, `[p1][p3]`.
pub const INFECTED_FRACTIONS: &str = "Infected Fractions";
/// Phase diagram of infected-count variance, `[p1][p3]`.
pub const INFECTED_FRACTIONS_VARIANCE: &str = "Infected Fractions Variance";
/// Infection probability axis of a slice or phase scan.
pub const P_INFECTION: &str = "P Infection";
/// Immunity-loss probability axis of a phase scan.
pub const P_IMMUNITY_LOSS: &str = "P Immunity Loss";
/// Mean infected fraction along the slice.
pub const SLICE_INFECTED_FRACTIONS: &str = "Sliced Infected Fractions";
/// Infected-count variance along the slice.
pub const SLICE_INFECTED_FRACTIONS_VARIANCE: &str = "Sliced Infected Fractions Variance";
/// Bootstrap error of the slice variance.
pub const SLICE_INFECTED_FRACTIONS_ERROR: &str = "Sliced Infected Fractions Error";
/// Vaccinated-fraction axis.
pub const VACCINATED_FRACTION: &str = "Vaccinated Fraction";
/// Mean infected fraction per vaccinated fraction.
pub const VACCINATED_INFECTED_FRACTIONS: &str = "Vaccinated Infected Fraction";
/// Standard error over repeats per vaccinated fraction.
pub const VACCINATED_INFECTED_FRACTIONS_ERROR: &str = "Vaccinated Infected Fractions Error";
