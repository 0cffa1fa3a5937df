//! Means, variances and the thermodynamic response functions.

use tessera_core::StatsError;

fn non_empty(series: &[f64]) -> Result<f64, StatsError> {
    series.first().copied().ok_or(StatsError::EmptySeries)
}

/// Arithmetic mean.
pub fn mean(series: &[f64]) -> Result<f64, StatsError> {
    let shift = non_empty(series)?;
    let offset: f64 = series.iter().map(|x| x - shift).sum();
    Ok(shift + offset / series.len() as f64)
}

/// Mean of absolute values.
pub fn mean_abs(series: &[f64]) -> Result<f64, StatsError> {
    let shift = non_empty(series)?.abs();
    let offset: f64 = series.iter().map(|x| x.abs() - shift).sum();
    Ok(shift + offset / series.len() as f64)
}

/// Population variance `<x²> - <x>²`.
pub fn variance(series: &[f64]) -> Result<f64, StatsError> {
    let shift = non_empty(series)?;
    let n = series.len() as f64;
    let (sum, sum_sq) = series.iter().fold((0.0, 0.0), |(s, sq), x| {
        let d = x - shift;
        (s + d, sq + d * d)
    });
    let m = sum / n;
    // Rounding can push a near-zero variance just below zero.
    Ok((sum_sq / n - m * m).max(0.0))
}

/// Population standard deviation.
pub fn std_dev(series: &[f64]) -> Result<f64, StatsError> {
    variance(series).map(f64::sqrt)
}

/// Standard error of the mean, `std_dev / sqrt(n)`.
pub fn standard_error(series: &[f64]) -> Result<f64, StatsError> {
    Ok(std_dev(series)? / (series.len() as f64).sqrt())
}

/// Specific heat per spin, `(<E²> - <E>²) / (N² T²)`.
pub fn specific_heat(energies: &[f64], size: usize, temperature: f64) -> Result<f64, StatsError> {
    let sites = (size as f64).powi(2);
    Ok(variance(energies)? / (sites * temperature * temperature))
}

/// Susceptibility per spin, `(<M²> - <M>²) / (N² T)`.
pub fn susceptibility(
    magnetizations: &[f64],
    size: usize,
    temperature: f64,
) -> Result<f64, StatsError> {
    let sites = (size as f64).powi(2);
    Ok(variance(magnetizations)? / (sites * temperature))
}

/// Variance of the infected count scaled by the number of sites,
/// `(<I²> - <I>²) / N²`.
pub fn fraction_variance(infected: &[f64], size: usize) -> Result<f64, StatsError> {
    Ok(variance(infected)? / (size as f64).powi(2))
}

/// `points` evenly spaced values from `start` to `end` inclusive.
///
/// A single point yields `[start]`; zero points yield an empty axis.
pub fn linspace(start: f64, end: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (points - 1) as f64;
            (0..points)
                .map(|i| if i == points - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * (1.0 + b.abs())
    }

    #[test]
    fn empty_series_fails_loudly() {
        assert_eq!(mean(&[]), Err(StatsError::EmptySeries));
        assert_eq!(variance(&[]), Err(StatsError::EmptySeries));
        assert_eq!(specific_heat(&[], 10, 1.0), Err(StatsError::EmptySeries));
        assert_eq!(standard_error(&[]), Err(StatsError::EmptySeries));
    }

    #[test]
    fn basic_moments() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(mean(&xs), Ok(2.5));
        assert_eq!(variance(&xs), Ok(1.25));
        assert_eq!(mean_abs(&[-1.0, 3.0, -5.0]), Ok(3.0));
        assert!(close(std_dev(&xs).unwrap(), 1.25f64.sqrt()));
        assert!(close(standard_error(&xs).unwrap(), 1.25f64.sqrt() / 2.0));
    }

    #[test]
    fn constant_series_has_exactly_zero_variance() {
        for c in [0.1, -7.3, 1e9 + 0.5, 2500.0] {
            let xs = vec![c; 37];
            assert_eq!(variance(&xs), Ok(0.0));
            assert_eq!(mean(&xs), Ok(c));
        }
    }

    #[test]
    fn response_functions_scale_by_sites_and_temperature() {
        let e = [-10.0, -6.0];
        // variance 4
        assert_eq!(specific_heat(&e, 2, 2.0), Ok(4.0 / (4.0 * 4.0)));
        assert_eq!(susceptibility(&e, 2, 2.0), Ok(4.0 / (4.0 * 2.0)));
        assert_eq!(fraction_variance(&e, 2), Ok(1.0));
    }

    #[test]
    fn linspace_endpoints_and_count() {
        let t = linspace(1.0, 3.0, 21);
        assert_eq!(t.len(), 21);
        assert_eq!(t[0], 1.0);
        assert_eq!(t[20], 3.0);
        assert!(close(t[10], 2.0));
        assert_eq!(linspace(0.5, 9.0, 1), vec![0.5]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
        let p = linspace(0.04, 1.0, 25);
        assert!(close(p[1] - p[0], 0.04));
    }

    proptest! {
        #[test]
        fn variance_matches_two_pass_definition(
            xs in proptest::collection::vec(-1e3f64..1e3, 1..64),
        ) {
            let n = xs.len() as f64;
            let m = xs.iter().sum::<f64>() / n;
            let two_pass = xs.iter().map(|x| (x - m) * (x - m)).sum::<f64>() / n;
            let v = variance(&xs).unwrap();
            prop_assert!(v >= 0.0);
            prop_assert!((v - two_pass).abs() <= 1e-6 * (1.0 + two_pass));
            prop_assert!((mean(&xs).unwrap() - m).abs() <= 1e-9 * (1.0 + m.abs()));
        }
    }
}
