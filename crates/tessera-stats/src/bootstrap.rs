//! Bootstrap standard errors.
//!
//! Resample the series with replacement (same length), recompute the
//! statistic on each resample, and report the population standard
//! deviation of the resampled statistics.

use crate::estimators::std_dev;
use tessera_core::{RandomSource, StatsError};

/// Bootstrap error estimator with a fixed number of resamples.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bootstrap {
    resamples: usize,
}

impl Default for Bootstrap {
    fn default() -> Self {
        Self {
            resamples: Self::DEFAULT_RESAMPLES,
        }
    }
}

impl Bootstrap {
    /// Resamples drawn by [`Bootstrap::default`].
    pub const DEFAULT_RESAMPLES: usize = 500;

    /// An estimator drawing `resamples` resamples.
    pub fn new(resamples: usize) -> Result<Self, StatsError> {
        if resamples == 0 {
            return Err(StatsError::NoResamples);
        }
        Ok(Self { resamples })
    }

    /// Number of resamples per estimate.
    pub fn resamples(&self) -> usize {
        self.resamples
    }

    /// Bootstrap standard error of `statistic` over `series`.
    ///
    /// Draws exactly `resamples * series.len()` indices from `rng`.
    ///
    /// # Errors
    ///
    /// [`StatsError::EmptySeries`] if `series` is empty, or any error the
    /// statistic itself returns.
    pub fn error<F>(
        &self,
        series: &[f64],
        mut statistic: F,
        rng: &mut dyn RandomSource,
    ) -> Result<f64, StatsError>
    where
        F: FnMut(&[f64]) -> Result<f64, StatsError>,
    {
        if series.is_empty() {
            return Err(StatsError::EmptySeries);
        }
        let n = series.len();
        let mut resample = vec![0.0; n];
        let mut estimates = Vec::with_capacity(self.resamples);
        for _ in 0..self.resamples {
            for slot in resample.iter_mut() {
                *slot = series[rng.index(n)];
            }
            estimates.push(statistic(&resample)?);
        }
        std_dev(&estimates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimators::{mean, specific_heat, variance};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use tessera_test_utils::ScriptedSource;

    #[test]
    fn zero_resamples_rejected() {
        assert_eq!(Bootstrap::new(0), Err(StatsError::NoResamples));
        assert_eq!(Bootstrap::default().resamples(), 500);
    }

    #[test]
    fn empty_series_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(
            Bootstrap::default().error(&[], variance, &mut rng),
            Err(StatsError::EmptySeries)
        );
    }

    #[test]
    fn constant_series_has_exactly_zero_error() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let series = vec![-1234.0; 200];
        let boot = Bootstrap::default();
        assert_eq!(boot.error(&series, variance, &mut rng), Ok(0.0));
        assert_eq!(
            boot.error(&series, |s| specific_heat(s, 50, 2.2), &mut rng),
            Ok(0.0)
        );
        assert_eq!(boot.error(&series, mean, &mut rng), Ok(0.0));
    }

    #[test]
    fn resample_count_is_fixed() {
        let mut rng = ScriptedSource::constant(0, 0.0);
        let mut calls = 0;
        Bootstrap::new(7)
            .unwrap()
            .error(
                &[1.0, 2.0, 3.0],
                |s| {
                    calls += 1;
                    assert_eq!(s.len(), 3);
                    mean(s)
                },
                &mut rng,
            )
            .unwrap();
        assert_eq!(calls, 7);
        assert_eq!(rng.indices_drawn(), 21);
    }

    #[test]
    fn scripted_resamples_give_known_spread() {
        // Two resamples of a 2-element series: [1, 1] then [3, 3].
        let mut rng = ScriptedSource::new(vec![0, 0, 1, 1], vec![]);
        let err = Bootstrap::new(2).unwrap().error(&[1.0, 3.0], mean, &mut rng);
        assert_eq!(err, Ok(1.0));
    }

    #[test]
    fn error_of_mean_tracks_standard_error() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let series: Vec<f64> = (0..400).map(|i| (i % 20) as f64).collect();
        let se = crate::standard_error(&series).unwrap();
        let boot = Bootstrap::default().error(&series, mean, &mut rng).unwrap();
        assert!((boot - se).abs() / se < 0.2, "bootstrap {boot} vs analytic {se}");
    }

    #[test]
    fn statistic_errors_propagate() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let err = Bootstrap::default().error(&[1.0], |_| Err(StatsError::NoResamples), &mut rng);
        assert_eq!(err, Err(StatsError::NoResamples));
    }
}
