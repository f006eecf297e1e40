//! Summary statistics and the detection threshold.

use serde::Serialize;

/// Mean and population standard deviation of a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesStats {
    pub mean: f64,
    pub std_dev: f64,
}

impl SeriesStats {
    /// Statistics of `values`, dividing by `n` (not `n - 1`).
    ///
    /// Returns `None` for an empty series.
    pub fn of(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        Some(Self {
            mean,
            std_dev: variance.sqrt(),
        })
    }

    /// `mean + multiplier * std_dev`.
    pub fn threshold(&self, multiplier: f64) -> f64 {
        self.mean + multiplier * self.std_dev
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_series_is_undefined() {
        assert_eq!(SeriesStats::of(&[]), None);
    }

    #[test]
    fn test_population_std_dev() {
        let stats = SeriesStats::of(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((stats.mean - 5.0).abs() < 1e-12);
        assert!((stats.std_dev - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_threshold_multiplier() {
        let stats = SeriesStats {
            mean: 1.0,
            std_dev: 2.0,
        };
        assert!((stats.threshold(2.5) - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_series_threshold_equals_mean() {
        let stats = SeriesStats::of(&[3.0; 10]).unwrap();
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.threshold(2.5), 3.0);
    }
}
