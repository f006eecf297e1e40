//! Temporal smoothing of the motion series.

/// Centered moving average with a shrinking window at the edges.
///
/// `out[i] = mean(raw[max(0, i - w) ..= min(n - 1, i + w)])`. No padding or
/// reflection: boundary samples average over fewer points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionSmoother {
    half_window: usize,
}

impl MotionSmoother {
    pub fn new(half_window: usize) -> Self {
        Self { half_window }
    }

    pub fn half_window(&self) -> usize {
        self.half_window
    }

    /// Smooth `raw`, returning a series of the same length.
    pub fn smooth(&self, raw: &[f64]) -> Vec<f64> {
        if raw.is_empty() || self.half_window == 0 {
            return raw.to_vec();
        }

        // prefix[k] = raw[0] + ... + raw[k - 1]
        let mut prefix = Vec::with_capacity(raw.len() + 1);
        prefix.push(0.0);
        let mut running = 0.0;
        for &v in raw {
            running += v;
            prefix.push(running);
        }

        let last = raw.len() - 1;
        (0..raw.len())
            .map(|i| {
                let start = i.saturating_sub(self.half_window);
                let end = (i + self.half_window).min(last);
                let count = (end - start + 1) as f64;
                let mean = (prefix[end + 1] - prefix[start]) / count;
                // Prefix differences can drift outside the window range by an ulp.
                let (lo, hi) = window_bounds(&raw[start..=end]);
                if lo <= hi {
                    mean.clamp(lo, hi)
                } else {
                    // Window of NaNs only.
                    mean
                }
            })
            .collect()
    }
}

impl Default for MotionSmoother {
    fn default() -> Self {
        Self::new(5)
    }
}

fn window_bounds(window: &[f64]) -> (f64, f64) {
    window
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_constant_series_is_fixed_point() {
        let raw = vec![4.2; 30];
        let smoothed = MotionSmoother::default().smooth(&raw);
        assert_eq!(smoothed, raw);
    }

    #[test]
    fn test_boundary_window_shrinks() {
        let raw: Vec<f64> = (0..20).map(|i| i as f64).collect();
        let smoothed = MotionSmoother::new(5).smooth(&raw);

        // i = 0 averages raw[0..=5].
        assert!((smoothed[0] - 2.5).abs() < 1e-12);
        // i = 10 averages raw[5..=15].
        assert!((smoothed[10] - 10.0).abs() < 1e-12);
        // i = 19 averages raw[14..=19].
        assert!((smoothed[19] - 16.5).abs() < 1e-12);
    }

    #[test]
    fn test_spike_is_spread() {
        let mut raw = vec![0.0; 60];
        raw[30] = 110.0;
        let smoothed = MotionSmoother::new(5).smooth(&raw);
        for (i, v) in smoothed.iter().enumerate() {
            if (25..=35).contains(&i) {
                assert!((v - 10.0).abs() < 1e-12);
            } else {
                assert_eq!(*v, 0.0);
            }
        }
    }

    #[test]
    fn test_repeated_smoothing_changes_general_input() {
        let mut raw = vec![0.0; 40];
        raw[20] = 50.0;
        let smoother = MotionSmoother::default();
        let once = smoother.smooth(&raw);
        let twice = smoother.smooth(&once);
        assert_ne!(once, twice);
    }

    #[test]
    fn test_empty_and_zero_window() {
        assert!(MotionSmoother::default().smooth(&[]).is_empty());
        assert_eq!(MotionSmoother::new(0).smooth(&[1.0, 3.0]), vec![1.0, 3.0]);
    }

    #[test]
    fn test_nan_window_does_not_panic() {
        let raw = vec![f64::NAN; 12];
        let smoothed = MotionSmoother::default().smooth(&raw);
        assert_eq!(smoothed.len(), 12);
        assert!(smoothed.iter().all(|v| v.is_nan()));

        let mut mixed = vec![1.0; 12];
        mixed[6] = f64::NAN;
        assert_eq!(MotionSmoother::new(1).smooth(&mixed)[0], 1.0);
    }

    proptest! {
        #[test]
        fn smoothing_keeps_length_and_window_bounds(
            raw in prop::collection::vec(0.0f64..1000.0, 0..200),
            half_window in 0usize..12,
        ) {
            let smoothed = MotionSmoother::new(half_window).smooth(&raw);
            prop_assert_eq!(smoothed.len(), raw.len());

            for (i, v) in smoothed.iter().enumerate() {
                let start = i.saturating_sub(half_window);
                let end = (i + half_window).min(raw.len() - 1);
                let (lo, hi) = window_bounds(&raw[start..=end]);
                prop_assert!(*v >= lo && *v <= hi, "smoothed[{}]={} outside [{}, {}]", i, v, lo, hi);
            }
        }
    }
}
