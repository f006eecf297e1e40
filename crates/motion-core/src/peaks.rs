//! Peak finding over the smoothed motion series.

use hangtime_jump_model::event::Peak;

/// Samples at each end of the series that are never considered peaks.
pub const EDGE_MARGIN: usize = 5;

/// A peak must strictly exceed this many neighbors on each side.
pub const NEIGHBOR_REACH: usize = 2;

/// Local maxima of `smoothed` above `threshold`, strongest first.
///
/// Only indices `EDGE_MARGIN ..= n - 1 - EDGE_MARGIN` are scanned. A peak must
/// be strictly greater than `threshold` and than its neighbors at offsets ±1
/// and ±2. Equal values are ordered by ascending index.
pub fn find_peaks(smoothed: &[f64], threshold: f64) -> Vec<Peak> {
    let n = smoothed.len();
    if n < 2 * EDGE_MARGIN + 1 {
        return vec![];
    }

    let mut peaks: Vec<Peak> = (EDGE_MARGIN..n - EDGE_MARGIN)
        .filter(|&i| {
            let v = smoothed[i];
            v > threshold
                && (1..=NEIGHBOR_REACH).all(|d| v > smoothed[i - d] && v > smoothed[i + d])
        })
        .map(|i| Peak::new(i, smoothed[i]))
        .collect();

    peaks.sort_by(|a, b| b.value.total_cmp(&a.value).then(a.index.cmp(&b.index)));
    peaks
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_single_spike() {
        let mut series = vec![0.0; 60];
        series[30] = 100.0;
        let peaks = find_peaks(&series, 10.0);
        assert_eq!(peaks, vec![Peak::new(30, 100.0)]);
    }

    #[test]
    fn test_edges_are_excluded() {
        let mut series = vec![0.0; 30];
        series[4] = 50.0;
        series[25] = 50.0;
        assert!(find_peaks(&series, 1.0).is_empty());

        series[5] = 60.0;
        series[24] = 60.0;
        let peaks = find_peaks(&series, 1.0);
        assert_eq!(peaks.len(), 2);
        assert_eq!(peaks[0].index, 5);
        assert_eq!(peaks[1].index, 24);
    }

    #[test]
    fn test_plateau_is_not_a_peak() {
        let mut series = vec![0.0; 30];
        series[14] = 8.0;
        series[15] = 8.0;
        assert!(find_peaks(&series, 1.0).is_empty());
    }

    #[test]
    fn test_must_beat_second_neighbor() {
        let mut series = vec![0.0; 30];
        series[13] = 9.0;
        series[14] = 1.0;
        series[15] = 8.0;
        let peaks = find_peaks(&series, 0.5);
        assert_eq!(peaks, vec![Peak::new(13, 9.0)]);
    }

    #[test]
    fn test_threshold_is_strict() {
        let mut series = vec![0.0; 30];
        series[15] = 10.0;
        assert!(find_peaks(&series, 10.0).is_empty());
    }

    #[test]
    fn test_ranking_ties_by_index() {
        let mut series = vec![0.0; 40];
        series[10] = 5.0;
        series[20] = 7.0;
        series[30] = 5.0;
        let indices: Vec<usize> = find_peaks(&series, 1.0).iter().map(|p| p.index).collect();
        assert_eq!(indices, vec![20, 10, 30]);
    }

    #[test]
    fn test_short_series_has_no_peaks() {
        assert!(find_peaks(&[0.0, 9.0, 0.0], 1.0).is_empty());
        assert!(find_peaks(&[], 1.0).is_empty());
    }

    proptest! {
        #[test]
        fn peaks_respect_bounds_threshold_and_order(
            series in prop::collection::vec(0.0f64..100.0, 0..150),
            threshold in 0.0f64..80.0,
        ) {
            let peaks = find_peaks(&series, threshold);
            for peak in &peaks {
                prop_assert!(peak.index >= EDGE_MARGIN);
                prop_assert!(peak.index + EDGE_MARGIN < series.len());
                prop_assert!(peak.value > threshold);
                prop_assert_eq!(peak.value, series[peak.index]);
            }
            for pair in peaks.windows(2) {
                prop_assert!(pair[0].value >= pair[1].value);
            }
        }
    }
}
