//! Per-region motion extraction and aggregation.
//!
//! Each sampled frame is compared region by region against the previous
//! sample. The per-region values are summed into one motion-intensity value
//! per sample, building the raw motion series.

use hangtime_common::error::{HangtimeError, HangtimeResult};
use hangtime_jump_model::roi::{jump_regions, NamedRegion, RegionKind};
use serde::Serialize;

use crate::frame::{RasterFrame, RegionRaster};

/// Motion measured for one sampled frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameMotion {
    /// Motion value for each region, in region order.
    pub per_region: Vec<(RegionKind, f64)>,
}

impl FrameMotion {
    /// Equal-weight sum over all regions.
    pub fn total(&self) -> f64 {
        self.per_region.iter().map(|(_, v)| v).sum()
    }

    pub fn region(&self, kind: RegionKind) -> Option<f64> {
        self.per_region
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, v)| *v)
    }
}

/// Computes per-region motion against the previously seen frame.
///
/// The previous raster is kept separately for every region and replaced after
/// each call, so the extractor must see frames in sampling order.
pub struct RegionMotionExtractor {
    regions: Vec<NamedRegion>,
    frame_size: (u32, u32),
    previous: Vec<Option<RegionRaster>>,
}

impl RegionMotionExtractor {
    /// Create an extractor for explicit regions on `width x height` frames.
    pub fn new(regions: Vec<NamedRegion>, width: u32, height: u32) -> Self {
        let previous = vec![None; regions.len()];
        Self {
            regions,
            frame_size: (width, height),
            previous,
        }
    }

    /// Feet and body bands for `width x height` frames.
    pub fn for_jump(width: u32, height: u32) -> Self {
        Self::new(jump_regions(width, height), width, height)
    }

    pub fn regions(&self) -> &[NamedRegion] {
        &self.regions
    }

    /// Whether a previous raster has been seeded.
    pub fn is_primed(&self) -> bool {
        self.previous.iter().all(Option::is_some)
    }

    /// Measure motion in `frame` and keep its regions for the next call.
    ///
    /// The first frame after construction or [`reset`](Self::reset) yields 0
    /// for every region.
    pub fn process(&mut self, frame: &RasterFrame) -> HangtimeResult<FrameMotion> {
        if (frame.width(), frame.height()) != self.frame_size {
            return Err(HangtimeError::FrameSizeChanged {
                expected: self.frame_size,
                actual: (frame.width(), frame.height()),
            });
        }

        let mut per_region = Vec::with_capacity(self.regions.len());
        for (region, previous) in self.regions.iter().zip(self.previous.iter_mut()) {
            let current = frame.region(&region.rect);
            let value = previous
                .as_ref()
                .map(|prev| current.mean_rgb_difference(prev))
                .unwrap_or(0.0);
            *previous = Some(current);
            per_region.push((region.kind, value));
        }

        Ok(FrameMotion { per_region })
    }

    /// Forget all previous rasters.
    pub fn reset(&mut self) {
        self.previous.iter_mut().for_each(|p| *p = None);
    }
}

/// Ordered motion-intensity values, one per sampled frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MotionSeries {
    values: Vec<f64>,
}

impl MotionSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }

    /// Append the summed motion of the next frame.
    pub fn push(&mut self, motion: &FrameMotion) {
        self.values.push(motion.total());
    }

    pub fn push_value(&mut self, value: f64) {
        self.values.push(value);
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

impl From<Vec<f64>> for MotionSeries {
    fn from(values: Vec<f64>) -> Self {
        Self { values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hangtime_jump_model::roi::RegionOfInterest;

    #[test]
    fn test_first_frame_contributes_zero_and_primes() {
        let mut extractor = RegionMotionExtractor::for_jump(20, 20);
        assert!(!extractor.is_primed());

        let motion = extractor
            .process(&RasterFrame::solid(20, 20, [200, 200, 200]))
            .unwrap();
        assert_eq!(motion.total(), 0.0);
        assert_eq!(motion.per_region.len(), 2);
        assert!(extractor.is_primed());
    }

    #[test]
    fn test_uniform_change_counts_once_per_region() {
        let mut extractor = RegionMotionExtractor::for_jump(20, 20);
        extractor
            .process(&RasterFrame::solid(20, 20, [0, 0, 0]))
            .unwrap();
        let motion = extractor
            .process(&RasterFrame::solid(20, 20, [30, 30, 30]))
            .unwrap();

        assert!((motion.region(RegionKind::Feet).unwrap() - 30.0).abs() < 1e-12);
        assert!((motion.region(RegionKind::Body).unwrap() - 30.0).abs() < 1e-12);
        assert!((motion.total() - 60.0).abs() < 1e-12);
    }

    #[test]
    fn test_previous_raster_is_replaced_each_frame() {
        let mut extractor = RegionMotionExtractor::for_jump(10, 10);
        for fill in [0u8, 90, 90] {
            extractor
                .process(&RasterFrame::solid(10, 10, [fill, fill, fill]))
                .unwrap();
        }
        // Third frame equals the second, so nothing moved.
        let motion = extractor
            .process(&RasterFrame::solid(10, 10, [90, 90, 90]))
            .unwrap();
        assert_eq!(motion.total(), 0.0);
    }

    #[test]
    fn test_regions_are_tracked_independently() {
        // Only the top-left corner changes, which lies in the first region only.
        let regions = vec![
            NamedRegion {
                kind: RegionKind::Body,
                rect: RegionOfInterest::new(0, 0, 2, 2),
            },
            NamedRegion {
                kind: RegionKind::Feet,
                rect: RegionOfInterest::new(0, 6, 10, 4),
            },
        ];
        let mut extractor = RegionMotionExtractor::new(regions, 10, 10);
        extractor
            .process(&RasterFrame::solid(10, 10, [0, 0, 0]))
            .unwrap();

        let moved = RasterFrame::from_fn(10, 10, |x, y| {
            if x < 2 && y < 2 {
                [255, 255, 255]
            } else {
                [0, 0, 0]
            }
        });
        let motion = extractor.process(&moved).unwrap();
        assert!((motion.region(RegionKind::Body).unwrap() - 255.0).abs() < 1e-12);
        assert_eq!(motion.region(RegionKind::Feet).unwrap(), 0.0);
    }

    #[test]
    fn test_size_change_is_an_error() {
        let mut extractor = RegionMotionExtractor::for_jump(10, 10);
        let err = extractor
            .process(&RasterFrame::solid(12, 10, [0, 0, 0]))
            .unwrap_err();
        assert!(matches!(err, HangtimeError::FrameSizeChanged { .. }));
    }

    #[test]
    fn test_reset_forgets_previous() {
        let mut extractor = RegionMotionExtractor::for_jump(10, 10);
        extractor
            .process(&RasterFrame::solid(10, 10, [0, 0, 0]))
            .unwrap();
        extractor.reset();
        let motion = extractor
            .process(&RasterFrame::solid(10, 10, [255, 255, 255]))
            .unwrap();
        assert_eq!(motion.total(), 0.0);
    }

    #[test]
    fn test_series_aggregates_totals() {
        let mut series = MotionSeries::new();
        series.push(&FrameMotion {
            per_region: vec![(RegionKind::Feet, 1.5), (RegionKind::Body, 2.0)],
        });
        series.push_value(0.25);
        assert_eq!(series.values(), &[3.5, 0.25]);
        assert_eq!(series.len(), 2);
    }
}
