//! Sequential frame sampling.
//!
//! The sampler walks the virtual sampling grid one instant at a time: seek,
//! await the decoded frame, measure region motion, yield. Only one seek is
//! ever outstanding.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use hangtime_common::clock::{SampleClock, MAX_SAMPLES};
use hangtime_common::error::{HangtimeError, HangtimeResult};
use hangtime_motion_core::{FrameMotion, RegionMotionExtractor};

use crate::provider::VideoProvider;

/// Motion measured at one grid instant.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionSample {
    pub index: usize,
    pub time_secs: f64,
    pub motion: FrameMotion,
}

impl MotionSample {
    /// Summed motion over all regions.
    pub fn value(&self) -> f64 {
        self.motion.total()
    }
}

/// Async generator of [`MotionSample`]s over a provider.
pub struct MotionSampler<'a, P: VideoProvider + ?Sized> {
    provider: &'a mut P,
    clock: SampleClock,
    total: usize,
    next_index: usize,
    extractor: RegionMotionExtractor,
    stop_flag: Arc<AtomicBool>,
    finished: bool,
}

impl<'a, P: VideoProvider + ?Sized> MotionSampler<'a, P> {
    /// Prepare to sample `provider` at `clock`'s rate.
    ///
    /// Fails if no video is loaded, the provider reports an empty frame size, or
    /// the clip would need more than [`MAX_SAMPLES`] grid instants.
    pub fn new(
        provider: &'a mut P,
        clock: SampleClock,
        stop_flag: Arc<AtomicBool>,
    ) -> HangtimeResult<Self> {
        if !provider.is_loaded() {
            return Err(HangtimeError::MissingVideo);
        }

        let (width, height) = provider.dimensions();
        if width == 0 || height == 0 {
            return Err(HangtimeError::acquisition(format!(
                "{} reports an empty frame size {}x{}",
                provider.name(),
                width,
                height
            )));
        }

        let total = clock.sample_count(provider.duration_secs());
        if total > MAX_SAMPLES {
            return Err(HangtimeError::acquisition(format!(
                "{} duration {:?}s needs more than {} samples at {} Hz",
                provider.name(),
                provider.duration_secs(),
                MAX_SAMPLES,
                clock.rate_hz()
            )));
        }
        tracing::debug!(
            provider = provider.name(),
            width,
            height,
            rate_hz = clock.rate_hz(),
            total,
            "Sampler ready"
        );

        Ok(Self {
            provider,
            clock,
            total,
            next_index: 0,
            extractor: RegionMotionExtractor::for_jump(width, height),
            stop_flag,
            finished: false,
        })
    }

    /// Number of grid instants covering the clip.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Samples yielded so far.
    pub fn taken(&self) -> usize {
        self.next_index
    }

    pub fn is_cancelled(&self) -> bool {
        self.stop_flag.load(Ordering::Relaxed)
    }

    /// Seek to the next grid instant and measure it.
    ///
    /// Returns `None` once the grid is exhausted, the stop flag is set, or a
    /// previous call failed.
    pub async fn next_sample(&mut self) -> Option<HangtimeResult<MotionSample>> {
        if self.finished || self.next_index >= self.total {
            return None;
        }
        if self.is_cancelled() {
            tracing::debug!(index = self.next_index, "Sampling cancelled");
            self.finished = true;
            return None;
        }

        let index = self.next_index;
        let time_secs = self.clock.time_of(index);

        let result = self.measure(time_secs).await;
        match result {
            Ok(motion) => {
                self.next_index += 1;
                Some(Ok(MotionSample {
                    index,
                    time_secs,
                    motion,
                }))
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }

    async fn measure(&mut self, time_secs: f64) -> HangtimeResult<FrameMotion> {
        self.provider.seek(time_secs).await?;
        let frame = self.provider.current_frame()?;
        self.extractor.process(&frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic::SyntheticVideo;

    fn flag() -> Arc<AtomicBool> {
        Arc::new(AtomicBool::new(false))
    }

    #[tokio::test]
    async fn test_walks_the_grid_in_order() {
        let mut video = SyntheticVideo::new(32, 32, 30.0, 15);
        let mut sampler = MotionSampler::new(&mut video, SampleClock::new(60), flag()).unwrap();
        assert_eq!(sampler.total(), 30);

        let mut indices = Vec::new();
        while let Some(sample) = sampler.next_sample().await {
            let sample = sample.unwrap();
            assert!((sample.time_secs - sample.index as f64 / 60.0).abs() < 1e-12);
            indices.push(sample.index);
        }
        assert_eq!(indices, (0..30).collect::<Vec<_>>());
        assert_eq!(video.seek_log().len(), 30);
    }

    #[tokio::test]
    async fn test_first_sample_is_zero() {
        let mut video = SyntheticVideo::jump_clip();
        let mut sampler = MotionSampler::new(&mut video, SampleClock::new(60), flag()).unwrap();
        let first = sampler.next_sample().await.unwrap().unwrap();
        assert_eq!(first.value(), 0.0);
    }

    #[tokio::test]
    async fn test_unloaded_video_is_rejected() {
        let mut video = SyntheticVideo::unloaded();
        let err = MotionSampler::new(&mut video, SampleClock::new(60), flag())
            .err()
            .unwrap();
        assert!(matches!(err, HangtimeError::MissingVideo));
    }

    #[tokio::test]
    async fn test_empty_frame_size_is_acquisition_error() {
        let mut video = SyntheticVideo::new(0, 10, 30.0, 10);
        let err = MotionSampler::new(&mut video, SampleClock::new(60), flag())
            .err()
            .unwrap();
        assert!(err.is_precondition());
    }

    #[tokio::test]
    async fn test_oversized_grid_is_acquisition_error() {
        let mut video = SyntheticVideo::new(16, 16, 1e-300, 1);
        let err = MotionSampler::new(&mut video, SampleClock::new(60), flag())
            .err()
            .unwrap();
        assert!(matches!(err, HangtimeError::Acquisition { .. }));
        assert!(video.seek_log().is_empty());
    }

    #[tokio::test]
    async fn test_stops_after_error() {
        let mut video = SyntheticVideo::new(16, 16, 60.0, 60).failing_on_seek(3);
        let mut sampler = MotionSampler::new(&mut video, SampleClock::new(60), flag()).unwrap();

        for _ in 0..3 {
            assert!(sampler.next_sample().await.unwrap().is_ok());
        }
        assert!(sampler.next_sample().await.unwrap().is_err());
        assert!(sampler.next_sample().await.is_none());
        assert_eq!(sampler.taken(), 3);
    }

    #[tokio::test]
    async fn test_stop_flag_ends_sampling() {
        let stop = flag();
        let mut video = SyntheticVideo::new(16, 16, 60.0, 60);
        let mut sampler = MotionSampler::new(&mut video, SampleClock::new(60), stop.clone()).unwrap();

        assert!(sampler.next_sample().await.is_some());
        stop.store(true, Ordering::SeqCst);
        assert!(sampler.next_sample().await.is_none());
        assert!(sampler.is_cancelled());
        assert_eq!(video.seek_log().len(), 1);
    }
}
