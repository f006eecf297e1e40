//! Virtual sampling clock.
//!
//! Detection never walks a video at its native frame rate. Instead it lays a
//! fixed grid of instants `t_i = i / rate` over the clip and seeks to each one.
//! This module owns that grid and the progress bookkeeping that goes with it.

/// Largest grid a single run will walk: a little over eleven hours at 240 Hz.
pub const MAX_SAMPLES: usize = 10_000_000;

/// A fixed-rate sampling grid over a clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleClock {
    rate_hz: u32,
}

impl SampleClock {
    /// Create a clock sampling at `rate_hz` samples per second.
    ///
    /// A rate of zero is clamped to one sample per second.
    pub fn new(rate_hz: u32) -> Self {
        Self {
            rate_hz: rate_hz.max(1),
        }
    }

    /// Samples per second.
    pub fn rate_hz(&self) -> u32 {
        self.rate_hz
    }

    /// Number of grid points covering a clip: `floor(duration * rate)`.
    ///
    /// Unknown, non-finite, zero or negative durations yield zero samples.
    /// Absurd durations saturate at `usize::MAX`; see [`MAX_SAMPLES`].
    pub fn sample_count(&self, duration_secs: Option<f64>) -> usize {
        match duration_secs {
            Some(d) if d.is_finite() && d > 0.0 => (d * self.rate_hz as f64).floor() as usize,
            _ => 0,
        }
    }

    /// Timestamp of grid point `index` in seconds.
    ///
    /// Computed directly from the index so long clips do not accumulate drift.
    pub fn time_of(&self, index: usize) -> f64 {
        index as f64 / self.rate_hz as f64
    }

    /// All grid instants for a clip.
    pub fn instants(&self, duration_secs: Option<f64>) -> impl Iterator<Item = f64> + '_ {
        (0..self.sample_count(duration_secs)).map(move |i| self.time_of(i))
    }
}

/// Converts processed-sample counts into whole percentages, reporting each
/// percentage at most once.
#[derive(Debug)]
pub struct ProgressTracker {
    total: usize,
    last_percent: Option<u8>,
}

impl ProgressTracker {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            last_percent: None,
        }
    }

    /// Percentage after `done` samples, or `None` if unchanged since the last call.
    pub fn update(&mut self, done: usize) -> Option<u8> {
        let percent = if self.total == 0 {
            100
        } else {
            ((done.min(self.total) * 100) / self.total) as u8
        };

        if self.last_percent == Some(percent) {
            return None;
        }
        self.last_percent = Some(percent);
        Some(percent)
    }
}
