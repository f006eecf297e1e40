//! The detection pipeline.
//!
//! Precondition failures (no video, no frame surface, unreadable source) abort
//! the run with an error. Anything that goes wrong once sampling has started is
//! reported to the observer and answered with the fallback marks.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use hangtime_common::clock::{ProgressTracker, SampleClock};
use hangtime_common::config::DetectionConfig;
use hangtime_common::error::HangtimeResult;
use hangtime_jump_model::event::{EventSource, FallbackReason, JumpEvent};
use hangtime_jump_model::height::HeightUnit;
use hangtime_motion_core::{
    JumpMeasurement, MotionSeries, SelectionState, SignalAnalysis, SignalAnalyzer,
};

use crate::observer::DetectionObserver;
use crate::provider::VideoProvider;
use crate::report::DetectionReport;
use crate::sampler::MotionSampler;

/// Samples reserved up front; longer series grow as they are filled.
const PREALLOCATED_SAMPLES: usize = 1 << 16;

/// Result of one detection run.
#[derive(Debug, Clone)]
pub struct DetectionOutcome {
    pub event: JumpEvent,
    pub source: EventSource,
    pub sample_rate_hz: u32,
    pub sample_count: usize,
    pub series: MotionSeries,
    /// Present when the series was analysed.
    pub analysis: Option<SignalAnalysis>,
    /// Message of the runtime failure that forced the fallback.
    pub error: Option<String>,
}

impl DetectionOutcome {
    pub fn is_fallback(&self) -> bool {
        self.source.is_fallback()
    }

    /// Height measurement for the chosen marks.
    pub fn measurement(&self, unit: HeightUnit) -> Option<JumpMeasurement> {
        JumpMeasurement::from_event(&self.event, unit)
    }

    fn with_error(mut self, message: String) -> Self {
        self.error = Some(message);
        self
    }

    pub fn report(&self) -> DetectionReport {
        let stats = self.analysis.as_ref().and_then(|a| a.stats);
        DetectionReport {
            event: self.event,
            source: self.source,
            sample_rate_hz: self.sample_rate_hz,
            sample_count: self.sample_count,
            samples_analyzed: self.series.len(),
            mean: stats.map(|s| s.mean),
            std_dev: stats.map(|s| s.std_dev),
            threshold: self.analysis.as_ref().and_then(|a| a.threshold),
            peaks: self
                .analysis
                .as_ref()
                .map(|a| a.peaks.clone())
                .unwrap_or_default(),
            error: self.error.clone(),
            height: None,
            category: None,
            analyzed_at: Utc::now(),
        }
    }
}

/// Finds takeoff and landing in a video.
pub struct JumpDetector {
    config: DetectionConfig,
    analyzer: SignalAnalyzer,
    stop_flag: Arc<AtomicBool>,
}

impl JumpDetector {
    pub fn new(config: DetectionConfig) -> Self {
        Self {
            config,
            analyzer: SignalAnalyzer::new(config),
            stop_flag: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(DetectionConfig::default())
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Request that a running detection stop before its next seek.
    ///
    /// Each call to [`detect`](Self::detect) clears the flag when it starts, so
    /// a stop only affects the run in progress.
    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::SeqCst);
    }

    /// Get the stop flag for external coordination.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        self.stop_flag.clone()
    }

    /// Sample `provider`, analyse the motion series and pick the jump marks.
    pub async fn detect<P: VideoProvider + ?Sized>(
        &self,
        provider: &mut P,
        observer: &dyn DetectionObserver,
    ) -> HangtimeResult<DetectionOutcome> {
        self.stop_flag.store(false, Ordering::SeqCst);
        let clock = SampleClock::new(self.config.sample_rate_hz);

        let mut sampler = match MotionSampler::new(provider, clock, self.stop_flag.clone()) {
            Ok(sampler) => sampler,
            Err(e) => {
                observer.on_error(&e.to_string());
                return Err(e);
            }
        };

        let sample_count = sampler.total();
        tracing::info!(
            sample_rate_hz = clock.rate_hz(),
            sample_count,
            "Starting jump detection"
        );

        let mut series = MotionSeries::with_capacity(sample_count.min(PREALLOCATED_SAMPLES));
        let mut progress = ProgressTracker::new(sample_count);
        let mut runtime_error = None;

        while let Some(sample) = sampler.next_sample().await {
            match sample {
                Ok(sample) => {
                    series.push(&sample.motion);
                    if let Some(percent) = progress.update(sample.index + 1) {
                        observer.on_progress(percent);
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Sampling failed, using fallback times");
                    observer.on_error(&e.to_string());
                    runtime_error = Some(e.to_string());
                }
            }
        }
        let cancelled = sampler.is_cancelled() && series.len() < sample_count;

        let outcome = if let Some(message) = runtime_error {
            self.fallback_outcome(series, sample_count, FallbackReason::RuntimeError)
                .with_error(message)
        } else if cancelled {
            tracing::info!(samples = series.len(), "Detection cancelled");
            self.fallback_outcome(series, sample_count, FallbackReason::Cancelled)
        } else {
            if sample_count == 0 {
                observer.on_progress(100);
            }
            let analysis = self.analyzer.analyze(series.values());
            DetectionOutcome {
                event: analysis.selection.event,
                source: analysis.selection.source,
                sample_rate_hz: clock.rate_hz(),
                sample_count,
                series,
                analysis: Some(analysis),
                error: None,
            }
        };

        tracing::info!(
            takeoff = ?outcome.event.takeoff_secs,
            landing = ?outcome.event.landing_secs,
            source = %outcome.source,
            "Jump detection complete"
        );
        observer.on_result(&outcome.event);
        Ok(outcome)
    }

    fn fallback_outcome(
        &self,
        series: MotionSeries,
        sample_count: usize,
        reason: FallbackReason,
    ) -> DetectionOutcome {
        let selection = self
            .analyzer
            .selector()
            .fallback(SelectionState::NoPeaks, reason);
        DetectionOutcome {
            event: selection.event,
            source: selection.source,
            sample_rate_hz: self.config.sample_rate_hz.max(1),
            sample_count,
            series,
            analysis: None,
            error: None,
        }
    }
}
