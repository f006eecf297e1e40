//! Signal analysis: from a raw motion series to a jump event.
//!
//! Chains smoothing, statistics, peak finding and event selection. Every
//! stage is exposed on [`SignalAnalysis`] so callers can report or plot it.

use hangtime_common::config::DetectionConfig;
use hangtime_jump_model::event::{FallbackReason, Peak};
use serde::Serialize;

use crate::peaks::find_peaks;
use crate::selection::{EventSelector, Selection, SelectionState};
use crate::smoothing::MotionSmoother;
use crate::stats::SeriesStats;

/// Intermediate and final results of analysing one motion series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalAnalysis {
    pub smoothed: Vec<f64>,
    pub stats: Option<SeriesStats>,
    pub threshold: Option<f64>,
    /// Peaks above threshold, strongest first.
    pub peaks: Vec<Peak>,
    pub selection: Selection,
}

/// Runs the detection stages over a motion series.
pub struct SignalAnalyzer {
    config: DetectionConfig,
    smoother: MotionSmoother,
    selector: EventSelector,
}

impl SignalAnalyzer {
    pub fn new(config: DetectionConfig) -> Self {
        Self {
            config,
            smoother: MotionSmoother::new(config.smoothing_half_window),
            selector: EventSelector::new(
                config.sample_rate_hz,
                config.relevant_window,
                config.fallback,
            ),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(DetectionConfig::default())
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    pub fn selector(&self) -> &EventSelector {
        &self.selector
    }

    /// Analyse `raw` motion values sampled at the configured rate.
    pub fn analyze(&self, raw: &[f64]) -> SignalAnalysis {
        if raw.is_empty() {
            tracing::info!("Motion series is empty, using fallback times");
            return SignalAnalysis {
                smoothed: Vec::new(),
                stats: None,
                threshold: None,
                peaks: Vec::new(),
                selection: self
                    .selector
                    .fallback(SelectionState::NoPeaks, FallbackReason::EmptyVideo),
            };
        }

        let smoothed = self.smoother.smooth(raw);
        let stats = SeriesStats::of(&smoothed);
        let threshold = stats.map(|s| s.threshold(self.config.threshold_multiplier));
        let peaks = threshold
            .map(|t| find_peaks(&smoothed, t))
            .unwrap_or_default();

        tracing::debug!(
            samples = raw.len(),
            mean = stats.map(|s| s.mean),
            std_dev = stats.map(|s| s.std_dev),
            threshold,
            peaks = peaks.len(),
            "Analysed motion series"
        );

        let selection = self.selector.select(&peaks, raw.len());

        SignalAnalysis {
            smoothed,
            stats,
            threshold,
            peaks,
            selection,
        }
    }
}
