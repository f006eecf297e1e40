//! Serializable summary of a detection run.

use chrono::{DateTime, Utc};
use hangtime_jump_model::event::{EventSource, JumpEvent, Peak};
use hangtime_jump_model::height::{HeightUnit, JumpHeight, PerformanceCategory};
use serde::Serialize;

/// What a detection run produced, in a form suitable for JSON output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionReport {
    #[serde(flatten)]
    pub event: JumpEvent,
    #[serde(flatten)]
    pub source: EventSource,
    pub sample_rate_hz: u32,
    /// Grid instants covering the clip.
    pub sample_count: usize,
    /// Samples actually measured.
    pub samples_analyzed: usize,
    pub mean: Option<f64>,
    pub std_dev: Option<f64>,
    pub threshold: Option<f64>,
    pub peaks: Vec<Peak>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<JumpHeight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<PerformanceCategory>,
    pub analyzed_at: DateTime<Utc>,
}

impl DetectionReport {
    /// Fill in the height and category for `unit`.
    pub fn with_height(mut self, unit: HeightUnit) -> Self {
        self.height = hangtime_motion_core::jump_height(
            self.event.takeoff_secs,
            self.event.landing_secs,
            unit,
        );
        self.category = PerformanceCategory::for_height(self.height);
        self
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
