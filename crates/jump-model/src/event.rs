//! Motion peaks and jump events.

use serde::{Deserialize, Serialize};

/// A local maximum of the smoothed motion series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Peak {
    /// Sample index in the motion series.
    pub index: usize,
    /// Smoothed motion value at `index`.
    pub value: f64,
}

impl Peak {
    pub fn new(index: usize, value: f64) -> Self {
        Self { index, value }
    }

    /// Time of the peak in seconds for a given sample rate.
    pub fn time_secs(&self, sample_rate_hz: u32) -> f64 {
        self.index as f64 / sample_rate_hz.max(1) as f64
    }
}

/// Takeoff and landing timestamps of a single jump, in seconds.
///
/// Both marks start unset. Nothing here enforces `landing > takeoff`; use
/// [`JumpEvent::is_causal`] to check.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct JumpEvent {
    #[serde(rename = "takeoff_time")]
    pub takeoff_secs: Option<f64>,
    #[serde(rename = "landing_time")]
    pub landing_secs: Option<f64>,
}

impl JumpEvent {
    /// A fully marked event.
    pub fn new(takeoff_secs: f64, landing_secs: f64) -> Self {
        Self {
            takeoff_secs: Some(takeoff_secs),
            landing_secs: Some(landing_secs),
        }
    }

    /// Both marks are set.
    pub fn is_complete(&self) -> bool {
        self.takeoff_secs.is_some() && self.landing_secs.is_some()
    }

    /// Both marks are set and landing comes strictly after takeoff.
    pub fn is_causal(&self) -> bool {
        matches!(
            (self.takeoff_secs, self.landing_secs),
            (Some(t), Some(l)) if l > t
        )
    }

    /// `landing - takeoff`, possibly negative, or `None` if a mark is missing.
    pub fn hang_time_secs(&self) -> Option<f64> {
        Some(self.landing_secs? - self.takeoff_secs?)
    }
}

/// Why detection substituted the fallback timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum FallbackReason {
    /// The clip had no duration, so nothing was sampled.
    EmptyVideo,
    /// Fewer than two peaks exceeded the threshold.
    TooFewPeaks { found: usize },
    /// Fewer than two peaks lay inside the relevant part of the clip.
    TooFewRelevantPeaks { found: usize },
    /// Sampling failed part-way through.
    RuntimeError,
    /// The run was stopped before sampling finished.
    Cancelled,
}

/// Where a jump event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum EventSource {
    /// Two motion peaks were found and used.
    Detected,
    /// The configured fallback pair was used.
    Fallback {
        #[serde(flatten)]
        reason: FallbackReason,
    },
    /// The user marked the times by hand.
    Manual,
}

impl EventSource {
    pub fn fallback(reason: FallbackReason) -> Self {
        Self::Fallback { reason }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

impl std::fmt::Display for EventSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Detected => write!(f, "detected"),
            Self::Manual => write!(f, "manual"),
            Self::Fallback { reason } => match reason {
                FallbackReason::EmptyVideo => write!(f, "fallback (empty video)"),
                FallbackReason::TooFewPeaks { found } => {
                    write!(f, "fallback ({found} peak(s) above threshold)")
                }
                FallbackReason::TooFewRelevantPeaks { found } => {
                    write!(f, "fallback ({found} peak(s) in the jump window)")
                }
                FallbackReason::RuntimeError => write!(f, "fallback (sampling error)"),
                FallbackReason::Cancelled => write!(f, "fallback (cancelled)"),
            },
        }
    }
}
