//! Takeoff/landing selection from ranked peaks.
//!
//! Selection walks a small state machine:
//!
//! ```text
//! NoPeaks ──(≥ 2 peaks)──▶ InsufficientRelevantPeaks ──(≥ 2 in window)──▶ Resolved
//!    │                               │
//!    └──────────── fallback ◀────────┘
//! ```
//!
//! Any path that does not reach `Resolved` with two peaks substitutes the
//! configured fallback pair and tags the result accordingly.

use hangtime_common::config::{FallbackPolicy, RelevantWindow};
use hangtime_jump_model::event::{EventSource, FallbackReason, JumpEvent, Peak};
use serde::Serialize;

/// Where selection stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionState {
    /// Fewer than two peaks in total.
    NoPeaks,
    /// Enough peaks overall, but fewer than two inside the jump window.
    InsufficientRelevantPeaks,
    /// Two peaks were chosen.
    Resolved,
}

/// Outcome of event selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub event: JumpEvent,
    pub source: EventSource,
    pub state: SelectionState,
    /// The two chosen peaks, takeoff first, when resolved.
    pub chosen: Option<(Peak, Peak)>,
}

/// Chooses the takeoff/landing peaks, or falls back.
#[derive(Debug, Clone, Copy)]
pub struct EventSelector {
    sample_rate_hz: u32,
    window: RelevantWindow,
    fallback: FallbackPolicy,
}

impl EventSelector {
    pub fn new(sample_rate_hz: u32, window: RelevantWindow, fallback: FallbackPolicy) -> Self {
        Self {
            sample_rate_hz: sample_rate_hz.max(1),
            window,
            fallback,
        }
    }

    /// The fallback pair tagged with `reason`.
    pub fn fallback(&self, state: SelectionState, reason: FallbackReason) -> Selection {
        tracing::debug!(?state, ?reason, "Using fallback takeoff/landing times");
        Selection {
            event: JumpEvent::new(self.fallback.takeoff_secs, self.fallback.landing_secs),
            source: EventSource::fallback(reason),
            state,
            chosen: None,
        }
    }

    /// Whether `index` lies strictly inside the jump window of `total_samples`.
    pub fn is_relevant(&self, index: usize, total_samples: usize) -> bool {
        let i = index as f64;
        let n = total_samples as f64;
        i > n * self.window.start && i < n * self.window.end
    }

    /// Select from `ranked` peaks (strongest first) over `total_samples` samples.
    pub fn select(&self, ranked: &[Peak], total_samples: usize) -> Selection {
        if ranked.len() < 2 {
            return self.fallback(
                SelectionState::NoPeaks,
                FallbackReason::TooFewPeaks {
                    found: ranked.len(),
                },
            );
        }

        let relevant: Vec<Peak> = ranked
            .iter()
            .copied()
            .filter(|p| self.is_relevant(p.index, total_samples))
            .collect();

        if relevant.len() < 2 {
            return self.fallback(
                SelectionState::InsufficientRelevantPeaks,
                FallbackReason::TooFewRelevantPeaks {
                    found: relevant.len(),
                },
            );
        }

        let (first, second) = (relevant[0], relevant[1]);
        let (takeoff, landing) = if first.index <= second.index {
            (first, second)
        } else {
            (second, first)
        };

        tracing::debug!(
            takeoff_index = takeoff.index,
            landing_index = landing.index,
            "Resolved takeoff/landing peaks"
        );

        Selection {
            event: JumpEvent::new(
                takeoff.time_secs(self.sample_rate_hz),
                landing.time_secs(self.sample_rate_hz),
            ),
            source: EventSource::Detected,
            state: SelectionState::Resolved,
            chosen: Some((takeoff, landing)),
        }
    }
}

impl Default for EventSelector {
    fn default() -> Self {
        Self::new(60, RelevantWindow::default(), FallbackPolicy::default())
    }
}
