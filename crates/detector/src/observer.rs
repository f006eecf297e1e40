//! Callbacks for detection progress, errors and results.

use hangtime_jump_model::event::JumpEvent;

/// Receives notifications from a detection run.
///
/// All methods default to no-ops. Progress is best-effort and may skip values.
pub trait DetectionObserver: Send + Sync {
    /// Whole-number percentage of samples processed.
    fn on_progress(&self, _percent: u8) {}

    /// A failure was reported; the run may still produce a fallback result.
    fn on_error(&self, _message: &str) {}

    /// Final takeoff/landing marks of the run.
    fn on_result(&self, _event: &JumpEvent) {}
}

/// Ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl DetectionObserver for NullObserver {}

/// Forwards notifications to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl DetectionObserver for TracingObserver {
    fn on_progress(&self, percent: u8) {
        if percent % 10 == 0 {
            tracing::info!(percent, "Detection progress");
        } else {
            tracing::trace!(percent, "Detection progress");
        }
    }

    fn on_error(&self, message: &str) {
        tracing::error!(error = %message, "Detection error");
    }

    fn on_result(&self, event: &JumpEvent) {
        tracing::info!(
            takeoff = ?event.takeoff_secs,
            landing = ?event.landing_secs,
            "Detection finished"
        );
    }
}
