//! Seekable video sources.

use hangtime_common::error::HangtimeResult;
use hangtime_motion_core::RasterFrame;

/// Slack for grid instants that float error puts just below a frame boundary.
const FRAME_BOUNDARY_EPSILON: f64 = 1e-9;

/// Index of the frame on screen at `time_secs` in a clip of `frame_count`
/// frames played at `fps`.
///
/// Frame `k` covers `[k / fps, (k + 1) / fps)`. Times past the end map to the
/// last frame.
pub fn frame_index_at(time_secs: f64, fps: f64, frame_count: usize) -> usize {
    let position = time_secs.max(0.0) * fps + FRAME_BOUNDARY_EPSILON;
    (position.floor() as usize).min(frame_count.saturating_sub(1))
}

/// A seekable, read-only source of decoded frames.
///
/// Seeking is a side effect on the provider, so callers must await each
/// [`seek`](VideoProvider::seek) before reading the frame and never overlap
/// seeks.
#[async_trait::async_trait]
pub trait VideoProvider: Send {
    /// Short name for logging.
    fn name(&self) -> &str;

    /// Whether a video is present at all.
    fn is_loaded(&self) -> bool;

    /// Duration in seconds, if known.
    fn duration_secs(&self) -> Option<f64>;

    /// Native frame size in pixels.
    fn dimensions(&self) -> (u32, u32);

    /// Move to the frame shown at `time_secs` and decode it.
    async fn seek(&mut self, time_secs: f64) -> HangtimeResult<()>;

    /// The frame decoded by the last completed seek.
    fn current_frame(&self) -> HangtimeResult<RasterFrame>;
}
