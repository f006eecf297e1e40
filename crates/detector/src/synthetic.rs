//! Deterministic in-memory video for tests and demos.
//!
//! A light block slides horizontally across a dark background near the bottom
//! of the frame. It rests between bursts; during a burst its per-frame
//! displacement rises linearly to a peak speed and falls back, so the motion
//! signal of each burst is a triangle centered on the burst frame.

use hangtime_common::error::{HangtimeError, HangtimeResult};
use hangtime_motion_core::RasterFrame;

use crate::provider::{frame_index_at, VideoProvider};

const BACKGROUND: [u8; 3] = [20, 20, 20];
const BLOCK: [u8; 3] = [220, 220, 220];

/// One movement of the block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionBurst {
    /// Frame with the fastest movement.
    pub center_frame: usize,
    /// Pixels moved on the center frame; neighbours move one pixel less per
    /// frame of distance.
    pub peak_speed: u32,
    /// Move right when true, left otherwise.
    pub rightward: bool,
}

impl MotionBurst {
    pub fn new(center_frame: usize, peak_speed: u32, rightward: bool) -> Self {
        Self {
            center_frame,
            peak_speed,
            rightward,
        }
    }

    /// Signed displacement between `frame - 1` and `frame`.
    fn step(&self, frame: usize) -> i64 {
        let distance = frame.abs_diff(self.center_frame) as i64;
        let speed = (self.peak_speed as i64 - distance).max(0);
        if self.rightward {
            speed
        } else {
            -speed
        }
    }
}

/// An in-memory clip rendered on demand.
#[derive(Debug, Clone)]
pub struct SyntheticVideo {
    width: u32,
    height: u32,
    fps: f64,
    frame_count: usize,
    loaded: bool,
    block_size: (u32, u32),
    block_origin: (i64, i64),
    bursts: Vec<MotionBurst>,
    fail_on_seek: Option<usize>,
    seek_log: Vec<f64>,
    current: Option<usize>,
}

impl SyntheticVideo {
    /// A still clip of `frame_count` frames at `fps`.
    pub fn new(width: u32, height: u32, fps: f64, frame_count: usize) -> Self {
        let block_size = ((width / 6).max(1), (height / 10).max(1));
        let block_origin = (width as i64 / 4, height as i64 * 4 / 5);
        Self {
            width,
            height,
            fps,
            frame_count,
            loaded: true,
            block_size,
            block_origin,
            bursts: Vec::new(),
            fail_on_seek: None,
            seek_log: Vec::new(),
            current: None,
        }
    }

    /// A four-second 160x120 clip at 60 fps with takeoff movement at 1.0 s and
    /// landing movement at 1.7 s.
    pub fn jump_clip() -> Self {
        Self::new(160, 120, 60.0, 240)
            .with_burst(MotionBurst::new(60, 6, true))
            .with_burst(MotionBurst::new(102, 6, false))
    }

    /// A provider with no video behind it.
    pub fn unloaded() -> Self {
        Self {
            loaded: false,
            ..Self::new(0, 0, 60.0, 0)
        }
    }

    pub fn with_burst(mut self, burst: MotionBurst) -> Self {
        self.bursts.push(burst);
        self
    }

    /// Make the seek with zero-based number `seek_number` fail.
    pub fn failing_on_seek(mut self, seek_number: usize) -> Self {
        self.fail_on_seek = Some(seek_number);
        self
    }

    /// Times passed to every seek so far, in call order.
    pub fn seek_log(&self) -> &[f64] {
        &self.seek_log
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Horizontal block position on `frame`.
    pub fn block_x(&self, frame: usize) -> i64 {
        let moved: i64 = (1..=frame)
            .map(|f| self.bursts.iter().map(|b| b.step(f)).sum::<i64>())
            .sum();
        self.block_origin.0 + moved
    }

    /// Render `frame` as RGBA.
    pub fn render(&self, frame: usize) -> RasterFrame {
        let left = self.block_x(frame);
        let top = self.block_origin.1;
        let (bw, bh) = (self.block_size.0 as i64, self.block_size.1 as i64);

        RasterFrame::from_fn(self.width, self.height, |x, y| {
            let (x, y) = (x as i64, y as i64);
            if x >= left && x < left + bw && y >= top && y < top + bh {
                BLOCK
            } else {
                BACKGROUND
            }
        })
    }

    fn frame_at(&self, time_secs: f64) -> usize {
        frame_index_at(time_secs, self.fps, self.frame_count)
    }
}

#[async_trait::async_trait]
impl VideoProvider for SyntheticVideo {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn duration_secs(&self) -> Option<f64> {
        if !self.loaded || self.fps <= 0.0 {
            return None;
        }
        Some(self.frame_count as f64 / self.fps)
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    async fn seek(&mut self, time_secs: f64) -> HangtimeResult<()> {
        let seek_number = self.seek_log.len();
        self.seek_log.push(time_secs);

        if self.fail_on_seek == Some(seek_number) {
            self.current = None;
            return Err(HangtimeError::decode(time_secs, "synthetic seek failure"));
        }

        self.current = Some(self.frame_at(time_secs));
        Ok(())
    }

    fn current_frame(&self) -> HangtimeResult<RasterFrame> {
        self.current
            .map(|frame| self.render(frame))
            .ok_or_else(|| HangtimeError::acquisition("No frame decoded yet"))
    }
}
