//! A directory of still frames played back at a declared frame rate.

use std::path::{Path, PathBuf};

use hangtime_common::error::{HangtimeError, HangtimeResult};
use hangtime_motion_core::RasterFrame;

use crate::provider::{frame_index_at, VideoProvider};

/// File extensions picked up from a frame directory.
pub const FRAME_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

/// Frames loaded lazily from image files sorted by name.
#[derive(Debug)]
pub struct ImageSequenceProvider {
    frames: Vec<PathBuf>,
    fps: f64,
    dimensions: (u32, u32),
    current: Option<(usize, RasterFrame)>,
}

impl ImageSequenceProvider {
    /// Open every frame image in `dir`, to be played at `fps`.
    pub fn open(dir: &Path, fps: f64) -> HangtimeResult<Self> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(HangtimeError::config(format!(
                "frame rate must be positive, got {fps}"
            )));
        }

        let entries = std::fs::read_dir(dir).map_err(|e| {
            HangtimeError::playback(format!("cannot read frame directory {dir:?}: {e}"))
        })?;

        let mut frames: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && is_frame_file(path))
            .collect();
        frames.sort();

        let first = frames.first().ok_or_else(|| {
            HangtimeError::playback(format!("no frame images found in {dir:?}"))
        })?;
        let dimensions = image::image_dimensions(first).map_err(|e| {
            HangtimeError::playback(format!("cannot read first frame {first:?}: {e}"))
        })?;

        tracing::info!(
            frames = frames.len(),
            fps,
            width = dimensions.0,
            height = dimensions.1,
            "Opened image sequence"
        );

        Ok(Self {
            frames,
            fps,
            dimensions,
            current: None,
        })
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Index of the frame shown at `time_secs`.
    pub fn frame_index_at(&self, time_secs: f64) -> usize {
        frame_index_at(time_secs, self.fps, self.frames.len())
    }
}

fn is_frame_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| FRAME_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

fn decode_frame(path: &Path, time_secs: f64) -> HangtimeResult<RasterFrame> {
    let image = image::open(path)
        .map_err(|e| HangtimeError::decode(time_secs, format!("{}: {e}", path.display())))?
        .to_rgba8();
    let (width, height) = image.dimensions();
    RasterFrame::new(width, height, image.into_raw())
}

#[async_trait::async_trait]
impl VideoProvider for ImageSequenceProvider {
    fn name(&self) -> &str {
        "image-sequence"
    }

    fn is_loaded(&self) -> bool {
        !self.frames.is_empty()
    }

    fn duration_secs(&self) -> Option<f64> {
        Some(self.frames.len() as f64 / self.fps)
    }

    fn dimensions(&self) -> (u32, u32) {
        self.dimensions
    }

    async fn seek(&mut self, time_secs: f64) -> HangtimeResult<()> {
        let index = self.frame_index_at(time_secs);
        if matches!(&self.current, Some((current, _)) if *current == index) {
            return Ok(());
        }

        let path = self.frames[index].clone();
        let frame = tokio::task::spawn_blocking(move || decode_frame(&path, time_secs))
            .await
            .map_err(|e| HangtimeError::decode(time_secs, format!("decode task failed: {e}")))??;

        self.current = Some((index, frame));
        Ok(())
    }

    fn current_frame(&self) -> HangtimeResult<RasterFrame> {
        self.current
            .as_ref()
            .map(|(_, frame)| frame.clone())
            .ok_or_else(|| HangtimeError::acquisition("No frame decoded yet"))
    }
}
