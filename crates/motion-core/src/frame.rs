//! Raster frames handed over by a video provider.

use hangtime_common::error::{HangtimeError, HangtimeResult};
use hangtime_jump_model::roi::RegionOfInterest;

/// Bytes per RGBA pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// A full decoded frame in row-major RGBA8.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterFrame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

/// A copy of the pixels inside one region of a frame, row-major RGBA8.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionRaster {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl RasterFrame {
    /// Wrap an RGBA buffer, checking its length against the dimensions.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> HangtimeResult<Self> {
        let expected = width as usize * height as usize * BYTES_PER_PIXEL;
        if data.len() != expected {
            return Err(HangtimeError::acquisition(format!(
                "RGBA buffer holds {} bytes, {}x{} needs {}",
                data.len(),
                width,
                height,
                expected
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A frame filled with one opaque color.
    pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let pixel = [rgb[0], rgb[1], rgb[2], 255];
        let data = pixel
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * BYTES_PER_PIXEL)
            .collect();
        Self {
            width,
            height,
            data,
        }
    }

    /// Build an RGB frame from a per-pixel function (alpha is opaque).
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> [u8; 3]) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize * BYTES_PER_PIXEL);
        for y in 0..height {
            for x in 0..width {
                let [r, g, b] = f(x, y);
                data.extend_from_slice(&[r, g, b, 255]);
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Raw RGBA bytes.
    pub fn as_rgba(&self) -> &[u8] {
        &self.data
    }

    /// Copy out the block addressed by `roi`, clipped to the frame.
    pub fn region(&self, roi: &RegionOfInterest) -> RegionRaster {
        let clipped = roi.clipped_to(self.width, self.height);
        let row_bytes = clipped.width as usize * BYTES_PER_PIXEL;
        let stride = self.width as usize * BYTES_PER_PIXEL;

        let mut data = Vec::with_capacity(row_bytes * clipped.height as usize);
        for row in clipped.y..clipped.bottom() {
            let start = row as usize * stride + clipped.x as usize * BYTES_PER_PIXEL;
            data.extend_from_slice(&self.data[start..start + row_bytes]);
        }

        RegionRaster {
            width: clipped.width,
            height: clipped.height,
            data,
        }
    }
}

impl RegionRaster {
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Mean over all pixels of the per-pixel mean absolute R/G/B difference.
    ///
    /// Alpha is ignored. Rasters of different shapes, or empty rasters, give 0.
    pub fn mean_rgb_difference(&self, previous: &RegionRaster) -> f64 {
        if self.width != previous.width
            || self.height != previous.height
            || self.pixel_count() == 0
        {
            return 0.0;
        }

        let total: u64 = self
            .data
            .chunks_exact(BYTES_PER_PIXEL)
            .zip(previous.data.chunks_exact(BYTES_PER_PIXEL))
            .map(|(cur, prev)| {
                (0..3)
                    .map(|c| (cur[c] as i32 - prev[c] as i32).unsigned_abs() as u64)
                    .sum::<u64>()
            })
            .sum();

        // Each pixel contributes (|dr| + |dg| + |db|) / 3.
        total as f64 / 3.0 / self.pixel_count() as f64
    }
}
