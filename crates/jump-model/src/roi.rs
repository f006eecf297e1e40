//! Regions of interest for motion analysis.
//!
//! All coordinates are pixels of the source frame, `(0, 0)` top-left.

use serde::{Deserialize, Serialize};

/// An axis-aligned pixel rectangle within a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegionOfInterest {
    /// Left edge (pixels).
    pub x: u32,
    /// Top edge (pixels).
    pub y: u32,
    /// Width (pixels).
    pub width: u32,
    /// Height (pixels).
    pub height: u32,
}

/// Which body area a region is meant to watch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionKind {
    /// Lower band of the frame where the feet leave and meet the floor.
    Feet,
    /// Central band covering the torso.
    Body,
}

/// A region tagged with the body area it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRegion {
    pub kind: RegionKind,
    pub rect: RegionOfInterest,
}

impl RegionOfInterest {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a region from fractions of a frame, flooring to whole pixels.
    pub fn from_fractions(
        frame_width: u32,
        frame_height: u32,
        fx: f64,
        fy: f64,
        fw: f64,
        fh: f64,
    ) -> Self {
        let scale = |fraction: f64, dim: u32| (fraction.clamp(0.0, 1.0) * dim as f64).floor() as u32;
        Self {
            x: scale(fx, frame_width),
            y: scale(fy, frame_height),
            width: scale(fw, frame_width),
            height: scale(fh, frame_height),
        }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Number of pixels covered.
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if a pixel lies inside this region.
    pub fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Intersect with a `frame_width x frame_height` frame.
    pub fn clipped_to(&self, frame_width: u32, frame_height: u32) -> Self {
        let x = self.x.min(frame_width);
        let y = self.y.min(frame_height);
        Self {
            x,
            y,
            width: self.right().min(frame_width) - x,
            height: self.bottom().min(frame_height) - y,
        }
    }
}

impl NamedRegion {
    /// Bottom 40% of the frame height, full width.
    pub fn feet(frame_width: u32, frame_height: u32) -> Self {
        Self {
            kind: RegionKind::Feet,
            rect: RegionOfInterest::from_fractions(frame_width, frame_height, 0.0, 0.6, 1.0, 0.4),
        }
    }

    /// Middle 50% of the width by middle 40% of the height.
    pub fn body(frame_width: u32, frame_height: u32) -> Self {
        Self {
            kind: RegionKind::Body,
            rect: RegionOfInterest::from_fractions(
                frame_width,
                frame_height,
                0.25,
                0.3,
                0.5,
                0.4,
            ),
        }
    }
}

/// The fixed pair of regions watched during a jump, feet first.
pub fn jump_regions(frame_width: u32, frame_height: u32) -> Vec<NamedRegion> {
    vec![
        NamedRegion::feet(frame_width, frame_height),
        NamedRegion::body(frame_width, frame_height),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feet_band_is_bottom_forty_percent() {
        let feet = NamedRegion::feet(640, 480);
        assert_eq!(feet.kind, RegionKind::Feet);
        assert_eq!(feet.rect, RegionOfInterest::new(0, 288, 640, 192));
        assert_eq!(feet.rect.bottom(), 480);
    }

    #[test]
    fn test_body_band_is_centered() {
        let body = NamedRegion::body(640, 480);
        assert_eq!(body.rect, RegionOfInterest::new(160, 144, 320, 192));
        assert!(body.rect.contains(320, 240));
        assert!(!body.rect.contains(0, 0));
    }

    #[test]
    fn test_jump_regions_order() {
        let regions = jump_regions(100, 100);
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].kind, RegionKind::Feet);
        assert_eq!(regions[1].kind, RegionKind::Body);
    }

    #[test]
    fn test_clipped_to_frame() {
        let rect = RegionOfInterest::new(90, 90, 20, 20);
        assert_eq!(rect.clipped_to(100, 100), RegionOfInterest::new(90, 90, 10, 10));

        let outside = RegionOfInterest::new(150, 10, 20, 20);
        assert!(outside.clipped_to(100, 100).is_empty());
    }

    #[test]
    fn test_zero_sized_frame_gives_empty_regions() {
        for region in jump_regions(0, 0) {
            assert!(region.rect.is_empty());
            assert_eq!(region.rect.area(), 0);
        }
    }
}
