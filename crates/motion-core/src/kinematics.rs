//! Hang time to jump height.
//!
//! A jumper in free flight rises for half the hang time and falls for the
//! other half, so the peak height is `g * t^2 / 8`.

use hangtime_jump_model::event::JumpEvent;
use hangtime_jump_model::height::{HeightUnit, JumpHeight, PerformanceCategory};
use serde::Serialize;

/// Standard gravity in m/s^2.
pub const GRAVITY: f64 = 9.81;

/// Peak height in meters for a given hang time in seconds.
pub fn height_meters(hang_time_secs: f64) -> f64 {
    GRAVITY * hang_time_secs * hang_time_secs / 8.0
}

/// Jump height from takeoff and landing marks.
///
/// Returns `None` unless both marks are set. The order of the marks is not
/// checked; a landing before takeoff still yields a (positive) height.
pub fn jump_height(
    takeoff_secs: Option<f64>,
    landing_secs: Option<f64>,
    unit: HeightUnit,
) -> Option<JumpHeight> {
    let hang_time = landing_secs? - takeoff_secs?;
    Some(JumpHeight::new(unit.meters_to(height_meters(hang_time)), unit))
}

/// A measured jump that keeps its hang time so the height can be recomputed
/// in any unit without compounding rounding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JumpMeasurement {
    hang_time_secs: f64,
    unit: HeightUnit,
}

impl JumpMeasurement {
    pub fn new(hang_time_secs: f64, unit: HeightUnit) -> Self {
        Self {
            hang_time_secs,
            unit,
        }
    }

    /// Measurement for an event, or `None` when a mark is missing.
    pub fn from_event(event: &JumpEvent, unit: HeightUnit) -> Option<Self> {
        event
            .hang_time_secs()
            .map(|hang_time| Self::new(hang_time, unit))
    }

    pub fn hang_time_secs(&self) -> f64 {
        self.hang_time_secs
    }

    pub fn unit(&self) -> HeightUnit {
        self.unit
    }

    /// Switch the display unit. The height is derived again from hang time.
    pub fn set_unit(&mut self, unit: HeightUnit) {
        self.unit = unit;
    }

    pub fn with_unit(mut self, unit: HeightUnit) -> Self {
        self.set_unit(unit);
        self
    }

    pub fn height_meters(&self) -> f64 {
        height_meters(self.hang_time_secs)
    }

    pub fn height(&self) -> JumpHeight {
        JumpHeight::new(self.unit.meters_to(self.height_meters()), self.unit)
    }

    pub fn category(&self) -> PerformanceCategory {
        self.height().category()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hang_time_of_0_7_seconds() {
        let meters = height_meters(0.7);
        assert!((meters - 0.6008625).abs() < 1e-9);

        let height = jump_height(Some(0.85), Some(1.55), HeightUnit::Inches).unwrap();
        assert!((height.value - 23.656).abs() < 0.001);
        assert_eq!(height.unit, HeightUnit::Inches);
        assert_eq!(height.category(), PerformanceCategory::Average);
    }

    #[test]
    fn test_missing_mark_gives_no_height() {
        assert_eq!(jump_height(None, Some(1.0), HeightUnit::Inches), None);
        assert_eq!(jump_height(Some(1.0), None, HeightUnit::Centimeters), None);
        assert_eq!(jump_height(None, None, HeightUnit::Inches), None);
    }

    #[test]
    fn test_reversed_marks_are_not_rejected() {
        let forward = jump_height(Some(1.0), Some(1.5), HeightUnit::Inches).unwrap();
        let reversed = jump_height(Some(1.5), Some(1.0), HeightUnit::Inches).unwrap();
        assert!((forward.value - reversed.value).abs() < 1e-12);
    }

    #[test]
    fn test_equal_marks_give_zero() {
        let height = jump_height(Some(1.2), Some(1.2), HeightUnit::Centimeters).unwrap();
        assert_eq!(height.value, 0.0);
    }

    #[test]
    fn test_unit_switch_recomputes_from_hang_time() {
        let mut measurement = JumpMeasurement::new(0.7, HeightUnit::Inches);
        let inches = measurement.height();
        assert_eq!(inches.to_string(), "23.66 in");

        measurement.set_unit(HeightUnit::Centimeters);
        let cm = measurement.height();
        assert!((cm.value - 60.08625).abs() < 1e-9);

        // Converting the rounded inch figure would drift from the exact value.
        let via_display = 23.66 / 39.3701 * 100.0;
        assert!((via_display - cm.value).abs() > 1e-4);

        // Category does not depend on the display unit.
        assert_eq!(measurement.category(), PerformanceCategory::Average);
    }

    #[test]
    fn test_measurement_from_event() {
        let event = JumpEvent::new(0.85, 1.55);
        let measurement = JumpMeasurement::from_event(&event, HeightUnit::Inches).unwrap();
        assert!((measurement.hang_time_secs() - 0.7).abs() < 1e-12);
        assert!(JumpMeasurement::from_event(&JumpEvent::default(), HeightUnit::Inches).is_none());
    }

    mod props {
        use super::super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn cm_to_inches_ratio_is_constant(hang in 0.05f64..1.5) {
                let inches = jump_height(Some(0.0), Some(hang), HeightUnit::Inches).unwrap();
                let cm = jump_height(Some(0.0), Some(hang), HeightUnit::Centimeters).unwrap();
                prop_assert!((cm.value / inches.value - 100.0 / 39.3701).abs() < 1e-9);
            }

            #[test]
            fn height_is_pure(takeoff in 0.0f64..5.0, hang in 0.0f64..2.0) {
                let a = jump_height(Some(takeoff), Some(takeoff + hang), HeightUnit::Inches);
                let b = jump_height(Some(takeoff), Some(takeoff + hang), HeightUnit::Inches);
                prop_assert_eq!(a, b);
            }

            #[test]
            fn height_grows_with_hang_time(a in 0.0f64..2.0, b in 0.0f64..2.0) {
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                prop_assert!(height_meters(lo) <= height_meters(hi));
            }
        }
    }
}
