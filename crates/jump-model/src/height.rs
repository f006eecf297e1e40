//! Height units, computed heights, and performance categories.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Inches per meter.
pub const INCHES_PER_METER: f64 = 39.3701;

/// Centimeters per meter.
pub const CENTIMETERS_PER_METER: f64 = 100.0;

/// Unit a jump height is displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HeightUnit {
    #[default]
    #[serde(rename = "inches")]
    Inches,
    #[serde(rename = "cm")]
    Centimeters,
}

/// Returned when a unit name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown height unit '{0}' (expected 'inches' or 'cm')")]
pub struct UnknownUnit(pub String);

impl HeightUnit {
    /// Convert a height in meters into this unit.
    pub fn meters_to(self, meters: f64) -> f64 {
        match self {
            Self::Inches => meters * INCHES_PER_METER,
            Self::Centimeters => meters * CENTIMETERS_PER_METER,
        }
    }

    /// Convert a height in this unit back to meters.
    pub fn to_meters(self, value: f64) -> f64 {
        match self {
            Self::Inches => value / INCHES_PER_METER,
            Self::Centimeters => value / CENTIMETERS_PER_METER,
        }
    }

    /// Short suffix for display.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Inches => "in",
            Self::Centimeters => "cm",
        }
    }
}

impl FromStr for HeightUnit {
    type Err = UnknownUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inches" | "inch" | "in" => Ok(Self::Inches),
            "cm" | "centimeters" | "centimetres" => Ok(Self::Centimeters),
            _ => Err(UnknownUnit(s.to_string())),
        }
    }
}

impl std::fmt::Display for HeightUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inches => write!(f, "inches"),
            Self::Centimeters => write!(f, "cm"),
        }
    }
}

/// A jump height in a specific unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JumpHeight {
    pub value: f64,
    pub unit: HeightUnit,
}

impl JumpHeight {
    pub fn new(value: f64, unit: HeightUnit) -> Self {
        Self { value, unit }
    }

    /// The same height expressed in inches.
    pub fn in_inches(&self) -> f64 {
        match self.unit {
            HeightUnit::Inches => self.value,
            other => HeightUnit::Inches.meters_to(other.to_meters(self.value)),
        }
    }

    /// Performance bracket for this height.
    pub fn category(&self) -> PerformanceCategory {
        PerformanceCategory::from_inches(self.in_inches())
    }
}

impl std::fmt::Display for JumpHeight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} {}", self.value, self.unit.symbol())
    }
}

/// Standing vertical-jump performance brackets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceCategory {
    Beginner,
    Average,
    Good,
    VeryGood,
    Excellent,
    Elite,
}

impl PerformanceCategory {
    /// Inclusive lower bounds in inches, highest first.
    const BRACKETS: [(f64, PerformanceCategory); 5] = [
        (40.0, PerformanceCategory::Elite),
        (35.0, PerformanceCategory::Excellent),
        (30.0, PerformanceCategory::VeryGood),
        (24.0, PerformanceCategory::Good),
        (20.0, PerformanceCategory::Average),
    ];

    pub fn from_inches(inches: f64) -> Self {
        Self::BRACKETS
            .iter()
            .find(|(lower, _)| inches >= *lower)
            .map(|(_, category)| *category)
            .unwrap_or(Self::Beginner)
    }

    /// Category for an optional height; `None` when the height is unset.
    pub fn for_height(height: Option<JumpHeight>) -> Option<Self> {
        height.map(|h| h.category())
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Elite => "Elite",
            Self::Excellent => "Excellent",
            Self::VeryGood => "Very good",
            Self::Good => "Good",
            Self::Average => "Average",
            Self::Beginner => "Beginner",
        }
    }
}

impl std::fmt::Display for PerformanceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
