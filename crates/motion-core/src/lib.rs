//! Hangtime Motion Core: the jump detector
//!
//! Turns a sequence of sampled frames into takeoff and landing times:
//! - **Region motion:** Per-region mean RGB difference against the previous sample
//! - **Signal analysis:** Moving-average smoothing, mean/std-dev threshold, peak ranking
//! - **Event selection:** Pick two peaks inside the jump window, or fall back
//! - **Kinematics:** Hang time to jump height
//!
//! This crate is pure computation with no I/O or async code.
//! All inputs are data; all outputs are data.

pub mod analysis;
pub mod frame;
pub mod kinematics;
pub mod motion;
pub mod peaks;
pub mod selection;
pub mod smoothing;
pub mod stats;

pub use analysis::{SignalAnalysis, SignalAnalyzer};
pub use frame::{RasterFrame, RegionRaster};
pub use kinematics::{jump_height, JumpMeasurement};
pub use motion::{FrameMotion, MotionSeries, RegionMotionExtractor};
pub use peaks::find_peaks;
pub use selection::{EventSelector, Selection, SelectionState};
pub use smoothing::MotionSmoother;
pub use stats::SeriesStats;
