//! Hangtime Jump Model
//!
//! Defines the data contracts shared by the detection pipeline and its callers:
//! - **Regions:** Pixel rectangles analyzed independently for motion
//! - **Events:** Motion peaks and the takeoff/landing pair derived from them
//! - **Heights:** Display units, computed heights, and performance categories
//!
//! Region coordinates are in pixels of the source frame; times are seconds
//! from the start of the clip.

pub mod event;
pub mod height;
pub mod roi;

pub use event::*;
pub use height::*;
pub use roi::*;
