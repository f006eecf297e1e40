//! Hangtime Detector
//!
//! Drives jump detection over a video:
//!
//! - **Providers:** [`VideoProvider`] abstracts seekable frame sources.
//!   [`SyntheticVideo`] renders test clips in memory and
//!   [`ImageSequenceProvider`] reads a directory of still frames.
//! - **Sampler:** [`MotionSampler`] seeks a provider along a fixed-rate grid,
//!   one frame at a time, and measures region motion.
//! - **Pipeline:** [`JumpDetector`] runs the sampler, analyses the motion series
//!   and returns a [`DetectionOutcome`], falling back when detection fails.

pub mod image_sequence;
pub mod observer;
pub mod pipeline;
pub mod provider;
pub mod report;
pub mod sampler;
pub mod synthetic;

pub use image_sequence::ImageSequenceProvider;
pub use observer::{DetectionObserver, NullObserver, TracingObserver};
pub use pipeline::{DetectionOutcome, JumpDetector};
pub use provider::{frame_index_at, VideoProvider};
pub use report::DetectionReport;
pub use sampler::{MotionSample, MotionSampler};
pub use synthetic::{MotionBurst, SyntheticVideo};
