//! Hangtime Common Utilities
//!
//! Shared infrastructure for all Hangtime crates:
//! - Error types and result aliases
//! - The virtual sampling clock used to walk a video
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
