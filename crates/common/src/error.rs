//! Error types shared across Hangtime crates.

/// Top-level error type for Hangtime operations.
#[derive(Debug, thiserror::Error)]
pub enum HangtimeError {
    /// No video is loaded; detection cannot start.
    #[error("No video loaded")]
    MissingVideo,

    /// A frame surface could not be obtained before sampling started.
    #[error("Frame acquisition error: {message}")]
    Acquisition { message: String },

    /// A frame could not be sought or decoded while sampling.
    #[error("Frame decode error at {time_secs:.3}s: {message}")]
    Decode { time_secs: f64, message: String },

    /// A sampled frame does not match the dimensions the regions were laid out for.
    #[error("Frame size changed from {expected:?} to {actual:?} during sampling")]
    FrameSizeChanged {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// The video source reported a load or format error.
    #[error("Playback error: {message}")]
    Playback { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using HangtimeError.
pub type HangtimeResult<T> = Result<T, HangtimeError>;

impl HangtimeError {
    pub fn acquisition(msg: impl Into<String>) -> Self {
        Self::Acquisition {
            message: msg.into(),
        }
    }

    pub fn decode(time_secs: f64, msg: impl Into<String>) -> Self {
        Self::Decode {
            time_secs,
            message: msg.into(),
        }
    }

    pub fn playback(msg: impl Into<String>) -> Self {
        Self::Playback {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Whether this error must abort a detection run instead of falling back.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::MissingVideo | Self::Acquisition { .. } | Self::Playback { .. }
        )
    }
}
