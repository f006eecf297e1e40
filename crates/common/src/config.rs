//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{HangtimeError, HangtimeResult};

/// Sample rates offered to users for the virtual sampling grid.
pub const SUPPORTED_SAMPLE_RATES_HZ: [u32; 4] = [30, 60, 120, 240];

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Automatic takeoff/landing detection parameters.
    pub detection: DetectionConfig,

    /// Unit used when printing heights ("inches" or "cm").
    pub display_unit: String,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Parameters of the motion-peak detection pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Virtual frame rate the video is sampled at (samples per second).
    pub sample_rate_hz: u32,

    /// Half-width of the centered moving average.
    pub smoothing_half_window: usize,

    /// Threshold = mean + multiplier * std-dev.
    pub threshold_multiplier: f64,

    /// Fractions of the sample count a peak index must lie strictly between.
    pub relevant_window: RelevantWindow,

    /// Timestamps used when detection is inconclusive.
    pub fallback: FallbackPolicy,
}

/// Open interval `(start, end)` expressed as fractions of the sample count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelevantWindow {
    pub start: f64,
    pub end: f64,
}

/// Takeoff/landing pair substituted when no jump can be detected.
///
/// The defaults were calibrated against a single reference clip. They are a
/// placeholder guess, not a measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackPolicy {
    pub takeoff_secs: f64,
    pub landing_secs: f64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "hangtime_detector=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            detection: DetectionConfig::default(),
            display_unit: "inches".to_string(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: 60,
            smoothing_half_window: 5,
            threshold_multiplier: 2.5,
            relevant_window: RelevantWindow::default(),
            fallback: FallbackPolicy::default(),
        }
    }
}

impl Default for RelevantWindow {
    fn default() -> Self {
        Self {
            start: 0.1,
            end: 0.7,
        }
    }
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        Self {
            takeoff_secs: 0.85,
            landing_secs: 1.55,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl DetectionConfig {
    /// Reject parameter combinations the pipeline cannot run with.
    pub fn validate(&self) -> HangtimeResult<()> {
        if self.sample_rate_hz == 0 {
            return Err(HangtimeError::config("sample_rate_hz must be positive"));
        }
        if !SUPPORTED_SAMPLE_RATES_HZ.contains(&self.sample_rate_hz) {
            tracing::warn!(
                sample_rate_hz = self.sample_rate_hz,
                "Sample rate is not one of the standard choices {:?}",
                SUPPORTED_SAMPLE_RATES_HZ
            );
        }
        if !self.threshold_multiplier.is_finite() || self.threshold_multiplier < 0.0 {
            return Err(HangtimeError::config(
                "threshold_multiplier must be a finite non-negative number",
            ));
        }
        let w = self.relevant_window;
        if !(0.0..=1.0).contains(&w.start) || !(0.0..=1.0).contains(&w.end) || w.start >= w.end {
            return Err(HangtimeError::config(format!(
                "relevant_window must satisfy 0 <= start < end <= 1 (got {}..{})",
                w.start, w.end
            )));
        }
        let f = self.fallback;
        if !f.takeoff_secs.is_finite() || !f.landing_secs.is_finite() {
            return Err(HangtimeError::config("fallback timestamps must be finite"));
        }
        Ok(())
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_file_path())
    }

    /// Load config from `path`, falling back to defaults on any problem.
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> HangtimeResult<PathBuf> {
        let path = config_file_path();
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config as pretty JSON to `path`.
    pub fn save_to(&self, path: &Path) -> HangtimeResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("hangtime").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_pipeline() {
        let config = DetectionConfig::default();
        assert_eq!(config.sample_rate_hz, 60);
        assert_eq!(config.smoothing_half_window, 5);
        assert_eq!(config.threshold_multiplier, 2.5);
        assert_eq!(config.relevant_window, RelevantWindow { start: 0.1, end: 0.7 });
        assert_eq!(config.fallback.takeoff_secs, 0.85);
        assert_eq!(config.fallback.landing_secs, 1.55);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero_rate = DetectionConfig {
            sample_rate_hz: 0,
            ..Default::default()
        };
        assert!(zero_rate.validate().is_err());

        let inverted = DetectionConfig {
            relevant_window: RelevantWindow { start: 0.7, end: 0.1 },
            ..Default::default()
        };
        assert!(inverted.validate().is_err());

        let negative = DetectionConfig {
            threshold_multiplier: -1.0,
            ..Default::default()
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = AppConfig::default();
        config.detection.sample_rate_hz = 120;
        config.display_unit = "cm".to_string();
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path);
        assert_eq!(loaded.detection.sample_rate_hz, 120);
        assert_eq!(loaded.display_unit, "cm");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "detection": { "sample_rate_hz": 30 } }"#).unwrap();

        let loaded = AppConfig::load_from(&path);
        assert_eq!(loaded.detection.sample_rate_hz, 30);
        assert_eq!(loaded.detection.smoothing_half_window, 5);
        assert_eq!(loaded.display_unit, "inches");
    }

    #[test]
    fn test_partial_nested_objects_fill_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{
                "detection": {
                    "sample_rate_hz": 120,
                    "fallback": { "takeoff_secs": 1.0 },
                    "relevant_window": { "end": 0.8 }
                },
                "logging": { "json": true }
            }"#,
        )
        .unwrap();

        let loaded = AppConfig::load_from(&path);
        assert_eq!(loaded.detection.sample_rate_hz, 120);
        assert_eq!(loaded.detection.fallback.takeoff_secs, 1.0);
        assert_eq!(loaded.detection.fallback.landing_secs, 1.55);
        assert_eq!(loaded.detection.relevant_window, RelevantWindow { start: 0.1, end: 0.8 });
        assert!(loaded.logging.json);
        assert_eq!(loaded.logging.level, "info");
    }

    #[test]
    fn test_unparseable_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        let loaded = AppConfig::load_from(&path);
        assert_eq!(loaded.detection, DetectionConfig::default());
    }
}
