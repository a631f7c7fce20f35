use crate::algorithms::mapping::{ControlKind, WaveMapping};
use crate::core::DEFAULT_SMOOTHING_FACTOR;
use crate::hardware::WatchOptions;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Tracking parameters for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Exponential smoothing factor in (0, 1]; 1.0 disables smoothing
    pub smoothing_factor: f64,
    /// Distance-to-control mapping
    pub mapping: WaveMapping,
    /// Options handed to the location source
    #[serde(default)]
    pub watch: WatchOptions,
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Invalid parameter value
    InvalidParameter { parameter: String, value: String, reason: String },
    /// Configuration file I/O error
    IoError { message: String },
    /// JSON serialization/deserialization error
    SerializationError { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidParameter { parameter, value, reason } => {
                write!(f, "Invalid {} = {}: {}", parameter, value, reason)
            }
            ConfigError::IoError { message } => write!(f, "I/O error: {}", message),
            ConfigError::SerializationError { message } => {
                write!(f, "Serialization error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

fn invalid(parameter: &str, value: f64, reason: &str) -> ConfigError {
    ConfigError::InvalidParameter {
        parameter: parameter.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self::rate_multiplier()
    }
}

impl TrackerConfig {
    /// Playback-rate preset: 3 m dead zone, 20 m period, 0.25x to 2.0x
    pub fn rate_multiplier() -> Self {
        Self {
            smoothing_factor: DEFAULT_SMOOTHING_FACTOR,
            mapping: WaveMapping::default(),
            watch: WatchOptions::default(),
        }
    }

    /// Spectral balance preset: 2 m dead zone, 8 m period
    pub fn balance() -> Self {
        Self {
            smoothing_factor: DEFAULT_SMOOTHING_FACTOR,
            mapping: WaveMapping::balance(2.0, 8.0),
            watch: WatchOptions::default(),
        }
    }

    pub fn with_smoothing_factor(mut self, alpha: f64) -> Self {
        self.smoothing_factor = alpha;
        self
    }

    pub fn with_dead_zone(mut self, dead_zone_m: f64) -> Self {
        self.mapping.dead_zone_m = dead_zone_m;
        self
    }

    pub fn with_period(mut self, period_m: f64) -> Self {
        self.mapping.period_m = period_m;
        self
    }

    pub fn with_kind(mut self, kind: ControlKind) -> Self {
        self.mapping.kind = kind;
        self
    }

    pub fn with_watch_options(mut self, watch: WatchOptions) -> Self {
        self.watch = watch;
        self
    }

    /// Check every parameter, reporting the first violation
    pub fn validate(&self) -> ConfigResult<()> {
        let alpha = self.smoothing_factor;
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(invalid("smoothing_factor", alpha, "must be in (0, 1]"));
        }

        let dead_zone = self.mapping.dead_zone_m;
        if !dead_zone.is_finite() || dead_zone < 0.0 {
            return Err(invalid("dead_zone_m", dead_zone, "must be a non-negative distance"));
        }

        let period = self.mapping.period_m;
        if !period.is_finite() || period <= 0.0 {
            return Err(invalid("period_m", period, "must be a positive distance"));
        }

        if let ControlKind::RateMultiplier { min, max } = self.mapping.kind {
            if !min.is_finite() || min <= 0.0 {
                return Err(invalid("min", min, "playback rate must be positive"));
            }
            if !max.is_finite() || min >= max {
                return Err(invalid("max", max, "must be greater than min"));
            }
        }

        if self.watch.timeout_ms == 0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "timeout_ms".to_string(),
                value: "0".to_string(),
                reason: "location timeout must be positive".to_string(),
            });
        }

        Ok(())
    }

    /// Parse and validate a JSON configuration
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        let config: TrackerConfig = serde_json::from_str(content).map_err(|e| {
            ConfigError::SerializationError {
                message: format!("Failed to parse config: {}", e),
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
            message: format!("Failed to read config file '{}': {}", path_str, e),
        })?;

        let config = Self::from_json_str(&content)?;
        log::info!("loaded tracker configuration from {}", path_str);
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = serde_json::to_string_pretty(self).map_err(|e| {
            ConfigError::SerializationError {
                message: format!("Failed to serialize config: {}", e),
            }
        })?;

        fs::write(&path, content).map_err(|e| ConfigError::IoError {
            message: format!("Failed to write config file '{}': {}", path_str, e),
        })
    }
}
