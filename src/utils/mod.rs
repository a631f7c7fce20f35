//! Utility modules for configuration

pub mod config;

pub use config::{TrackerConfig, ConfigError, ConfigResult};
