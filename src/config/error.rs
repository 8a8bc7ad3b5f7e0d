//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Port value is outside valid range (1-65535).
    #[error("invalid port '{value}': must be between 1 and 65535")]
    InvalidPort { value: String },

    /// Port string could not be parsed as a number.
    #[error("failed to parse port '{value}': {source}")]
    PortParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Bind address string could not be parsed.
    #[error("failed to parse bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// A threshold variable was set but is not a finite number.
    #[error("failed to parse {name}='{value}' as a score threshold")]
    InvalidThreshold { name: &'static str, value: String },

    /// Thresholds must satisfy `0 <= moderate <= strong <= 100`.
    #[error("tier thresholds out of order: moderate={moderate}, strong={strong}")]
    ThresholdOrder { moderate: f64, strong: f64 },

    /// Unknown `RESUMATCH_PREFIX_STYLE` value.
    #[error("unknown prefix style '{value}': expected 'none' or 'e5'")]
    InvalidPrefixStyle { value: String },

    /// A limit that must be positive was zero.
    #[error("{name} must be greater than zero")]
    ZeroLimit { name: &'static str },

    /// Specified path does not exist on the filesystem.
    #[error("path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// Path exists but is not a directory (when a directory was expected).
    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}
