//! Configuration errors.

use std::path::PathBuf;
use thiserror::Error;

/// A single problem found while validating configuration
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigViolation {
    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange {
        field: &'static str,
        min: usize,
        max: usize,
        value: usize,
    },

    #[error("cache.name '{0}' must be non-empty and must not contain '|'")]
    InvalidCacheName(String),

    #[error("cache.version must be at least 1")]
    ZeroCacheVersion,

    #[error("cache.manifest must list at least one asset")]
    EmptyManifest,

    #[error("cache.manifest entry {index} is empty")]
    EmptyAsset { index: usize },

    #[error("cache.manifest lists '{0}' more than once")]
    DuplicateAsset(String),
}

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid configuration: {}", format_violations(.0))]
    Invalid(Vec<ConfigViolation>),
}

fn format_violations(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
