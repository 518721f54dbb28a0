//! Application configuration.
//!
//! Configuration is read from TOML. Every field has a default, so an empty
//! file (or no file at all) yields the stock calculator: twelve-character
//! entry, five history records, ten significant digits and the
//! `synthwave-calculator-v4` asset cache.
//!
//! # Example
//!
//! ```rust
//! use synthcalc::config::AppConfig;
//!
//! let config = AppConfig::from_toml_str(
//!     r#"
//!     [engine]
//!     history_limit = 10
//!
//!     [cache]
//!     version = 5
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.engine.history_limit, 10);
//! assert_eq!(config.engine.max_digits, 12);
//! assert_eq!(config.cache.version, 5);
//! ```

pub mod rules;
pub mod violations;

pub use rules::validate;
pub use violations::{ConfigError, ConfigViolation};

use crate::cache::{
    BuildError, OfflineCache, OfflineCacheBuilder, DEFAULT_CACHE_NAME, DEFAULT_CACHE_VERSION,
    DEFAULT_MANIFEST,
};
use crate::core::EngineLimits;
use serde::{Deserialize, Serialize};
use std::path::Path;
use stillwater::validation::Validation;
use tracing::debug;

/// Offline cache settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub name: String,
    pub version: u32,
    pub manifest: Vec<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_CACHE_NAME.to_string(),
            version: DEFAULT_CACHE_VERSION,
            manifest: DEFAULT_MANIFEST.iter().map(|url| url.to_string()).collect(),
        }
    }
}

impl CacheConfig {
    /// Build the offline cache these settings describe.
    pub fn build(&self) -> Result<OfflineCache, BuildError> {
        OfflineCacheBuilder::new()
            .name(self.name.clone())
            .version(self.version)
            .assets(self.manifest.iter().cloned())
            .build()
    }
}

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub engine: EngineLimits,
    pub cache: CacheConfig,
}

impl AppConfig {
    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validated()
    }

    /// Read, parse and validate a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded configuration file");
        Self::from_toml_str(&text)
    }

    /// Check the configuration, reporting every violation at once.
    pub fn validated(self) -> Result<Self, ConfigError> {
        match validate(&self) {
            Validation::Success(_) => Ok(self),
            Validation::Failure(errors) => Err(ConfigError::Invalid(errors.iter().cloned().collect())),
        }
    }

    /// Serialize back to TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}
