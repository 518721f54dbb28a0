//! Builder for constructing offline caches.

use super::service::OfflineCache;
use super::store::KEY_SEPARATOR;
use std::collections::HashSet;
use thiserror::Error;

/// Errors that can occur when building an offline cache.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Cache name not specified. Call .name(name) before .build()")]
    MissingName,

    #[error("Cache name '{0}' must be non-empty and must not contain '|'")]
    InvalidName(String),

    #[error("Cache version not specified. Call .version(n) before .build()")]
    MissingVersion,

    #[error("Cache version must be at least 1")]
    ZeroVersion,

    #[error("No assets defined. Add at least one asset URL")]
    EmptyManifest,

    #[error("Asset '{0}' is listed more than once")]
    DuplicateAsset(String),
}

/// Builder for constructing offline caches with a fluent API.
///
/// # Example
///
/// ```rust
/// use synthcalc::cache::OfflineCacheBuilder;
///
/// let cache = OfflineCacheBuilder::new()
///     .name("synthwave-calculator")
///     .version(4)
///     .asset("/")
///     .assets(["/index.html", "/manifest.json"])
///     .build()
///     .unwrap();
///
/// assert_eq!(cache.cache_name(), "synthwave-calculator-v4");
/// assert_eq!(cache.manifest().len(), 3);
/// ```
#[derive(Debug, Default)]
pub struct OfflineCacheBuilder {
    name: Option<String>,
    version: Option<u32>,
    manifest: Vec<String>,
}

impl OfflineCacheBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cache name (required).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the cache version (required).
    pub fn version(mut self, version: u32) -> Self {
        self.version = Some(version);
        self
    }

    /// Add one asset URL to the prefetch manifest.
    pub fn asset(mut self, url: impl Into<String>) -> Self {
        self.manifest.push(url.into());
        self
    }

    /// Add several asset URLs at once.
    pub fn assets<I, U>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = U>,
        U: Into<String>,
    {
        self.manifest.extend(urls.into_iter().map(Into::into));
        self
    }

    /// Build the cache.
    /// Returns an error if required fields are missing or invalid.
    pub fn build(self) -> Result<OfflineCache, BuildError> {
        let name = self.name.ok_or(BuildError::MissingName)?;
        if name.is_empty() || name.contains(KEY_SEPARATOR) {
            return Err(BuildError::InvalidName(name));
        }

        let version = self.version.ok_or(BuildError::MissingVersion)?;
        if version == 0 {
            return Err(BuildError::ZeroVersion);
        }

        if self.manifest.is_empty() {
            return Err(BuildError::EmptyManifest);
        }
        if let Some(duplicate) = first_duplicate(&self.manifest) {
            return Err(BuildError::DuplicateAsset(duplicate));
        }

        Ok(OfflineCache {
            name,
            version,
            manifest: self.manifest,
        })
    }
}

fn first_duplicate(urls: &[String]) -> Option<String> {
    let mut seen = HashSet::new();
    urls.iter().find(|url| !seen.insert(url.as_str())).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_validates_required_fields() {
        let result = OfflineCacheBuilder::new().version(1).asset("/").build();
        assert_eq!(result, Err(BuildError::MissingName));

        let result = OfflineCacheBuilder::new().name("calc").asset("/").build();
        assert_eq!(result, Err(BuildError::MissingVersion));
    }

    #[test]
    fn builder_requires_assets() {
        let result = OfflineCacheBuilder::new().name("calc").version(1).build();
        assert_eq!(result, Err(BuildError::EmptyManifest));
    }

    #[test]
    fn builder_rejects_separator_in_name() {
        let result = OfflineCacheBuilder::new()
            .name("a|b")
            .version(1)
            .asset("/")
            .build();
        assert_eq!(result, Err(BuildError::InvalidName("a|b".to_string())));
    }

    #[test]
    fn builder_rejects_zero_version() {
        let result = OfflineCacheBuilder::new()
            .name("calc")
            .version(0)
            .asset("/")
            .build();
        assert_eq!(result, Err(BuildError::ZeroVersion));
    }

    #[test]
    fn builder_rejects_duplicate_assets() {
        let result = OfflineCacheBuilder::new()
            .name("calc")
            .version(1)
            .assets(["/", "/app.js", "/"])
            .build();
        assert_eq!(result, Err(BuildError::DuplicateAsset("/".to_string())));
    }

    #[test]
    fn fluent_api_builds_cache() {
        let cache = OfflineCacheBuilder::new()
            .name("calc")
            .version(2)
            .asset("/")
            .assets(vec!["/a".to_string(), "/b".to_string()])
            .build()
            .unwrap();

        assert_eq!(cache.cache_name(), "calc-v2");
        assert_eq!(cache.version(), 2);
        assert_eq!(cache.manifest(), ["/", "/a", "/b"]);
    }
}
