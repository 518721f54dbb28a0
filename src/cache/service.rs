//! Offline asset cache executing against an injected environment.
//!
//! Every lifecycle step is returned as a boxed Stillwater effect over
//! [`CacheEnv`]; nothing touches the store or the network until the effect
//! is run.

use super::error::{CacheError, FetchError};
use super::request::{AssetRequest, AssetResponse, CachedResponse, Method};
use super::store::{cache_key, cache_prefix, CacheStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use stillwater::effect::BoxedEffect;
use stillwater::prelude::*;
use tracing::{debug, error, info, warn};

/// Network access used on cache misses and during install.
pub trait Fetcher: Send + Sync {
    fn fetch(&self, request: &AssetRequest) -> Result<AssetResponse, FetchError>;
}

/// Capabilities the cache effects run against.
#[derive(Clone)]
pub struct CacheEnv {
    pub store: Arc<dyn CacheStore>,
    pub fetcher: Arc<dyn Fetcher>,
}

impl CacheEnv {
    pub fn new(store: Arc<dyn CacheStore>, fetcher: Arc<dyn Fetcher>) -> Self {
        Self { store, fetcher }
    }
}

/// Outcome of the install prefetch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallReport {
    pub cache_name: String,
    /// URLs now stored in the cache
    pub cached: Vec<String>,
    /// URLs that could not be stored, with the reason
    pub failed: Vec<(String, String)>,
}

impl InstallReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Where a fetched response came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseSource {
    /// Served from the cache
    Cache,
    /// Fetched from the network; `stored` tells whether a copy was kept
    Network { stored: bool },
    /// Non-GET request, passed through untouched
    Bypass,
}

/// Response handed back to the caller of [`OfflineCache::fetch`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchOutcome {
    pub response: AssetResponse,
    pub source: ResponseSource,
}

/// Outcome of activating a cache version.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivateReport {
    pub kept: String,
    /// Stale caches that were deleted
    pub removed: Vec<String>,
}

/// Versioned offline cache over a fixed asset manifest.
///
/// Build one with [`OfflineCacheBuilder`](super::OfflineCacheBuilder).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OfflineCache {
    pub(crate) name: String,
    pub(crate) version: u32,
    pub(crate) manifest: Vec<String>,
}

impl OfflineCache {
    /// Versioned store name, e.g. `synthwave-calculator-v4`.
    pub fn cache_name(&self) -> String {
        format!("{}-v{}", self.name, self.version)
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn manifest(&self) -> &[String] {
        &self.manifest
    }

    /// Prefetch every manifest asset into the current cache.
    ///
    /// Best effort: failed assets are logged and reported, never fatal.
    pub fn install(&self) -> BoxedEffect<InstallReport, CacheError, CacheEnv> {
        let cache_name = self.cache_name();
        let manifest = self.manifest.clone();
        from_fn(move |env: &CacheEnv| -> Result<InstallReport, CacheError> {
            Ok(install_assets(&cache_name, &manifest, env))
        })
        .boxed()
    }

    /// Answer a request, cache first.
    pub fn fetch(&self, request: AssetRequest) -> BoxedEffect<FetchOutcome, CacheError, CacheEnv> {
        let cache_name = self.cache_name();
        from_fn(move |env: &CacheEnv| serve_request(&cache_name, &request, env)).boxed()
    }

    /// Delete every cache other than the current version.
    pub fn activate(&self) -> BoxedEffect<ActivateReport, CacheError, CacheEnv> {
        let cache_name = self.cache_name();
        from_fn(move |env: &CacheEnv| remove_stale_caches(&cache_name, env)).boxed()
    }
}

fn install_assets(cache_name: &str, manifest: &[String], env: &CacheEnv) -> InstallReport {
    let mut report = InstallReport {
        cache_name: cache_name.to_string(),
        ..InstallReport::default()
    };

    for url in manifest {
        match prefetch(cache_name, url, env) {
            Ok(()) => report.cached.push(url.clone()),
            Err(reason) => {
                error!(url = %url, reason = %reason, "failed to fetch and cache");
                report.failed.push((url.clone(), reason));
            }
        }
    }

    info!(
        cache = cache_name,
        cached = report.cached.len(),
        failed = report.failed.len(),
        "cache install finished"
    );
    report
}

fn prefetch(cache_name: &str, url: &str, env: &CacheEnv) -> Result<(), String> {
    let response = env
        .fetcher
        .fetch(&AssetRequest::get(url))
        .map_err(|e| e.to_string())?;
    if !response.is_ok() {
        return Err(format!("status {}", response.status));
    }
    env.store
        .put(&cache_key(cache_name, url), CachedResponse::new(response))
        .map_err(|e| e.to_string())
}

fn serve_request(
    cache_name: &str,
    request: &AssetRequest,
    env: &CacheEnv,
) -> Result<FetchOutcome, CacheError> {
    if request.method != Method::Get {
        debug!(method = %request.method, url = %request.url, "bypassing cache");
        let response = env.fetcher.fetch(request)?;
        return Ok(FetchOutcome {
            response,
            source: ResponseSource::Bypass,
        });
    }

    let key = cache_key(cache_name, &request.url);
    if let Some(entry) = env.store.get(&key)? {
        debug!(url = %request.url, "cache hit");
        return Ok(FetchOutcome {
            response: entry.response,
            source: ResponseSource::Cache,
        });
    }

    let response = env.fetcher.fetch(request)?;
    let stored = response.is_cacheable()
        && match env.store.put(&key, CachedResponse::new(response.clone())) {
            Ok(()) => true,
            Err(e) => {
                warn!(url = %request.url, error = %e, "could not store response");
                false
            }
        };
    debug!(url = %request.url, status = response.status, stored, "cache miss");

    Ok(FetchOutcome {
        response,
        source: ResponseSource::Network { stored },
    })
}

fn remove_stale_caches(current: &str, env: &CacheEnv) -> Result<ActivateReport, CacheError> {
    let mut removed = Vec::new();
    for name in env.store.cache_names()? {
        if name == current {
            continue;
        }
        let entries = env.store.delete_prefix(&cache_prefix(&name))?;
        info!(cache = %name, entries, "deleted stale cache");
        removed.push(name);
    }

    Ok(ActivateReport {
        kept: current.to_string(),
        removed,
    })
}
