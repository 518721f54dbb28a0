//! Offline asset cache.
//!
//! This module provides the "imperative shell" that keeps the calculator's
//! assets available without a network. It is independent of the engine.
//!
//! # Key Concepts
//!
//! - **Store**: a key-value store of response copies, grouped into named,
//!   versioned caches by key prefix
//! - **Fetcher**: the network, injected so it can be replaced in tests
//! - **Lifecycle**: `install` prefetches the manifest, `fetch` answers
//!   requests cache first, `activate` deletes stale cache versions
//!
//! Lifecycle steps are Stillwater effects; nothing happens until they are
//! run against a [`CacheEnv`].

mod builder;
mod error;
mod request;
mod service;
mod snapshot;
mod store;

pub use builder::{BuildError, OfflineCacheBuilder};
pub use error::{CacheError, FetchError, SnapshotError};
pub use request::{AssetRequest, AssetResponse, CachedResponse, Method, ResponseKind};
pub use service::{
    ActivateReport, CacheEnv, FetchOutcome, Fetcher, InstallReport, OfflineCache, ResponseSource,
};
pub use snapshot::{CacheSnapshot, SnapshotFormat, SNAPSHOT_VERSION};
pub use store::{cache_key, cache_prefix, CacheStore, MemoryStore, KEY_SEPARATOR};

/// Base name of the application cache.
pub const DEFAULT_CACHE_NAME: &str = "synthwave-calculator";

/// Current cache version; bump to force clients onto fresh assets.
pub const DEFAULT_CACHE_VERSION: u32 = 4;

/// Assets prefetched on install.
pub const DEFAULT_MANIFEST: &[&str] = &[
    "/",
    "/index.html",
    "/manifest.json",
    "/index.tsx",
    "/App.tsx",
    "/components/Button.tsx",
    "https://cdn.tailwindcss.com",
    "https://esm.sh/react@19.0.0-rc.0",
    "https://esm.sh/react-dom@19.0.0-rc.0/client",
    "https://esm.sh/react@19.0.0-rc.0/jsx-runtime",
];
