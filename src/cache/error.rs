//! Offline cache error types.

use thiserror::Error;

/// Errors raised by a [`Fetcher`](super::Fetcher).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// No network connection
    #[error("Offline: cannot reach '{url}'")]
    Offline { url: String },

    /// The request was attempted and failed
    #[error("Request to '{url}' failed: {reason}")]
    Failed { url: String, reason: String },
}

/// Errors that can occur during snapshot operations
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Snapshot version is not supported by this version
    #[error("Unsupported snapshot version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Reading or writing the snapshot file failed
    #[error("Snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced by the cache pipeline.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache store failure: {0}")]
    Store(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}
