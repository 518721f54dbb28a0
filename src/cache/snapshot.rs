//! Snapshots of a cache store.
//!
//! A snapshot captures every stored response so the cache survives a
//! process restart. Snapshots are versioned and can be encoded as JSON or
//! as compact binary.

use super::error::SnapshotError;
use super::request::CachedResponse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Version identifier for snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Encoding used for snapshot files.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Binary,
}

/// Serializable copy of a cache store.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CacheSnapshot {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: String,

    /// When snapshot was taken
    pub taken_at: DateTime<Utc>,

    /// Stored responses by key
    pub entries: BTreeMap<String, CachedResponse>,
}

impl CacheSnapshot {
    pub fn new(entries: BTreeMap<String, CachedResponse>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4().to_string(),
            taken_at: Utc::now(),
            entries,
        }
    }

    pub fn check_version(&self) -> Result<(), SnapshotError> {
        if self.version == SNAPSHOT_VERSION {
            Ok(())
        } else {
            Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            })
        }
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.check_version()?;
        Ok(snapshot)
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self = bincode::deserialize(bytes)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.check_version()?;
        Ok(snapshot)
    }

    pub fn encode(&self, format: SnapshotFormat) -> Result<Vec<u8>, SnapshotError> {
        match format {
            SnapshotFormat::Json => self.to_json().map(String::into_bytes),
            SnapshotFormat::Binary => self.to_binary(),
        }
    }

    pub fn decode(bytes: &[u8], format: SnapshotFormat) -> Result<Self, SnapshotError> {
        match format {
            SnapshotFormat::Json => {
                let json = std::str::from_utf8(bytes)
                    .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
                Self::from_json(json)
            }
            SnapshotFormat::Binary => Self::from_binary(bytes),
        }
    }
}
