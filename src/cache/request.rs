//! Requests, responses and cached entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// HTTP request method. Only `Get` is ever cached.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Other(String),
}

impl Method {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Other(other) => other,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An intercepted asset request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRequest {
    pub method: Method,
    pub url: String,
}

impl AssetRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
        }
    }

    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
        }
    }
}

/// How a response relates to the requesting origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseKind {
    /// Same-origin response.
    Basic,
    /// Cross-origin response with CORS headers; body readable.
    Cors,
    /// Cross-origin response without CORS; status and body hidden.
    Opaque,
    /// Network error placeholder.
    Error,
}

/// A response as seen by the cache pipeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetResponse {
    pub status: u16,
    pub kind: ResponseKind,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl AssetResponse {
    /// A same-origin response with the given status and body.
    pub fn basic(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            kind: ResponseKind::Basic,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn with_kind(mut self, kind: ResponseKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Status in the 2xx range.
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Exactly 200 and readable (not opaque), so safe to store on a miss.
    pub fn is_cacheable(&self) -> bool {
        self.status == 200 && matches!(self.kind, ResponseKind::Basic | ResponseKind::Cors)
    }
}

/// A response copy held in a cache store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedResponse {
    pub response: AssetResponse,
    pub cached_at: DateTime<Utc>,
}

impl CachedResponse {
    pub fn new(response: AssetResponse) -> Self {
        Self {
            response,
            cached_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_covers_2xx() {
        assert!(AssetResponse::basic(200, "").is_ok());
        assert!(AssetResponse::basic(204, "").is_ok());
        assert!(!AssetResponse::basic(304, "").is_ok());
        assert!(!AssetResponse::basic(404, "").is_ok());
    }

    #[test]
    fn only_readable_200_is_cacheable() {
        assert!(AssetResponse::basic(200, "x").is_cacheable());
        assert!(AssetResponse::basic(200, "x")
            .with_kind(ResponseKind::Cors)
            .is_cacheable());
        assert!(!AssetResponse::basic(200, "x")
            .with_kind(ResponseKind::Opaque)
            .is_cacheable());
        assert!(!AssetResponse::basic(201, "x").is_cacheable());
    }

    #[test]
    fn header_lookup_ignores_case() {
        let response = AssetResponse::basic(200, "").with_header("Content-Type", "text/html");
        assert_eq!(response.header("content-type"), Some("text/html"));
        assert_eq!(response.header("etag"), None);
    }

    #[test]
    fn method_renders_uppercase() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Other("OPTIONS".into()).to_string(), "OPTIONS");
    }
}
