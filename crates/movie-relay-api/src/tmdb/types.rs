//! TMDB credential, raw upstream response, and the partial listing schema.

use std::fmt;

use bytes::Bytes;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

// --- Credential ---

/// TMDB v3 API key, sent as the `api_key` query parameter.
///
/// Never empty. `Debug` output is redacted so the key stays out of logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wraps a raw key. Returns `None` for an unset or empty value.
    #[must_use]
    pub fn new(raw: Option<String>) -> Option<Self> {
        raw.filter(|key| !key.is_empty()).map(Self)
    }

    /// Reads the key from the environment variable `name`.
    ///
    /// Unset, empty, and non-UTF-8 values all yield `None`.
    #[must_use]
    pub fn from_env(name: &str) -> Option<Self> {
        Self::new(std::env::var(name).ok())
    }

    /// Returns the key for use as a query parameter value.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

// --- Upstream response ---

/// Status and raw body of a single upstream call.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    /// HTTP status returned by TMDB.
    pub status: StatusCode,
    /// Response body exactly as received.
    pub body: Bytes,
}

impl UpstreamResponse {
    /// Whether TMDB answered with a 2xx status.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

// --- Listing envelope ---

/// Partial schema of the `movie/popular` listing.
///
/// Only `results` is decoded; every entry is kept as raw JSON so it is
/// re-emitted untouched. Other envelope fields are dropped. A missing or
/// `null` `results` field fails to decode.
#[derive(Debug, Serialize, Deserialize)]
pub struct MovieList {
    /// Movie objects in upstream order.
    pub results: Vec<Box<RawValue>>,
}

impl MovieList {
    /// Decodes a listing body.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not JSON or has no `results` array.
    pub fn from_slice(body: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(body)
    }

    /// Keeps at most the first `limit` entries, preserving order.
    #[must_use]
    pub fn take_first(mut self, limit: usize) -> Self {
        self.results.truncate(limit);
        self
    }
}
