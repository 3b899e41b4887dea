//! Search backend access: endpoint validation, the per-query outcome
//! model, and the HTTP client for SearXNG-compatible instances.
//!
//! Per-page failures never surface as errors to the pipeline. Each query
//! produces a [`SearchOutcome`] carrying whatever text was aggregated
//! before paging stopped, plus the failure kind that stopped it (if any),
//! so the caller decides continuation policy explicitly.

mod client;

pub use client::{
    DEFAULT_MAX_PAGES, DEFAULT_PAGE_DELAY, DEFAULT_REQUEST_TIMEOUT, SearchClient,
    SearchClientConfig,
};

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

/// Errors that prevent constructing a usable search client.
///
/// These are the only errors that surface in a run's result; everything
/// else degrades to "less data".
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The search endpoint URL is missing or malformed.
    #[error("invalid search endpoint '{endpoint}': {reason}")]
    InvalidEndpoint {
        /// The rejected endpoint string.
        endpoint: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The underlying HTTP client could not be built.
    #[error("failed to build HTTP client: {source}")]
    ClientBuild {
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
}

impl ConfigError {
    /// Creates an invalid-endpoint error.
    pub fn invalid_endpoint(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidEndpoint {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }
}

/// A validated search backend base URL with no trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchEndpoint(String);

impl SearchEndpoint {
    /// Validates and normalizes a search endpoint base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEndpoint`] when the input is empty,
    /// lacks an `http://`/`https://` scheme, or is not a well-formed
    /// absolute URL.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::invalid_endpoint(raw, "endpoint is empty"));
        }
        if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
            return Err(ConfigError::invalid_endpoint(
                raw,
                "must be an absolute http:// or https:// URL",
            ));
        }
        Url::parse(trimmed)
            .map_err(|e| ConfigError::invalid_endpoint(raw, e.to_string()))?;
        Ok(Self(trimmed.trim_end_matches('/').to_string()))
    }

    /// Returns the normalized base URL.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Why paging stopped early for one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchFailure {
    /// The request exceeded the per-request timeout.
    Timeout {
        /// Page number that timed out.
        page: u32,
    },
    /// Transport-level failure (DNS, connect, TLS, mid-body).
    Transport {
        /// Page number that failed.
        page: u32,
        /// Error description from the transport layer.
        message: String,
    },
    /// The backend returned a non-success HTTP status.
    HttpStatus {
        /// Page number that failed.
        page: u32,
        /// The HTTP status code.
        status: u16,
    },
    /// The response body was not the expected JSON shape.
    MalformedResponse {
        /// Page number that failed.
        page: u32,
    },
}

impl fmt::Display for SearchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout { page } => write!(f, "timeout on page {page}"),
            Self::Transport { page, message } => {
                write!(f, "transport error on page {page}: {message}")
            }
            Self::HttpStatus { page, status } => write!(f, "HTTP {status} on page {page}"),
            Self::MalformedResponse { page } => write!(f, "malformed response on page {page}"),
        }
    }
}

/// Outcome of one query against the backend.
///
/// Text aggregated before a failure is kept; a failure on page 2 does not
/// discard page 1's results.
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    /// Aggregated `title\ncontent\n\n` text across fetched pages.
    pub text: String,
    /// The failure that stopped paging, when paging did not end cleanly.
    pub failure: Option<SearchFailure>,
}

/// Abstraction over the search backend.
///
/// [`SearchClient`] is the production implementation; tests drive the
/// pipeline with scripted providers.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Runs one query and returns the aggregated outcome.
    async fn search(&self, query: &str) -> SearchOutcome;
}
