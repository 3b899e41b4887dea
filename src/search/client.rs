//! HTTP client for SearXNG-compatible search backends.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use serde::Deserialize;
use tracing::{debug, error, instrument};

use super::{ConfigError, SearchEndpoint, SearchFailure, SearchOutcome, SearchProvider};

/// Default number of result pages fetched per query.
pub const DEFAULT_MAX_PAGES: u32 = 2;

/// Default per-request timeout (15 seconds).
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Default pause between successful page fetches, to stay polite to the
/// shared backend.
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_millis(300);

/// HTTP connect timeout for the shared client.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Browser-like User-Agent; some SearXNG instances reject requests from
/// obvious non-browser agents.
const SEARCH_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Tunable knobs for one run's search behavior.
#[derive(Debug, Clone)]
pub struct SearchClientConfig {
    /// Maximum result pages fetched per query.
    pub max_pages: u32,
    /// Timeout applied to each page request.
    pub request_timeout: Duration,
    /// Pause between successful page fetches.
    pub page_delay: Duration,
}

impl Default for SearchClientConfig {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            page_delay: DEFAULT_PAGE_DELAY,
        }
    }
}

/// One hit from the backend's JSON `results` array.
///
/// Title and content are both optional in practice; missing fields are
/// treated as empty strings during aggregation.
#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

/// Top-level backend response. Anything beyond `results` is ignored.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
}

/// Client for one discovery run against a search backend.
///
/// Created once per run and reused for every query so requests share a
/// connection pool. Carries no cross-run state.
#[derive(Debug, Clone)]
pub struct SearchClient {
    client: Client,
    endpoint: SearchEndpoint,
    config: SearchClientConfig,
}

impl SearchClient {
    /// Creates a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ClientBuild`] if HTTP client construction fails.
    pub fn new(endpoint: SearchEndpoint) -> Result<Self, ConfigError> {
        Self::with_config(endpoint, SearchClientConfig::default())
    }

    /// Creates a client with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ClientBuild`] if HTTP client construction fails.
    pub fn with_config(
        endpoint: SearchEndpoint,
        config: SearchClientConfig,
    ) -> Result<Self, ConfigError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(SEARCH_USER_AGENT)
            .default_headers(headers)
            .gzip(true)
            .build()
            .map_err(|source| ConfigError::ClientBuild { source })?;

        debug!(endpoint = %endpoint, "search client initialized");
        Ok(Self {
            client,
            endpoint,
            config,
        })
    }

    /// Returns the endpoint this client talks to.
    #[must_use]
    pub fn endpoint(&self) -> &SearchEndpoint {
        &self.endpoint
    }
}

#[async_trait]
impl SearchProvider for SearchClient {
    /// Fetches up to `max_pages` result pages for one query and aggregates
    /// `title\ncontent\n\n` per hit.
    ///
    /// An empty page means "no more results" and ends paging cleanly. Any
    /// per-page failure ends paging for this query and is recorded in the
    /// outcome; text aggregated from earlier pages is kept.
    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> SearchOutcome {
        let mut outcome = SearchOutcome::default();
        let encoded = urlencoding::encode(query);

        for page in 1..=self.config.max_pages {
            let url = format!(
                "{}/search?q={}&format=json&pageno={}",
                self.endpoint, encoded, page
            );
            debug!(page, url = %url, "fetching search page");

            let response = match self
                .client
                .get(&url)
                .timeout(self.config.request_timeout)
                .send()
                .await
            {
                Ok(response) => response,
                Err(e) if e.is_timeout() => {
                    error!(page, query, "search request timed out");
                    outcome.failure = Some(SearchFailure::Timeout { page });
                    break;
                }
                Err(e) => {
                    error!(page, query, error = %e, "search request failed");
                    outcome.failure = Some(SearchFailure::Transport {
                        page,
                        message: e.to_string(),
                    });
                    break;
                }
            };

            let status = response.status();
            if !status.is_success() {
                error!(
                    page,
                    query,
                    status = status.as_u16(),
                    "search backend returned error status"
                );
                outcome.failure = Some(SearchFailure::HttpStatus {
                    page,
                    status: status.as_u16(),
                });
                break;
            }

            let body = match response.json::<SearchResponse>().await {
                Ok(parsed) => parsed,
                Err(e) if e.is_timeout() => {
                    error!(page, query, "search response body timed out");
                    outcome.failure = Some(SearchFailure::Timeout { page });
                    break;
                }
                Err(e) => {
                    error!(page, query, error = %e, "search response was not valid JSON");
                    outcome.failure = Some(SearchFailure::MalformedResponse { page });
                    break;
                }
            };

            if body.results.is_empty() {
                debug!(page, "no results on this page; stopping pagination");
                break;
            }

            debug!(page, hits = body.results.len(), "aggregating page results");
            for hit in &body.results {
                outcome.text.push_str(hit.title.as_deref().unwrap_or(""));
                outcome.text.push('\n');
                outcome.text.push_str(hit.content.as_deref().unwrap_or(""));
                outcome.text.push_str("\n\n");
            }

            if page < self.config.max_pages {
                tokio::time::sleep(self.config.page_delay).await;
            }
        }

        debug!(
            text_len = outcome.text.len(),
            failure = ?outcome.failure,
            "query finished"
        );
        outcome
    }
}
