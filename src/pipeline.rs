//! Discovery pipeline orchestration.
//!
//! One run is a linear state machine: classify the input, plan queries,
//! run each query and extract candidates, union the candidates, filter,
//! and assemble the [`DiscoveryResult`]. Per-query and per-page failures
//! are absorbed along the way; only configuration failures populate the
//! result's `error` field.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::domain::{self, InputClassification};
use crate::extract::extract_candidates;
use crate::filter::{Blacklist, filter_candidates};
use crate::plan;
use crate::search::{
    ConfigError, SearchClient, SearchClientConfig, SearchEndpoint, SearchProvider,
};

/// Final record of one discovery run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryResult {
    /// Display name used in queries (original input or derived from the domain).
    pub search_name: String,
    /// Canonical target domain, when the input resolved to one.
    pub target_domain: Option<String>,
    /// Sorted, deduplicated list of surviving candidate addresses.
    pub found_emails: Vec<String>,
    /// Populated only on configuration failure (unusable endpoint).
    pub error: Option<String>,
}

impl DiscoveryResult {
    fn config_error(company_input: &str, error: &ConfigError) -> Self {
        Self {
            search_name: company_input.to_string(),
            target_domain: None,
            found_emails: Vec::new(),
            error: Some(error.to_string()),
        }
    }
}

/// Configuration surface for one discovery run.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryConfig {
    /// Search client knobs (pages, timeout, inter-page delay).
    pub search: SearchClientConfig,
    /// Domains to drop during filtering.
    pub blacklist: Blacklist,
}

/// Resolved facts about the company input.
#[derive(Debug)]
struct ResolvedInput {
    search_name: String,
    target_domain: Option<String>,
}

/// Classifies the input and picks the display name used in queries.
///
/// When the input is nothing more than the bare domain (equal string, or
/// a URL with a scheme), the first domain label stands in as the company
/// name; otherwise the original input is kept.
fn resolve_input(company_input: &str) -> ResolvedInput {
    match domain::classify(company_input) {
        InputClassification::Domain(target) => {
            let search_name = if company_input.eq_ignore_ascii_case(&target)
                || domain::has_scheme_prefix(company_input)
            {
                target
                    .split('.')
                    .next()
                    .unwrap_or(target.as_str())
                    .to_string()
            } else {
                company_input.to_string()
            };
            info!(domain = %target, search_name = %search_name, "input resolved to a domain");
            ResolvedInput {
                search_name,
                target_domain: Some(target),
            }
        }
        InputClassification::FailedParse => {
            warn!(
                input = company_input,
                "input looked like a domain but failed normalization; treating as company name"
            );
            ResolvedInput {
                search_name: company_input.to_string(),
                target_domain: None,
            }
        }
        InputClassification::NameOnly => {
            info!(input = company_input, "input treated as company name");
            ResolvedInput {
                search_name: company_input.to_string(),
                target_domain: None,
            }
        }
    }
}

/// Runs the discovery pipeline against an already-constructed provider.
///
/// Queries run strictly sequentially; a query that yields no text or no
/// candidates contributes nothing and never aborts the run.
#[instrument(skip(provider, blacklist))]
pub async fn run_with_provider(
    company_input: &str,
    contact_name: Option<&str>,
    provider: &dyn SearchProvider,
    blacklist: &Blacklist,
) -> DiscoveryResult {
    let resolved = resolve_input(company_input);
    let plan = plan::plan(
        &resolved.search_name,
        contact_name,
        resolved.target_domain.as_deref(),
    );
    info!(queries = plan.len(), "running search queries");

    let mut candidates: HashSet<String> = HashSet::new();
    for (index, query) in plan.queries().iter().enumerate() {
        info!(
            query = %query,
            progress = format_args!("{}/{}", index + 1, plan.len()),
            "searching"
        );
        let outcome = provider.search(query).await;
        if let Some(failure) = &outcome.failure {
            debug!(%failure, "query ended early");
        }
        if outcome.text.is_empty() {
            warn!(query = %query, "no text content retrieved");
            continue;
        }
        let extracted = extract_candidates(&outcome.text);
        debug!(found = extracted.len(), "candidates from query");
        candidates.extend(extracted);
    }
    info!(total = candidates.len(), "search phase complete");

    let found_emails = filter_candidates(&candidates, resolved.target_domain.as_deref(), blacklist);
    info!(kept = found_emails.len(), "filtering complete");

    DiscoveryResult {
        search_name: resolved.search_name,
        target_domain: resolved.target_domain,
        found_emails,
        error: None,
    }
}

/// Runs a full discovery: validates the endpoint, builds the search
/// client, and executes the pipeline.
///
/// Endpoint/client configuration failures populate the result's `error`
/// field instead of returning `Err`; everything downstream degrades
/// gracefully per query.
#[instrument(skip(config))]
pub async fn discover(
    company_input: &str,
    contact_name: Option<&str>,
    endpoint: &str,
    config: &DiscoveryConfig,
) -> DiscoveryResult {
    let endpoint = match SearchEndpoint::parse(endpoint) {
        Ok(endpoint) => endpoint,
        Err(error) => {
            tracing::error!(%error, "no usable search endpoint");
            return DiscoveryResult::config_error(company_input, &error);
        }
    };
    let client = match SearchClient::with_config(endpoint, config.search.clone()) {
        Ok(client) => client,
        Err(error) => {
            tracing::error!(%error, "failed to initialize search client");
            return DiscoveryResult::config_error(company_input, &error);
        }
    };

    run_with_provider(company_input, contact_name, &client, &config.blacklist).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::search::SearchOutcome;

    /// Scripted provider: returns canned text for queries containing a
    /// registered fragment, empty outcomes otherwise.
    struct ScriptedProvider {
        responses: HashMap<&'static str, &'static str>,
        queries_seen: Mutex<Vec<String>>,
    }

    impl ScriptedProvider {
        fn new(responses: HashMap<&'static str, &'static str>) -> Self {
            Self {
                responses,
                queries_seen: Mutex::new(Vec::new()),
            }
        }

        fn empty() -> Self {
            Self::new(HashMap::new())
        }
    }

    #[async_trait]
    impl SearchProvider for ScriptedProvider {
        async fn search(&self, query: &str) -> SearchOutcome {
            self.queries_seen.lock().unwrap().push(query.to_string());
            let text = self
                .responses
                .iter()
                .find(|(fragment, _)| query.contains(*fragment))
                .map(|(_, text)| (*text).to_string())
                .unwrap_or_default();
            SearchOutcome {
                text,
                failure: None,
            }
        }
    }

    // ==================== Input Resolution ====================

    #[test]
    fn test_resolve_bare_domain_derives_name_from_first_label() {
        let resolved = resolve_input("acme.com");
        assert_eq!(resolved.target_domain.as_deref(), Some("acme.com"));
        assert_eq!(resolved.search_name, "acme");
    }

    #[test]
    fn test_resolve_url_input_derives_name_from_first_label() {
        let resolved = resolve_input("https://www.acme.com/about");
        assert_eq!(resolved.target_domain.as_deref(), Some("acme.com"));
        assert_eq!(resolved.search_name, "acme");
    }

    #[test]
    fn test_resolve_mixed_case_bare_domain() {
        let resolved = resolve_input("ACME.com");
        assert_eq!(resolved.target_domain.as_deref(), Some("acme.com"));
        assert_eq!(resolved.search_name, "acme");
    }

    #[test]
    fn test_resolve_plain_name_has_no_domain() {
        let resolved = resolve_input("Acme Corp");
        assert_eq!(resolved.target_domain, None);
        assert_eq!(resolved.search_name, "Acme Corp");
    }

    #[test]
    fn test_resolve_failed_parse_falls_back_to_name() {
        let resolved = resolve_input("Acme Inc.");
        assert_eq!(resolved.target_domain, None);
        assert_eq!(resolved.search_name, "Acme Inc.");
    }

    // ==================== Pipeline Runs ====================

    #[tokio::test]
    async fn test_run_unions_candidates_across_queries_and_filters() {
        let provider = ScriptedProvider::new(HashMap::from([
            ("\"acme.com\" email", "Reach sales@acme.com today"),
            (
                "contact acme.com",
                "Jane\njane.doe@ACME.com and x@hunter.io and ceo@gmail.com",
            ),
        ]));
        let result =
            run_with_provider("acme.com", Some("Jane Doe"), &provider, &Blacklist::default())
                .await;

        assert_eq!(result.target_domain.as_deref(), Some("acme.com"));
        assert_eq!(
            result.found_emails,
            vec!["jane.doe@acme.com", "sales@acme.com"]
        );
        assert_eq!(result.error, None);
    }

    #[tokio::test]
    async fn test_run_empty_backend_yields_empty_result() {
        let provider = ScriptedProvider::empty();
        let result = run_with_provider("acme.com", None, &provider, &Blacklist::default()).await;
        assert!(result.found_emails.is_empty());
        assert_eq!(result.error, None);
    }

    #[tokio::test]
    async fn test_run_executes_every_planned_query() {
        let provider = ScriptedProvider::empty();
        run_with_provider("acme.com", Some("Jane Doe"), &provider, &Blacklist::default()).await;
        let seen = provider.queries_seen.lock().unwrap();
        // 5 templates + 5 permutation guesses
        assert_eq!(seen.len(), 10);
        assert!(seen.iter().any(|q| q.contains("jdoe@acme.com")));
    }

    #[tokio::test]
    async fn test_run_without_domain_keeps_foreign_candidates() {
        let provider = ScriptedProvider::new(HashMap::from([(
            "contact email",
            "hello@acme.com also press@other.org",
        )]));
        let result =
            run_with_provider("Acme Corp", None, &provider, &Blacklist::default()).await;
        assert_eq!(result.target_domain, None);
        assert_eq!(result.found_emails, vec!["hello@acme.com", "press@other.org"]);
    }

    #[tokio::test]
    async fn test_run_domain_invariant_holds() {
        let provider = ScriptedProvider::new(HashMap::from([(
            "email",
            "a@acme.com b@other.com c@acme.com",
        )]));
        let result = run_with_provider("acme.com", None, &provider, &Blacklist::default()).await;
        assert!(
            result
                .found_emails
                .iter()
                .all(|e| e.ends_with("@acme.com"))
        );
    }

    // ==================== Configuration Errors ====================

    #[tokio::test]
    async fn test_discover_rejects_invalid_endpoint() {
        let result = discover(
            "acme.com",
            None,
            "not-a-url",
            &DiscoveryConfig::default(),
        )
        .await;
        assert!(result.found_emails.is_empty());
        let error = result.error.unwrap();
        assert!(error.contains("endpoint"), "got: {error}");
    }

    #[tokio::test]
    async fn test_discover_rejects_empty_endpoint() {
        let result = discover("acme.com", None, "", &DiscoveryConfig::default()).await;
        assert!(result.error.is_some());
    }

    // ==================== Serialization ====================

    #[test]
    fn test_result_serializes_with_expected_fields() {
        let result = DiscoveryResult {
            search_name: "acme".to_string(),
            target_domain: Some("acme.com".to_string()),
            found_emails: vec!["sales@acme.com".to_string()],
            error: None,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["search_name"], "acme");
        assert_eq!(json["target_domain"], "acme.com");
        assert_eq!(json["found_emails"][0], "sales@acme.com");
        assert!(json["error"].is_null());
    }
}
