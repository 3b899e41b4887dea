//! Candidate filtering: blacklist and target-domain enforcement.
//!
//! The blacklist is an explicit configuration value injected into the
//! filter rather than process-wide hidden state, so the filter can be
//! tested against arbitrary blacklists.

use std::collections::HashSet;

use tracing::{debug, warn};

/// Domains whose addresses are never useful leads: free-mail providers,
/// email-enrichment/verification services, site builders, and social
/// platforms that show up constantly in search snippets.
const DEFAULT_BLACKLISTED_DOMAINS: &[&str] = &[
    "email-format.com",
    "rocketreach.co",
    "hunter.io",
    "clearbit.com",
    "apollo.io",
    "emailhippo.com",
    "mailcheck.ai",
    "verify-email.org",
    "email-checker.net",
    "findemails.com",
    "findthat.email",
    "skymem.info",
    "anymail.com",
    "snov.io",
    "thatsthem.com",
    "emailfinder.io",
    "aol.com",
    "gmail.com",
    "googlemail.com",
    "hotmail.com",
    "msn.com",
    "live.com",
    "yahoo.com",
    "outlook.com",
    "gmx.com",
    "mail.com",
    "example.com",
    "wix.com",
    "squarespace.com",
    "godaddy.com",
    "protobuf.com",
    "zoho.com",
    "yandex.com",
    "protonmail.com",
    "github.com",
    "icloud.com",
    "privaterelay.appleid.com",
    "linkedin.com",
    "facebook.com",
    "twitter.com",
    "instagram.com",
    "support.com",
    "service.com",
    "info.com",
];

/// A set of email domains to drop during filtering.
#[derive(Debug, Clone)]
pub struct Blacklist {
    domains: HashSet<String>,
}

impl Blacklist {
    /// Creates a blacklist from the given domains (lowercased on insert).
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            domains: domains
                .into_iter()
                .map(|d| d.into().to_lowercase())
                .collect(),
        }
    }

    /// Creates an empty blacklist (filtering on target domain only).
    #[must_use]
    pub fn empty() -> Self {
        Self {
            domains: HashSet::new(),
        }
    }

    /// Returns true when the given domain is blacklisted.
    #[must_use]
    pub fn contains(&self, domain: &str) -> bool {
        self.domains.contains(domain)
    }

    /// Returns the number of blacklisted domains.
    #[must_use]
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    /// Returns true when no domains are blacklisted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

impl Default for Blacklist {
    /// The built-in blacklist of generic/free-mail/enrichment domains.
    fn default() -> Self {
        Self::new(DEFAULT_BLACKLISTED_DOMAINS.iter().copied())
    }
}

/// Filters candidates against the blacklist and the target domain.
///
/// Candidates that do not decompose into exactly one local part and one
/// domain part are skipped with a warning. When `target_domain` is given,
/// only candidates whose domain part equals it survive. The result is
/// sorted ascending with duplicates removed.
#[must_use]
pub fn filter_candidates(
    candidates: &HashSet<String>,
    target_domain: Option<&str>,
    blacklist: &Blacklist,
) -> Vec<String> {
    debug!(
        count = candidates.len(),
        ?target_domain,
        "filtering candidates"
    );

    let mut kept = Vec::new();
    for candidate in candidates {
        if candidate.matches('@').count() != 1 {
            warn!(candidate = %candidate, "skipping malformed email candidate");
            continue;
        }
        let Some((_, domain_part)) = candidate.split_once('@') else {
            continue;
        };

        if blacklist.contains(domain_part) {
            debug!(candidate = %candidate, "dropping blacklisted domain");
            continue;
        }

        if let Some(target) = target_domain
            && !domain_part.eq_ignore_ascii_case(target)
        {
            debug!(candidate = %candidate, target, "dropping non-target domain");
            continue;
        }

        kept.push(candidate.clone());
    }

    kept.sort();
    kept.dedup();
    debug!(kept = kept.len(), "filtering complete");
    kept
}
