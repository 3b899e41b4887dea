//! Email candidate extraction from aggregated search text.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// Regex pattern for email-shaped tokens: `local-part@domain.tld`.
#[allow(clippy::expect_used)]
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("email regex is valid") // Static pattern, safe to panic
});

/// Extracts unique, lowercased email candidates from text.
///
/// Collects every non-overlapping match of the email pattern. Case-variant
/// duplicates collapse because matches are lowercased before insertion.
/// Empty input yields an empty set.
#[must_use]
pub fn extract_candidates(text: &str) -> HashSet<String> {
    if text.is_empty() {
        return HashSet::new();
    }
    let candidates: HashSet<String> = EMAIL_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect();
    debug!(count = candidates.len(), "extracted candidate emails");
    candidates
}
