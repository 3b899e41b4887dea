//! Domain normalization and input classification.
//!
//! Company input is free-form: a bare domain (`acme.com`), a full URL
//! (`https://www.acme.com/about`), or a plain company name (`Acme Corp`).
//! [`normalize`] reduces domain-shaped input to a canonical registrable
//! domain; [`classify`] tags the input so the pipeline can branch on an
//! explicit outcome instead of ad-hoc string checks.

use tracing::debug;
use url::Url;

/// How a company input string was classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputClassification {
    /// Input resolved to a canonical registrable domain.
    Domain(String),
    /// Input contains no `.`; treat the whole string as a company name.
    NameOnly,
    /// Input looked like a domain (contains `.`) but failed normalization.
    FailedParse,
}

/// Classifies a company input string.
///
/// Only inputs containing a `.` are candidates for domain normalization;
/// everything else is a free-text company name.
#[must_use]
pub fn classify(input: &str) -> InputClassification {
    if !input.contains('.') {
        return InputClassification::NameOnly;
    }
    match normalize(input) {
        Some(domain) => InputClassification::Domain(domain),
        None => InputClassification::FailedParse,
    }
}

/// Normalizes a domain-shaped input string to its canonical registrable domain.
///
/// Accepts bare domains, scheme-relative URLs, and full HTTP/HTTPS URLs.
/// The authority is extracted, a leading `www.` is stripped, and any port
/// suffix is dropped. Returns `None` when the input has no usable
/// authority, when the result contains no `.`, or when the final label is
/// shorter than 2 characters.
///
/// # Examples
///
/// ```
/// use leadfinder_core::domain::normalize;
///
/// assert_eq!(normalize("https://www.example.com:8080/path"), Some("example.com".to_string()));
/// assert_eq!(normalize("EXAMPLE.COM"), Some("example.com".to_string()));
/// assert_eq!(normalize("not a url"), None);
/// ```
#[must_use]
pub fn normalize(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        debug!("empty input; nothing to normalize");
        return None;
    }

    // Bare domains and full URLs must parse identically, so give
    // scheme-less input an https:// prefix before parsing.
    let candidate = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else if let Some(rest) = trimmed.strip_prefix("//") {
        format!("https://{rest}")
    } else {
        format!("https://{trimmed}")
    };

    let parsed = match Url::parse(&candidate) {
        Ok(parsed) => parsed,
        Err(error) => {
            debug!(input = %trimmed, error = %error, "input did not parse as a URL");
            return None;
        }
    };

    // host_str() is already lowercased and excludes any :port suffix.
    let host = parsed.host_str()?;
    let domain = host.strip_prefix("www.").unwrap_or(host);

    let Some((_, last_label)) = domain.rsplit_once('.') else {
        debug!(input = %trimmed, %domain, "normalized authority has no dot");
        return None;
    };
    if last_label.len() < 2 {
        debug!(input = %trimmed, %domain, "final domain label is too short");
        return None;
    }

    Some(domain.to_string())
}

/// Returns true when the input carries an explicit scheme prefix
/// (`http://`, `https://`, or scheme-relative `//`).
#[must_use]
pub fn has_scheme_prefix(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://") || input.starts_with("//")
}
