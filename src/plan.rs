//! Search query planning from known company facts.
//!
//! The planner is recall-oriented: it casts several narrow-to-broad
//! queries per run rather than one precise query, and relies on
//! downstream extraction/filtering to absorb the noise. Which template
//! set is used depends on whether a contact name and/or a target domain
//! are known.

use tracing::debug;

/// Templates used when both a contact name and a domain are known.
const TEMPLATES_CONTACT_AND_DOMAIN: &[&str] = &[
    r#""{name}" "{domain}" email"#,
    r#""{name}" email address {domain}"#,
    r#"contact "{name}" {domain}"#,
    // Broader fallbacks
    r#""{domain}" email"#,
    r#"contact {domain}"#,
];

/// Templates used when a contact name is known but no domain was confirmed.
const TEMPLATES_CONTACT_ONLY: &[&str] = &[
    r#""{name}" "{search_name}" email"#,
    r#""{name}" email address "{search_name}" company"#,
    r#"contact "{name}" "{search_name}""#,
    r#""{search_name}" email"#,
];

/// Templates used when a domain is known but no contact name was given.
const TEMPLATES_DOMAIN_ONLY: &[&str] = &[
    r#""{domain}" email address"#,
    r#"contact OR support email "{domain}""#,
    r#""{domain}" company contact"#,
    r"site:{domain} email OR contact",
];

/// Templates used when only the company name is known.
const TEMPLATES_NAME_ONLY: &[&str] = &[
    r#""{search_name}" contact email"#,
    r#""{search_name}" customer service email"#,
    r#""{search_name}" company email address"#,
    r#"email address for "{search_name}""#,
];

/// An ordered, immutable sequence of search queries for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    queries: Vec<String>,
}

impl QueryPlan {
    /// Returns the planned queries in execution order.
    #[must_use]
    pub fn queries(&self) -> &[String] {
        &self.queries
    }

    /// Returns the number of planned queries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queries.len()
    }

    /// Returns true when the plan contains no queries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}

/// Builds the query plan for one discovery run.
///
/// Selects one of four template sets based on which facts are known, then
/// appends permutation-guess literal address queries when a contact name
/// with at least two whitespace-separated parts and a domain are both
/// available.
#[must_use]
pub fn plan(search_name: &str, contact_name: Option<&str>, domain: Option<&str>) -> QueryPlan {
    let templates = match (contact_name, domain) {
        (Some(_), Some(_)) => TEMPLATES_CONTACT_AND_DOMAIN,
        (Some(_), None) => TEMPLATES_CONTACT_ONLY,
        (None, Some(_)) => TEMPLATES_DOMAIN_ONLY,
        (None, None) => TEMPLATES_NAME_ONLY,
    };

    let name = contact_name.unwrap_or("");
    let dom = domain.unwrap_or("");

    let mut queries: Vec<String> = templates
        .iter()
        .map(|template| instantiate(template, name, dom, search_name))
        .collect();

    if let (Some(contact), Some(dom)) = (contact_name, domain) {
        queries.extend(permutation_guesses(contact, dom));
    }

    debug!(count = queries.len(), "query plan built");
    QueryPlan { queries }
}

/// Substitutes placeholders and removes artifacts of empty quoted values.
fn instantiate(template: &str, name: &str, domain: &str, search_name: &str) -> String {
    template
        .replace("{name}", name)
        .replace("{domain}", domain)
        .replace("{search_name}", search_name)
        // An unknown value leaves a stray "" next to a space
        .replace("\"\" ", "")
        .replace(" \"\"", "")
}

/// Builds exact-match queries for common first/last-name address conventions.
///
/// Returns an empty list when the contact name does not decompose into at
/// least two whitespace-separated parts.
fn permutation_guesses(contact_name: &str, domain: &str) -> Vec<String> {
    let lowered = contact_name.to_lowercase();
    let parts: Vec<&str> = lowered.split_whitespace().collect();
    let (Some(&first), Some(&last)) = (parts.first(), parts.last()) else {
        return Vec::new();
    };
    if parts.len() < 2 {
        return Vec::new();
    }
    let Some(initial) = first.chars().next() else {
        return Vec::new();
    };

    vec![
        format!("\"{initial}{last}@{domain}\""),
        format!("\"{first}.{last}@{domain}\""),
        format!("\"{first}{last}@{domain}\""),
        format!("\"{last}.{first}@{domain}\""),
        format!("\"{first}@{domain}\""),
    ]
}
