//! Lead Email Finder Core Library
//!
//! This library discovers plausible contact email addresses for a company,
//! given a company name or domain and an optional contact-person name. It
//! issues a series of targeted queries against a SearXNG-compatible search
//! backend and mines the returned snippets for email-shaped tokens,
//! filtered against a provider blacklist and the company's domain.
//!
//! # Architecture
//!
//! - [`domain`] - Input classification and domain normalization
//! - [`plan`] - Adaptive query planning from known facts
//! - [`search`] - Search backend client with per-page failure isolation
//! - [`extract`] - Email candidate extraction from aggregated text
//! - [`filter`] - Blacklist and target-domain filtering
//! - [`pipeline`] - Orchestration and the [`DiscoveryResult`] record

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod domain;
pub mod extract;
pub mod filter;
pub mod pipeline;
pub mod plan;
pub mod search;

// Re-export commonly used types
pub use filter::Blacklist;
pub use pipeline::{DiscoveryConfig, DiscoveryResult, discover, run_with_provider};
pub use plan::QueryPlan;
pub use search::{
    ConfigError, DEFAULT_MAX_PAGES, DEFAULT_REQUEST_TIMEOUT, SearchClient, SearchClientConfig,
    SearchEndpoint, SearchFailure, SearchOutcome, SearchProvider,
};
