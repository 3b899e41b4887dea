//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use leadfinder_core::{DEFAULT_MAX_PAGES, DEFAULT_REQUEST_TIMEOUT};

/// Discover plausible contact email addresses for a company.
///
/// leadfinder issues targeted web searches against a SearXNG instance and
/// mines the result snippets for email-shaped tokens, filtered against a
/// blacklist of generic providers and (when known) the company's domain.
#[derive(Parser, Debug)]
#[command(name = "leadfinder")]
#[command(author, version, about)]
pub struct Args {
    /// Company name or domain/URL (e.g. "Acme Corp" or "acme.com")
    pub company_input: String,

    /// Base URL of the SearXNG instance
    #[arg(short = 's', long)]
    pub searx_url: String,

    /// Full name of a contact person to prioritize
    #[arg(short = 'c', long)]
    pub contact_name: Option<String>,

    /// Path to save the rendered output
    #[arg(short = 'o', long)]
    pub output_file: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Json)]
    pub output_format: OutputFormat,

    /// Maximum result pages fetched per query (1-10)
    #[arg(short = 'p', long, default_value_t = DEFAULT_MAX_PAGES, value_parser = clap::value_parser!(u32).range(1..=10))]
    pub max_pages: u32,

    /// Per-request timeout in seconds (1-120)
    #[arg(short = 't', long, default_value_t = DEFAULT_REQUEST_TIMEOUT.as_secs(), value_parser = clap::value_parser!(u64).range(1..=120))]
    pub timeout: u64,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

/// How the discovery result is rendered.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Full result record as pretty-printed JSON
    Json,
    /// One email per line
    Txt,
}
