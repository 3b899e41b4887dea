//! CLI entry point for the leadfinder tool.

use std::fs;
use std::path::Path;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use leadfinder_core::{DiscoveryConfig, DiscoveryResult, SearchClientConfig, discover};
use tracing::{debug, error, info, warn};

mod cli;

use cli::{Args, OutputFormat};

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");
    info!("Lead email finder starting");

    let config = DiscoveryConfig {
        search: SearchClientConfig {
            max_pages: args.max_pages,
            request_timeout: Duration::from_secs(args.timeout),
            ..SearchClientConfig::default()
        },
        ..DiscoveryConfig::default()
    };

    let started = Instant::now();
    let result = discover(
        &args.company_input,
        args.contact_name.as_deref(),
        &args.searx_url,
        &config,
    )
    .await;
    info!(
        elapsed = ?started.elapsed(),
        found = result.found_emails.len(),
        "discovery finished"
    );

    let rendering = match render(&result, args.output_format) {
        Ok(rendering) => rendering,
        Err(e) => {
            error!(error = %e, "failed to render result");
            return ExitCode::FAILURE;
        }
    };

    if let Some(path) = &args.output_file {
        if let Err(e) = write_output(path, &rendering) {
            warn!(path = %path.display(), error = %e, "failed to write output file; printing to stdout");
            println!("{rendering}");
        } else {
            info!(path = %path.display(), "output saved");
        }
    } else {
        println!("{rendering}");
    }

    if result.error.is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Renders the result record in the requested output format.
fn render(result: &DiscoveryResult, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(result).context("serializing discovery result")?
        }
        OutputFormat::Txt => {
            if let Some(error) = &result.error {
                format!("Error: {error}")
            } else if result.found_emails.is_empty() {
                "# No emails found".to_string()
            } else {
                result.found_emails.join("\n")
            }
        }
    })
}

/// Writes the rendering to a file, creating parent directories as needed.
fn write_output(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)
}
