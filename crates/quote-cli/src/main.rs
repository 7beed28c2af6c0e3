//! quotecmp CLI - Vendor quote comparison
//!
//! Usage:
//!   quotecmp compare --input records.json    Compare extracted records
//!   quotecmp batch a.json b.json c.json      Extract a batch and compare
//!   quotecmp config                          Show effective configuration

mod cli;
mod commands;


use anyhow::{Context, Result};
use clap::Parser;
use quote_core::QuoteConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Logs go to stderr so --json output stays clean
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();

    let config =
        QuoteConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Commands::Compare { input, json } => commands::cmd_compare(&input, json, &config),
        Commands::Batch {
            files,
            json,
            concurrency,
        } => commands::cmd_batch(&files, json, concurrency, &config).await,
        Commands::Config => commands::cmd_config(cli.config.as_deref(), &config),
    }
}
