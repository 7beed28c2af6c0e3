//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// quotecmp - Compare vendor quotes and find the best deal
#[derive(Parser)]
#[command(name = "quotecmp")]
#[command(about = "Compare extracted vendor quotes and find the lowest price", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to ~/.config/quotecmp/config.toml, then built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare already-extracted quote records
    Compare {
        /// JSON file holding an array of extraction records ("-" for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Print the comparison as JSON
        #[arg(long)]
        json: bool,
    },

    /// Extract a batch of documents and compare them
    ///
    /// With the default replay backend each file is a saved response from
    /// the extraction service, one per uploaded document.
    Batch {
        /// Documents (or saved responses), in upload order
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Print the comparison as JSON
        #[arg(long)]
        json: bool,

        /// Extractions to run at once (overrides config)
        #[arg(short, long)]
        concurrency: Option<usize>,
    },

    /// Show the effective configuration
    Config,
}
