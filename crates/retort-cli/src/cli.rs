//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Retort: chemical identifier validation against PubChem
#[derive(Parser)]
#[command(name = "retort")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a data file of chemical identifiers
    Validate {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path for the results table (default: <file>.validation.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the full report as JSON instead of CSV
        #[arg(long)]
        json: bool,

        /// Delay between PubChem requests, in milliseconds
        #[arg(long, default_value = "200")]
        delay_ms: u64,

        /// Skip the PubChem connectivity check
        #[arg(long)]
        no_preflight: bool,

        /// Run without network access (every lookup finds nothing)
        #[arg(long)]
        offline: bool,
    },

    /// Normalize and check one or more CAS registry numbers
    Cas {
        /// CAS numbers to check
        #[arg(value_name = "CAS", required = true)]
        values: Vec<String>,
    },
}
