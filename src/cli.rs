//! Command-line interface for datasure

use crate::config::Environment;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "datasure")]
#[command(about = "Verify that a migrated report export reproduces the legacy export")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to ./datasure.json when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress progress spinners and print machine-readable output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare a source export against a target export
    Compare {
        /// Source (legacy) export: csv, tsv, parquet, json or jsonl
        source: PathBuf,

        /// Target (migrated) export
        target: PathBuf,

        /// Maximum number of row-level differences to report (must be > 0)
        #[arg(long, value_parser = validate_max_differences)]
        max_differences: Option<usize>,

        /// Run checks one after another instead of in parallel
        #[arg(long)]
        sequential: bool,

        /// Output format: "pretty", "json"
        #[arg(long, default_value = "pretty")]
        format: String,

        /// Write the JSON report to this file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Project name shown in the report
        #[arg(long)]
        project_name: Option<String>,

        /// Report name shown in the report
        #[arg(long)]
        report_name: Option<String>,

        /// Environment: DEV, SIT, UAT, QA or PROD
        #[arg(long, value_parser = Environment::parse)]
        environment: Option<Environment>,

        /// Exit with status 2 when the overall verdict is FAIL
        #[arg(long)]
        fail_on_mismatch: bool,
    },

    /// Show the shape and column types of an export
    Inspect {
        /// File to inspect
        input: PathBuf,

        /// Output format: "pretty", "json"
        #[arg(long, default_value = "pretty")]
        format: String,
    },
}

/// Validate that the difference cap is greater than 0
fn validate_max_differences(s: &str) -> Result<usize, String> {
    let max: usize = s
        .parse()
        .map_err(|_| format!("Invalid max differences: '{}'. Must be a positive integer.", s))?;

    if max == 0 {
        return Err("Max differences must be greater than 0".to_string());
    }

    Ok(max)
}
