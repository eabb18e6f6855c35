//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! `batchship` has no subcommands: one invocation is one deployment run (or
//! one dry run, or one registry listing).

use std::path::PathBuf;

use clap::Parser;

use crate::config::DEFAULT_CONFIG_FILE;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// batchship - ordered batch deployment over SSH
#[derive(Parser, Debug)]
#[command(name = "batchship")]
#[command(author, version, about, long_about = None)]
#[command(
    after_help = "Exit status is 0 only when every selected batch was uploaded and verified."
)]
pub struct Cli {
    /// Target name from the registry (defaults to project.default_target)
    #[arg(short, long)]
    pub target: Option<String>,

    /// Report what would be transferred without connecting
    #[arg(short, long)]
    pub dry_run: bool,

    /// Deploy only this batch (health checks are skipped)
    #[arg(long, value_name = "NAME")]
    pub batch: Option<String>,

    /// Configuration file
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// List configured targets and exit
    #[arg(long, conflicts_with_all = ["dry_run", "batch"])]
    pub list_targets: bool,

    /// Output format for CI (NDJSON events, then the report)
    #[arg(long)]
    pub json: bool,

    /// Color output mode
    #[arg(long, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Default log filter for `-v` occurrences
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
