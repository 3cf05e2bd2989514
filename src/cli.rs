//! CLI command definitions for taskrank.
//!
//! The binary is a thin shell around the engine: it parses arguments, sets
//! up logging, reads a JSON task batch, and prints the engine's output.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::scoring::DEFAULT_SUGGESTION_COUNT;

/// Score and rank a batch of tasks by urgency, importance, effort, and
/// dependency impact.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Scoring strategy: smart_balance, fastest_wins, high_impact, deadline_driven
    #[arg(short, long, default_value = "smart_balance", global = true)]
    pub strategy: String,

    /// Calendar region code for working-day counting
    #[arg(short, long, default_value = "IN", global = true)]
    pub region: String,

    /// Override "today" (YYYY-MM-DD) for deterministic runs
    #[arg(long, global = true)]
    pub today: Option<String>,

    /// Path to a holidays.yaml (overrides discovered config)
    #[arg(long, global = true)]
    pub holidays: Option<PathBuf>,

    /// Output format: markdown or json
    #[arg(short, long, default_value = "markdown", global = true)]
    pub format: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Score every pending task and report dependency diagnostics
    Analyze(BatchArgs),

    /// Rank tasks and print the top suggestions with rationale
    Suggest(SuggestArgs),
}

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// JSON file with the task batch, or "-" for stdin
    #[arg(default_value = "-")]
    pub file: String,
}

#[derive(Args, Debug)]
pub struct SuggestArgs {
    #[command(flatten)]
    pub batch: BatchArgs,

    /// Number of suggestions to return
    #[arg(short, long, default_value_t = DEFAULT_SUGGESTION_COUNT)]
    pub count: usize,
}
