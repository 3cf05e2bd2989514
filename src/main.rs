//! Taskrank CLI
//!
//! Thin shell around the scoring engine: reads a JSON task batch, runs the
//! analyze or suggest operation, and prints the result.

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use clap::Parser;
use serde::Deserialize;
use std::fs::OpenOptions;
use std::io::Read;
use taskrank::cli::{BatchArgs, Cli, Command};
use taskrank::config::{ConfigPaths, load_calendar};
use taskrank::format::{OutputFormat, render_analysis, render_suggestions};
use taskrank::ingest::RawTask;
use taskrank::scoring::{ScoreOptions, analyze, suggest};
use taskrank::scoring::strategy::Strategy;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Accept either a bare JSON array of tasks or a `{"tasks": [...]}` wrapper.
#[derive(Deserialize)]
#[serde(untagged)]
enum BatchInput {
    Wrapped { tasks: Vec<RawTask> },
    Bare(Vec<RawTask>),
}

impl BatchInput {
    fn into_tasks(self) -> Vec<RawTask> {
        match self {
            BatchInput::Wrapped { tasks } => tasks,
            BatchInput::Bare(tasks) => tasks,
        }
    }
}

fn read_batch(args: &BatchArgs) -> Result<Vec<RawTask>> {
    let text = if args.file == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading task batch from stdin")?;
        buf
    } else {
        std::fs::read_to_string(&args.file)
            .with_context(|| format!("reading task batch from {}", args.file))?
    };

    let input: BatchInput = serde_json::from_str(&text).context("parsing task batch JSON")?;
    Ok(input.into_tasks())
}

fn build_options(cli: &Cli) -> Result<ScoreOptions> {
    let strategy = Strategy::from_name(&cli.strategy)?;

    let today = match &cli.today {
        Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .with_context(|| format!("invalid --today value: {text}"))?,
        None => Local::now().date_naive(),
    };

    let paths = ConfigPaths::discover();
    let calendar = load_calendar(cli.holidays.as_deref(), &paths)?;

    Ok(ScoreOptions::new(strategy, cli.region.clone(), today).with_calendar(calendar))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on --log option
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    match cli.log.as_str() {
        "0" | "off" => {
            // No logging
        }
        "1" | "stdout" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        "2" | "stderr" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        filename => {
            // Log to file (append mode)
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(filename)?;
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(file)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    let format = match OutputFormat::from_str(&cli.format) {
        Some(f) => f,
        None => bail!("unknown output format: {} (expected markdown or json)", cli.format),
    };

    let opts = build_options(&cli)?;

    match &cli.command {
        Command::Analyze(args) => {
            let batch = read_batch(args)?;
            let analysis = analyze(&batch, &opts)?;
            println!("{}", render_analysis(&analysis, format)?);
        }
        Command::Suggest(args) => {
            let batch = read_batch(&args.batch)?;
            let result = suggest(&batch, &opts, args.count)?;
            println!("{}", render_suggestions(&result, format)?);
        }
    }

    Ok(())
}
