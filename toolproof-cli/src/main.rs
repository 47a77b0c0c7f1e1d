//! Toolproof CLI - Replay and score agent transcripts

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use toolproof_core::config::ToolproofConfig;
use toolproof_core::eval::{EvalHarness, load_transcripts, save_metrics};
use toolproof_core::tools::default_registry;

#[derive(Parser)]
#[command(name = "toolproof")]
#[command(about = "Replay evaluation for tool-using agents", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a JSON Lines transcript file and write metrics
    Replay {
        /// Transcript file (one JSON record per line)
        #[arg(long)]
        data: PathBuf,

        /// Metrics output file (JSON array)
        #[arg(long)]
        out: PathBuf,

        /// Maximum actions processed per transcript
        #[arg(long)]
        max_steps: Option<usize>,

        /// Tolerance for numeric gold answers without their own
        #[arg(long)]
        tolerance: Option<f64>,

        /// Attach per-step logs to each record
        #[arg(long)]
        include_steps: bool,

        /// Also write a run summary to this file
        #[arg(long)]
        summary_out: Option<PathBuf>,

        /// Configuration file (defaults to toolproof.toml and TOOLPROOF_* env)
        #[arg(long, env = "TOOLPROOF_CONFIG_PATH")]
        config: Option<PathBuf>,
    },
    /// Print the built-in capabilities and their tool aliases
    Capabilities,
    /// Version information
    Version,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Version => {
            println!("toolproof {}", env!("CARGO_PKG_VERSION"));
            println!("toolproof-core {}", toolproof_core::VERSION);
        }
        Commands::Capabilities => {
            let listing = serde_json::to_string_pretty(&default_registry().list())?;
            println!("{listing}");
        }
        Commands::Replay {
            data,
            out,
            max_steps,
            tolerance,
            include_steps,
            summary_out,
            config,
        } => {
            let mut config = match config {
                Some(path) => ToolproofConfig::from_file(&path)
                    .with_context(|| format!("Failed to load config from {}", path.display()))?,
                None => ToolproofConfig::load().context("Failed to load configuration")?,
            };
            if let Some(max_steps) = max_steps {
                config.replay.max_steps = max_steps;
            }
            if let Some(tolerance) = tolerance {
                config.replay.numeric_tolerance = tolerance;
            }
            if include_steps {
                config.replay.include_steps = true;
            }
            config.validate().context("Invalid configuration")?;

            let transcripts = load_transcripts(&data)
                .with_context(|| format!("Failed to read transcripts from {}", data.display()))?;

            let harness = EvalHarness::new(config.replay.clone());
            let (records, summary) = harness.run(&transcripts);

            save_metrics(&out, &records, config.output.pretty)
                .with_context(|| format!("Failed to write metrics to {}", out.display()))?;
            tracing::info!(path = %out.display(), records = records.len(), "Wrote metrics");

            if let Some(path) = summary_out {
                summary
                    .save(&path)
                    .with_context(|| format!("Failed to write summary to {}", path.display()))?;
                tracing::info!(path = %path.display(), "Wrote run summary");
            }
        }
    }

    Ok(())
}
