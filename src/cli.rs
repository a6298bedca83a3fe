use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use connclass::codebook::LABELS;
use connclass::config::Config;
use connclass::storage;
use connclass::{Classification, Pipeline};

#[derive(Parser)]
#[command(name = "connclass")]
#[command(author, version, about = "neural-network connection-record intrusion classifier")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the trained network artifact (overrides config)
    #[arg(long, global = true)]
    pub weights: Option<PathBuf>,

    /// Path to the fitted scaler artifact (overrides config)
    #[arg(long, global = true)]
    pub scaler: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify a single connection record
    Classify {
        /// Comma-separated 41-field connection record
        record: Option<String>,

        /// Read the record from the first line of a file
        #[arg(short, long, conflicts_with = "record")]
        file: Option<PathBuf>,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,

        /// Show the raw score vector
        #[arg(short, long)]
        scores: bool,
    },

    /// Show artifact topology and metadata
    Info {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

/// Resolved artifact locations: CLI flags win over the config file.
struct ArtifactPaths {
    weights: PathBuf,
    scaler: PathBuf,
}

fn resolve_paths(cli: &Cli) -> Result<ArtifactPaths> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default()?,
    };

    Ok(ArtifactPaths {
        weights: cli
            .weights
            .clone()
            .unwrap_or(config.artifacts.weights_path),
        scaler: cli.scaler.clone().unwrap_or(config.artifacts.scaler_path),
    })
}

pub fn run_command(cli: Cli) -> Result<()> {
    let paths = resolve_paths(&cli)?;

    match cli.command {
        Commands::Classify {
            record,
            file,
            json,
            scores,
        } => {
            let line = match (record, file) {
                (Some(record), _) => record,
                (None, Some(path)) => {
                    let content = std::fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read record file: {}", path.display()))?;
                    content
                        .lines()
                        .next()
                        .context("record file is empty")?
                        .to_string()
                }
                (None, None) => anyhow::bail!("provide a record argument or --file"),
            };

            let pipeline = Pipeline::from_artifacts(&paths.weights, &paths.scaler)
                .context("Failed to load classifier artifacts")?;

            let result = pipeline
                .classify_line(&line)
                .context("Failed to classify record")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_classification(&result, scores);
            }
        }

        Commands::Info { json } => {
            let network = storage::load_network(&paths.weights)
                .context("Failed to load network artifact")?;
            let scaler = storage::load_scaler(&paths.scaler)
                .context("Failed to load scaler artifact")?;

            if json {
                let info = serde_json::json!({
                    "weights_path": paths.weights,
                    "scaler_path": paths.scaler,
                    "topology": network.network.topology(),
                    "layers": network.network.depth(),
                    "scaler_features": scaler.scaler.feature_count(),
                    "network_metadata": network.metadata,
                    "scaler_metadata": scaler.metadata,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Network:  {}", paths.weights.display());
                println!(
                    "  topology: {:?} ({} layers)",
                    network.network.topology(),
                    network.network.depth()
                );
                println!(
                    "  saved at {} by connclass {}",
                    network.metadata.saved_at.format("%Y-%m-%d %H:%M:%S"),
                    network.metadata.produced_by
                );
                println!("Scaler:   {}", paths.scaler.display());
                println!("  features: {}", scaler.scaler.feature_count());
                println!(
                    "  saved at {} by connclass {}",
                    scaler.metadata.saved_at.format("%Y-%m-%d %H:%M:%S"),
                    scaler.metadata.produced_by
                );
            }
        }
    }

    Ok(())
}

fn print_classification(result: &Classification, show_scores: bool) {
    let label = match result.label {
        "normal" => result.label.green().bold(),
        "Probing" => result.label.yellow().bold(),
        _ => result.label.red().bold(),
    };
    println!("{}", label);

    if show_scores {
        for (name, score) in LABELS.iter().zip(result.scores.iter()) {
            println!("  {:<8} {:>10.4}", name, score);
        }
    }
}
