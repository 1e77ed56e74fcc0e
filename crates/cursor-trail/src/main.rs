mod replay;
mod sim;
mod trace;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use cursor_trail_config::{resolve_data_dir, TrailConfig};

/// Replays editor event traces through the cursor position history.
#[derive(Parser, Debug)]
#[command(name = "cursor-trail", version, about)]
struct Cli {
    /// Trace to replay: one JSON event per line.
    trace: PathBuf,

    /// Settings file to use instead of the default location.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Position database to use instead of the configured one.
    #[arg(long)]
    database: Option<PathBuf>,

    /// Print the summary as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for the summary
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting cursor-trail");

    let config_path = cli.config.unwrap_or_else(TrailConfig::config_path);
    let config = TrailConfig::load_or_create(&config_path);
    let database_path = cli
        .database
        .unwrap_or_else(|| config.database_path(&resolve_data_dir()));

    let events = trace::read_trace(&cli.trace)?;
    tracing::info!("Replaying {} events from {}", events.len(), cli.trace.display());

    let summary = replay::run(config, database_path, &events)?;
    if cli.json {
        let json =
            serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
        println!("{json}");
    } else {
        println!("{summary}");
    }

    Ok(())
}
