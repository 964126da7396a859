use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use sinkzone::config::Config;
use sinkzone::init::setup_logging;
use sinkzone::reload::CommandReloader;
use sinkzone::runner::Runner;

/// Aggregates domain blacklists into a DNS Response Policy Zone file.
#[derive(Parser, Debug)]
#[command(name = "sinkzone", version, about)]
struct Cli {
    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,

    /// Run the zone-reload command after writing the zone file
    #[arg(long)]
    reload: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Load Config
    let config_path = cli
        .config
        .unwrap_or_else(|| PathBuf::from("sinkzone.toml"));
    let config = Config::load(&config_path)
        .await
        .with_context(|| format!("No usable configuration at {}", config_path.display()))?;

    // 2. Setup Logging
    let level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => config.logging.level.as_str(),
            1 => "debug",
            _ => "trace",
        }
    };
    setup_logging(level);
    info!("Starting sinkzone with {} sources", config.sources.len());

    // 3. Run the pipeline
    let reloader = Box::new(CommandReloader::new(config.reload.command.clone()));
    let runner = Runner::new(config, reloader);
    let summary = runner.run(cli.reload).await?;

    info!(
        "Run complete: {} hosts written, {} sources ok, {} skipped",
        summary.unique_hosts, summary.sources_ok, summary.sources_skipped
    );
    Ok(())
}
