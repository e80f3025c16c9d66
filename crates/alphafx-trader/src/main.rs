//! AlphaFX trading engine - entry point.

use anyhow::Result;
use clap::Parser;
use tracing::info;

/// Multi-pair FX signal and execution engine.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via ALPHAFX_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    alphafx_trader::logging::init_logging()?;

    info!("Starting alphafx-trader v{}", env!("CARGO_PKG_VERSION"));

    let config_path = alphafx_trader::AppConfig::resolve_path(args.config);
    info!(config_path = %config_path, "Loading configuration");

    let config = alphafx_trader::AppConfig::load(&config_path)?;

    let app = alphafx_trader::Application::new(config)?;
    app.run().await?;

    Ok(())
}
