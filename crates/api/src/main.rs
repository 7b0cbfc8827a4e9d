//! Climate API - Main Entry Point

use clap::Parser;
use climate_api::{init_logging, run_server, ApiConfig};
use std::path::PathBuf;
use tracing::info;

/// Serve precipitation and temperature observations over HTTP
#[derive(Debug, Parser)]
#[command(name = "climate-api", version, about)]
struct Cli {
    /// Config file (TOML, JSON or YAML)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Database URL or SQLite file path, overrides the config file
    #[arg(short, long, value_name = "URL")]
    database: Option<String>,

    /// Listen address, overrides the config file
    #[arg(short, long, value_name = "ADDR")]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = ApiConfig::load(cli.config.as_deref())?;
    if let Some(database) = cli.database {
        config.database.url = database;
    }
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }

    init_logging(&config.logging)?;

    info!("=== Climate API v{} ===", env!("CARGO_PKG_VERSION"));
    info!("Serving data from {}", config.database.url);

    run_server(config).await?;

    Ok(())
}
