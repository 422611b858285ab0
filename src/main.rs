//! CourseCraft content analyzer HTTP service.
//!
//! Usage:
//!   coursecraft
//!   coursecraft --bind 0.0.0.0:8080
//!   coursecraft --config ./coursecraft.toml --print-config

use anyhow::Result;
use clap::Parser;
use coursecraft::{config::Config, http::start_http_server};
use std::{net::SocketAddr, sync::Arc};
use tracing::info;

#[derive(Parser)]
#[command(name = "coursecraft")]
#[command(about = "Training content analyzer service", long_about = None)]
struct Cli {
    /// Address to listen on (overrides config and COURSECRAFT_HTTP_BIND)
    #[arg(long)]
    bind: Option<SocketAddr>,
    /// Path to the TOML config file (overrides COURSECRAFT_CONFIG)
    #[arg(long)]
    config: Option<String>,
    /// Print the resolved configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_from(cli.config.as_deref()).map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;
    if let Some(bind) = cli.bind {
        config.http.bind = bind;
    }

    if cli.print_config {
        println!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(config.runtime.log_level.as_str())
        .init();

    info!(
        "Configuration loaded: bind={}, environment={}, origins={:?}",
        config.http.bind, config.http.environment, config.http.allowed_origins
    );

    start_http_server(Arc::new(config)).await
}
