//! fitagg - aggregate exercises by muscle group over the wger API
//!
//! Runs either an HTTP server or a one-off lookup that prints JSON.

use std::sync::Arc;

use clap::Parser;
use tracing::info;

use fitagg::cli::{Cli, Command};
use fitagg::config::{Config, ServerConfig};
use fitagg::data::advice_slip::ADVICE_SLIP_URL;
use fitagg::data::{available_muscles, AdviceSlipClient};
use fitagg::server::{self, AppState};
use fitagg::FitnessService;

/// Initializes the tracing subscriber; `RUST_LOG` overrides the default level
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing();

    let config = Config::from_cli(&cli)?;

    match &cli.command {
        Command::Serve { .. } => {
            let server_config = ServerConfig::from_cli(&cli).ok_or("serve requires an address")?;
            info!(
                "Starting fitagg v{} (upstream {}, cache ttl {:?})",
                env!("CARGO_PKG_VERSION"),
                config.base_url,
                config.cache_ttl
            );
            let service = Arc::new(FitnessService::new(config)?);
            let state = AppState::new(service, AdviceSlipClient::new(ADVICE_SLIP_URL)?);
            server::serve(server_config.addr, state).await?;
        }
        Command::Exercises { muscle, limit } => {
            let service = FitnessService::new(config)?;
            let response = service.get_exercises(muscle, *limit).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::Muscles => {
            for name in available_muscles() {
                println!("{}", name);
            }
        }
    }

    Ok(())
}
