pub mod core;
pub mod providers;
pub mod server;

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

use crate::core::config::AppConfig;

pub enum AppCommand {
    Serve { port: Option<u16> },
}

/// Effective configuration: the config file, or defaults, with CLI overrides applied.
pub fn resolve_config(config_path: Option<&str>, port: Option<u16>) -> Result<AppConfig> {
    let mut config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    if let Some(port) = port {
        config.server.port = port;
    }
    debug!("Loaded config: {config:#?}");
    Ok(config)
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    match command {
        AppCommand::Serve { port } => {
            let config = resolve_config(config_path, port)?;
            run_server(&config).await
        }
    }
}

pub async fn run_server(config: &AppConfig) -> Result<()> {
    info!("Quote gateway starting...");

    let provider = providers::AwesomeApiProvider::new(&config.providers.awesome_api)
        .context("Failed to build upstream HTTP client")?;
    let state = server::AppState::new(Arc::new(provider), config.batch_concurrency);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    server::serve(listener, state).await
}
