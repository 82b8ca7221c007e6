//! Farmstead - a livestock and sales records backend
//!
//! This application serves the REST API the farm's web client talks to:
//! authentication, animal records, sales records, and the derived
//! dashboard, profit, and reports summaries.

use std::sync::Arc;

use farmstead::error::Result;
use farmstead::{api, config, logging};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment
    let config = Arc::new(config::Config::from_env()?);

    // Validate configuration
    config.validate()?;

    // Initialize logging/tracing
    logging::init_tracing(&config.server.log_level, &config.server.environment)?;

    // Log configuration (with sensitive data masked)
    config.log_config();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting Farmstead");

    // Connect to the record store and serve; an unreachable store is fatal
    api::server::create_server(config).await?;

    tracing::info!("Farmstead shutdown complete");
    Ok(())
}
