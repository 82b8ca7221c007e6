//! Logging module for Farmstead
//!
//! This module configures structured logging using the tracing crate,
//! providing JSON output for production and pretty formatting for
//! development.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

use crate::error::Result;

/// Initialize the logging system
///
/// Configures tracing based on the environment:
/// - Production: JSON formatted logs
/// - Development: Pretty formatted logs with colors
pub fn init_tracing(log_level: &str, environment: &str) -> Result<()> {
    // Create environment filter from RUST_LOG or use provided log level
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("farmstead={},tower_http=debug", log_level)));

    let is_production = environment == "production";

    if is_production {
        let formatting_layer = fmt::layer()
            .json()
            .with_file(true)
            .with_line_number(true)
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_current_span(true);

        Registry::default()
            .with(env_filter)
            .with(formatting_layer)
            .try_init()
            .map_err(|e| {
                crate::error::Error::internal(format!("Failed to initialize tracing: {}", e))
            })?;
    } else {
        let formatting_layer = fmt::layer()
            .pretty()
            .with_file(true)
            .with_line_number(true)
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE);

        Registry::default()
            .with(env_filter)
            .with(formatting_layer)
            .try_init()
            .map_err(|e| {
                crate::error::Error::internal(format!("Failed to initialize tracing: {}", e))
            })?;
    }

    tracing::info!(
        environment = environment,
        log_level = log_level,
        "Logging initialized"
    );

    Ok(())
}
