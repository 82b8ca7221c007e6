//! Database connection pool management for Farmstead
//!
//! The pool is created once at startup; failure to reach the store is fatal
//! and the diagnostic distinguishes bad credentials from an unreachable
//! server, since both look like "the backend won't start" to an operator.

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;

use crate::config::DatabaseConfig;
use crate::error::{Error, Result};

/// Type alias for the database connection pool
pub type DbPool = PgPool;

/// Postgres error codes for authentication failures
const AUTH_FAILURE_CODES: [&str; 2] = ["28P01", "28000"];

/// Create a new database connection pool and verify connectivity
pub async fn create_pool(config: &DatabaseConfig) -> Result<DbPool> {
    let connect_options = PgConnectOptions::from_str(&config.url)
        .map_err(|e| Error::config(format!("Invalid database URL: {}", e)))?
        .application_name("farmstead");

    let pool = PgPoolOptions::new()
        .max_connections(config.pool_max_size)
        .min_connections(config.pool_min_idle)
        .acquire_timeout(config.pool_timeout())
        .idle_timeout(Some(config.idle_timeout()))
        .test_before_acquire(true)
        .max_lifetime(Some(Duration::from_secs(3600)))
        .connect_with(connect_options)
        .await
        .map_err(classify_connect_error)?;

    // Verify connectivity before the server starts accepting requests
    sqlx::query("SELECT 1")
        .fetch_one(&pool)
        .await
        .map_err(classify_connect_error)?;

    tracing::info!(
        max_connections = config.pool_max_size,
        min_idle = config.pool_min_idle,
        "Database connection pool created"
    );

    Ok(pool)
}

/// Map a connection-time failure to a startup diagnostic
///
/// Credential rejections (Postgres 28P01/28000) and connectivity failures
/// get distinct messages; both are fatal at startup.
fn classify_connect_error(err: sqlx::Error) -> Error {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err
            .code()
            .map_or(false, |code| AUTH_FAILURE_CODES.contains(&code.as_ref()))
        {
            return Error::database(format!(
                "Database authentication failed, check DATABASE_URL credentials: {}",
                err
            ));
        }
    }
    Error::database(format!("Failed to connect to database: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_connectivity_error() {
        let err = classify_connect_error(sqlx::Error::PoolTimedOut);
        assert!(err.to_string().contains("Failed to connect"));
    }
}
