//! Database module for Farmstead
//!
//! This module provides connection pooling, schema migration, and the
//! per-entity repository implementations for the record store.

pub mod animal_repo;
pub mod pool;
pub mod repository;
pub mod sale_repo;
pub mod user_repo;

// Re-export commonly used types
pub use animal_repo::{AnimalRepository, PgAnimalRepository};
pub use pool::{create_pool, DbPool};
pub use repository::{RepositoryError, RepositoryResult};
pub use sale_repo::{PgSaleRepository, SaleRepository};
pub use user_repo::{PgUserRepository, UserRepository};

use crate::error::Result;
use crate::models::{hash_password, NewAnimal, NewUser};
use sqlx::migrate::Migrator;

/// Database migrator for creating the record tables
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
pub async fn run_migrations(pool: &DbPool) -> Result<()> {
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| crate::error::Error::database(format!("Migration failed: {}", e)))
}

/// Seed default records into an empty store
///
/// Mirrors first-run behavior the web client expects: a default admin user
/// so the login form works out of the box, and one sample animal so the
/// dashboard is not blank.
pub async fn seed_defaults(
    users: &dyn UserRepository,
    animals: &dyn AnimalRepository,
) -> Result<()> {
    if users.count().await? == 0 {
        users
            .insert(NewUser {
                username: "admin".to_string(),
                password_hash: hash_password("1234"),
            })
            .await?;
        tracing::info!("Default user created: admin");
    }

    if animals.count().await? == 0 {
        animals
            .insert(NewAnimal {
                tag_id: "CHICK-001".to_string(),
                species: Some("Chicken".to_string()),
                breed: "Rhode Island Red".to_string(),
                age_months: 3,
                weight_kg: 1.2,
                health_status: Some("healthy".to_string()),
                temperature: Some(40.5),
                notes: "Sample chicken".to_string(),
            })
            .await?;
        tracing::info!("Sample animal created");
    }

    Ok(())
}
