//! API module for Farmstead
//!
//! This module contains all HTTP endpoint handlers and server setup. State
//! is injected: every handler works against the repository traits, so tests
//! run the full router over in-memory mocks.

pub mod animals;
pub mod auth;
pub mod sales;
pub mod server;
pub mod stats;

pub use server::{create_router, create_server, shutdown_signal};

use std::sync::Arc;

use crate::db::{
    AnimalRepository, DbPool, PgAnimalRepository, PgSaleRepository, PgUserRepository,
    SaleRepository, UserRepository,
};

/// Shared application state: the store-access handles for each collection
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub animals: Arc<dyn AnimalRepository>,
    pub sales: Arc<dyn SaleRepository>,
}

impl AppState {
    /// Build state backed by the PostgreSQL repositories
    pub fn new(pool: DbPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            animals: Arc::new(PgAnimalRepository::new(pool.clone())),
            sales: Arc::new(PgSaleRepository::new(pool)),
        }
    }

    /// Build state from explicit repository implementations
    pub fn with_repositories(
        users: Arc<dyn UserRepository>,
        animals: Arc<dyn AnimalRepository>,
        sales: Arc<dyn SaleRepository>,
    ) -> Self {
        Self {
            users,
            animals,
            sales,
        }
    }
}

/// Simple success envelope with a message
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Login success response
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    pub user: UserInfo,
    pub message: String,
}

/// The slice of a user record surfaced to clients
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct UserInfo {
    pub username: String,
}
