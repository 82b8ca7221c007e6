//! Farmstead Library
//!
//! This library exposes the core modules of the Farmstead backend for use
//! in integration tests and as a library for other applications.

pub mod aggregate;
pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod test_utils;

// Re-export commonly used types at the crate root
pub use config::Config;
pub use error::{Error, Result};

// Re-export model types
pub use models::{
    Animal, AnimalPayload, AnimalUpdate, CredentialsPayload, NewAnimal, NewSale, NewUser, Sale,
    SalePayload, User, ValidationError, ValidationErrorKind,
};

// Re-export API server functions
pub use api::server::{create_router, create_server, shutdown_signal};

// Re-export summary types
pub use aggregate::{BreakdownEntry, DashboardSummary, ProfitSummary, ReportsSummary};
