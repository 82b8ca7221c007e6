//! Data models for Farmstead
//!
//! This module contains the domain records (users, animals, sales), the raw
//! request payload types, and the coercion rules that turn one into the
//! other.

pub mod animal;
pub mod error;
pub mod sale;
pub mod user;
pub mod validation;

// Re-export commonly used types
pub use animal::{Animal, AnimalPayload, AnimalUpdate, NewAnimal, MUTABLE_FIELDS};
pub use error::{ValidationError, ValidationErrorKind};
pub use sale::{NewSale, Sale, SalePayload};
pub use user::{hash_password, CredentialsPayload, NewUser, User};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_exports() {
        // Ensure the key payload types are accessible and deserializable
        let _animal: AnimalPayload =
            serde_json::from_str(r#"{"tag_id": "CHICK-002"}"#).unwrap();
        let _sale: SalePayload = serde_json::from_str(r#"{"amount": 10}"#).unwrap();
        let _creds: CredentialsPayload =
            serde_json::from_str(r#"{"username": "admin", "password": "1234"}"#).unwrap();

        let _error = ValidationError::new(ValidationErrorKind::RequiredField, "test");
    }
}
