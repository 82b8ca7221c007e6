//! Sale record model for Farmstead
//!
//! Sales are append-only: created through the add endpoint and never
//! updated or deleted. The amount may carry any sign so refunds and
//! corrections can be entered as negative sales.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::error::ValidationResult;
use super::validation::{coerce_integer, non_negative_integer, require_decimal};

/// A stored sale record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    /// Store-issued identifier, surfaced to clients as a string
    pub id: Uuid,

    pub description: String,
    pub amount: f64,
    pub quantity: i64,

    /// Sale date in YYYY-MM-DD form; listings sort on it descending
    pub date: String,

    pub created_at: DateTime<Utc>,
}

/// A validated sale ready for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewSale {
    pub description: String,
    pub amount: f64,
    pub quantity: i64,
    pub date: String,
}

/// Raw creation payload
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SalePayload {
    pub description: Option<String>,
    pub amount: Option<Value>,
    pub quantity: Option<Value>,
    pub date: Option<String>,
}

impl SalePayload {
    /// Validate into a [`NewSale`], defaulting the date to today (UTC)
    pub fn normalize(self) -> ValidationResult<NewSale> {
        let today = Utc::now().format("%Y-%m-%d").to_string();
        self.normalize_with_default_date(today)
    }

    /// Validate into a [`NewSale`] with an explicit fallback date
    pub fn normalize_with_default_date(self, default_date: String) -> ValidationResult<NewSale> {
        let amount = require_decimal(self.amount.as_ref(), "amount")?;
        let quantity = non_negative_integer(
            coerce_integer(self.quantity.as_ref(), "quantity", 1)?,
            "quantity",
        )?;

        Ok(NewSale {
            description: self.description.unwrap_or_else(|| "Sale".to_string()),
            amount,
            quantity,
            date: self.date.unwrap_or(default_date),
        })
    }
}
