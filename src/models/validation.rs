//! Coercion and validation functions for Farmstead payloads
//!
//! Request bodies arrive with loosely typed numeric fields (a client may
//! send `3`, `3.5`, or `"3"`). These helpers coerce such values into the
//! concrete types of the entity model, or fail with a field-scoped
//! validation error.

use serde_json::Value;

use super::error::{ValidationError, ValidationErrorKind, ValidationResult};

/// Coerce an optional loose value into an integer, defaulting when absent
///
/// Accepts JSON integers, JSON floats (truncated), and strings holding an
/// integer. Explicit JSON null is treated like an absent field.
pub fn coerce_integer(value: Option<&Value>, field: &str, default: i64) -> ValidationResult<i64> {
    match value {
        None | Some(Value::Null) => Ok(default),
        Some(v) => integer_from_value(v, field),
    }
}

/// Coerce an optional loose value into a decimal, defaulting when absent
pub fn coerce_decimal(value: Option<&Value>, field: &str, default: f64) -> ValidationResult<f64> {
    match value {
        None | Some(Value::Null) => Ok(default),
        Some(v) => decimal_from_value(v, field),
    }
}

/// Coerce a required loose value into a decimal
pub fn require_decimal(value: Option<&Value>, field: &str) -> ValidationResult<f64> {
    match value {
        None | Some(Value::Null) => Err(ValidationError::new(
            ValidationErrorKind::RequiredField,
            field,
        )),
        Some(v) => decimal_from_value(v, field),
    }
}

/// Parse an integer out of a single loose value
pub fn integer_from_value(value: &Value, field: &str) -> ValidationResult<i64> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i)
            } else if let Some(f) = n.as_f64() {
                Ok(f.trunc() as i64)
            } else {
                Err(invalid_number(field, n.to_string()))
            }
        },
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| invalid_number(field, s.clone())),
        other => Err(invalid_number(field, other.to_string())),
    }
}

/// Parse a decimal out of a single loose value
pub fn decimal_from_value(value: &Value, field: &str) -> ValidationResult<f64> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| invalid_number(field, n.to_string())),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| invalid_number(field, s.clone())),
        other => Err(invalid_number(field, other.to_string())),
    }
}

/// Validate that an integer is non-negative
pub fn non_negative_integer(value: i64, field: &str) -> ValidationResult<i64> {
    if value < 0 {
        Err(ValidationError::with_context(
            ValidationErrorKind::NegativeValue,
            field,
            format!("got: {}", value),
        ))
    } else {
        Ok(value)
    }
}

/// Validate that a decimal is non-negative
pub fn non_negative_decimal(value: f64, field: &str) -> ValidationResult<f64> {
    if value < 0.0 {
        Err(ValidationError::with_context(
            ValidationErrorKind::NegativeValue,
            field,
            format!("got: {}", value),
        ))
    } else {
        Ok(value)
    }
}

/// Validate a required string field, returning its trimmed form
pub fn required_trimmed(value: Option<&str>, field: &str) -> ValidationResult<String> {
    let trimmed = value.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        Err(ValidationError::new(
            ValidationErrorKind::RequiredField,
            field,
        ))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Validate a minimum string length
pub fn min_length(value: &str, field: &str, min: usize) -> ValidationResult<()> {
    if value.len() < min {
        Err(ValidationError::with_context(
            ValidationErrorKind::TooShort { min },
            field,
            format!("minimum length is {}", min),
        ))
    } else {
        Ok(())
    }
}

fn invalid_number(field: &str, got: String) -> ValidationError {
    ValidationError::with_context(
        ValidationErrorKind::InvalidNumber,
        field,
        format!("Cannot parse '{}' as a number", got),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_integer_defaults() {
        assert_eq!(coerce_integer(None, "age_months", 0).unwrap(), 0);
        assert_eq!(
            coerce_integer(Some(&Value::Null), "age_months", 0).unwrap(),
            0
        );
    }

    #[test]
    fn test_coerce_integer_from_number_and_string() {
        assert_eq!(coerce_integer(Some(&json!(3)), "age_months", 0).unwrap(), 3);
        assert_eq!(
            coerce_integer(Some(&json!("12")), "age_months", 0).unwrap(),
            12
        );
        // Floats truncate like the usual int() coercion
        assert_eq!(
            coerce_integer(Some(&json!(3.9)), "age_months", 0).unwrap(),
            3
        );
    }

    #[test]
    fn test_coerce_integer_rejects_garbage() {
        assert!(coerce_integer(Some(&json!("three")), "age_months", 0).is_err());
        assert!(coerce_integer(Some(&json!("3.5")), "age_months", 0).is_err());
        assert!(coerce_integer(Some(&json!(true)), "age_months", 0).is_err());
        assert!(coerce_integer(Some(&json!([1])), "age_months", 0).is_err());
    }

    #[test]
    fn test_coerce_decimal() {
        assert_eq!(
            coerce_decimal(Some(&json!(41.2)), "temperature", 40.0).unwrap(),
            41.2
        );
        assert_eq!(
            coerce_decimal(Some(&json!("41.2")), "temperature", 40.0).unwrap(),
            41.2
        );
        assert_eq!(coerce_decimal(None, "temperature", 40.0).unwrap(), 40.0);
        assert!(coerce_decimal(Some(&json!("hot")), "temperature", 40.0).is_err());
    }

    #[test]
    fn test_require_decimal() {
        assert_eq!(require_decimal(Some(&json!(10.5)), "amount").unwrap(), 10.5);
        assert_eq!(
            require_decimal(Some(&json!(-250)), "amount").unwrap(),
            -250.0
        );

        let err = require_decimal(None, "amount").unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::RequiredField);
        assert!(require_decimal(Some(&Value::Null), "amount").is_err());
        assert!(require_decimal(Some(&json!("lots")), "amount").is_err());
    }

    #[test]
    fn test_non_negative_checks() {
        assert_eq!(non_negative_integer(0, "age_months").unwrap(), 0);
        assert_eq!(non_negative_integer(7, "age_months").unwrap(), 7);
        assert!(non_negative_integer(-1, "age_months").is_err());

        assert_eq!(non_negative_decimal(1.2, "weight_kg").unwrap(), 1.2);
        assert!(non_negative_decimal(-0.5, "weight_kg").is_err());
    }

    #[test]
    fn test_required_trimmed() {
        assert_eq!(required_trimmed(Some(" alice "), "username").unwrap(), "alice");
        assert!(required_trimmed(Some("   "), "username").is_err());
        assert!(required_trimmed(None, "username").is_err());
    }

    #[test]
    fn test_min_length() {
        assert!(min_length("1234", "password", 4).is_ok());
        let err = min_length("123", "password", 4).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::TooShort { min: 4 });
    }
}
