//! Animal record model for Farmstead
//!
//! This module defines the stored animal record, the raw creation payload
//! with its coercion rules, and the allow-list update applied by the
//! `PUT /api/animals/{id}` endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::error::{ValidationError, ValidationErrorKind, ValidationResult};
use super::validation::{
    coerce_decimal, coerce_integer, decimal_from_value, integer_from_value, non_negative_decimal,
    non_negative_integer,
};

/// Fields a client may change through the update endpoint. Any other key in
/// an update payload is silently ignored.
pub const MUTABLE_FIELDS: [&str; 8] = [
    "tag_id",
    "species",
    "breed",
    "age_months",
    "weight_kg",
    "health_status",
    "temperature",
    "notes",
];

/// A stored animal record
///
/// `species`, `health_status`, and `temperature` are nullable in the store:
/// creation always fills them, but an update may set them to explicit null,
/// and the report breakdowns count null as its own group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animal {
    /// Store-issued identifier, surfaced to clients as a string
    pub id: Uuid,

    /// Unique physical tag (ear tag, leg band)
    pub tag_id: String,

    pub species: Option<String>,
    pub breed: String,
    pub age_months: i64,
    pub weight_kg: f64,

    /// Free text; "unhealthy", "sick", and "critical" count as unhealthy
    /// in the dashboard summary
    pub health_status: Option<String>,

    /// Body temperature in degrees Celsius
    pub temperature: Option<f64>,

    pub notes: String,
    pub created_at: DateTime<Utc>,
}

/// A validated animal ready for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewAnimal {
    pub tag_id: String,
    pub species: Option<String>,
    pub breed: String,
    pub age_months: i64,
    pub weight_kg: f64,
    pub health_status: Option<String>,
    pub temperature: Option<f64>,
    pub notes: String,
}

/// Raw creation payload
///
/// Numeric fields arrive as loose JSON values so clients may send `3` or
/// `"3"` interchangeably; string fields must already be strings (or null).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnimalPayload {
    pub tag_id: Option<String>,
    pub species: Option<String>,
    pub breed: Option<String>,
    pub age_months: Option<Value>,
    pub weight_kg: Option<Value>,
    pub health_status: Option<String>,
    pub temperature: Option<Value>,
    pub notes: Option<String>,
}

impl TryFrom<AnimalPayload> for NewAnimal {
    type Error = ValidationError;

    fn try_from(payload: AnimalPayload) -> ValidationResult<NewAnimal> {
        let tag_id = payload.tag_id.ok_or_else(|| {
            ValidationError::new(ValidationErrorKind::RequiredField, "tag_id")
        })?;

        let age_months = non_negative_integer(
            coerce_integer(payload.age_months.as_ref(), "age_months", 0)?,
            "age_months",
        )?;
        let weight_kg = non_negative_decimal(
            coerce_decimal(payload.weight_kg.as_ref(), "weight_kg", 0.0)?,
            "weight_kg",
        )?;
        let temperature = coerce_decimal(payload.temperature.as_ref(), "temperature", 40.0)?;

        Ok(NewAnimal {
            tag_id,
            species: Some(payload.species.unwrap_or_else(|| "Chicken".to_string())),
            breed: payload.breed.unwrap_or_default(),
            age_months,
            weight_kg,
            health_status: Some(
                payload.health_status.unwrap_or_else(|| "healthy".to_string()),
            ),
            temperature: Some(temperature),
            notes: payload.notes.unwrap_or_default(),
        })
    }
}

/// A filtered, coerced partial update
///
/// Outer `Option` means "field present in the payload"; for the nullable
/// columns the inner `Option` distinguishes a new value from explicit null.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimalUpdate {
    pub tag_id: Option<String>,
    pub species: Option<Option<String>>,
    pub breed: Option<String>,
    pub age_months: Option<i64>,
    pub weight_kg: Option<f64>,
    pub health_status: Option<Option<String>>,
    pub temperature: Option<Option<f64>>,
    pub notes: Option<String>,
}

impl AnimalUpdate {
    /// Build an update from a raw JSON object, keeping only the allow-listed
    /// fields and coercing each like creation does
    pub fn from_payload(data: &Map<String, Value>) -> ValidationResult<AnimalUpdate> {
        let mut update = AnimalUpdate::default();

        for field in MUTABLE_FIELDS {
            let Some(value) = data.get(field) else {
                continue;
            };

            match field {
                "tag_id" => update.tag_id = Some(required_string(value, field)?),
                "species" => update.species = Some(nullable_string(value, field)?),
                "breed" => update.breed = Some(required_string(value, field)?),
                "age_months" => {
                    update.age_months = Some(non_negative_integer(
                        integer_from_value(value, field)?,
                        field,
                    )?)
                },
                "weight_kg" => {
                    update.weight_kg = Some(non_negative_decimal(
                        decimal_from_value(value, field)?,
                        field,
                    )?)
                },
                "health_status" => update.health_status = Some(nullable_string(value, field)?),
                "temperature" => {
                    update.temperature = Some(match value {
                        Value::Null => None,
                        v => Some(decimal_from_value(v, field)?),
                    })
                },
                "notes" => update.notes = Some(required_string(value, field)?),
                _ => unreachable!("field list is fixed"),
            }
        }

        Ok(update)
    }

    /// True when no recognized field survived the allow-list filter
    pub fn is_empty(&self) -> bool {
        self == &AnimalUpdate::default()
    }

    /// Apply this update to a record in place
    ///
    /// The in-memory counterpart of the SQL update, used by the mock store.
    pub fn apply(&self, animal: &mut Animal) {
        if let Some(tag_id) = &self.tag_id {
            animal.tag_id = tag_id.clone();
        }
        if let Some(species) = &self.species {
            animal.species = species.clone();
        }
        if let Some(breed) = &self.breed {
            animal.breed = breed.clone();
        }
        if let Some(age_months) = self.age_months {
            animal.age_months = age_months;
        }
        if let Some(weight_kg) = self.weight_kg {
            animal.weight_kg = weight_kg;
        }
        if let Some(health_status) = &self.health_status {
            animal.health_status = health_status.clone();
        }
        if let Some(temperature) = self.temperature {
            animal.temperature = temperature;
        }
        if let Some(notes) = &self.notes {
            animal.notes = notes.clone();
        }
    }
}

fn required_string(value: &Value, field: &str) -> ValidationResult<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        _ => Err(ValidationError::new(
            ValidationErrorKind::InvalidString,
            field,
        )),
    }
}

fn nullable_string(value: &Value, field: &str) -> ValidationResult<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        _ => Err(ValidationError::new(
            ValidationErrorKind::InvalidString,
            field,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload_from(value: Value) -> AnimalPayload {
        serde_json::from_value(value).unwrap()
    }

    fn sample_animal() -> Animal {
        Animal {
            id: Uuid::new_v4(),
            tag_id: "CHICK-001".to_string(),
            species: Some("Chicken".to_string()),
            breed: "Rhode Island Red".to_string(),
            age_months: 3,
            weight_kg: 1.2,
            health_status: Some("healthy".to_string()),
            temperature: Some(40.5),
            notes: "Sample chicken".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_creation_applies_defaults() {
        let payload = payload_from(json!({ "tag_id": "CHICK-002" }));
        let animal = NewAnimal::try_from(payload).unwrap();

        assert_eq!(animal.tag_id, "CHICK-002");
        assert_eq!(animal.species.as_deref(), Some("Chicken"));
        assert_eq!(animal.breed, "");
        assert_eq!(animal.age_months, 0);
        assert_eq!(animal.weight_kg, 0.0);
        assert_eq!(animal.health_status.as_deref(), Some("healthy"));
        assert_eq!(animal.temperature, Some(40.0));
        assert_eq!(animal.notes, "");
    }

    #[test]
    fn test_creation_requires_tag_id() {
        let payload = payload_from(json!({ "species": "Goat" }));
        let err = NewAnimal::try_from(payload).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::RequiredField);
        assert_eq!(err.field, "tag_id");
    }

    #[test]
    fn test_creation_coerces_numeric_strings() {
        let payload = payload_from(json!({
            "tag_id": "GOAT-007",
            "species": "Goat",
            "age_months": "14",
            "weight_kg": "32.5",
            "temperature": 39.1
        }));

        let animal = NewAnimal::try_from(payload).unwrap();
        assert_eq!(animal.age_months, 14);
        assert_eq!(animal.weight_kg, 32.5);
        assert_eq!(animal.temperature, Some(39.1));
    }

    #[test]
    fn test_creation_rejects_unparseable_numbers() {
        let payload = payload_from(json!({ "tag_id": "X", "age_months": "old" }));
        assert!(NewAnimal::try_from(payload).is_err());

        let payload = payload_from(json!({ "tag_id": "X", "weight_kg": {} }));
        assert!(NewAnimal::try_from(payload).is_err());
    }

    #[test]
    fn test_creation_rejects_negative_age_and_weight() {
        let payload = payload_from(json!({ "tag_id": "X", "age_months": -1 }));
        assert!(NewAnimal::try_from(payload).is_err());

        let payload = payload_from(json!({ "tag_id": "X", "weight_kg": -2.0 }));
        assert!(NewAnimal::try_from(payload).is_err());
    }

    #[test]
    fn test_update_filters_unknown_keys() {
        let data = json!({
            "species": "Duck",
            "favorite_color": "blue",
            "_id": "not-allowed"
        });
        let Value::Object(map) = data else { unreachable!() };

        let update = AnimalUpdate::from_payload(&map).unwrap();
        assert_eq!(update.species, Some(Some("Duck".to_string())));
        assert!(!update.is_empty());
    }

    #[test]
    fn test_update_with_only_unknown_keys_is_empty() {
        let data = json!({ "favorite_color": "blue", "wings": 2 });
        let Value::Object(map) = data else { unreachable!() };

        let update = AnimalUpdate::from_payload(&map).unwrap();
        assert!(update.is_empty());
    }

    #[test]
    fn test_update_coerces_and_validates() {
        let data = json!({ "age_months": "6", "weight_kg": 2 });
        let Value::Object(map) = data else { unreachable!() };

        let update = AnimalUpdate::from_payload(&map).unwrap();
        assert_eq!(update.age_months, Some(6));
        assert_eq!(update.weight_kg, Some(2.0));

        let data = json!({ "age_months": "soon" });
        let Value::Object(map) = data else { unreachable!() };
        assert!(AnimalUpdate::from_payload(&map).is_err());
    }

    #[test]
    fn test_update_null_handling() {
        // Nullable fields accept explicit null
        let data = json!({ "species": null, "temperature": null, "health_status": null });
        let Value::Object(map) = data else { unreachable!() };

        let update = AnimalUpdate::from_payload(&map).unwrap();
        assert_eq!(update.species, Some(None));
        assert_eq!(update.temperature, Some(None));
        assert_eq!(update.health_status, Some(None));

        // Non-nullable fields reject it
        let data = json!({ "tag_id": null });
        let Value::Object(map) = data else { unreachable!() };
        assert!(AnimalUpdate::from_payload(&map).is_err());

        let data = json!({ "notes": null });
        let Value::Object(map) = data else { unreachable!() };
        assert!(AnimalUpdate::from_payload(&map).is_err());
    }

    #[test]
    fn test_update_apply() {
        let mut animal = sample_animal();

        let data = json!({
            "health_status": "sick",
            "temperature": 42.3,
            "notes": "isolated from flock"
        });
        let Value::Object(map) = data else { unreachable!() };
        let update = AnimalUpdate::from_payload(&map).unwrap();

        update.apply(&mut animal);
        assert_eq!(animal.health_status.as_deref(), Some("sick"));
        assert_eq!(animal.temperature, Some(42.3));
        assert_eq!(animal.notes, "isolated from flock");
        // Untouched fields keep their values
        assert_eq!(animal.tag_id, "CHICK-001");
        assert_eq!(animal.age_months, 3);
    }

    #[test]
    fn test_animal_serializes_id_as_string() {
        let animal = sample_animal();
        let json = serde_json::to_value(&animal).unwrap();

        assert!(json["id"].is_string());
        assert_eq!(json["tag_id"], "CHICK-001");
        assert_eq!(json["temperature"], 40.5);
    }
}
