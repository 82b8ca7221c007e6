//! Animal endpoints for Farmstead
//!
//! The update handler mirrors the record-store semantics: filter the body
//! against the allow-list first, then look up the record, so a payload of
//! unrecognized keys is a validation failure rather than a lookup.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    api::AppState,
    error::{Error, Result},
    models::{Animal, AnimalPayload, AnimalUpdate, NewAnimal},
};

/// GET /api/animals
pub async fn list_animals(State(state): State<AppState>) -> Result<Json<Vec<Animal>>> {
    let animals = state.animals.find_all().await?;
    Ok(Json(animals))
}

/// POST /api/animals
pub async fn create_animal(
    State(state): State<AppState>,
    payload: Option<Json<AnimalPayload>>,
) -> Result<(StatusCode, Json<Animal>)> {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();
    let new_animal = NewAnimal::try_from(payload)?;

    if state.animals.find_by_tag(&new_animal.tag_id).await?.is_some() {
        return Err(Error::conflict("Animal with this tag_id already exists"));
    }

    let animal = state.animals.insert(new_animal).await?;
    Ok((StatusCode::CREATED, Json(animal)))
}

/// PUT /api/animals/{id}
pub async fn update_animal(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Option<Json<Value>>,
) -> Result<Json<Animal>> {
    let data = match body {
        Some(Json(Value::Object(map))) if !map.is_empty() => map,
        _ => return Err(Error::validation("No data provided")),
    };

    let id = Uuid::parse_str(&id).map_err(|_| Error::validation("Invalid animal ID"))?;

    let update = AnimalUpdate::from_payload(&data)?;
    if update.is_empty() {
        return Err(Error::validation("No valid fields to update"));
    }

    let animal = state
        .animals
        .update(id, &update)
        .await?
        .ok_or_else(|| Error::not_found("Animal not found"))?;

    Ok(Json(animal))
}

/// GET /api/animals/tag/{tag_id}
pub async fn get_animal_by_tag(
    State(state): State<AppState>,
    Path(tag_id): Path<String>,
) -> Result<Json<Animal>> {
    let animal = state
        .animals
        .find_by_tag(&tag_id)
        .await?
        .ok_or_else(|| Error::not_found("Animal not found"))?;

    Ok(Json(animal))
}
