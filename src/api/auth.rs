//! Authentication endpoints for Farmstead
//!
//! Login and registration check credentials against stored digests. No
//! session token is issued; the client is stateless after login.

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    api::{AppState, LoginResponse, MessageResponse, UserInfo},
    error::{Error, Result},
    models::CredentialsPayload,
};

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    payload: Option<Json<CredentialsPayload>>,
) -> Result<Json<LoginResponse>> {
    let Json(payload) = payload
        .ok_or_else(|| Error::validation("Username and password required"))?;

    let (username, password_hash) = payload
        .into_login()
        .map_err(|_| Error::validation("Username and password required"))?;

    let user = state
        .users
        .find_by_credentials(&username, &password_hash)
        .await?
        .ok_or_else(|| Error::auth("Invalid username or password"))?;

    Ok(Json(LoginResponse {
        success: true,
        user: UserInfo {
            username: user.username,
        },
        message: "Login successful".to_string(),
    }))
}

/// POST /api/register
pub async fn register(
    State(state): State<AppState>,
    payload: Option<Json<CredentialsPayload>>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let Json(payload) = payload
        .ok_or_else(|| Error::validation("Username and password required"))?;

    let new_user = payload.into_registration()?;

    if state
        .users
        .find_by_username(&new_user.username)
        .await?
        .is_some()
    {
        return Err(Error::conflict("Username already exists"));
    }

    state.users.insert(new_user).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::ok("Registration successful. Please login.")),
    ))
}
