//! Authentication endpoints: signup, login, token refresh

use axum::{extract::State, http::StatusCode, Json};
use mixtape_core::types::{CreateUser, User};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ServerError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}

pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    let name = request.name.trim();
    let username = request.username.trim();
    let email = request.email.trim();

    if name.is_empty() || username.is_empty() || email.is_empty() {
        return Err(ServerError::BadRequest(
            "Name, username, and email are required".to_string(),
        ));
    }
    if request.password.len() < 6 {
        return Err(ServerError::BadRequest(
            "Password must be at least 6 characters".to_string(),
        ));
    }

    let password_hash = state.auth.hash_password(&request.password)?;

    // A generated avatar until the user uploads one
    let image_url = format!("https://avatar.iran.liara.run/public?username={username}");

    let user = mixtape_storage::users::create(
        &state.pool,
        CreateUser {
            name: name.to_string(),
            image_url: Some(image_url),
            username: Some(username.to_string()),
            email: Some(email.to_string()),
            password_hash: Some(password_hash),
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, "User signed up");

    let access_token = state.auth.create_access_token(&user.id)?;
    let refresh_token = state.auth.create_refresh_token(&user.id)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user,
            access_token,
            refresh_token,
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let invalid = || ServerError::Auth("Invalid email or password".to_string());

    let user = mixtape_storage::users::get_by_email(&state.pool, request.email.trim())
        .await
        .map_err(ServerError::from)?
        .ok_or_else(invalid)?;

    let password_hash = mixtape_storage::users::get_password_hash(&state.pool, &user.id)
        .await
        .map_err(ServerError::from)?
        .ok_or_else(invalid)?;

    if !state.auth.verify_password(&request.password, &password_hash)? {
        return Err(invalid());
    }

    let access_token = state.auth.create_access_token(&user.id)?;
    let refresh_token = state.auth.create_refresh_token(&user.id)?;

    Ok(Json(AuthResponse {
        user,
        access_token,
        refresh_token,
    }))
}

pub async fn refresh(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<AuthResponse>> {
    let user_id = state.auth.verify_refresh_token(&request.refresh_token)?;

    let user = mixtape_storage::users::get_by_id(&state.pool, &user_id)
        .await
        .map_err(ServerError::from)?
        .ok_or_else(|| ServerError::Auth("Unknown user".to_string()))?;

    let access_token = state.auth.create_access_token(&user.id)?;
    let refresh_token = state.auth.create_refresh_token(&user.id)?;

    Ok(Json(AuthResponse {
        user,
        access_token,
        refresh_token,
    }))
}
