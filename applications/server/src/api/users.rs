//! User endpoints

use axum::{extract::State, Json};
use mixtape_core::types::User;

use crate::error::{Result, ServerError};
use crate::middleware::AuthenticatedUser;
use crate::state::AppState;

/// List all users (for picking a collaborator to invite)
pub async fn list_users(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<Vec<User>>> {
    let users = mixtape_storage::users::get_all(&state.pool).await?;
    Ok(Json(users))
}

/// The authenticated user's own profile
pub async fn me(State(state): State<AppState>, user: AuthenticatedUser) -> Result<Json<User>> {
    let profile = mixtape_storage::users::get_by_id(&state.pool, user.id())
        .await?
        .ok_or_else(|| ServerError::Auth("Unknown user".to_string()))?;

    Ok(Json(profile))
}
