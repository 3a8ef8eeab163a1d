//! Bearer-token authentication extractor
//!
//! Handlers take an [`AuthenticatedUser`] argument; extraction fails with
//! 401 when the Authorization header is missing, malformed, or carries an
//! invalid or expired access token.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use mixtape_core::UserId;

use crate::error::ServerError;
use crate::state::AppState;

/// The user id proven by the request's access token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub UserId);

impl AuthenticatedUser {
    pub fn id(&self) -> &UserId {
        &self.0
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ServerError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ServerError::Auth("Missing authorization header".to_string()))?;

        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or_else(|| ServerError::Auth("Invalid authorization header".to_string()))?;

        let user_id = state.auth.authenticate(token)?;

        Ok(AuthenticatedUser(user_id))
    }
}
