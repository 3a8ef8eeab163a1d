//! Collaboration request endpoints

use axum::{extract::State, http::StatusCode, Json};
use mixtape_core::types::{CollaborationRequest, IncomingRequest, RequestDecision};
use mixtape_core::{PlaylistId, RequestId, UserId};
use serde::Deserialize;

use crate::error::{Result, ServerError};
use crate::middleware::AuthenticatedUser;
use crate::services::collaboration::CollaboratorRef;
use crate::state::AppState;

/// The invitee may be named by id or by username, but not both
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendRequestBody {
    pub playlist_id: PlaylistId,
    pub collaborator_id: Option<UserId>,
    pub username: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RespondRequestBody {
    pub request_id: RequestId,
    pub response: RequestDecision,
}

pub async fn send_request(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<SendRequestBody>,
) -> Result<(StatusCode, Json<CollaborationRequest>)> {
    let collaborator = match (body.collaborator_id, body.username) {
        (Some(id), None) => CollaboratorRef::Id(id),
        (None, Some(username)) => CollaboratorRef::Username(username),
        _ => {
            return Err(ServerError::BadRequest(
                "Provide exactly one of collaboratorId or username".to_string(),
            ));
        }
    };

    let request = state
        .collaboration
        .send_request(&body.playlist_id, user.id(), collaborator)
        .await?;

    Ok((StatusCode::CREATED, Json(request)))
}

pub async fn respond_request(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<RespondRequestBody>,
) -> Result<Json<CollaborationRequest>> {
    let request = state
        .collaboration
        .respond(&body.request_id, user.id(), body.response)
        .await?;

    Ok(Json(request))
}

/// Requests addressed to the authenticated user, newest first
pub async fn list_requests(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<IncomingRequest>>> {
    let requests = state.collaboration.list_incoming(user.id()).await?;
    Ok(Json(requests))
}
