//! Collaboration service: invite validation on top of the storage state machine

use mixtape_core::{
    types::{CollaborationRequest, IncomingRequest, RequestDecision},
    MixtapeError, PlaylistId, RequestId, UserId,
};
use sqlx::SqlitePool;

use crate::error::Result;

/// How an invite names its target: by id or by username
pub enum CollaboratorRef {
    Id(UserId),
    Username(String),
}

pub struct CollaborationService {
    pool: SqlitePool,
}

impl CollaborationService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Send a collaboration invite for a playlist.
    ///
    /// Only the playlist owner may invite, the owner cannot invite
    /// themselves, and at most one pending invite may exist per
    /// (playlist, owner, collaborator) tuple.
    pub async fn send_request(
        &self,
        playlist_id: &PlaylistId,
        owner_id: &UserId,
        collaborator: CollaboratorRef,
    ) -> Result<CollaborationRequest> {
        let invitee = match collaborator {
            CollaboratorRef::Id(id) => mixtape_storage::users::get_by_id(&self.pool, &id)
                .await?
                .ok_or_else(|| MixtapeError::not_found("User", &id))?,
            CollaboratorRef::Username(username) => {
                mixtape_storage::users::get_by_username(&self.pool, &username)
                    .await?
                    .ok_or_else(|| MixtapeError::not_found("User", &username))?
            }
        };

        let playlist = mixtape_storage::playlists::get_by_id(&self.pool, playlist_id)
            .await?
            .ok_or_else(|| MixtapeError::not_found("Playlist", playlist_id))?;

        if playlist.owner_id != *owner_id {
            return Err(MixtapeError::permission_denied(
                "Only the playlist owner can send collaboration requests",
            )
            .into());
        }

        // Keeps the owner out of the collaborator set for good
        if invitee.id == playlist.owner_id {
            return Err(MixtapeError::invalid_input(
                "The playlist owner cannot be invited as a collaborator",
            )
            .into());
        }

        let request =
            mixtape_storage::collaboration::create(&self.pool, playlist_id, owner_id, &invitee.id)
                .await?;

        tracing::info!(
            request_id = %request.id,
            playlist_id = %playlist_id,
            collaborator_id = %invitee.id,
            "Collaboration request sent"
        );

        Ok(request)
    }

    /// Accept or reject a pending invite. Only the invitee may respond.
    pub async fn respond(
        &self,
        request_id: &RequestId,
        responder_id: &UserId,
        decision: RequestDecision,
    ) -> Result<CollaborationRequest> {
        let request =
            mixtape_storage::collaboration::respond(&self.pool, request_id, responder_id, decision)
                .await?;

        tracing::info!(
            request_id = %request.id,
            status = request.status.as_str(),
            "Collaboration request resolved"
        );

        Ok(request)
    }

    /// Invites addressed to the user, newest first, all statuses included
    pub async fn list_incoming(&self, user_id: &UserId) -> Result<Vec<IncomingRequest>> {
        Ok(mixtape_storage::collaboration::list_incoming(&self.pool, user_id).await?)
    }
}
