//! Playlist endpoints

use axum::{
    body::Body,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use mixtape_core::types::{Playlist, PlaylistDetail, UserPlaylists};
use mixtape_core::{PlaylistId, SongId, UserId};
use serde::Deserialize;

use crate::api::forms::FormData;
use crate::error::Result;
use crate::middleware::AuthenticatedUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistSongRequest {
    pub playlist_id: PlaylistId,
    pub song_id: SongId,
}

/// Create a playlist from a multipart form (`name` plus optional `image`)
pub async fn create_playlist(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    headers: HeaderMap,
    body: Body,
) -> Result<(StatusCode, Json<Playlist>)> {
    let mut form = FormData::parse(&headers, body).await?;

    let name = form.require_text("name")?.to_string();
    let image = form.take_file("image");

    let playlist = state.playlists.create(user.id(), &name, image).await?;

    Ok((StatusCode::CREATED, Json(playlist)))
}

pub async fn add_song(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<PlaylistSongRequest>,
) -> Result<Json<Playlist>> {
    let playlist = state
        .playlists
        .add_song(&request.playlist_id, &request.song_id, user.id())
        .await?;

    Ok(Json(playlist))
}

pub async fn remove_song(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<PlaylistSongRequest>,
) -> Result<Json<Playlist>> {
    let playlist = state
        .playlists
        .remove_song(&request.playlist_id, &request.song_id, user.id())
        .await?;

    Ok(Json(playlist))
}

/// Edit a playlist from a multipart form: optional `name`, optional `image`,
/// and any number of `removeCollaborators` entries
pub async fn edit_playlist(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(playlist_id): Path<PlaylistId>,
    headers: HeaderMap,
    body: Body,
) -> Result<Json<Playlist>> {
    let mut form = FormData::parse(&headers, body).await?;

    let name = form.text("name").map(ToString::to_string);
    let image = form.take_file("image");
    let remove_collaborators: Vec<UserId> = form
        .texts("removeCollaborators")
        .iter()
        .map(|id| UserId::new(id.clone()))
        .collect();

    let playlist = state
        .playlists
        .edit(
            &playlist_id,
            user.id(),
            name.as_deref(),
            image,
            &remove_collaborators,
        )
        .await?;

    Ok(Json(playlist))
}

/// Playlists visible to the authenticated user, split into owned and
/// collaborating groups
pub async fn list_playlists(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<UserPlaylists>> {
    let playlists = state.playlists.list_for_user(user.id()).await?;
    Ok(Json(playlists))
}

/// Owner-only detail view
pub async fn get_playlist(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(playlist_id): Path<PlaylistId>,
) -> Result<Json<PlaylistDetail>> {
    let detail = state.playlists.detail(&playlist_id, user.id()).await?;
    Ok(Json(detail))
}
