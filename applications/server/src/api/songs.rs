//! Song catalog endpoints

use axum::{
    body::Body,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use mixtape_core::types::{CreateSong, Song};
use mixtape_core::{AlbumId, SongId};
use serde::{Deserialize, Serialize};

use crate::api::forms::FormData;
use crate::error::{Result, ServerError};
use crate::middleware::AuthenticatedUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub keyword: Option<String>,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    20
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub songs: Vec<Song>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

/// Upload a song: audio and cover image files plus metadata fields
pub async fn create_song(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    headers: HeaderMap,
    body: Body,
) -> Result<(StatusCode, Json<Song>)> {
    let mut form = FormData::parse(&headers, body).await?;

    let name = form.require_text("name")?.trim().to_string();
    if name.is_empty() {
        return Err(ServerError::BadRequest("Song name is required".to_string()));
    }

    let audio = form
        .take_file("audio")
        .ok_or_else(|| ServerError::BadRequest("Audio file is required".to_string()))?;
    let image = form.take_file("image");

    let audio_url = state
        .images
        .store_audio(&audio.data, audio.content_type.as_deref())
        .await?;

    let image_url = match image {
        Some(file) => Some(
            state
                .images
                .store_image(&file.data, file.content_type.as_deref())
                .await?,
        ),
        None => None,
    };

    let album_id = form.text("albumId").map(|id| AlbumId::new(id.to_string()));
    let duration_seconds = form
        .text("duration")
        .map(str::parse::<i64>)
        .transpose()
        .map_err(|_| ServerError::BadRequest("Duration must be a number".to_string()))?;

    let song = mixtape_storage::songs::create(
        &state.pool,
        CreateSong {
            name,
            description: form.text("description").map(ToString::to_string),
            image_url,
            audio_url,
            album_id,
            duration_seconds,
            artist_name: form.text("artistName").map(ToString::to_string),
        },
    )
    .await?;

    tracing::info!(song_id = %song.id, uploader = %user.id(), "Song uploaded");

    Ok((StatusCode::CREATED, Json(song)))
}

/// Paged keyword search over the catalog
pub async fn search_songs(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>> {
    let limit = request.limit.clamp(1, 100);
    let page = request.page.max(1);

    let keyword = request
        .keyword
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty());

    let (songs, total) = mixtape_storage::songs::search(&state.pool, keyword, page, limit).await?;

    Ok(Json(SearchResponse {
        songs,
        total,
        page,
        limit,
    }))
}

pub async fn get_song(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(song_id): Path<SongId>,
) -> Result<Json<Song>> {
    let song = mixtape_storage::songs::get_by_id(&state.pool, &song_id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Song not found".to_string()))?;

    Ok(Json(song))
}
