//! Album catalog endpoints

use axum::{
    body::Body,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use mixtape_core::types::{Album, CreateAlbum};
use mixtape_core::AlbumId;

use crate::api::forms::FormData;
use crate::error::{Result, ServerError};
use crate::middleware::AuthenticatedUser;
use crate::state::AppState;

pub async fn list_albums(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<Vec<Album>>> {
    let albums = mixtape_storage::albums::get_all(&state.pool).await?;
    Ok(Json(albums))
}

/// Album detail with its songs resolved
pub async fn get_album(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(album_id): Path<AlbumId>,
) -> Result<Json<Album>> {
    let album = mixtape_storage::albums::get_with_songs(&state.pool, &album_id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Album not found".to_string()))?;

    Ok(Json(album))
}

/// Create an album: cover image plus metadata fields
pub async fn create_album(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    headers: HeaderMap,
    body: Body,
) -> Result<(StatusCode, Json<Album>)> {
    let mut form = FormData::parse(&headers, body).await?;

    let name = form.require_text("name")?.trim().to_string();
    if name.is_empty() {
        return Err(ServerError::BadRequest(
            "Album name is required".to_string(),
        ));
    }

    let image_url = match form.take_file("image") {
        Some(file) => Some(
            state
                .images
                .store_image(&file.data, file.content_type.as_deref())
                .await?,
        ),
        None => None,
    };

    let album = mixtape_storage::albums::create(
        &state.pool,
        CreateAlbum {
            name,
            image_url,
            description: form.text("description").map(ToString::to_string),
            color: form.text("color").map(ToString::to_string),
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(album)))
}
