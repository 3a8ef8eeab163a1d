//! Playlist service: ownership and membership checks layered over storage
//!
//! Storage enforces data shape; this service decides who may do what.
//! Owner and accepted collaborators may add and remove songs, only the
//! owner may edit metadata or remove collaborators.

use std::sync::Arc;

use mixtape_core::{
    types::{CreatePlaylist, Playlist, PlaylistDetail, UserPlaylists},
    MixtapeError, PlaylistId, SongId, UserId,
};
use sqlx::SqlitePool;

use crate::error::Result;
use crate::services::image_storage::ImageStorage;

/// An uploaded file pulled out of a multipart form
pub struct UploadedFile {
    pub data: Vec<u8>,
    pub content_type: Option<String>,
}

pub struct PlaylistService {
    pool: SqlitePool,
    images: Arc<ImageStorage>,
}

impl PlaylistService {
    pub fn new(pool: SqlitePool, images: Arc<ImageStorage>) -> Self {
        Self { pool, images }
    }

    pub async fn create(
        &self,
        owner_id: &UserId,
        name: &str,
        image: Option<UploadedFile>,
    ) -> Result<Playlist> {
        let name = name.trim();
        if name.is_empty() {
            return Err(MixtapeError::invalid_input("Playlist name is required").into());
        }

        let image_url = match image {
            Some(file) => Some(
                self.images
                    .store_image(&file.data, file.content_type.as_deref())
                    .await?,
            ),
            None => None,
        };

        let playlist = mixtape_storage::playlists::create(
            &self.pool,
            CreatePlaylist {
                name: name.to_string(),
                image_url,
                owner_id: owner_id.clone(),
            },
        )
        .await?;

        tracing::info!(playlist_id = %playlist.id, owner_id = %owner_id, "Playlist created");

        Ok(playlist)
    }

    /// Add a song to a playlist. Allowed for the owner and collaborators.
    pub async fn add_song(
        &self,
        playlist_id: &PlaylistId,
        song_id: &SongId,
        requester: &UserId,
    ) -> Result<Playlist> {
        let playlist = self.get_modifiable(playlist_id, requester).await?;

        if !mixtape_storage::songs::exists(&self.pool, song_id).await? {
            return Err(MixtapeError::not_found("Song", song_id).into());
        }

        mixtape_storage::playlists::add_song(&self.pool, &playlist.id, song_id).await?;

        self.reload(playlist_id).await
    }

    /// Remove a song from a playlist. Allowed for the owner and collaborators.
    pub async fn remove_song(
        &self,
        playlist_id: &PlaylistId,
        song_id: &SongId,
        requester: &UserId,
    ) -> Result<Playlist> {
        let playlist = self.get_modifiable(playlist_id, requester).await?;

        mixtape_storage::playlists::remove_song(&self.pool, &playlist.id, song_id).await?;

        self.reload(playlist_id).await
    }

    /// Edit playlist metadata and collaborator set. Owner only.
    pub async fn edit(
        &self,
        playlist_id: &PlaylistId,
        requester: &UserId,
        name: Option<&str>,
        image: Option<UploadedFile>,
        remove_collaborators: &[UserId],
    ) -> Result<Playlist> {
        let playlist = mixtape_storage::playlists::get_by_id(&self.pool, playlist_id)
            .await?
            .ok_or_else(|| MixtapeError::not_found("Playlist", playlist_id))?;

        if playlist.owner_id != *requester {
            return Err(
                MixtapeError::permission_denied("Only the owner can edit this playlist").into(),
            );
        }

        if let Some(name) = name {
            if name.trim().is_empty() {
                return Err(MixtapeError::invalid_input("Playlist name cannot be empty").into());
            }
        }

        let image_url = match image {
            Some(file) => Some(
                self.images
                    .store_image(&file.data, file.content_type.as_deref())
                    .await?,
            ),
            None => None,
        };

        mixtape_storage::playlists::update_meta(
            &self.pool,
            playlist_id,
            name.map(str::trim),
            image_url.as_deref(),
        )
        .await?;

        mixtape_storage::playlists::remove_collaborators(
            &self.pool,
            playlist_id,
            remove_collaborators,
        )
        .await?;

        self.reload(playlist_id).await
    }

    pub async fn list_for_user(&self, user_id: &UserId) -> Result<UserPlaylists> {
        Ok(mixtape_storage::playlists::list_for_user(&self.pool, user_id).await?)
    }

    /// Owner-only detail view with members and songs resolved to full records.
    /// A playlist owned by someone else is reported as not found.
    pub async fn detail(&self, playlist_id: &PlaylistId, requester: &UserId) -> Result<PlaylistDetail> {
        mixtape_storage::playlists::get_detail(&self.pool, playlist_id, requester)
            .await?
            .ok_or_else(|| MixtapeError::not_found("Playlist", playlist_id).into())
    }

    async fn get_modifiable(
        &self,
        playlist_id: &PlaylistId,
        requester: &UserId,
    ) -> Result<Playlist> {
        let playlist = mixtape_storage::playlists::get_by_id(&self.pool, playlist_id)
            .await?
            .ok_or_else(|| MixtapeError::not_found("Playlist", playlist_id))?;

        if !playlist.can_modify(requester) {
            return Err(MixtapeError::permission_denied(
                "You are not allowed to modify this playlist",
            )
            .into());
        }

        Ok(playlist)
    }

    async fn reload(&self, playlist_id: &PlaylistId) -> Result<Playlist> {
        mixtape_storage::playlists::get_by_id(&self.pool, playlist_id)
            .await?
            .ok_or_else(|| MixtapeError::not_found("Playlist", playlist_id).into())
    }
}
