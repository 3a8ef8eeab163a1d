//! Playlist queries
//!
//! Owns the `playlists`, `playlist_songs`, and `playlist_collaborators`
//! tables. Membership rows are written by the collaboration slice when a
//! request is accepted; this slice only reads and removes them.

use chrono::Utc;
use mixtape_core::{error::Result, types::*, MixtapeError};
use sqlx::{Row, SqlitePool};

fn playlist_from_row(row: &sqlx::sqlite::SqliteRow) -> Playlist {
    Playlist {
        id: row.get("id"),
        name: row.get("name"),
        image_url: row.get("image_url"),
        owner_id: row.get("owner_id"),
        collaborators: Vec::new(),
        songs: Vec::new(),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

const PLAYLIST_COLUMNS: &str = "id, name, image_url, owner_id, created_at, updated_at";

async fn load_members(pool: &SqlitePool, playlist: &mut Playlist) -> Result<()> {
    let collaborator_rows = sqlx::query(
        "SELECT user_id FROM playlist_collaborators WHERE playlist_id = ? ORDER BY added_at",
    )
    .bind(&playlist.id)
    .fetch_all(pool)
    .await?;

    playlist.collaborators = collaborator_rows
        .iter()
        .map(|row| row.get("user_id"))
        .collect();

    let song_rows = sqlx::query(
        "SELECT song_id, position, added_at FROM playlist_songs
         WHERE playlist_id = ?
         ORDER BY position",
    )
    .bind(&playlist.id)
    .fetch_all(pool)
    .await?;

    playlist.songs = song_rows
        .iter()
        .map(|row| PlaylistSong {
            song_id: row.get("song_id"),
            position: row.get("position"),
            added_at: row.get("added_at"),
        })
        .collect();

    Ok(())
}

/// Create a new playlist with empty song and collaborator lists
pub async fn create(pool: &SqlitePool, playlist: CreatePlaylist) -> Result<Playlist> {
    let id = PlaylistId::generate();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO playlists (id, name, image_url, owner_id, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&playlist.name)
    .bind(&playlist.image_url)
    .bind(&playlist.owner_id)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    get_by_id(pool, &id)
        .await?
        .ok_or_else(|| MixtapeError::Database("Failed to retrieve created playlist".to_string()))
}

/// Get playlist by ID with collaborators and songs loaded
pub async fn get_by_id(pool: &SqlitePool, id: &PlaylistId) -> Result<Option<Playlist>> {
    let row = sqlx::query(&format!(
        "SELECT {PLAYLIST_COLUMNS} FROM playlists WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    let Some(mut playlist) = row.as_ref().map(playlist_from_row) else {
        return Ok(None);
    };

    load_members(pool, &mut playlist).await?;

    Ok(Some(playlist))
}

/// Update playlist name and/or image
pub async fn update_meta(
    pool: &SqlitePool,
    id: &PlaylistId,
    name: Option<&str>,
    image_url: Option<&str>,
) -> Result<()> {
    if let Some(name) = name {
        sqlx::query("UPDATE playlists SET name = ?, updated_at = ? WHERE id = ?")
            .bind(name)
            .bind(Utc::now())
            .bind(id)
            .execute(pool)
            .await?;
    }

    if let Some(image_url) = image_url {
        sqlx::query("UPDATE playlists SET image_url = ?, updated_at = ? WHERE id = ?")
            .bind(image_url)
            .bind(Utc::now())
            .bind(id)
            .execute(pool)
            .await?;
    }

    Ok(())
}

/// Add a song to the end of a playlist.
///
/// Idempotent: adding a song that is already present is a no-op, not an
/// error. The position read and the insert share a transaction so two
/// concurrent adds cannot claim the same position.
pub async fn add_song(pool: &SqlitePool, playlist_id: &PlaylistId, song_id: &SongId) -> Result<()> {
    let mut tx = pool.begin().await?;

    let next_position: i64 = sqlx::query_scalar(
        "SELECT COALESCE(MAX(position) + 1, 0) FROM playlist_songs WHERE playlist_id = ?",
    )
    .bind(playlist_id)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO playlist_songs (playlist_id, song_id, position, added_at)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(playlist_id, song_id) DO NOTHING
        "#,
    )
    .bind(playlist_id)
    .bind(song_id)
    .bind(next_position)
    .bind(Utc::now())
    .execute(&mut *tx)
    .await?;

    sqlx::query("UPDATE playlists SET updated_at = ? WHERE id = ?")
        .bind(Utc::now())
        .bind(playlist_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(())
}

/// Remove a song from a playlist, closing the position gap.
///
/// Fails with `NotFound` if the song is not currently in the playlist.
pub async fn remove_song(
    pool: &SqlitePool,
    playlist_id: &PlaylistId,
    song_id: &SongId,
) -> Result<()> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query("DELETE FROM playlist_songs WHERE playlist_id = ? AND song_id = ?")
        .bind(playlist_id)
        .bind(song_id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(MixtapeError::not_found("Song in playlist", song_id));
    }

    // Close the gap left by the removed row
    sqlx::query(
        r#"
        UPDATE playlist_songs
        SET position = (
            SELECT COUNT(*)
            FROM playlist_songs ps2
            WHERE ps2.playlist_id = playlist_songs.playlist_id
              AND ps2.position < playlist_songs.position
        )
        WHERE playlist_id = ?
        "#,
    )
    .bind(playlist_id)
    .execute(&mut *tx)
    .await?;

    sqlx::query("UPDATE playlists SET updated_at = ? WHERE id = ?")
        .bind(Utc::now())
        .bind(playlist_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(())
}

/// Remove the listed users from a playlist's collaborator set.
///
/// Ids that are not current collaborators are silently ignored
/// (set-difference semantics).
pub async fn remove_collaborators(
    pool: &SqlitePool,
    playlist_id: &PlaylistId,
    user_ids: &[UserId],
) -> Result<()> {
    if user_ids.is_empty() {
        return Ok(());
    }

    for user_id in user_ids {
        sqlx::query("DELETE FROM playlist_collaborators WHERE playlist_id = ? AND user_id = ?")
            .bind(playlist_id)
            .bind(user_id)
            .execute(pool)
            .await?;
    }

    touch(pool, playlist_id).await
}

/// Playlists visible to a user: owned, plus those where the user holds an
/// accepted collaboration grant. The groups are disjoint because the owner is
/// never a member of the collaborator set.
pub async fn list_for_user(pool: &SqlitePool, user_id: &UserId) -> Result<UserPlaylists> {
    let owned_rows = sqlx::query(&format!(
        "SELECT {PLAYLIST_COLUMNS} FROM playlists WHERE owner_id = ? ORDER BY updated_at DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let collaborating_rows = sqlx::query(&format!(
        "SELECT {PLAYLIST_COLUMNS} FROM playlists
         WHERE id IN (SELECT playlist_id FROM playlist_collaborators WHERE user_id = ?)
         ORDER BY updated_at DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let mut owned = Vec::with_capacity(owned_rows.len());
    for row in &owned_rows {
        let mut playlist = playlist_from_row(row);
        load_members(pool, &mut playlist).await?;
        owned.push(playlist);
    }

    let mut collaborating = Vec::with_capacity(collaborating_rows.len());
    for row in &collaborating_rows {
        let mut playlist = playlist_from_row(row);
        load_members(pool, &mut playlist).await?;
        collaborating.push(playlist);
    }

    Ok(UserPlaylists {
        owned,
        collaborating,
    })
}

/// Owner-only detail view: owner, collaborators, and songs resolved to full
/// records. Returns `None` when the playlist does not exist or the requester
/// is not its owner.
pub async fn get_detail(
    pool: &SqlitePool,
    playlist_id: &PlaylistId,
    owner_id: &UserId,
) -> Result<Option<PlaylistDetail>> {
    let row = sqlx::query(&format!(
        "SELECT {PLAYLIST_COLUMNS} FROM playlists WHERE id = ? AND owner_id = ?"
    ))
    .bind(playlist_id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await?;

    let Some(mut playlist) = row.as_ref().map(playlist_from_row) else {
        return Ok(None);
    };

    load_members(pool, &mut playlist).await?;

    let owner = crate::users::get_by_id(pool, &playlist.owner_id)
        .await?
        .ok_or_else(|| MixtapeError::not_found("User", &playlist.owner_id))?;

    let mut collaborators = Vec::with_capacity(playlist.collaborators.len());
    for user_id in &playlist.collaborators {
        if let Some(user) = crate::users::get_by_id(pool, user_id).await? {
            collaborators.push(user);
        }
    }

    let mut songs = Vec::with_capacity(playlist.songs.len());
    for entry in &playlist.songs {
        if let Some(song) = crate::songs::get_by_id(pool, &entry.song_id).await? {
            songs.push(song);
        }
    }

    Ok(Some(PlaylistDetail {
        id: playlist.id,
        name: playlist.name,
        image_url: playlist.image_url,
        owner,
        collaborators,
        songs,
        created_at: playlist.created_at,
        updated_at: playlist.updated_at,
    }))
}

async fn touch(pool: &SqlitePool, playlist_id: &PlaylistId) -> Result<()> {
    sqlx::query("UPDATE playlists SET updated_at = ? WHERE id = ?")
        .bind(Utc::now())
        .bind(playlist_id)
        .execute(pool)
        .await?;

    Ok(())
}
