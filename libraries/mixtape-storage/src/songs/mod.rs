//! Song catalog queries
//!
//! The catalog is pass-through storage: no invariants beyond persisting what
//! was given. Playlists reference songs by id and only validate existence.

use chrono::Utc;
use mixtape_core::{error::Result, types::*, MixtapeError};
use sqlx::{Row, SqlitePool};

fn song_from_row(row: &sqlx::sqlite::SqliteRow) -> Song {
    Song {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        image_url: row.get("image_url"),
        audio_url: row.get("audio_url"),
        album_id: row.get("album_id"),
        duration_seconds: row.get("duration_seconds"),
        artist_name: row.get("artist_name"),
        created_at: row.get("created_at"),
    }
}

const SONG_COLUMNS: &str =
    "id, name, description, image_url, audio_url, album_id, duration_seconds, artist_name, created_at";

/// Create a new song
pub async fn create(pool: &SqlitePool, song: CreateSong) -> Result<Song> {
    let id = SongId::generate();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO songs
            (id, name, description, image_url, audio_url, album_id, duration_seconds, artist_name, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&song.name)
    .bind(&song.description)
    .bind(&song.image_url)
    .bind(&song.audio_url)
    .bind(&song.album_id)
    .bind(song.duration_seconds)
    .bind(&song.artist_name)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    get_by_id(pool, &id)
        .await?
        .ok_or_else(|| MixtapeError::Database("Failed to retrieve created song".to_string()))
}

/// Get song by ID
pub async fn get_by_id(pool: &SqlitePool, id: &SongId) -> Result<Option<Song>> {
    let row = sqlx::query(&format!("SELECT {SONG_COLUMNS} FROM songs WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(song_from_row))
}

/// Check whether a song exists
pub async fn exists(pool: &SqlitePool, id: &SongId) -> Result<bool> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM songs WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("count") > 0)
}

/// Keyword search across name, description, and artist, newest first.
///
/// `page` is 1-based. Returns the page of songs plus the total match count.
pub async fn search(
    pool: &SqlitePool,
    keyword: Option<&str>,
    page: i64,
    limit: i64,
) -> Result<(Vec<Song>, i64)> {
    let pattern = keyword.map(|k| format!("%{k}%"));
    let offset = (page.max(1) - 1) * limit;

    let (total, rows) = match &pattern {
        Some(pattern) => {
            let total: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM songs
                 WHERE name LIKE ? OR description LIKE ? OR artist_name LIKE ?",
            )
            .bind(pattern)
            .bind(pattern)
            .bind(pattern)
            .fetch_one(pool)
            .await?;

            let rows = sqlx::query(&format!(
                "SELECT {SONG_COLUMNS} FROM songs
                 WHERE name LIKE ? OR description LIKE ? OR artist_name LIKE ?
                 ORDER BY created_at DESC
                 LIMIT ? OFFSET ?"
            ))
            .bind(pattern)
            .bind(pattern)
            .bind(pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

            (total, rows)
        }
        None => {
            let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM songs")
                .fetch_one(pool)
                .await?;

            let rows = sqlx::query(&format!(
                "SELECT {SONG_COLUMNS} FROM songs
                 ORDER BY created_at DESC
                 LIMIT ? OFFSET ?"
            ))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

            (total, rows)
        }
    };

    Ok((rows.iter().map(song_from_row).collect(), total))
}

/// Get all songs belonging to an album, newest first
pub async fn get_by_album(pool: &SqlitePool, album_id: &AlbumId) -> Result<Vec<Song>> {
    let rows = sqlx::query(&format!(
        "SELECT {SONG_COLUMNS} FROM songs WHERE album_id = ? ORDER BY created_at DESC"
    ))
    .bind(album_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(song_from_row).collect())
}
