//! Album catalog queries

use chrono::Utc;
use mixtape_core::{error::Result, types::*, MixtapeError};
use sqlx::{Row, SqlitePool};

fn album_from_row(row: &sqlx::sqlite::SqliteRow) -> Album {
    Album {
        id: row.get("id"),
        name: row.get("name"),
        image_url: row.get("image_url"),
        description: row.get("description"),
        color: row.get("color"),
        created_at: row.get("created_at"),
        songs: None,
    }
}

/// Create a new album
pub async fn create(pool: &SqlitePool, album: CreateAlbum) -> Result<Album> {
    let id = AlbumId::generate();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO albums (id, name, image_url, description, color, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&album.name)
    .bind(&album.image_url)
    .bind(&album.description)
    .bind(album.color.as_deref().unwrap_or("#000"))
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    get_by_id(pool, &id)
        .await?
        .ok_or_else(|| MixtapeError::Database("Failed to retrieve created album".to_string()))
}

/// Get album by ID, without songs
pub async fn get_by_id(pool: &SqlitePool, id: &AlbumId) -> Result<Option<Album>> {
    let row = sqlx::query(
        "SELECT id, name, image_url, description, color, created_at FROM albums WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(album_from_row))
}

/// Get album by ID with its song list resolved
pub async fn get_with_songs(pool: &SqlitePool, id: &AlbumId) -> Result<Option<Album>> {
    let Some(mut album) = get_by_id(pool, id).await? else {
        return Ok(None);
    };

    album.songs = Some(crate::songs::get_by_album(pool, id).await?);

    Ok(Some(album))
}

/// Get all albums, newest first
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Album>> {
    let rows = sqlx::query(
        "SELECT id, name, image_url, description, color, created_at FROM albums
         ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(album_from_row).collect())
}
