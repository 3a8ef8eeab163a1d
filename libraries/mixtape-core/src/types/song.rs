/// Song domain types
use crate::types::{AlbumId, SongId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Song catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    /// Unique song identifier
    pub id: SongId,

    /// Song title
    pub name: String,

    /// Free-form description
    pub description: Option<String>,

    /// Cover image URL
    pub image_url: Option<String>,

    /// Audio file URL
    pub audio_url: String,

    /// Album this song belongs to, if any
    pub album_id: Option<AlbumId>,

    /// Duration in seconds
    pub duration_seconds: Option<i64>,

    /// Performing artist
    pub artist_name: Option<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new song
#[derive(Debug, Clone)]
pub struct CreateSong {
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub audio_url: String,
    pub album_id: Option<AlbumId>,
    pub duration_seconds: Option<i64>,
    pub artist_name: Option<String>,
}
