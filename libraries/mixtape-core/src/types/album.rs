/// Album domain types
use crate::types::{AlbumId, Song};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Album catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    /// Unique album identifier
    pub id: AlbumId,

    /// Album title
    pub name: String,

    /// Cover image URL
    pub image_url: Option<String>,

    /// Free-form description
    pub description: Option<String>,

    /// Accent color for the album page
    pub color: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Songs in the album, populated by detail queries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub songs: Option<Vec<Song>>,
}

/// Data required to create a new album
#[derive(Debug, Clone)]
pub struct CreateAlbum {
    pub name: String,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
}
