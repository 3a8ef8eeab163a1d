/// Playlist domain types
use crate::types::{PlaylistId, Song, SongId, User, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Playlist
///
/// `collaborators` is a set (no duplicates, order irrelevant) and never
/// contains `owner_id`; the owner has implicit full rights and membership is
/// only ever granted through an accepted collaboration request. `songs` keeps
/// insertion order for display and suppresses duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Playlist name
    pub name: String,

    /// Cover image URL
    pub image_url: Option<String>,

    /// Owner user ID, immutable after creation
    pub owner_id: UserId,

    /// Users granted shared edit rights
    pub collaborators: Vec<UserId>,

    /// Ordered song ids
    pub songs: Vec<PlaylistSong>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl Playlist {
    /// Whether `user_id` may mutate this playlist's songs
    pub fn can_modify(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id || self.collaborators.contains(user_id)
    }
}

/// Song entry within a playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistSong {
    /// Song ID
    pub song_id: SongId,

    /// Position in the playlist (0-indexed, gap-free)
    pub position: i64,

    /// When the song was added
    pub added_at: DateTime<Utc>,
}

/// Data required to create a new playlist
#[derive(Debug, Clone)]
pub struct CreatePlaylist {
    pub name: String,
    pub image_url: Option<String>,
    pub owner_id: UserId,
}

/// Playlists visible to a user, split into two disjoint groups.
///
/// Ownership and collaboration are mutually exclusive, so a playlist never
/// appears in both lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPlaylists {
    /// Playlists the user owns
    pub owned: Vec<Playlist>,

    /// Playlists the user collaborates on via an accepted request
    pub collaborating: Vec<Playlist>,
}

/// Playlist with owner, collaborators, and songs resolved to full records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistDetail {
    pub id: PlaylistId,
    pub name: String,
    pub image_url: Option<String>,
    pub owner: User,
    pub collaborators: Vec<User>,
    pub songs: Vec<Song>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
