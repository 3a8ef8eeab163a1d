//! Mixtape Core
//!
//! Platform-agnostic domain types and error handling for the Mixtape
//! media-library backend.
//!
//! The core crate defines:
//! - **Domain Types**: `User`, `Song`, `Album`, `Playlist`, `CollaborationRequest`
//! - **Error Handling**: unified `MixtapeError` and `Result` types
//!
//! The collaborative-playlist state machine lives in the storage and service
//! layers; this crate owns the vocabulary those layers speak.

#![forbid(unsafe_code)]

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{MixtapeError, Result};

pub use types::{
    Album, AlbumId, CollaborationRequest, CreateAlbum, CreatePlaylist, CreateSong, CreateUser,
    IncomingRequest, Playlist, PlaylistDetail, PlaylistId, PlaylistSong, RequestDecision,
    RequestId, RequestStatus, Song, SongId, User, UserId, UserPlaylists,
};
