//! Domain types for Mixtape entities

mod album;
mod collaboration;
mod ids;
mod playlist;
mod song;
mod user;

pub use album::{Album, CreateAlbum};
pub use collaboration::{
    CollaborationRequest, IncomingRequest, RequestDecision, RequestStatus,
};
pub use ids::{AlbumId, PlaylistId, RequestId, SongId, UserId};
pub use playlist::{CreatePlaylist, Playlist, PlaylistDetail, PlaylistSong, UserPlaylists};
pub use song::{CreateSong, Song};
pub use user::{CreateUser, User};
