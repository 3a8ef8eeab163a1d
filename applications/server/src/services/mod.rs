//! Business logic services

pub mod auth;
pub mod collaboration;
pub mod image_storage;
pub mod playlists;
