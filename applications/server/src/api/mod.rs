//! HTTP API route handlers

pub mod albums;
pub mod auth;
pub mod collaboration;
pub mod forms;
pub mod health;
pub mod playlists;
pub mod songs;
pub mod users;
