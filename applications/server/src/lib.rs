//! Mixtape Server Library
//!
//! Media-library backend with authentication, a song/album catalog, and
//! collaborative playlist editing driven by an invite/respond workflow.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use routes::create_router;
pub use services::auth::AuthService;
pub use services::collaboration::CollaborationService;
pub use services::image_storage::ImageStorage;
pub use services::playlists::PlaylistService;
pub use state::AppState;
