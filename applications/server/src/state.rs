//! Shared application state

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::services::auth::AuthService;
use crate::services::collaboration::CollaborationService;
use crate::services::image_storage::ImageStorage;
use crate::services::playlists::PlaylistService;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub auth: Arc<AuthService>,
    pub images: Arc<ImageStorage>,
    pub playlists: Arc<PlaylistService>,
    pub collaboration: Arc<CollaborationService>,
}

impl AppState {
    pub fn new(pool: SqlitePool, auth: Arc<AuthService>, images: Arc<ImageStorage>) -> Self {
        let playlists = Arc::new(PlaylistService::new(pool.clone(), images.clone()));
        let collaboration = Arc::new(CollaborationService::new(pool.clone()));

        Self {
            pool,
            auth,
            images,
            playlists,
            collaboration,
        }
    }
}
