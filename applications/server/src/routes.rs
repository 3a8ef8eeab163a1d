//! Router assembly

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::api;
use crate::state::AppState;

/// Build the full application router.
///
/// All JSON endpoints live under `/api`; uploaded media is served statically
/// under `/media`. Static segments win over path parameters, so routes like
/// `/playlist/requests` coexist with `/playlist/:id`.
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(api::health::health_check))
        // Authentication
        .route("/auth/signup", post(api::auth::signup))
        .route("/auth/login", post(api::auth::login))
        .route("/auth/refresh", post(api::auth::refresh))
        // Users
        .route("/users", get(api::users::list_users))
        .route("/users/me", get(api::users::me))
        // Catalog
        .route("/songs", post(api::songs::create_song))
        .route("/songs/search", post(api::songs::search_songs))
        .route("/songs/:id", get(api::songs::get_song))
        .route(
            "/albums",
            get(api::albums::list_albums).post(api::albums::create_album),
        )
        .route("/albums/:id", get(api::albums::get_album))
        // Playlists
        .route("/playlist/create", post(api::playlists::create_playlist))
        .route("/playlist/add-song", post(api::playlists::add_song))
        .route("/playlist/remove-song", post(api::playlists::remove_song))
        .route("/playlist/:id/edit", put(api::playlists::edit_playlist))
        .route("/playlists", get(api::playlists::list_playlists))
        // Collaboration requests
        .route(
            "/playlist/send-request",
            post(api::collaboration::send_request),
        )
        .route(
            "/playlist/respond-request",
            post(api::collaboration::respond_request),
        )
        .route("/playlist/requests", get(api::collaboration::list_requests))
        .route("/playlist/:id", get(api::playlists::get_playlist));

    let media_dir = state.images.media_dir().to_path_buf();

    Router::new()
        .nest("/api", api.with_state(state))
        .nest_service("/media", ServeDir::new(media_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
