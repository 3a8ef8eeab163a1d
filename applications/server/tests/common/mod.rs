//! Shared helpers for API integration tests
//!
//! Each test gets a fresh SQLite database and media directory in a temp dir,
//! and drives the real router with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use mixtape_server::services::auth::AuthService;
use mixtape_server::services::image_storage::ImageStorage;
use mixtape_server::{create_router, AppState};

pub struct TestApp {
    pub router: Router,
    _temp_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let pool = mixtape_storage::create_pool(&db_url)
            .await
            .expect("Failed to create pool");
        mixtape_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let auth = Arc::new(AuthService::new("integration-test-secret", 1, 7));
        let images = Arc::new(ImageStorage::new(temp_dir.path().join("media")));
        images.initialize().await.expect("Failed to init media dir");

        let state = AppState::new(pool, auth, images);

        Self {
            router: create_router(state),
            _temp_dir: temp_dir,
        }
    }

    /// Send a JSON request and return status plus parsed body
    pub async fn request_json(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send(request).await
    }

    /// Send a multipart/form-data request built from text fields and files
    pub async fn request_multipart(
        &self,
        method: &str,
        uri: &str,
        token: &str,
        fields: &[(&str, &str)],
        files: &[(&str, &str, &[u8])],
    ) -> (StatusCode, Value) {
        let boundary = "mixtape-test-boundary";
        let mut body = Vec::new();

        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        for (name, filename, data) in files {
            body.extend_from_slice(
                format!(
                    "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("authorization", format!("Bearer {token}"))
            .header(
                "content-type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();

        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, body)
    }

    /// Sign up a user and return (user id, access token)
    pub async fn signup(&self, username: &str) -> (String, String) {
        let (status, body) = self
            .request_json(
                "POST",
                "/api/auth/signup",
                None,
                Some(json!({
                    "name": username,
                    "username": username,
                    "email": format!("{username}@example.com"),
                    "password": "password123",
                })),
            )
            .await;

        assert_eq!(status, StatusCode::CREATED, "signup failed: {body}");

        let user_id = body["user"]["id"].as_str().unwrap().to_string();
        let token = body["access_token"].as_str().unwrap().to_string();
        (user_id, token)
    }

    /// Create a playlist via the API and return its id
    pub async fn create_playlist(&self, token: &str, name: &str) -> String {
        let (status, body) = self
            .request_multipart("POST", "/api/playlist/create", token, &[("name", name)], &[])
            .await;

        assert_eq!(status, StatusCode::CREATED, "create playlist failed: {body}");
        body["id"].as_str().unwrap().to_string()
    }

    /// Upload a song via the API and return its id
    pub async fn create_song(&self, token: &str, name: &str) -> String {
        let (status, body) = self
            .request_multipart(
                "POST",
                "/api/songs",
                token,
                &[("name", name), ("artistName", "Test Artist")],
                &[("audio", "song.mp3", b"fake-audio-bytes")],
            )
            .await;

        assert_eq!(status, StatusCode::CREATED, "create song failed: {body}");
        body["id"].as_str().unwrap().to_string()
    }
}
