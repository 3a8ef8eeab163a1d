//! End-to-end API tests driving the real router against a temp database

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new().await;

    let (status, body) = app.request_json("GET", "/api/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = TestApp::new().await;

    for uri in ["/api/playlists", "/api/users", "/api/playlist/requests"] {
        let (status, _) = app.request_json("GET", uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "expected 401 for {uri}");
    }

    let (status, _) = app
        .request_json("GET", "/api/playlists", Some("not-a-real-token"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_signup_and_login() {
    let app = TestApp::new().await;

    let (user_id, _token) = app.signup("alice").await;
    assert!(!user_id.is_empty());

    // Duplicate signup is rejected
    let (status, body) = app
        .request_json(
            "POST",
            "/api/auth/signup",
            None,
            Some(json!({
                "name": "alice",
                "username": "alice",
                "email": "alice@example.com",
                "password": "password123",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "got: {body}");

    let (status, body) = app
        .request_json(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({
                "email": "alice@example.com",
                "password": "password123",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], user_id.as_str());
    assert!(body["access_token"].as_str().is_some());

    let (status, _) = app
        .request_json(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({
                "email": "alice@example.com",
                "password": "wrong-password",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_token_flow() {
    let app = TestApp::new().await;

    let (status, body) = app
        .request_json(
            "POST",
            "/api/auth/signup",
            None,
            Some(json!({
                "name": "carol",
                "username": "carol",
                "email": "carol@example.com",
                "password": "password123",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let refresh_token = body["refresh_token"].as_str().unwrap().to_string();
    let access_token = body["access_token"].as_str().unwrap().to_string();

    let (status, body) = app
        .request_json(
            "POST",
            "/api/auth/refresh",
            None,
            Some(json!({ "refresh_token": refresh_token })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["access_token"].as_str().is_some());

    // An access token is not a refresh token
    let (status, _) = app
        .request_json(
            "POST",
            "/api/auth/refresh",
            None,
            Some(json!({ "refresh_token": access_token })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // A refresh token cannot authenticate a normal request
    let (status, _) = app
        .request_json("GET", "/api/playlists", Some(&refresh_token), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_playlist_song_management() {
    let app = TestApp::new().await;

    let (_alice_id, alice) = app.signup("alice").await;
    let playlist_id = app.create_playlist(&alice, "Roadtrip").await;
    let song_id = app.create_song(&alice, "Highway Song").await;

    let (status, body) = app
        .request_json(
            "POST",
            "/api/playlist/add-song",
            Some(&alice),
            Some(json!({ "playlistId": playlist_id, "songId": song_id })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "add-song failed: {body}");
    assert_eq!(body["songs"].as_array().unwrap().len(), 1);

    // A stranger may not touch the playlist
    let (_bob_id, bob) = app.signup("bob").await;
    let (status, _) = app
        .request_json(
            "POST",
            "/api/playlist/add-song",
            Some(&bob),
            Some(json!({ "playlistId": playlist_id, "songId": song_id })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .request_json(
            "POST",
            "/api/playlist/remove-song",
            Some(&alice),
            Some(json!({ "playlistId": playlist_id, "songId": song_id })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "remove-song failed: {body}");
    assert!(body["songs"].as_array().unwrap().is_empty());

    // Removing again reports not found
    let (status, _) = app
        .request_json(
            "POST",
            "/api/playlist/remove-song",
            Some(&alice),
            Some(json!({ "playlistId": playlist_id, "songId": song_id })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_collaboration_flow() {
    let app = TestApp::new().await;

    let (_alice_id, alice) = app.signup("alice").await;
    let (bob_id, bob) = app.signup("bob").await;
    let playlist_id = app.create_playlist(&alice, "Shared Mix").await;

    // Invite bob by username
    let (status, body) = app
        .request_json(
            "POST",
            "/api/playlist/send-request",
            Some(&alice),
            Some(json!({ "playlistId": playlist_id, "username": "bob" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "send-request failed: {body}");
    let request_id = body["id"].as_str().unwrap().to_string();
    assert_eq!(body["status"], "pending");

    // Duplicate pending invite is rejected
    let (status, _) = app
        .request_json(
            "POST",
            "/api/playlist/send-request",
            Some(&alice),
            Some(json!({ "playlistId": playlist_id, "collaboratorId": bob_id })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Inviting the owner is rejected
    let (status, _) = app
        .request_json(
            "POST",
            "/api/playlist/send-request",
            Some(&alice),
            Some(json!({ "playlistId": playlist_id, "username": "alice" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Bob sees the pending invite, enriched with owner and playlist info
    let (status, body) = app
        .request_json("GET", "/api/playlist/requests", Some(&bob), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let requests = body.as_array().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["owner_name"], "alice");
    assert_eq!(requests[0]["playlist_name"], "Shared Mix");

    // A stranger cannot respond and cannot tell the request exists
    let (_eve_id, eve) = app.signup("eve").await;
    let (status, _) = app
        .request_json(
            "POST",
            "/api/playlist/respond-request",
            Some(&eve),
            Some(json!({ "requestId": request_id, "response": "accepted" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Bob accepts
    let (status, body) = app
        .request_json(
            "POST",
            "/api/playlist/respond-request",
            Some(&bob),
            Some(json!({ "requestId": request_id, "response": "accepted" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "respond failed: {body}");
    assert_eq!(body["status"], "accepted");

    // Responding again conflicts
    let (status, _) = app
        .request_json(
            "POST",
            "/api/playlist/respond-request",
            Some(&bob),
            Some(json!({ "requestId": request_id, "response": "rejected" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // The playlist now shows under bob's collaborating group
    let (status, body) = app
        .request_json("GET", "/api/playlists", Some(&bob), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["owned"].as_array().unwrap().is_empty());
    let collaborating = body["collaborating"].as_array().unwrap();
    assert_eq!(collaborating.len(), 1);
    assert_eq!(collaborating[0]["id"], playlist_id.as_str());

    // And bob may now add songs
    let song_id = app.create_song(&alice, "Shared Song").await;
    let (status, _) = app
        .request_json(
            "POST",
            "/api/playlist/add-song",
            Some(&bob),
            Some(json!({ "playlistId": playlist_id, "songId": song_id })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_playlist_detail_is_owner_only() {
    let app = TestApp::new().await;

    let (_alice_id, alice) = app.signup("alice").await;
    let (_bob_id, bob) = app.signup("bob").await;
    let playlist_id = app.create_playlist(&alice, "Mine").await;

    let (status, body) = app
        .request_json(
            "GET",
            &format!("/api/playlist/{playlist_id}"),
            Some(&alice),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["owner"]["username"], "alice");

    let (status, _) = app
        .request_json(
            "GET",
            &format!("/api/playlist/{playlist_id}"),
            Some(&bob),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_edit_playlist_owner_only() {
    let app = TestApp::new().await;

    let (_alice_id, alice) = app.signup("alice").await;
    let (bob_id, bob) = app.signup("bob").await;
    let playlist_id = app.create_playlist(&alice, "Before").await;

    // Grant bob membership so the permission check is about editing,
    // not about being a stranger
    let (_, body) = app
        .request_json(
            "POST",
            "/api/playlist/send-request",
            Some(&alice),
            Some(json!({ "playlistId": playlist_id, "collaboratorId": bob_id })),
        )
        .await;
    let request_id = body["id"].as_str().unwrap().to_string();
    app.request_json(
        "POST",
        "/api/playlist/respond-request",
        Some(&bob),
        Some(json!({ "requestId": request_id, "response": "accepted" })),
    )
    .await;

    // Collaborators cannot edit metadata
    let (status, _) = app
        .request_multipart(
            "PUT",
            &format!("/api/playlist/{playlist_id}/edit"),
            &bob,
            &[("name", "Hijacked")],
            &[],
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // The owner renames and drops bob in one call
    let (status, body) = app
        .request_multipart(
            "PUT",
            &format!("/api/playlist/{playlist_id}/edit"),
            &alice,
            &[("name", "After"), ("removeCollaborators", &bob_id)],
            &[],
        )
        .await;
    assert_eq!(status, StatusCode::OK, "edit failed: {body}");
    assert_eq!(body["name"], "After");
    assert!(body["collaborators"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_song_search_pagination() {
    let app = TestApp::new().await;

    let (_alice_id, alice) = app.signup("alice").await;
    for i in 0..5 {
        app.create_song(&alice, &format!("Track {i}")).await;
    }
    app.create_song(&alice, "Completely Different").await;

    let (status, body) = app
        .request_json(
            "POST",
            "/api/songs/search",
            Some(&alice),
            Some(json!({ "keyword": "Track", "page": 1, "limit": 3 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 5);
    assert_eq!(body["songs"].as_array().unwrap().len(), 3);

    let (status, body) = app
        .request_json(
            "POST",
            "/api/songs/search",
            Some(&alice),
            Some(json!({ "keyword": "Track", "page": 2, "limit": 3 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["songs"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_uploaded_media_is_served() {
    let app = TestApp::new().await;

    let (_alice_id, alice) = app.signup("alice").await;
    let song_id = app.create_song(&alice, "Served Song").await;

    let (status, body) = app
        .request_json("GET", &format!("/api/songs/{song_id}"), Some(&alice), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let audio_url = body["audio_url"].as_str().unwrap().to_string();
    assert!(audio_url.starts_with("/media/audio/"));

    let (status, _) = app.request_json("GET", &audio_url, Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_create_playlist_rejects_blank_name() {
    let app = TestApp::new().await;

    let (_alice_id, alice) = app.signup("alice").await;

    // Whitespace-only name
    let (status, body) = app
        .request_multipart("POST", "/api/playlist/create", &alice, &[("name", "   ")], &[])
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "got: {body}");

    // Missing name field entirely
    let (status, _) = app
        .request_multipart("POST", "/api/playlist/create", &alice, &[], &[])
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Nothing was created
    let (_, body) = app.request_json("GET", "/api/playlists", Some(&alice), None).await;
    assert!(body["owned"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_add_song_unknown_song_is_not_found() {
    let app = TestApp::new().await;

    let (_alice_id, alice) = app.signup("alice").await;
    let playlist_id = app.create_playlist(&alice, "Roadtrip").await;

    let (status, body) = app
        .request_json(
            "POST",
            "/api/playlist/add-song",
            Some(&alice),
            Some(json!({ "playlistId": playlist_id, "songId": "no-such-song" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND, "got: {body}");

    // The playlist is untouched
    let (_, body) = app
        .request_json("GET", &format!("/api/playlist/{playlist_id}"), Some(&alice), None)
        .await;
    assert!(body["songs"].as_array().unwrap().is_empty());
}
