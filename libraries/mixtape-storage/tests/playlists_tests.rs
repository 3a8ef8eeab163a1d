//! Integration tests for the playlists vertical slice
//!
//! Covers CRUD with ownership, song ordering, idempotent adds, collaborator
//! removal, and the owned/collaborating split.


use mixtape_core::{types::*, MixtapeError};
use test_helpers::*;

#[tokio::test]
async fn test_create_and_get_playlist() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user_id = create_test_user(pool, "testuser").await;

    let playlist = mixtape_storage::playlists::create(
        pool,
        CreatePlaylist {
            name: "My Favorites".to_string(),
            image_url: Some("/media/images/cover.png".to_string()),
            owner_id: user_id.clone(),
        },
    )
    .await
    .expect("Failed to create playlist");

    assert_eq!(playlist.name, "My Favorites");
    assert_eq!(playlist.owner_id, user_id);
    assert!(playlist.songs.is_empty());
    assert!(playlist.collaborators.is_empty());

    let retrieved = mixtape_storage::playlists::get_by_id(pool, &playlist.id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(retrieved.id, playlist.id);
    assert_eq!(retrieved.name, "My Favorites");
}

#[tokio::test]
async fn test_add_songs_preserves_order() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user_id = create_test_user(pool, "testuser").await;
    let playlist_id = create_test_playlist(pool, "Test Playlist", &user_id).await;

    let song1 = create_test_song(pool, "Song 1").await;
    let song2 = create_test_song(pool, "Song 2").await;

    mixtape_storage::playlists::add_song(pool, &playlist_id, &song1)
        .await
        .expect("Failed to add song");
    mixtape_storage::playlists::add_song(pool, &playlist_id, &song2)
        .await
        .expect("Failed to add song");

    let playlist = mixtape_storage::playlists::get_by_id(pool, &playlist_id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(playlist.songs.len(), 2);
    assert_eq!(playlist.songs[0].song_id, song1);
    assert_eq!(playlist.songs[0].position, 0);
    assert_eq!(playlist.songs[1].song_id, song2);
    assert_eq!(playlist.songs[1].position, 1);
}

#[tokio::test]
async fn test_add_song_twice_is_a_noop() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user_id = create_test_user(pool, "testuser").await;
    let playlist_id = create_test_playlist(pool, "Test", &user_id).await;
    let song_id = create_test_song(pool, "Song").await;

    mixtape_storage::playlists::add_song(pool, &playlist_id, &song_id)
        .await
        .unwrap();

    mixtape_storage::playlists::add_song(pool, &playlist_id, &song_id)
        .await
        .expect("Second add should succeed but do nothing");

    let playlist = mixtape_storage::playlists::get_by_id(pool, &playlist_id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(playlist.songs.len(), 1);
}

#[tokio::test]
async fn test_remove_song_closes_position_gap() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user_id = create_test_user(pool, "testuser").await;
    let playlist_id = create_test_playlist(pool, "Test", &user_id).await;

    let song1 = create_test_song(pool, "Song 1").await;
    let song2 = create_test_song(pool, "Song 2").await;
    let song3 = create_test_song(pool, "Song 3").await;

    for song in [&song1, &song2, &song3] {
        mixtape_storage::playlists::add_song(pool, &playlist_id, song)
            .await
            .unwrap();
    }

    mixtape_storage::playlists::remove_song(pool, &playlist_id, &song2)
        .await
        .expect("Failed to remove song");

    let playlist = mixtape_storage::playlists::get_by_id(pool, &playlist_id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(playlist.songs.len(), 2);
    assert_eq!(playlist.songs[0].song_id, song1);
    assert_eq!(playlist.songs[0].position, 0);
    assert_eq!(playlist.songs[1].song_id, song3);
    assert_eq!(playlist.songs[1].position, 1);
}

#[tokio::test]
async fn test_remove_song_not_in_playlist_fails() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user_id = create_test_user(pool, "testuser").await;
    let playlist_id = create_test_playlist(pool, "Test", &user_id).await;
    let song_id = create_test_song(pool, "Never Added").await;

    let result = mixtape_storage::playlists::remove_song(pool, &playlist_id, &song_id).await;

    assert!(matches!(result, Err(MixtapeError::NotFound { .. })));
}

#[tokio::test]
async fn test_list_for_user_splits_owned_and_collaborating() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let owner = create_test_user(pool, "owner").await;
    let collaborator = create_test_user(pool, "collaborator").await;

    let roadtrip = create_test_playlist(pool, "Roadtrip", &owner).await;
    create_test_playlist(pool, "Private Mix", &owner).await;
    create_test_playlist(pool, "Own Stuff", &collaborator).await;

    grant_collaboration(pool, &roadtrip, &owner, &collaborator).await;

    let owner_lists = mixtape_storage::playlists::list_for_user(pool, &owner)
        .await
        .unwrap();
    assert_eq!(owner_lists.owned.len(), 2);
    assert!(owner_lists.collaborating.is_empty());

    let collab_lists = mixtape_storage::playlists::list_for_user(pool, &collaborator)
        .await
        .unwrap();
    assert_eq!(collab_lists.owned.len(), 1);
    assert_eq!(collab_lists.collaborating.len(), 1);
    assert_eq!(collab_lists.collaborating[0].id, roadtrip);
    assert_eq!(collab_lists.collaborating[0].owner_id, owner);

    // The two groups never overlap
    for owned in &collab_lists.owned {
        assert!(collab_lists
            .collaborating
            .iter()
            .all(|p| p.id != owned.id));
    }
}

#[tokio::test]
async fn test_remove_collaborators_is_set_difference() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let owner = create_test_user(pool, "owner").await;
    let member = create_test_user(pool, "member").await;
    let stranger = create_test_user(pool, "stranger").await;

    let playlist_id = create_test_playlist(pool, "Shared", &owner).await;
    grant_collaboration(pool, &playlist_id, &owner, &member).await;

    // Removing a current member and an id that was never a member
    mixtape_storage::playlists::remove_collaborators(
        pool,
        &playlist_id,
        &[member.clone(), stranger],
    )
    .await
    .expect("Removal with absent ids should still succeed");

    let playlist = mixtape_storage::playlists::get_by_id(pool, &playlist_id)
        .await
        .unwrap()
        .unwrap();

    assert!(playlist.collaborators.is_empty());
}

#[tokio::test]
async fn test_owner_never_in_collaborators_after_mutations() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let owner = create_test_user(pool, "owner").await;
    let member = create_test_user(pool, "member").await;

    let playlist_id = create_test_playlist(pool, "Checked", &owner).await;
    grant_collaboration(pool, &playlist_id, &owner, &member).await;

    let song = create_test_song(pool, "Song").await;
    mixtape_storage::playlists::add_song(pool, &playlist_id, &song)
        .await
        .unwrap();
    mixtape_storage::playlists::update_meta(pool, &playlist_id, Some("Renamed"), None)
        .await
        .unwrap();

    let playlist = mixtape_storage::playlists::get_by_id(pool, &playlist_id)
        .await
        .unwrap()
        .unwrap();

    assert!(!playlist.collaborators.contains(&playlist.owner_id));
    assert_eq!(playlist.collaborators, vec![member]);
}

#[tokio::test]
async fn test_get_detail_is_owner_only() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let owner = create_test_user(pool, "owner").await;
    let other = create_test_user(pool, "other").await;

    let playlist_id = create_test_playlist(pool, "Mine", &owner).await;
    let song = create_test_song(pool, "Song").await;
    mixtape_storage::playlists::add_song(pool, &playlist_id, &song)
        .await
        .unwrap();

    let detail = mixtape_storage::playlists::get_detail(pool, &playlist_id, &owner)
        .await
        .unwrap()
        .expect("Owner should see detail");

    assert_eq!(detail.owner.id, owner);
    assert_eq!(detail.songs.len(), 1);
    assert_eq!(detail.songs[0].id, song);

    let hidden = mixtape_storage::playlists::get_detail(pool, &playlist_id, &other)
        .await
        .unwrap();
    assert!(hidden.is_none());
}

#[tokio::test]
async fn test_playlist_updated_at_changes_on_modifications() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user_id = create_test_user(pool, "testuser").await;
    let playlist_id = create_test_playlist(pool, "Test", &user_id).await;

    let before = mixtape_storage::playlists::get_by_id(pool, &playlist_id)
        .await
        .unwrap()
        .unwrap()
        .updated_at;

    tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

    let song_id = create_test_song(pool, "Song").await;
    mixtape_storage::playlists::add_song(pool, &playlist_id, &song_id)
        .await
        .unwrap();

    let after = mixtape_storage::playlists::get_by_id(pool, &playlist_id)
        .await
        .unwrap()
        .unwrap()
        .updated_at;

    assert!(after > before);
}

#[tokio::test]
async fn test_positions_stay_sequential_across_mutations() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user_id = create_test_user(pool, "testuser").await;
    let playlist_id = create_test_playlist(pool, "Test", &user_id).await;

    let mut songs = Vec::new();
    for i in 0..5 {
        let song = create_test_song(pool, &format!("Song {i}")).await;
        mixtape_storage::playlists::add_song(pool, &playlist_id, &song)
            .await
            .unwrap();
        songs.push(song);
    }

    mixtape_storage::playlists::remove_song(pool, &playlist_id, &songs[1])
        .await
        .unwrap();
    mixtape_storage::playlists::remove_song(pool, &playlist_id, &songs[3])
        .await
        .unwrap();

    let late_song = create_test_song(pool, "Late Arrival").await;
    mixtape_storage::playlists::add_song(pool, &playlist_id, &late_song)
        .await
        .unwrap();

    let playlist = mixtape_storage::playlists::get_by_id(pool, &playlist_id)
        .await
        .unwrap()
        .unwrap();

    // Positions are 0..n with no gaps or duplicates
    let positions: Vec<i64> = playlist.songs.iter().map(|s| s.position).collect();
    assert_eq!(positions, (0..playlist.songs.len() as i64).collect::<Vec<_>>());
    assert_eq!(playlist.songs.last().unwrap().song_id, late_song);
}
