//! Collaboration request queries: the invite/respond state machine.
//!
//! Requests move `pending -> accepted` or `pending -> rejected` and never
//! leave a terminal state. Accepting a request grants playlist membership in
//! the same `SQLite` transaction as the status flip, so the two writes cannot
//! diverge. Requests are never deleted.

use chrono::Utc;
use mixtape_core::{error::Result, types::*, MixtapeError};
use sqlx::{Row, SqlitePool};

fn request_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<CollaborationRequest> {
    let status: String = row.get("status");
    let status = RequestStatus::parse(&status)
        .ok_or_else(|| MixtapeError::Database(format!("invalid request status: {status}")))?;

    Ok(CollaborationRequest {
        id: row.get("id"),
        playlist_id: row.get("playlist_id"),
        owner_id: row.get("owner_id"),
        collaborator_id: row.get("collaborator_id"),
        status,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

const REQUEST_COLUMNS: &str =
    "id, playlist_id, owner_id, collaborator_id, status, created_at, updated_at";

/// Create a new pending request.
///
/// The partial unique index on `(playlist_id, owner_id, collaborator_id)
/// WHERE status = 'pending'` backs the duplicate-invite rule, so two
/// concurrent invites for the same tuple cannot both land; the loser surfaces
/// as `Conflict`.
pub async fn create(
    pool: &SqlitePool,
    playlist_id: &PlaylistId,
    owner_id: &UserId,
    collaborator_id: &UserId,
) -> Result<CollaborationRequest> {
    let id = RequestId::generate();
    let now = Utc::now();

    let result = sqlx::query(
        r#"
        INSERT INTO collaboration_requests
            (id, playlist_id, owner_id, collaborator_id, status, created_at, updated_at)
        VALUES (?, ?, ?, ?, 'pending', ?, ?)
        "#,
    )
    .bind(&id)
    .bind(playlist_id)
    .bind(owner_id)
    .bind(collaborator_id)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await;

    match result {
        Ok(_) => {}
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            return Err(MixtapeError::conflict(
                "Collaboration request already sent to this user",
            ));
        }
        Err(e) => return Err(e.into()),
    }

    get_by_id(pool, &id)
        .await?
        .ok_or_else(|| MixtapeError::Database("Failed to retrieve created request".to_string()))
}

/// Get request by ID
pub async fn get_by_id(pool: &SqlitePool, id: &RequestId) -> Result<Option<CollaborationRequest>> {
    let row = sqlx::query(&format!(
        "SELECT {REQUEST_COLUMNS} FROM collaboration_requests WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(request_from_row).transpose()
}

/// Find a pending request for the given invite tuple
pub async fn find_pending(
    pool: &SqlitePool,
    playlist_id: &PlaylistId,
    owner_id: &UserId,
    collaborator_id: &UserId,
) -> Result<Option<CollaborationRequest>> {
    let row = sqlx::query(&format!(
        "SELECT {REQUEST_COLUMNS} FROM collaboration_requests
         WHERE playlist_id = ? AND owner_id = ? AND collaborator_id = ? AND status = 'pending'"
    ))
    .bind(playlist_id)
    .bind(owner_id)
    .bind(collaborator_id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(request_from_row).transpose()
}

/// Resolve a pending request with the invitee's decision.
///
/// Only the invitee may respond; anyone else gets the merged
/// `NotFoundOrUnauthorized` so request ids cannot be probed for existence.
/// Both terminal states refuse further responses with `Conflict`.
///
/// On accept, the membership grant and the status flip happen in one
/// transaction. The status update is guarded by `status = 'pending'`, so a
/// concurrent respond on the same request rolls back and loses with
/// `Conflict` instead of double-applying.
pub async fn respond(
    pool: &SqlitePool,
    request_id: &RequestId,
    responder_id: &UserId,
    decision: RequestDecision,
) -> Result<CollaborationRequest> {
    let request = get_by_id(pool, request_id)
        .await?
        .ok_or(MixtapeError::NotFoundOrUnauthorized)?;

    if request.collaborator_id != *responder_id {
        return Err(MixtapeError::NotFoundOrUnauthorized);
    }

    match request.status {
        RequestStatus::Pending => {}
        RequestStatus::Accepted => {
            return Err(MixtapeError::conflict(
                "This collaboration request has already been accepted",
            ));
        }
        RequestStatus::Rejected => {
            return Err(MixtapeError::conflict(
                "This collaboration request has already been rejected",
            ));
        }
    }

    let mut tx = pool.begin().await?;

    if decision == RequestDecision::Accepted {
        // Idempotent: an existing membership row is left untouched
        sqlx::query(
            r#"
            INSERT INTO playlist_collaborators (playlist_id, user_id, added_at)
            VALUES (?, ?, ?)
            ON CONFLICT(playlist_id, user_id) DO NOTHING
            "#,
        )
        .bind(&request.playlist_id)
        .bind(&request.collaborator_id)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE playlists SET updated_at = ? WHERE id = ?")
            .bind(Utc::now())
            .bind(&request.playlist_id)
            .execute(&mut *tx)
            .await?;
    }

    let result = sqlx::query(
        "UPDATE collaboration_requests
         SET status = ?, updated_at = ?
         WHERE id = ? AND status = 'pending'",
    )
    .bind(decision.status().as_str())
    .bind(Utc::now())
    .bind(request_id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        // A concurrent responder got there first; membership insert rolls back
        return Err(MixtapeError::conflict(
            "This collaboration request has already been resolved",
        ));
    }

    tx.commit().await?;

    get_by_id(pool, request_id)
        .await?
        .ok_or_else(|| MixtapeError::Database("Failed to retrieve updated request".to_string()))
}

/// All requests addressed to a user, enriched with the requesting owner's
/// display name and the target playlist's name and image, newest first
pub async fn list_incoming(
    pool: &SqlitePool,
    collaborator_id: &UserId,
) -> Result<Vec<IncomingRequest>> {
    let rows = sqlx::query(
        r#"
        SELECT
            r.id, r.status, r.created_at,
            u.name AS owner_name,
            p.name AS playlist_name, p.image_url AS playlist_image
        FROM collaboration_requests r
        INNER JOIN users u ON r.owner_id = u.id
        INNER JOIN playlists p ON r.playlist_id = p.id
        WHERE r.collaborator_id = ?
        ORDER BY r.created_at DESC
        "#,
    )
    .bind(collaborator_id)
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| {
            let status: String = row.get("status");
            let status = RequestStatus::parse(&status).ok_or_else(|| {
                MixtapeError::Database(format!("invalid request status: {status}"))
            })?;

            Ok(IncomingRequest {
                id: row.get("id"),
                status,
                owner_name: row.get("owner_name"),
                playlist_name: row.get("playlist_name"),
                playlist_image: row.get("playlist_image"),
                created_at: row.get("created_at"),
            })
        })
        .collect()
}
