/// Collaboration request domain types
///
/// A request is the only path by which a playlist gains a collaborator: the
/// owner sends one, the invitee responds, and an accepted response grants
/// membership atomically with the status flip.
use crate::types::{PlaylistId, RequestId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a collaboration request.
///
/// `Pending` is the only mutable state; `Accepted` and `Rejected` are both
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Awaiting the invitee's response
    Pending,
    /// Invitee accepted; membership has been granted
    Accepted,
    /// Invitee declined
    Rejected,
}

impl RequestStatus {
    /// Convert status to string for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Accepted => "accepted",
            RequestStatus::Rejected => "rejected",
        }
    }

    /// Parse status from string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(RequestStatus::Pending),
            "accepted" => Some(RequestStatus::Accepted),
            "rejected" => Some(RequestStatus::Rejected),
            _ => None,
        }
    }

    /// Whether the request can still be responded to
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestStatus::Pending)
    }
}

/// The invitee's answer to a pending request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestDecision {
    Accepted,
    Rejected,
}

impl RequestDecision {
    /// The terminal status this decision resolves to
    pub fn status(&self) -> RequestStatus {
        match self {
            RequestDecision::Accepted => RequestStatus::Accepted,
            RequestDecision::Rejected => RequestStatus::Rejected,
        }
    }
}

/// Collaboration request
///
/// Requests are append-only: they are created by the playlist owner, mutated
/// once by the invitee's response, and never deleted (the history doubles as
/// an audit trail of how each membership was granted).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollaborationRequest {
    /// Unique request identifier
    pub id: RequestId,

    /// Target playlist
    pub playlist_id: PlaylistId,

    /// The playlist's owner at request time
    pub owner_id: UserId,

    /// Invitee; the only user allowed to respond
    pub collaborator_id: UserId,

    /// Current lifecycle state
    pub status: RequestStatus,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// Incoming request as shown to the invitee, enriched with the requesting
/// owner's display name and the target playlist's name and image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingRequest {
    pub id: RequestId,
    pub status: RequestStatus,
    pub owner_name: String,
    pub playlist_name: String,
    pub playlist_image: Option<String>,
    pub created_at: DateTime<Utc>,
}
