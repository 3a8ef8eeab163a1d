/// Core error types for Mixtape
use thiserror::Error;

/// Result type alias using `MixtapeError`
pub type Result<T> = std::result::Result<T, MixtapeError>;

/// Unified error taxonomy for the Mixtape backend.
///
/// Services catch infrastructure failures at the boundary and translate them
/// into one of these variants; callers never see raw database errors.
#[derive(Error, Debug)]
pub enum MixtapeError {
    /// Malformed or missing input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Referenced entity absent
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Caller lacks rights over the target entity
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Merged not-found/unauthorized for the respond-to-request path.
    ///
    /// Deliberately does not reveal whether the request exists, so a
    /// non-participant cannot probe for request ids.
    #[error("Request not found or unauthorized")]
    NotFoundOrUnauthorized,

    /// State-machine precondition violated (duplicate pending invite,
    /// already-resolved request)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Blob/image storage failure
    #[error("Upload failed: {0}")]
    Upload(String),

    /// Database errors (for storage implementations)
    #[error("Database error: {0}")]
    Database(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl MixtapeError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a permission denied error
    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::PermissionDenied(msg.into())
    }

    /// Create a conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Create an upload error
    pub fn upload(msg: impl Into<String>) -> Self {
        Self::Upload(msg.into())
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for MixtapeError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}
