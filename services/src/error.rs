use sea_orm::DbErr;
use thiserror::Error;

/// Failure taxonomy for every attendance operation.
///
/// Display strings are the exact messages shown to clients, so they live here
/// rather than in the route layer. `InvalidCredentials` is deliberately the
/// same generic message for unknown users and wrong passwords.
#[derive(Debug, Error)]
pub enum AttendanceError {
    /// Malformed or missing request fields; user-correctable.
    #[error("{0}")]
    Validation(String),

    #[error("Invalid User ID or Password")]
    InvalidCredentials,

    /// The account exists but provisioning never set a credential.
    #[error("User has no password set.")]
    MissingCredential,

    #[error("{0}")]
    NotFound(String),

    /// Location verification against a session that was never opened.
    #[error("Teacher has not started this session yet.")]
    SessionNotOpen,

    /// Outside the geofence; carries the rounded distance for display.
    #[error("Location Mismatch. You are {meters} meters away from class.")]
    LocationMismatch { meters: i64 },

    /// Store failure. The underlying message is surfaced for operator
    /// diagnosis, not hidden.
    #[error("Server error: {0}")]
    Db(#[from] DbErr),

    #[error("Server error: {0}")]
    Hash(String),
}
