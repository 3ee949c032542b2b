//! Account service error type.

use atrium_auth::AuthError;
use thiserror::Error;

use crate::store::StoreError;

/// Errors surfaced by account lifecycle operations.
///
/// Side-effect failures (permission-cache purge) are deliberately not
/// represented here: they are downgraded to warnings at the point of the
/// side effect and never become an operation's result.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("No permission: {0}")]
    Forbidden(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Store error: {0}")]
    Storage(String),
}

impl From<StoreError> for AccountError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(msg) => AccountError::NotFound(msg),
            StoreError::AlreadyExists(msg) => AccountError::Conflict(msg),
            StoreError::Backend(msg) => AccountError::Storage(msg),
        }
    }
}

impl From<AuthError> for AccountError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::WeakPassword(msg) => AccountError::Validation(msg),
            other => AccountError::Storage(other.to_string()),
        }
    }
}
