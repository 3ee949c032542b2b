//! Authentication error type.

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use thiserror::Error;

/// Errors surfaced by authentication and credential handling.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing Authorization header")]
    MissingAuthorization,

    #[error("Malformed Authorization header: {0}")]
    MalformedAuthorization(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Account is disabled")]
    UserDisabled,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Weak password: {0}")]
    WeakPassword(String),

    #[error("Hashing error: {0}")]
    HashingError(String),

    #[error("Store error: {0}")]
    StoreError(String),
}

/// Convenience result alias.
pub type AuthResult<T> = Result<T, AuthError>;

impl AuthError {
    /// Stable machine-readable kind for response bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::MissingAuthorization
            | AuthError::MalformedAuthorization(_)
            | AuthError::InvalidCredentials
            | AuthError::UserNotFound(_)
            | AuthError::TokenExpired
            | AuthError::InvalidSignature => "unauthorized",
            AuthError::UserDisabled => "forbidden",
            AuthError::WeakPassword(_) => "validation_error",
            AuthError::HashingError(_) | AuthError::StoreError(_) => "internal_error",
        }
    }
}

impl actix_web::ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingAuthorization
            | AuthError::MalformedAuthorization(_)
            | AuthError::InvalidCredentials
            | AuthError::UserNotFound(_)
            | AuthError::TokenExpired
            | AuthError::InvalidSignature => StatusCode::UNAUTHORIZED,
            AuthError::UserDisabled => StatusCode::FORBIDDEN,
            AuthError::WeakPassword(_) => StatusCode::BAD_REQUEST,
            AuthError::HashingError(_) | AuthError::StoreError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Credential failures collapse to one generic message to prevent
        // user enumeration.
        let message = match self {
            AuthError::InvalidCredentials | AuthError::UserNotFound(_) => {
                "Invalid username or password".to_string()
            }
            AuthError::HashingError(_) | AuthError::StoreError(_) => {
                "Authentication failed".to_string()
            }
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.kind(),
            "message": message,
        }))
    }
}
