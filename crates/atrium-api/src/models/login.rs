//! Login and current-user models

use serde::{Deserialize, Serialize};

use atrium_commons::UserView;

/// POST /v1/api/auth/login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response: the redacted user plus an access token
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: UserView,
    pub access_token: String,
    pub expires_at: String,
}

/// GET /v1/api/auth/me response
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: UserView,
    pub permissions: Vec<String>,
}
