//! User administration request/response models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use atrium_commons::UserStatus;

/// POST /v1/api/users request body
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub role_ids: Vec<String>,
}

/// PATCH /v1/api/users/{id} request body; absent fields stay untouched
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub role_ids: Option<Vec<String>>,
}

/// POST /v1/api/users/{id}/status request body
#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: UserStatus,
}

/// POST /v1/api/users/{id}/password request body
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub password: String,
}

/// POST /v1/api/users/{id}/password/auto response.
///
/// Carries the generated plaintext exactly once; it is not retrievable
/// again.
#[derive(Debug, Serialize)]
pub struct ResetPasswordAutoResponse {
    pub password: String,
}

/// POST /v1/api/users/{id}/balance request body
#[derive(Debug, Deserialize)]
pub struct BalanceChangeRequest {
    /// Signed amount added to the balance; the result floors at zero.
    pub delta: Decimal,
}

/// POST /v1/api/users/batch-delete request body
#[derive(Debug, Deserialize)]
pub struct BatchDeleteRequest {
    pub user_ids: Vec<String>,
}

/// Deletion result
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub deleted: usize,
}

/// GET /v1/api/users query parameters
#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub page_size: Option<usize>,
    #[serde(default)]
    pub status: Option<UserStatus>,
    /// Case-insensitive username substring filter
    #[serde(default)]
    pub username: Option<String>,
}
