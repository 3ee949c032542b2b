//! HTTP handlers.
//!
//! One module per endpoint group. Handlers return `HttpResponse`
//! directly; service errors funnel through [`map_account_error`] so the
//! taxonomy-to-status mapping lives in one place.

pub mod auth;
pub mod settings;
pub mod system;
pub mod users;

use actix_web::HttpResponse;

use atrium_accounts::permission_cache::ALL_PERMISSIONS;
use atrium_accounts::{AccountError, AccountService};
use atrium_commons::{User, UserId};

use crate::models::ErrorBody;

/// Permission code gating user administration.
pub const USERS_MANAGE: &str = "users:manage";

/// Permission code gating console settings.
pub const SETTINGS_MANAGE: &str = "settings:manage";

/// Permission code gating process-level operations.
pub const SYSTEM_MANAGE: &str = "system:manage";

/// Map account service errors to HTTP responses.
///
/// Internal causes are not echoed to the client.
pub(crate) fn map_account_error(err: AccountError) -> HttpResponse {
    match err {
        AccountError::NotFound(_) => {
            HttpResponse::NotFound().json(ErrorBody::new("not_found", err.to_string()))
        }
        AccountError::Forbidden(_) => {
            HttpResponse::Forbidden().json(ErrorBody::new("forbidden", err.to_string()))
        }
        AccountError::Validation(_) => {
            HttpResponse::BadRequest().json(ErrorBody::new("validation_error", err.to_string()))
        }
        AccountError::Conflict(_) => {
            HttpResponse::Conflict().json(ErrorBody::new("conflict", err.to_string()))
        }
        AccountError::Storage(cause) => {
            log::error!("account operation failed: {}", cause);
            HttpResponse::InternalServerError()
                .json(ErrorBody::new("internal_error", "Operation failed"))
        }
    }
}

/// Check the acting user for a permission code.
///
/// Root users carry the wildcard code and pass every check.
pub(crate) async fn require_permission(
    service: &AccountService,
    acting: &User,
    code: &str,
) -> Result<(), HttpResponse> {
    let codes = service.effective_permissions(acting).await;
    if codes
        .iter()
        .any(|c| c.as_str() == ALL_PERMISSIONS || c.as_str() == code)
    {
        Ok(())
    } else {
        Err(HttpResponse::Forbidden().json(ErrorBody::new("forbidden", "no permission")))
    }
}

/// Parse a path segment into a typed user id.
pub(crate) fn parse_user_id(raw: &str) -> Result<UserId, HttpResponse> {
    UserId::try_new(raw).map_err(|e| {
        HttpResponse::BadRequest().json(ErrorBody::new("validation_error", e.to_string()))
    })
}
