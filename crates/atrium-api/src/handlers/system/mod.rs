//! System handlers
//!
//! ## Endpoints
//! - POST /v1/api/system/restart - Request a process restart

use std::sync::Arc;

use actix_web::{web, HttpResponse};

use atrium_accounts::AccountService;
use atrium_auth::AuthenticatedUser;
use atrium_supervisor::RestartCoordinator;

use crate::handlers::{require_permission, SYSTEM_MANAGE};
use crate::models::RestartResponse;

/// POST /v1/api/system/restart
///
/// Returns immediately: `accepted` schedules the restart past the
/// response boundary, `already_restarting` declines a duplicate request.
/// Both are 200s; a declined restart is a normal outcome, not an error.
pub async fn restart_handler(
    accounts: web::Data<Arc<AccountService>>,
    coordinator: web::Data<Arc<RestartCoordinator>>,
    acting: AuthenticatedUser,
) -> HttpResponse {
    if let Err(denied) = require_permission(&accounts, acting.user(), SYSTEM_MANAGE).await {
        return denied;
    }

    let outcome = coordinator.request_restart();
    HttpResponse::Ok().json(RestartResponse::from(outcome))
}
