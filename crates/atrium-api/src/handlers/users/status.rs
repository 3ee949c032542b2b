//! Status-change handler

use std::sync::Arc;

use actix_web::{web, HttpResponse};

use atrium_accounts::AccountService;
use atrium_auth::AuthenticatedUser;

use crate::handlers::{map_account_error, parse_user_id, require_permission, USERS_MANAGE};
use crate::models::SetStatusRequest;

/// POST /v1/api/users/{id}/status
pub async fn set_status_handler(
    service: web::Data<Arc<AccountService>>,
    acting: AuthenticatedUser,
    path: web::Path<String>,
    body: web::Json<SetStatusRequest>,
) -> HttpResponse {
    if let Err(denied) = require_permission(&service, acting.user(), USERS_MANAGE).await {
        return denied;
    }

    let user_id = match parse_user_id(&path) {
        Ok(id) => id,
        Err(bad) => return bad,
    };

    match service.set_status(&user_id, body.status, acting.user()).await {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(err) => map_account_error(err),
    }
}
