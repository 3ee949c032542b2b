//! Password reset handlers

use std::sync::Arc;

use actix_web::{web, HttpResponse};

use atrium_accounts::AccountService;
use atrium_auth::AuthenticatedUser;

use crate::handlers::{map_account_error, parse_user_id, require_permission, USERS_MANAGE};
use crate::models::{ResetPasswordAutoResponse, ResetPasswordRequest};

/// POST /v1/api/users/{id}/password
pub async fn reset_password_handler(
    service: web::Data<Arc<AccountService>>,
    acting: AuthenticatedUser,
    path: web::Path<String>,
    body: web::Json<ResetPasswordRequest>,
) -> HttpResponse {
    if let Err(denied) = require_permission(&service, acting.user(), USERS_MANAGE).await {
        return denied;
    }

    let user_id = match parse_user_id(&path) {
        Ok(id) => id,
        Err(bad) => return bad,
    };

    match service
        .reset_password(&user_id, &body.password, acting.user())
        .await
    {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => map_account_error(err),
    }
}

/// POST /v1/api/users/{id}/password/auto
///
/// Generates a random credential and returns it in plaintext exactly
/// once. Only the hash is stored.
pub async fn reset_password_auto_handler(
    service: web::Data<Arc<AccountService>>,
    acting: AuthenticatedUser,
    path: web::Path<String>,
) -> HttpResponse {
    if let Err(denied) = require_permission(&service, acting.user(), USERS_MANAGE).await {
        return denied;
    }

    let user_id = match parse_user_id(&path) {
        Ok(id) => id,
        Err(bad) => return bad,
    };

    match service.reset_password_auto(&user_id, acting.user()).await {
        Ok(password) => HttpResponse::Ok().json(ResetPasswordAutoResponse { password }),
        Err(err) => map_account_error(err),
    }
}
