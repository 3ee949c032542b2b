//! Delete handlers: single and batch

use std::sync::Arc;

use actix_web::{web, HttpResponse};

use atrium_accounts::AccountService;
use atrium_auth::AuthenticatedUser;
use atrium_commons::UserId;

use crate::handlers::{map_account_error, parse_user_id, require_permission, USERS_MANAGE};
use crate::models::{BatchDeleteRequest, DeletedResponse};

/// DELETE /v1/api/users/{id}
pub async fn delete_user_handler(
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

    match service.delete(&user_id).await {
        Ok(()) => HttpResponse::Ok().json(DeletedResponse { deleted: 1 }),
        Err(err) => map_account_error(err),
    }
}

/// POST /v1/api/users/batch-delete
///
/// Refused outright when any target is root; the error message lists
/// every offending id.
pub async fn batch_delete_users_handler(
    service: web::Data<Arc<AccountService>>,
    acting: AuthenticatedUser,
    body: web::Json<BatchDeleteRequest>,
) -> HttpResponse {
    if let Err(denied) = require_permission(&service, acting.user(), USERS_MANAGE).await {
        return denied;
    }

    let mut user_ids = Vec::with_capacity(body.user_ids.len());
    for raw in &body.user_ids {
        match UserId::try_new(raw.clone()) {
            Ok(id) => user_ids.push(id),
            Err(bad) => {
                return HttpResponse::BadRequest().json(crate::models::ErrorBody::new(
                    "validation_error",
                    bad.to_string(),
                ))
            }
        }
    }

    match service.batch_delete(&user_ids).await {
        Ok(deleted) => HttpResponse::Ok().json(DeletedResponse { deleted }),
        Err(err) => map_account_error(err),
    }
}
