//! Update-user handler

use std::sync::Arc;

use actix_web::{web, HttpResponse};

use atrium_accounts::{AccountService, UserPatch};
use atrium_auth::AuthenticatedUser;

use crate::handlers::{map_account_error, parse_user_id, require_permission, USERS_MANAGE};
use crate::models::UpdateUserRequest;

/// PATCH /v1/api/users/{id}
pub async fn update_user_handler(
    service: web::Data<Arc<AccountService>>,
    acting: AuthenticatedUser,
    path: web::Path<String>,
    body: web::Json<UpdateUserRequest>,
) -> HttpResponse {
    if let Err(denied) = require_permission(&service, acting.user(), USERS_MANAGE).await {
        return denied;
    }

    let user_id = match parse_user_id(&path) {
        Ok(id) => id,
        Err(bad) => return bad,
    };

    let body = body.into_inner();
    let patch = UserPatch {
        username: body.username,
        email: body.email,
        display_name: body.display_name,
        role_ids: body
            .role_ids
            .map(|ids| ids.into_iter().map(Into::into).collect()),
    };

    match service.update(&user_id, patch, acting.user()).await {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(err) => map_account_error(err),
    }
}
