//! Create-user handler

use std::sync::Arc;

use actix_web::{web, HttpResponse};

use atrium_accounts::{AccountService, CreateUserInput};
use atrium_auth::AuthenticatedUser;

use crate::handlers::{map_account_error, require_permission, USERS_MANAGE};
use crate::models::CreateUserRequest;

/// POST /v1/api/users
pub async fn create_user_handler(
    service: web::Data<Arc<AccountService>>,
    acting: AuthenticatedUser,
    body: web::Json<CreateUserRequest>,
) -> HttpResponse {
    if let Err(denied) = require_permission(&service, acting.user(), USERS_MANAGE).await {
        return denied;
    }

    let body = body.into_inner();
    let input = CreateUserInput {
        username: body.username,
        password: body.password,
        email: body.email,
        display_name: body.display_name,
        role_ids: body.role_ids.into_iter().map(Into::into).collect(),
    };

    match service.create(input).await {
        Ok(view) => HttpResponse::Created().json(view),
        Err(err) => map_account_error(err),
    }
}
