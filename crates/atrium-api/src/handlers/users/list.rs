//! Read handlers: single fetch and paginated listing

use std::sync::Arc;

use actix_web::{web, HttpResponse};

use atrium_accounts::{AccountService, UserFilter};
use atrium_auth::AuthenticatedUser;

use crate::handlers::{map_account_error, parse_user_id, require_permission, USERS_MANAGE};
use crate::models::ListUsersQuery;

const DEFAULT_PAGE_SIZE: usize = 20;

/// GET /v1/api/users
pub async fn list_users_handler(
    service: web::Data<Arc<AccountService>>,
    acting: AuthenticatedUser,
    query: web::Query<ListUsersQuery>,
) -> HttpResponse {
    if let Err(denied) = require_permission(&service, acting.user(), USERS_MANAGE).await {
        return denied;
    }

    let filter = UserFilter {
        status: query.status,
        username_contains: query.username.clone(),
    };
    let page = query.page.unwrap_or(1);
    let page_size = query.page_size.unwrap_or(DEFAULT_PAGE_SIZE);

    match service.list(&filter, page, page_size).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(err) => map_account_error(err),
    }
}

/// GET /v1/api/users/{id}
pub async fn get_user_handler(
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

    match service.get(&user_id).await {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(err) => map_account_error(err),
    }
}
