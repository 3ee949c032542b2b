//! Balance-change handler

use std::sync::Arc;

use actix_web::{web, HttpResponse};

use atrium_accounts::AccountService;
use atrium_auth::AuthenticatedUser;

use crate::handlers::{map_account_error, parse_user_id, require_permission, USERS_MANAGE};
use crate::models::BalanceChangeRequest;

/// POST /v1/api/users/{id}/balance
///
/// Applies a signed delta; the resulting balance floors at zero.
pub async fn change_balance_handler(
    service: web::Data<Arc<AccountService>>,
    acting: AuthenticatedUser,
    path: web::Path<String>,
    body: web::Json<BalanceChangeRequest>,
) -> HttpResponse {
    if let Err(denied) = require_permission(&service, acting.user(), USERS_MANAGE).await {
        return denied;
    }

    let user_id = match parse_user_id(&path) {
        Ok(id) => id,
        Err(bad) => return bad,
    };

    match service
        .update_balance(&user_id, body.delta, acting.user())
        .await
    {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(err) => map_account_error(err),
    }
}
