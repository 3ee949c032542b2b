//! Current-user handler
//!
//! GET /v1/api/auth/me - The acting user's redacted record plus their
//! effective permission codes.

use std::sync::Arc;

use actix_web::{web, HttpResponse};

use atrium_accounts::AccountService;
use atrium_auth::AuthenticatedUser;

use crate::models::MeResponse;

/// GET /v1/api/auth/me
pub async fn me_handler(
    service: web::Data<Arc<AccountService>>,
    acting: AuthenticatedUser,
) -> HttpResponse {
    let user = acting.into_user();
    let permissions = service.effective_permissions(&user).await;

    HttpResponse::Ok().json(MeResponse {
        user: user.to_view(),
        permissions: permissions.as_ref().clone(),
    })
}
