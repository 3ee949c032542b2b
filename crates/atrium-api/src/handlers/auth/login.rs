//! Login handler
//!
//! POST /v1/api/auth/login - Authenticates a user and returns a JWT
//! access token.

use std::sync::Arc;

use actix_web::{web, HttpResponse, ResponseError};
use chrono::{Duration, Utc};

use atrium_accounts::AccountService;
use atrium_auth::sign_token;
use atrium_configs::AuthSettings;

use crate::models::{LoginRequest, LoginResponse};

/// POST /v1/api/auth/login
pub async fn login_handler(
    service: web::Data<Arc<AccountService>>,
    config: web::Data<AuthSettings>,
    body: web::Json<LoginRequest>,
) -> HttpResponse {
    let user = match service.authenticate(&body.username, &body.password).await {
        Ok(user) => user,
        Err(err) => return err.error_response(),
    };

    let (token, _claims) = match sign_token(
        &user.user_id,
        &user.username,
        Some(config.jwt_expiry_hours),
    ) {
        Ok(t) => t,
        Err(e) => {
            log::error!("error generating JWT: {}", e);
            return e.error_response();
        }
    };

    let expires_at = Utc::now() + Duration::hours(config.jwt_expiry_hours);

    HttpResponse::Ok().json(LoginResponse {
        user: user.to_view(),
        access_token: token,
        expires_at: expires_at.to_rfc3339(),
    })
}
