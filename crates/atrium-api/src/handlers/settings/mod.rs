//! Login settings handlers
//!
//! ## Endpoints
//! - GET /v1/api/settings/login - Current login settings
//! - PUT /v1/api/settings/login - Validate and replace login settings

use std::sync::Arc;

use actix_web::{web, HttpResponse};

use atrium_accounts::{AccountService, LoginSettingsService};
use atrium_auth::AuthenticatedUser;

use crate::handlers::{map_account_error, require_permission, SETTINGS_MANAGE};
use crate::models::LoginSettingsDto;

/// GET /v1/api/settings/login
pub async fn get_login_settings_handler(
    accounts: web::Data<Arc<AccountService>>,
    settings: web::Data<Arc<LoginSettingsService>>,
    acting: AuthenticatedUser,
) -> HttpResponse {
    if let Err(denied) = require_permission(&accounts, acting.user(), SETTINGS_MANAGE).await {
        return denied;
    }

    match settings.get().await {
        Ok(current) => HttpResponse::Ok().json(LoginSettingsDto::from(current)),
        Err(err) => map_account_error(err),
    }
}

/// PUT /v1/api/settings/login
pub async fn update_login_settings_handler(
    accounts: web::Data<Arc<AccountService>>,
    settings: web::Data<Arc<LoginSettingsService>>,
    acting: AuthenticatedUser,
    body: web::Json<LoginSettingsDto>,
) -> HttpResponse {
    if let Err(denied) = require_permission(&accounts, acting.user(), SETTINGS_MANAGE).await {
        return denied;
    }

    match settings.update(body.into_inner().into()).await {
        Ok(saved) => HttpResponse::Ok().json(LoginSettingsDto::from(saved)),
        Err(err) => map_account_error(err),
    }
}
