//! API routes configuration
//!
//! All endpoints use the /v1 version prefix:
//! - POST /v1/api/auth/login, GET /v1/api/auth/me
//! - /v1/api/users CRUD plus status/password/balance actions
//! - GET|PUT /v1/api/settings/login
//! - POST /v1/api/system/restart
//! - GET /v1/api/healthcheck

use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::handlers;

/// Configure API routes for the console backend
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/v1").service(
            web::scope("/api")
                .route("/healthcheck", web::get().to(healthcheck_handler))
                .service(
                    web::scope("/auth")
                        .route("/login", web::post().to(handlers::auth::login_handler))
                        .route("/me", web::get().to(handlers::auth::me_handler)),
                )
                .service(
                    web::scope("/users")
                        .route("", web::post().to(handlers::users::create_user_handler))
                        .route("", web::get().to(handlers::users::list_users_handler))
                        .route(
                            "/batch-delete",
                            web::post().to(handlers::users::batch_delete_users_handler),
                        )
                        .route("/{id}", web::get().to(handlers::users::get_user_handler))
                        .route("/{id}", web::patch().to(handlers::users::update_user_handler))
                        .route("/{id}", web::delete().to(handlers::users::delete_user_handler))
                        .route(
                            "/{id}/status",
                            web::post().to(handlers::users::set_status_handler),
                        )
                        .route(
                            "/{id}/password",
                            web::post().to(handlers::users::reset_password_handler),
                        )
                        .route(
                            "/{id}/password/auto",
                            web::post().to(handlers::users::reset_password_auto_handler),
                        )
                        .route(
                            "/{id}/balance",
                            web::post().to(handlers::users::change_balance_handler),
                        ),
                )
                .service(
                    web::scope("/settings")
                        .route(
                            "/login",
                            web::get().to(handlers::settings::get_login_settings_handler),
                        )
                        .route(
                            "/login",
                            web::put().to(handlers::settings::update_login_settings_handler),
                        ),
                )
                .service(
                    web::scope("/system")
                        .route("/restart", web::post().to(handlers::system::restart_handler)),
                ),
        ),
    );
}

/// Health check endpoint handler
async fn healthcheck_handler() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "api_version": "v1",
    }))
}
