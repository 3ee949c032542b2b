//! Server-wide middleware configuration helpers.
//!
//! Keeps the Actix application setup focused by providing reusable
//! constructors for the CORS and request-logging layers.

use actix_cors::Cors;
use actix_web::middleware;
use atrium_configs::ServerConfig;
use log::debug;

/// Build CORS middleware from server configuration using actix-cors.
pub fn build_cors_from_config(config: &ServerConfig) -> Cors {
    let cors_config = &config.security.cors;

    let mut cors = Cors::default();

    // Configure allowed origins
    if cors_config.allowed_origins.is_empty()
        || cors_config.allowed_origins.contains(&"*".to_string())
    {
        cors = cors.allow_any_origin();
        debug!("CORS: allowing any origin");
    } else {
        for origin in &cors_config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
        debug!("CORS: allowed origins: {:?}", cors_config.allowed_origins);
    }

    // Configure allowed methods
    let methods: Vec<actix_web::http::Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    if !methods.is_empty() {
        cors = cors.allowed_methods(methods);
    }

    cors = cors.allow_any_header().max_age(cors_config.max_age as usize);

    if cors_config.allow_credentials {
        cors = cors.supports_credentials();
    }

    cors
}

/// Request/response logger.
pub fn request_logger() -> middleware::Logger {
    middleware::Logger::new("%a \"%r\" %s %b %Dms")
}
