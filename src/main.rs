// Atrium server entrypoint
//!
//! The heavy lifting (initialization, middleware wiring, graceful
//! shutdown) lives in dedicated modules so this file remains a thin
//! orchestrator.

use anyhow::Result;
use atrium_configs::ServerConfig;
use atrium_server::{lifecycle, logging};
use log::info;
use std::path::Path;

#[actix_web::main]
async fn main() -> Result<()> {
    // Load configuration (fallback to defaults when config file missing)
    let config_path = "config.toml";
    let config = if Path::new(config_path).exists() {
        match ServerConfig::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("FATAL: failed to load {}: {}", config_path, e);
                std::process::exit(1);
            }
        }
    } else {
        let mut cfg = ServerConfig::default();
        cfg.finalize()?;
        cfg
    };

    // Logging before any other side effects
    let server_log_path = format!("{}/server.log", config.logging.logs_path);
    logging::init_logging(
        &config.logging.level,
        &server_log_path,
        config.logging.log_to_console,
        Some(&config.logging.targets),
        &config.logging.format,
    )?;

    info!("Atrium server v{}", env!("CARGO_PKG_VERSION"));
    info!("Host: {}  Port: {}", config.server.host, config.server.port);

    // Build application state
    let components = lifecycle::bootstrap(&config).await?;

    // Run HTTP server until termination signal is received
    lifecycle::run(&config, components).await
}
