// Atrium configuration library
// TOML-backed server configuration with defaults, env overrides and validation.

mod config;

pub use config::defaults;
pub use config::types::{
    AuthSettings, CorsSettings, LoggingSettings, SecuritySettings, ServerConfig, ServerSettings,
};
