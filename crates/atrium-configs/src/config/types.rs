use super::defaults::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Main server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default, alias = "authentication")]
    pub auth: AuthSettings,
    #[serde(default)]
    pub security: SecuritySettings,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            logging: LoggingSettings::default(),
            auth: AuthSettings::default(),
            security: SecuritySettings::default(),
        }
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Bind host. Default: 127.0.0.1
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port. Default: 8090
    #[serde(default = "default_port")]
    pub port: u16,

    /// Worker count. 0 = number of CPU cores.
    #[serde(default)]
    pub workers: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: 0,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Base log level: error, warn, info, debug, trace
    #[serde(default = "default_log_level")]
    pub level: String,

    /// File log format: compact or json
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory log files are written to
    #[serde(default = "default_logs_path")]
    pub logs_path: String,

    /// Mirror logs to the console
    #[serde(default = "default_true")]
    pub log_to_console: bool,

    /// Per-target level overrides, e.g. { "actix_web" = "warn" }
    #[serde(default)]
    pub targets: HashMap<String, String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            logs_path: default_logs_path(),
            log_to_console: true,
            targets: HashMap::new(),
        }
    }
}

/// Authentication settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSettings {
    /// Secret key used to sign JWT access tokens.
    ///
    /// Override with the ATRIUM_JWT_SECRET environment variable; the
    /// default is only acceptable for local development.
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,

    /// Access token lifetime in hours
    #[serde(default = "default_jwt_expiry_hours")]
    pub jwt_expiry_hours: i64,

    /// Initial password for the seeded root account.
    ///
    /// Empty means a random password is generated and printed once at
    /// first startup. Override with ATRIUM_ROOT_PASSWORD.
    #[serde(default)]
    pub root_password: String,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_expiry_hours: default_jwt_expiry_hours(),
            root_password: String::new(),
        }
    }
}

/// CORS configuration that maps directly to actix-cors options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsSettings {
    /// Allowed origins. Empty list = allow any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// Allowed HTTP methods.
    #[serde(default = "default_cors_methods")]
    pub allowed_methods: Vec<String>,

    /// Allow credentials (cookies, authorization headers). Default: true
    #[serde(default = "default_true")]
    pub allow_credentials: bool,

    /// Preflight cache max age in seconds. Default: 3600
    #[serde(default = "default_cors_max_age")]
    pub max_age: u64,
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            allowed_methods: default_cors_methods(),
            allow_credentials: true,
            max_age: default_cors_max_age(),
        }
    }
}

/// Security settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SecuritySettings {
    /// CORS configuration
    #[serde(default)]
    pub cors: CorsSettings,
}
