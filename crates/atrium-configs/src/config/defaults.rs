//! Serde default functions for configuration fields.

pub fn default_true() -> bool {
    true
}

pub fn default_host() -> String {
    "127.0.0.1".to_string()
}

pub fn default_port() -> u16 {
    8090
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_log_format() -> String {
    "compact".to_string()
}

pub fn default_logs_path() -> String {
    "./logs".to_string()
}

pub fn default_jwt_secret() -> String {
    "atrium-dev-secret-change-me".to_string()
}

pub fn default_jwt_expiry_hours() -> i64 {
    24
}

pub fn default_cors_methods() -> Vec<String> {
    vec![
        "GET".to_string(),
        "POST".to_string(),
        "PUT".to_string(),
        "DELETE".to_string(),
        "PATCH".to_string(),
        "OPTIONS".to_string(),
    ]
}

pub fn default_cors_max_age() -> u64 {
    3600
}
