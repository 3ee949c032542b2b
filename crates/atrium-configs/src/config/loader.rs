use super::types::ServerConfig;
use std::env;
use std::fs;
use std::path::Path;

impl ServerConfig {
    /// Load configuration from a TOML file.
    ///
    /// Note: environment overrides are applied separately via
    /// `apply_env_overrides()`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;

        let mut config: ServerConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))?;

        config.finalize()?;

        Ok(config)
    }

    /// Apply environment overrides, then validate.
    pub fn finalize(&mut self) -> anyhow::Result<()> {
        self.apply_env_overrides();
        self.validate()?;
        Ok(())
    }

    /// Secrets come from the environment when present so they stay out of
    /// checked-in config files.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(secret) = env::var("ATRIUM_JWT_SECRET") {
            if !secret.is_empty() {
                self.auth.jwt_secret = secret;
            }
        }
        if let Ok(password) = env::var("ATRIUM_ROOT_PASSWORD") {
            if !password.is_empty() {
                self.auth.root_password = password;
            }
        }
    }

    /// Validate configuration settings
    pub fn validate(&self) -> anyhow::Result<()> {
        // Validate port range
        if self.server.port == 0 {
            return Err(anyhow::anyhow!("Server port cannot be 0"));
        }

        // Validate log level
        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_levels.join(", ")
            ));
        }

        // Validate log format
        let valid_formats = ["compact", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_formats.join(", ")
            ));
        }

        // Validate per-target log levels if provided
        for (target, level) in &self.logging.targets {
            if !valid_levels.contains(&level.as_str()) {
                return Err(anyhow::anyhow!(
                    "Invalid log level '{}' for target '{}'. Must be one of: {}",
                    level,
                    target,
                    valid_levels.join(", ")
                ));
            }
        }

        if self.auth.jwt_secret.is_empty() {
            return Err(anyhow::anyhow!("auth.jwt_secret cannot be empty"));
        }

        if self.auth.jwt_expiry_hours <= 0 {
            return Err(anyhow::anyhow!("auth.jwt_expiry_hours must be positive"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_port() {
        let mut config = ServerConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = ServerConfig::default();
        config.logging.level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_target_level() {
        let mut config = ServerConfig::default();
        config
            .logging
            .targets
            .insert("actix_web".to_string(), "loud".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_partial_toml() {
        let toml = r#"
            [server]
            port = 9000

            [auth]
            jwt_expiry_hours = 8
        "#;
        let config: ServerConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.auth.jwt_expiry_hours, 8);
        assert_eq!(config.server.host, "127.0.0.1");
    }
}
