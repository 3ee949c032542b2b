//! Login settings transfer model

use serde::{Deserialize, Serialize};

use atrium_accounts::LoginSettings;

/// Wire form of the login settings document.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginSettingsDto {
    pub allowed_login_methods: Vec<String>,
    pub allowed_register_methods: Vec<String>,
    pub default_login_method: String,
}

impl From<LoginSettings> for LoginSettingsDto {
    fn from(settings: LoginSettings) -> Self {
        Self {
            allowed_login_methods: settings.allowed_login_methods,
            allowed_register_methods: settings.allowed_register_methods,
            default_login_method: settings.default_login_method,
        }
    }
}

impl From<LoginSettingsDto> for LoginSettings {
    fn from(dto: LoginSettingsDto) -> Self {
        Self {
            allowed_login_methods: dto.allowed_login_methods,
            allowed_register_methods: dto.allowed_register_methods,
            default_login_method: dto.default_login_method,
        }
    }
}
