//! Login settings policy.
//!
//! The console's sign-in page is driven by a small settings document:
//! which login methods are offered, which registration methods are open,
//! and which login method is preselected. The document is persisted as
//! opaque JSON in the dict store; validation is pure and runs before
//! every save.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use atrium_commons::constants::AuthConstants;

use crate::dict::DictStore;
use crate::error::AccountError;

/// Method identifiers the frontend understands.
pub const RECOGNIZED_METHODS: &[&str] = &["account", "phone", "email", "oauth"];

/// Login/registration policy document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginSettings {
    pub allowed_login_methods: Vec<String>,
    pub allowed_register_methods: Vec<String>,
    pub default_login_method: String,
}

impl Default for LoginSettings {
    fn default() -> Self {
        Self {
            allowed_login_methods: vec!["account".to_string()],
            allowed_register_methods: vec!["account".to_string()],
            default_login_method: "account".to_string(),
        }
    }
}

impl LoginSettings {
    /// Validate the policy. Pure, no I/O.
    pub fn validate(&self) -> Result<(), AccountError> {
        if self.allowed_login_methods.is_empty() {
            return Err(AccountError::Validation(
                "at least one login method must be enabled".to_string(),
            ));
        }
        if self.allowed_register_methods.is_empty() {
            return Err(AccountError::Validation(
                "at least one registration method must be enabled".to_string(),
            ));
        }

        for method in self
            .allowed_login_methods
            .iter()
            .chain(self.allowed_register_methods.iter())
        {
            if !RECOGNIZED_METHODS.contains(&method.as_str()) {
                return Err(AccountError::Validation(format!(
                    "unknown method '{}'. Must be one of: {}",
                    method,
                    RECOGNIZED_METHODS.join(", ")
                )));
            }
        }

        if !self
            .allowed_login_methods
            .contains(&self.default_login_method)
        {
            return Err(AccountError::Validation(format!(
                "default login method '{}' is not in the allowed list",
                self.default_login_method
            )));
        }

        Ok(())
    }
}

/// Persists the login settings document through the dict store.
pub struct LoginSettingsService {
    dict: Arc<dyn DictStore>,
}

impl LoginSettingsService {
    pub fn new(dict: Arc<dyn DictStore>) -> Self {
        Self { dict }
    }

    /// Current settings, falling back to the default document when none
    /// has been saved yet.
    pub async fn get(&self) -> Result<LoginSettings, AccountError> {
        match self.dict.get_json(AuthConstants::LOGIN_SETTINGS_KEY).await? {
            Some(value) => serde_json::from_value(value)
                .map_err(|e| AccountError::Storage(format!("corrupt login settings: {}", e))),
            None => Ok(LoginSettings::default()),
        }
    }

    /// Validate and persist new settings.
    pub async fn update(&self, settings: LoginSettings) -> Result<LoginSettings, AccountError> {
        settings.validate()?;

        let value = serde_json::to_value(&settings)
            .map_err(|e| AccountError::Storage(format!("serialize login settings: {}", e)))?;
        self.dict
            .put_json(AuthConstants::LOGIN_SETTINGS_KEY, value)
            .await?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dict::MemoryDictStore;

    fn settings(login: &[&str], register: &[&str], default: &str) -> LoginSettings {
        LoginSettings {
            allowed_login_methods: login.iter().map(|s| s.to_string()).collect(),
            allowed_register_methods: register.iter().map(|s| s.to_string()).collect(),
            default_login_method: default.to_string(),
        }
    }

    #[test]
    fn test_empty_login_methods_rejected() {
        let result = settings(&[], &["account"], "account").validate();
        assert!(matches!(result, Err(AccountError::Validation(_))));
    }

    #[test]
    fn test_empty_register_methods_rejected() {
        let result = settings(&["account"], &[], "account").validate();
        assert!(matches!(result, Err(AccountError::Validation(_))));
    }

    #[test]
    fn test_default_must_be_allowed() {
        let result = settings(&["account"], &["account"], "phone").validate();
        assert!(matches!(result, Err(AccountError::Validation(_))));
    }

    #[test]
    fn test_unknown_method_rejected() {
        let result = settings(&["account", "carrier-pigeon"], &["account"], "account").validate();
        assert!(matches!(result, Err(AccountError::Validation(_))));
    }

    #[test]
    fn test_valid_settings_accepted() {
        assert!(settings(&["account", "phone"], &["account"], "account")
            .validate()
            .is_ok());
    }

    #[tokio::test]
    async fn test_service_roundtrip_and_default() {
        let svc = LoginSettingsService::new(Arc::new(MemoryDictStore::new()));

        // Nothing saved yet: the default document comes back.
        assert_eq!(svc.get().await.unwrap(), LoginSettings::default());

        let updated = settings(&["account", "phone"], &["account"], "phone");
        svc.update(updated.clone()).await.unwrap();
        assert_eq!(svc.get().await.unwrap(), updated);

        // Invalid documents never reach the store.
        let bad = settings(&[], &["account"], "account");
        assert!(svc.update(bad).await.is_err());
        assert_eq!(svc.get().await.unwrap(), updated);
    }
}
