//! User entity for the console account store.
//!
//! Represents a console user with authentication and authorization
//! information.
//!
//! ## Fields
//! - `user_id`: Unique user identifier (e.g., "u_V1StGXR8_Z5jdHi6B-myT")
//! - `username`: Unique username for authentication (case-insensitive)
//! - `password_hash`: bcrypt hash of the password
//! - `email`: Optional email address
//! - `display_name`: Optional human-readable name
//! - `is_root`: Marks the protected superuser account
//! - `status`: Enabled/Disabled switch
//! - `balance`: Account balance, never negative
//! - `role_ids`: Roles granting permission codes
//! - `external_identity`: Opaque linkage to an external identity provider
//! - `created_at` / `updated_at` / `last_login_at`: Unix millis
//!
//! `password_hash` and `external_identity` are secrets: they must never
//! leave the process. Read paths return [`UserView`], which simply does
//! not carry them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ids::{RoleId, UserId};
use super::user_name::UserName;

/// Account status switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Enabled,
    Disabled,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Enabled => "enabled",
            UserStatus::Disabled => "disabled",
        }
    }
}

/// User entity for the account store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub user_id: UserId,
    pub username: UserName,
    pub password_hash: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub is_root: bool,
    pub status: UserStatus,
    pub balance: Decimal,
    pub role_ids: Vec<RoleId>,
    pub external_identity: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
    pub last_login_at: Option<i64>,
}

impl User {
    /// Check whether the account may authenticate.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.status == UserStatus::Enabled
    }

    /// Stamp `updated_at` with the current time.
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().timestamp_millis();
    }

    /// Apply a signed balance delta. The result is floored at zero: a
    /// delta that would take the balance negative clamps to 0.
    pub fn apply_balance_delta(&mut self, delta: Decimal) {
        let next = self.balance + delta;
        self.balance = if next < Decimal::ZERO { Decimal::ZERO } else { next };
    }

    /// Record a successful login.
    pub fn record_successful_login(&mut self) {
        let now = chrono::Utc::now().timestamp_millis();
        self.last_login_at = Some(now);
        self.updated_at = now;
    }

    /// Redacted projection for read paths.
    pub fn to_view(&self) -> UserView {
        UserView {
            user_id: self.user_id.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
            display_name: self.display_name.clone(),
            is_root: self.is_root,
            status: self.status,
            balance: self.balance,
            role_ids: self.role_ids.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            last_login_at: self.last_login_at,
        }
    }
}

/// What callers get to see of a [`User`].
///
/// Credential and identity-linkage fields are structurally absent, so no
/// serializer can leak them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserView {
    pub user_id: UserId,
    pub username: UserName,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub is_root: bool,
    pub status: UserStatus,
    pub balance: Decimal,
    pub role_ids: Vec<RoleId>,
    pub created_at: i64,
    pub updated_at: i64,
    pub last_login_at: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_user() -> User {
        User {
            user_id: UserId::new("u_123"),
            username: "alice".into(),
            password_hash: "$2b$12$hash".to_string(),
            email: Some("alice@example.com".to_string()),
            display_name: None,
            is_root: false,
            status: UserStatus::Enabled,
            balance: Decimal::new(1000, 2),
            role_ids: vec![RoleId::new("r_editor")],
            external_identity: None,
            created_at: 1730000000000,
            updated_at: 1730000000000,
            last_login_at: None,
        }
    }

    #[test]
    fn test_view_has_no_secret_fields() {
        let user = create_test_user();
        let json = serde_json::to_value(user.to_view()).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("external_identity").is_none());
        assert_eq!(json["username"], "alice");
    }

    #[test]
    fn test_balance_delta_applies() {
        let mut user = create_test_user();
        user.apply_balance_delta(Decimal::new(250, 2));
        assert_eq!(user.balance, Decimal::new(1250, 2));
    }

    #[test]
    fn test_balance_floors_at_zero() {
        let mut user = create_test_user();
        user.apply_balance_delta(Decimal::new(-5000, 2));
        assert_eq!(user.balance, Decimal::ZERO);
    }

    #[test]
    fn test_successful_login_stamps_timestamps() {
        let mut user = create_test_user();
        user.record_successful_login();
        assert!(user.last_login_at.is_some());
        assert!(user.updated_at >= 1730000000000);
    }

    #[test]
    fn test_status_roundtrip() {
        let json = serde_json::to_string(&UserStatus::Disabled).unwrap();
        assert_eq!(json, "\"disabled\"");
        let back: UserStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, UserStatus::Disabled);
    }
}
