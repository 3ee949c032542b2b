//! Type-safe wrapper for user identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::AuthConstants;

/// Type-safe wrapper for user identifiers.
///
/// Ensures user IDs cannot be accidentally used where role IDs or plain
/// strings are expected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

/// Error type for UserId validation failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdValidationError(pub String);

impl fmt::Display for UserIdValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for UserIdValidationError {}

impl UserId {
    /// Creates a new UserId from a string.
    ///
    /// # Panics
    /// Panics if the ID is empty or contains separator characters.
    /// Use `try_new()` for fallible creation.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self::try_new(id).expect("UserId contains invalid characters")
    }

    /// Creates a new UserId from a string, returning an error if validation fails.
    ///
    /// IDs appear in URLs and log lines, so path separators and control
    /// bytes are rejected outright.
    pub fn try_new(id: impl Into<String>) -> Result<Self, UserIdValidationError> {
        let id = id.into();
        Self::validate_id(&id)?;
        Ok(Self(id))
    }

    fn validate_id(id: &str) -> Result<(), UserIdValidationError> {
        if id.is_empty() {
            return Err(UserIdValidationError("User ID cannot be empty".to_string()));
        }
        if id.contains('/') || id.contains('\\') {
            return Err(UserIdValidationError(
                "User ID cannot contain directory separators".to_string(),
            ));
        }
        if id.contains('\0') {
            return Err(UserIdValidationError("User ID cannot contain null bytes".to_string()));
        }
        Ok(())
    }

    /// Generates a new unique UserId using NanoID (21 URL-safe characters).
    #[inline]
    pub fn generate() -> Self {
        Self(format!("u_{}", nanoid::nanoid!()))
    }

    /// Returns the user ID as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the inner String.
    #[inline]
    pub fn into_string(self) -> String {
        self.0
    }

    /// The reserved identifier of the seeded root account.
    #[inline]
    pub fn root() -> Self {
        Self(AuthConstants::ROOT_USER_ID.to_string())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for UserId {
    /// Converts a String into UserId.
    ///
    /// # Panics
    /// Panics if the string fails validation.
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for UserId {
    /// Converts a &str into UserId.
    ///
    /// # Panics
    /// Panics if the string fails validation.
    fn from(s: &str) -> Self {
        Self::new(s.to_string())
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
