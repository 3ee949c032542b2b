//! Type-safe wrapper for role identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Type-safe wrapper for role identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoleId(String);

impl RoleId {
    /// Creates a new RoleId from a string.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a new unique RoleId using NanoID.
    #[inline]
    pub fn generate() -> Self {
        Self(format!("r_{}", nanoid::nanoid!()))
    }

    /// Returns the role ID as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RoleId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for RoleId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
