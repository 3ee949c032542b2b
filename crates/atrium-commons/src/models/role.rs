//! Role model.

use serde::{Deserialize, Serialize};

use super::ids::RoleId;

/// A named grant of permission codes.
///
/// Permission codes are opaque strings (e.g. `"users:read"`,
/// `"payments:write"`); a user's effective permissions are the union of
/// the codes of their enabled roles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub role_id: RoleId,
    pub name: String,
    pub description: Option<String>,
    pub permission_codes: Vec<String>,
    pub enabled: bool,
}

impl Role {
    pub fn new(role_id: impl Into<RoleId>, name: impl Into<String>, codes: Vec<String>) -> Self {
        Self {
            role_id: role_id.into(),
            name: name.into(),
            description: None,
            permission_codes: codes,
            enabled: true,
        }
    }
}
