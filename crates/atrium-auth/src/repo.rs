use crate::error::AuthResult;
use atrium_commons::{User, UserId};

/// Abstraction over user persistence for authentication flows.
///
/// The concrete account store lives in a crate downstream of this one;
/// the trait keeps the dependency arrow pointing the right way and lets
/// tests substitute a fixture repository.
#[async_trait::async_trait]
pub trait UserLookup: Send + Sync {
    async fn get_user_by_id(&self, user_id: &UserId) -> AuthResult<User>;

    async fn get_user_by_username(&self, username: &str) -> AuthResult<User>;
}
