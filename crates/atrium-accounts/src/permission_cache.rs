//! Derived permission cache.
//!
//! Caches each user's effective permission codes so request-path checks
//! avoid a role resolution on every hit. The cache is not authoritative:
//! entries are recomputed from the role directory on miss and purged
//! best-effort after any user mutation.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

use atrium_commons::{User, UserId};

use crate::roles::PermissionResolver;

/// Wildcard code granted to root users; consumers treat it as "all
/// permissions" and skip code filtering entirely.
pub const ALL_PERMISSIONS: &str = "*";

/// Cache TTL. Invalidation on write makes this a backstop, not the
/// consistency mechanism.
const CACHE_TTL_SECS: u64 = 300;

/// Maximum number of cached users.
const CACHE_MAX_CAPACITY: u64 = 10_000;

/// Errors from cache maintenance.
///
/// The in-memory cache cannot fail, but the contract keeps the fallible
/// shape so a remote cache binding slots in without touching callers;
/// callers already downgrade these to warnings.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("{0}")]
    Backend(String),
}

/// Permission snapshot cache keyed by user id.
pub struct PermissionCache {
    cache: Cache<UserId, Arc<Vec<String>>>,
    resolver: Arc<dyn PermissionResolver>,
}

impl PermissionCache {
    pub fn new(resolver: Arc<dyn PermissionResolver>) -> Self {
        let cache = Cache::builder()
            .max_capacity(CACHE_MAX_CAPACITY)
            .time_to_live(Duration::from_secs(CACHE_TTL_SECS))
            .build();
        Self { cache, resolver }
    }

    /// Effective permission codes for a user.
    ///
    /// Root users bypass resolution and get the wildcard code. Everyone
    /// else is served from cache, computed through the resolver on miss.
    pub async fn get(&self, user: &User) -> Arc<Vec<String>> {
        if user.is_root {
            return Arc::new(vec![ALL_PERMISSIONS.to_string()]);
        }

        let resolver = self.resolver.clone();
        let user_for_compute = user.clone();
        self.cache
            .get_with(user.user_id.clone(), async move {
                Arc::new(resolver.permissions_for(&user_for_compute))
            })
            .await
    }

    /// Purge the cache entry for a user.
    ///
    /// Idempotent; called after every user mutation. Failures are
    /// reported to the caller, which downgrades them to a warning.
    pub async fn invalidate(&self, user_id: &UserId) -> Result<(), CacheError> {
        self.cache.invalidate(user_id).await;
        Ok(())
    }

    /// Number of cached entries, for monitoring.
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atrium_commons::{Role, UserStatus};
    use crate::roles::RoleDirectory;
    use rust_decimal::Decimal;

    fn test_user(id: &str, roles: Vec<&str>, is_root: bool) -> User {
        User {
            user_id: UserId::new(id),
            username: id.into(),
            password_hash: String::new(),
            email: None,
            display_name: None,
            is_root,
            status: UserStatus::Enabled,
            balance: Decimal::ZERO,
            role_ids: roles.into_iter().map(Into::into).collect(),
            external_identity: None,
            created_at: 0,
            updated_at: 0,
            last_login_at: None,
        }
    }

    fn directory() -> Arc<RoleDirectory> {
        let dir = RoleDirectory::new();
        dir.upsert_role(Role::new("r_editor", "Editor", vec!["pages:write".to_string()]));
        Arc::new(dir)
    }

    #[tokio::test]
    async fn test_get_computes_and_caches() {
        let dir = directory();
        let cache = PermissionCache::new(dir.clone());
        let user = test_user("u_1", vec!["r_editor"], false);

        let codes = cache.get(&user).await;
        assert_eq!(codes.as_slice(), ["pages:write"]);

        // Role change without invalidation: stale entry is served.
        dir.upsert_role(Role::new("r_editor", "Editor", vec!["pages:read".to_string()]));
        let codes = cache.get(&user).await;
        assert_eq!(codes.as_slice(), ["pages:write"]);
    }

    #[tokio::test]
    async fn test_invalidate_is_idempotent() {
        let dir = directory();
        let cache = PermissionCache::new(dir.clone());
        let user = test_user("u_1", vec!["r_editor"], false);

        let _ = cache.get(&user).await;
        dir.upsert_role(Role::new("r_editor", "Editor", vec!["pages:read".to_string()]));

        for _ in 0..3 {
            cache.invalidate(&user.user_id).await.unwrap();
        }

        let codes = cache.get(&user).await;
        assert_eq!(codes.as_slice(), ["pages:read"]);
    }

    #[tokio::test]
    async fn test_root_bypasses_resolution() {
        let cache = PermissionCache::new(directory());
        let root = test_user("u_root", vec![], true);

        let codes = cache.get(&root).await;
        assert_eq!(codes.as_slice(), [ALL_PERMISSIONS]);
        // Root answers are not cached entries.
        assert_eq!(cache.entry_count(), 0);
    }
}
