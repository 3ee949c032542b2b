//! Account store contract and the in-memory binding.
//!
//! The lifecycle service only sees the [`AccountStore`] trait; the
//! default binding is [`MemoryAccountStore`], a DashMap-backed map with
//! a case-insensitive username index. Create checks the index for
//! duplicates, update re-checks when the username changes, and both
//! maintain the index alongside the primary map.

use async_trait::async_trait;
use dashmap::DashMap;

use atrium_commons::{Page, User, UserId, UserStatus};

/// Store-level errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    AlreadyExists(String),

    #[error("{0}")]
    Backend(String),
}

/// Filter for list/count operations.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub status: Option<UserStatus>,
    /// Case-insensitive substring match on the username.
    pub username_contains: Option<String>,
}

impl UserFilter {
    fn matches(&self, user: &User) -> bool {
        if let Some(status) = self.status {
            if user.status != status {
                return false;
            }
        }
        if let Some(needle) = &self.username_contains {
            if !user.username.to_lowercase().contains(&needle.to_lowercase()) {
                return false;
            }
        }
        true
    }
}

/// Persistence contract for user accounts.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn get(&self, user_id: &UserId) -> Result<Option<User>, StoreError>;

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Insert a new user. Fails with `AlreadyExists` when the username
    /// (case-insensitive) or the id is taken.
    async fn insert(&self, user: User) -> Result<(), StoreError>;

    /// Replace an existing user record. Fails with `NotFound` when the id
    /// is absent and `AlreadyExists` when a username change collides.
    async fn update(&self, user: User) -> Result<(), StoreError>;

    /// Remove a user. Fails with `NotFound` when the id is absent.
    async fn remove(&self, user_id: &UserId) -> Result<(), StoreError>;

    /// Page through users matching the filter, ordered by creation time
    /// then id for a stable listing.
    async fn list(
        &self,
        filter: &UserFilter,
        page: usize,
        page_size: usize,
    ) -> Result<Page<User>, StoreError>;

    async fn count(&self, filter: &UserFilter) -> Result<usize, StoreError>;
}

/// In-memory account store.
pub struct MemoryAccountStore {
    users: DashMap<UserId, User>,
    /// Lowercased username -> user id
    username_index: DashMap<String, UserId>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            username_index: DashMap::new(),
        }
    }
}

impl Default for MemoryAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn get(&self, user_id: &UserId) -> Result<Option<User>, StoreError> {
        Ok(self.users.get(user_id).map(|entry| entry.value().clone()))
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let key = username.to_lowercase();
        match self.username_index.get(&key) {
            Some(id) => self.get(id.value()).await,
            None => Ok(None),
        }
    }

    async fn insert(&self, user: User) -> Result<(), StoreError> {
        let username_key = user.username.to_lowercase();
        if self.username_index.contains_key(&username_key) {
            return Err(StoreError::AlreadyExists(format!(
                "User with username '{}' already exists",
                user.username
            )));
        }
        if self.users.contains_key(&user.user_id) {
            return Err(StoreError::AlreadyExists(format!(
                "User id '{}' already exists",
                user.user_id
            )));
        }

        self.username_index.insert(username_key, user.user_id.clone());
        self.users.insert(user.user_id.clone(), user);
        Ok(())
    }

    async fn update(&self, user: User) -> Result<(), StoreError> {
        let existing = self
            .users
            .get(&user.user_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::NotFound(format!("User not found: {}", user.user_id)))?;

        // If the username changed, check for conflicts and move the index
        // entry.
        if existing.username != user.username {
            let new_key = user.username.to_lowercase();
            if let Some(other) = self.username_index.get(&new_key) {
                if other.value() != &user.user_id {
                    return Err(StoreError::AlreadyExists(format!(
                        "User with username '{}' already exists",
                        user.username
                    )));
                }
            }
            self.username_index.remove(&existing.username.to_lowercase());
            self.username_index.insert(new_key, user.user_id.clone());
        }

        self.users.insert(user.user_id.clone(), user);
        Ok(())
    }

    async fn remove(&self, user_id: &UserId) -> Result<(), StoreError> {
        let (_, user) = self
            .users
            .remove(user_id)
            .ok_or_else(|| StoreError::NotFound(format!("User not found: {}", user_id)))?;
        self.username_index.remove(&user.username.to_lowercase());
        Ok(())
    }

    async fn list(
        &self,
        filter: &UserFilter,
        page: usize,
        page_size: usize,
    ) -> Result<Page<User>, StoreError> {
        let mut matching: Vec<User> = self
            .users
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();

        matching.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.user_id.as_str().cmp(b.user_id.as_str()))
        });

        let total = matching.len();
        let page = page.max(1);
        let page_size = page_size.clamp(1, 500);
        let start = (page - 1).saturating_mul(page_size);
        let items: Vec<User> = matching.into_iter().skip(start).take(page_size).collect();

        Ok(Page::new(items, total, page, page_size))
    }

    async fn count(&self, filter: &UserFilter) -> Result<usize, StoreError> {
        Ok(self.users.iter().filter(|entry| filter.matches(entry.value())).count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn create_test_user(id: &str, username: &str) -> User {
        User {
            user_id: UserId::new(id),
            username: username.into(),
            password_hash: "hashed_password".to_string(),
            email: Some(format!("{}@example.com", username)),
            display_name: None,
            is_root: false,
            status: UserStatus::Enabled,
            balance: Decimal::ZERO,
            role_ids: vec![],
            external_identity: None,
            created_at: 1000,
            updated_at: 1000,
            last_login_at: None,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = MemoryAccountStore::new();
        store.insert(create_test_user("u_1", "alice")).await.unwrap();

        let by_id = store.get(&UserId::new("u_1")).await.unwrap();
        assert!(by_id.is_some());

        let by_name = store.get_by_username("ALICE").await.unwrap();
        assert_eq!(by_name.unwrap().user_id, UserId::new("u_1"));
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let store = MemoryAccountStore::new();
        store.insert(create_test_user("u_1", "alice")).await.unwrap();

        let result = store.insert(create_test_user("u_2", "Alice")).await;
        assert!(matches!(result, Err(StoreError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_update_username_moves_index() {
        let store = MemoryAccountStore::new();
        store.insert(create_test_user("u_1", "alice")).await.unwrap();

        let mut user = store.get(&UserId::new("u_1")).await.unwrap().unwrap();
        user.username = "bob".into();
        store.update(user).await.unwrap();

        assert!(store.get_by_username("alice").await.unwrap().is_none());
        assert!(store.get_by_username("bob").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_update_username_conflict_rejected() {
        let store = MemoryAccountStore::new();
        store.insert(create_test_user("u_1", "alice")).await.unwrap();
        store.insert(create_test_user("u_2", "bob")).await.unwrap();

        let mut user = store.get(&UserId::new("u_2")).await.unwrap().unwrap();
        user.username = "alice".into();
        let result = store.update(user).await;
        assert!(matches!(result, Err(StoreError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_remove_clears_index() {
        let store = MemoryAccountStore::new();
        store.insert(create_test_user("u_1", "alice")).await.unwrap();
        store.remove(&UserId::new("u_1")).await.unwrap();

        assert!(store.get(&UserId::new("u_1")).await.unwrap().is_none());
        assert!(store.get_by_username("alice").await.unwrap().is_none());

        let result = store.remove(&UserId::new("u_1")).await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_filters_and_pages() {
        let store = MemoryAccountStore::new();
        for i in 1..=5 {
            let mut user = create_test_user(&format!("u_{}", i), &format!("user{}", i));
            user.created_at = 1000 + i as i64;
            if i == 5 {
                user.status = UserStatus::Disabled;
            }
            store.insert(user).await.unwrap();
        }

        let all = store.list(&UserFilter::default(), 1, 2).await.unwrap();
        assert_eq!(all.total, 5);
        assert_eq!(all.items.len(), 2);
        assert_eq!(all.items[0].user_id, UserId::new("u_1"));

        let filter = UserFilter {
            status: Some(UserStatus::Disabled),
            ..Default::default()
        };
        let disabled = store.list(&filter, 1, 10).await.unwrap();
        assert_eq!(disabled.total, 1);
        assert_eq!(disabled.items[0].user_id, UserId::new("u_5"));

        let filter = UserFilter {
            username_contains: Some("USER3".to_string()),
            ..Default::default()
        };
        assert_eq!(store.count(&filter).await.unwrap(), 1);
    }
}
