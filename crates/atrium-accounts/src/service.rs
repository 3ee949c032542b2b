//! Account lifecycle service.
//!
//! Orchestrates create/update/delete/status/password/balance operations
//! over the account store, enforcing the root-protection invariant and
//! purging the permission cache after every successful mutation.
//!
//! ## Root protection
//!
//! A root-flagged account may only be modified by itself; nobody may
//! delete it, not even itself. The single guarded code path replaces the
//! root/non-root branching of earlier console generations; the
//! authorization gate is the only behavioural difference between the
//! branches.
//!
//! ## Side effects
//!
//! The permission-cache purge after a mutation is best-effort: its
//! failure is logged at warn level and never reverses or delays the
//! primary result.

use std::sync::Arc;

use rust_decimal::Decimal;

use atrium_auth::{password, AuthError, AuthResult, UserLookup};
use atrium_commons::{Page, RoleId, User, UserId, UserStatus, UserView};

use crate::error::AccountError;
use crate::permission_cache::PermissionCache;
use crate::store::{AccountStore, UserFilter};

/// Maximum accepted username length.
const MAX_USERNAME_LENGTH: usize = 64;

/// Input for [`AccountService::create`].
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub role_ids: Vec<RoleId>,
}

/// Partial update for [`AccountService::update`]. `None` fields are left
/// untouched.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub role_ids: Option<Vec<RoleId>>,
}

/// The account lifecycle service.
pub struct AccountService {
    store: Arc<dyn AccountStore>,
    permissions: Arc<PermissionCache>,
    bcrypt_cost: Option<u32>,
}

impl AccountService {
    pub fn new(store: Arc<dyn AccountStore>, permissions: Arc<PermissionCache>) -> Self {
        Self { store, permissions, bcrypt_cost: None }
    }

    /// Lower the bcrypt cost. Test harnesses use this to keep hashing
    /// fast; production code never calls it.
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    /// The permission cache this service maintains.
    pub fn permission_cache(&self) -> &Arc<PermissionCache> {
        &self.permissions
    }

    fn validate_username(username: &str) -> Result<(), AccountError> {
        let trimmed = username.trim();
        if trimmed.is_empty() {
            return Err(AccountError::Validation("username cannot be empty".to_string()));
        }
        if trimmed.len() > MAX_USERNAME_LENGTH {
            return Err(AccountError::Validation(format!(
                "username cannot exceed {} characters",
                MAX_USERNAME_LENGTH
            )));
        }
        Ok(())
    }

    /// Root accounts may only be modified by themselves.
    fn ensure_may_modify(target: &User, acting: &User) -> Result<(), AccountError> {
        if target.is_root && acting.user_id != target.user_id {
            return Err(AccountError::Forbidden(
                "the root account can only be modified by itself".to_string(),
            ));
        }
        Ok(())
    }

    async fn load(&self, user_id: &UserId) -> Result<User, AccountError> {
        self.store
            .get(user_id)
            .await?
            .ok_or_else(|| AccountError::NotFound(format!("user {}", user_id)))
    }

    /// Best-effort purge of the permission snapshot; never fails the
    /// calling operation.
    async fn purge_permissions(&self, user_id: &UserId) {
        if let Err(e) = self.permissions.invalidate(user_id).await {
            log::warn!("permission cache purge failed for {}: {}", user_id, e);
        }
    }

    /// Create a new user account.
    ///
    /// The account starts enabled with a zero balance and never carries
    /// the root flag; the root account is seeded at startup, not created
    /// through this path.
    pub async fn create(&self, input: CreateUserInput) -> Result<UserView, AccountError> {
        Self::validate_username(&input.username)?;
        password::validate_password(&input.password)?;

        let password_hash = password::hash_password(&input.password, self.bcrypt_cost).await?;
        let now = chrono::Utc::now().timestamp_millis();

        let user = User {
            user_id: UserId::generate(),
            username: input.username.trim().into(),
            password_hash,
            email: input.email,
            display_name: input.display_name,
            is_root: false,
            status: UserStatus::Enabled,
            balance: Decimal::ZERO,
            role_ids: input.role_ids,
            external_identity: None,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        };

        let view = user.to_view();
        self.store.insert(user).await?;
        Ok(view)
    }

    /// Fetch a single user.
    pub async fn get(&self, user_id: &UserId) -> Result<UserView, AccountError> {
        Ok(self.load(user_id).await?.to_view())
    }

    /// Paginated, filtered listing. No side effects.
    pub async fn list(
        &self,
        filter: &UserFilter,
        page: usize,
        page_size: usize,
    ) -> Result<Page<UserView>, AccountError> {
        let page = self.store.list(filter, page, page_size).await?;
        Ok(page.map(|user| user.to_view()))
    }

    /// Apply a partial update to a user.
    pub async fn update(
        &self,
        user_id: &UserId,
        patch: UserPatch,
        acting: &User,
    ) -> Result<UserView, AccountError> {
        let mut target = self.load(user_id).await?;
        Self::ensure_may_modify(&target, acting)?;

        if let Some(username) = patch.username {
            Self::validate_username(&username)?;
            target.username = username.trim().into();
        }
        if let Some(email) = patch.email {
            target.email = Some(email);
        }
        if let Some(display_name) = patch.display_name {
            target.display_name = Some(display_name);
        }
        if let Some(role_ids) = patch.role_ids {
            target.role_ids = role_ids;
        }
        target.touch();

        let view = target.to_view();
        self.store.update(target).await?;
        self.purge_permissions(user_id).await;
        Ok(view)
    }

    /// Delete a single user. Root accounts cannot be deleted.
    pub async fn delete(&self, user_id: &UserId) -> Result<(), AccountError> {
        let target = self.load(user_id).await?;
        if target.is_root {
            return Err(AccountError::Forbidden(
                "the root account cannot be deleted".to_string(),
            ));
        }

        self.store.remove(user_id).await?;
        self.purge_permissions(user_id).await;
        Ok(())
    }

    /// Delete a batch of users.
    ///
    /// Rejected outright when any target is root; the error enumerates
    /// every offending id rather than stopping at the first. Ids that do
    /// not resolve are skipped; the returned count covers actual
    /// deletions.
    pub async fn batch_delete(&self, user_ids: &[UserId]) -> Result<usize, AccountError> {
        let mut found = Vec::with_capacity(user_ids.len());
        let mut root_ids = Vec::new();

        for user_id in user_ids {
            if let Some(user) = self.store.get(user_id).await? {
                if user.is_root {
                    root_ids.push(user.user_id.to_string());
                }
                found.push(user.user_id);
            }
        }

        if !root_ids.is_empty() {
            return Err(AccountError::Forbidden(format!(
                "the root account cannot be deleted: {}",
                root_ids.join(", ")
            )));
        }

        let mut deleted = 0;
        for user_id in found {
            match self.store.remove(&user_id).await {
                Ok(()) => {
                    deleted += 1;
                    self.purge_permissions(&user_id).await;
                }
                // Raced with another delete; nothing left to do.
                Err(crate::store::StoreError::NotFound(_)) => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(deleted)
    }

    /// Enable or disable an account.
    pub async fn set_status(
        &self,
        user_id: &UserId,
        status: UserStatus,
        acting: &User,
    ) -> Result<UserView, AccountError> {
        let mut target = self.load(user_id).await?;
        Self::ensure_may_modify(&target, acting)?;

        target.status = status;
        target.touch();

        let view = target.to_view();
        self.store.update(target).await?;
        self.purge_permissions(user_id).await;
        Ok(view)
    }

    /// Set a caller-provided password.
    pub async fn reset_password(
        &self,
        user_id: &UserId,
        new_password: &str,
        acting: &User,
    ) -> Result<(), AccountError> {
        let mut target = self.load(user_id).await?;
        Self::ensure_may_modify(&target, acting)?;

        password::validate_password(new_password)?;
        target.password_hash = password::hash_password(new_password, self.bcrypt_cost).await?;
        target.touch();

        self.store.update(target).await?;
        self.purge_permissions(user_id).await;
        Ok(())
    }

    /// Generate a fresh random credential for an account.
    ///
    /// The plaintext is returned to the caller exactly once; only its
    /// hash is stored, so it cannot be retrieved again.
    pub async fn reset_password_auto(
        &self,
        user_id: &UserId,
        acting: &User,
    ) -> Result<String, AccountError> {
        let mut target = self.load(user_id).await?;
        Self::ensure_may_modify(&target, acting)?;

        let plaintext = password::generate_password();
        target.password_hash = password::hash_password(&plaintext, self.bcrypt_cost).await?;
        target.touch();

        self.store.update(target).await?;
        self.purge_permissions(user_id).await;
        Ok(plaintext)
    }

    /// Apply a signed balance delta, floored at zero.
    pub async fn update_balance(
        &self,
        user_id: &UserId,
        delta: Decimal,
        acting: &User,
    ) -> Result<UserView, AccountError> {
        let mut target = self.load(user_id).await?;
        Self::ensure_may_modify(&target, acting)?;

        target.apply_balance_delta(delta);
        target.touch();

        let view = target.to_view();
        self.store.update(target).await?;
        self.purge_permissions(user_id).await;
        Ok(view)
    }

    /// Verify credentials for the login endpoint.
    ///
    /// Disabled accounts are rejected after the password check so the
    /// timing difference does not reveal account state.
    pub async fn authenticate(&self, username: &str, plain_password: &str) -> AuthResult<User> {
        let mut user = self
            .store
            .get_by_username(username)
            .await
            .map_err(|e| AuthError::StoreError(e.to_string()))?
            .ok_or_else(|| AuthError::UserNotFound(username.to_string()))?;

        let verified = password::verify_password(plain_password, &user.password_hash).await?;
        if !verified {
            return Err(AuthError::InvalidCredentials);
        }
        if !user.is_enabled() {
            return Err(AuthError::UserDisabled);
        }

        user.record_successful_login();
        if let Err(e) = self.store.update(user.clone()).await {
            // Login bookkeeping only; the authentication itself stands.
            log::warn!("failed to record login for {}: {}", user.user_id, e);
        }

        Ok(user)
    }

    /// Effective permission codes for a user, served from the cache.
    pub async fn effective_permissions(&self, user: &User) -> Arc<Vec<String>> {
        self.permissions.get(user).await
    }
}

/// Adapter binding the account store to the auth crate's lookup seam.
///
/// Lives here rather than in `atrium-auth` to keep that crate free of a
/// dependency on the store.
pub struct StoreUserLookup {
    store: Arc<dyn AccountStore>,
}

impl StoreUserLookup {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl UserLookup for StoreUserLookup {
    async fn get_user_by_id(&self, user_id: &UserId) -> AuthResult<User> {
        self.store
            .get(user_id)
            .await
            .map_err(|e| AuthError::StoreError(e.to_string()))?
            .ok_or_else(|| AuthError::UserNotFound(user_id.to_string()))
    }

    async fn get_user_by_username(&self, username: &str) -> AuthResult<User> {
        self.store
            .get_by_username(username)
            .await
            .map_err(|e| AuthError::StoreError(e.to_string()))?
            .ok_or_else(|| AuthError::UserNotFound(username.to_string()))
    }
}
