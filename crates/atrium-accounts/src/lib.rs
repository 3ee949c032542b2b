// Atrium accounts library
// The account lifecycle service, its collaborator contracts (account
// store, dict store, role directory), the derived permission cache and
// the login-settings policy.

pub mod dict;
pub mod error;
pub mod permission_cache;
pub mod roles;
pub mod service;
pub mod settings;
pub mod store;

pub use dict::{DictStore, MemoryDictStore};
pub use error::AccountError;
pub use permission_cache::PermissionCache;
pub use roles::{PermissionResolver, RoleDirectory};
pub use service::{AccountService, CreateUserInput, StoreUserLookup, UserPatch};
pub use settings::{LoginSettings, LoginSettingsService};
pub use store::{AccountStore, MemoryAccountStore, StoreError, UserFilter};
