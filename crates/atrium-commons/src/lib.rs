// Atrium shared library
// Typed identifiers, domain models and error types used across all crates.

pub mod constants;
pub mod models;
pub mod pagination;

pub use models::ids::{RoleId, UserId};
pub use models::role::Role;
pub use models::user::{User, UserStatus, UserView};
pub use models::user_name::UserName;
pub use pagination::Page;
