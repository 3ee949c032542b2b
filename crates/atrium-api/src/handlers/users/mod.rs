//! User administration handlers
//!
//! ## Endpoints
//! - POST /v1/api/users - Create a user
//! - GET /v1/api/users - Paginated listing
//! - GET /v1/api/users/{id} - Fetch one user
//! - PATCH /v1/api/users/{id} - Partial update
//! - DELETE /v1/api/users/{id} - Delete one user
//! - POST /v1/api/users/batch-delete - Delete many users
//! - POST /v1/api/users/{id}/status - Enable/disable
//! - POST /v1/api/users/{id}/password - Set a password
//! - POST /v1/api/users/{id}/password/auto - Generate a password
//! - POST /v1/api/users/{id}/balance - Apply a balance delta
//!
//! All endpoints require the `users:manage` permission code (root
//! bypasses code checks); the root-protection invariant is enforced one
//! level down in the service.

mod balance;
mod create;
mod delete;
mod list;
mod password;
mod status;
mod update;

pub use balance::change_balance_handler;
pub use create::create_user_handler;
pub use delete::{batch_delete_users_handler, delete_user_handler};
pub use list::{get_user_handler, list_users_handler};
pub use password::{reset_password_auto_handler, reset_password_handler};
pub use status::set_status_handler;
pub use update::update_user_handler;
