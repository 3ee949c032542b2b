//! Authentication handlers
//!
//! ## Endpoints
//! - POST /v1/api/auth/login - Authenticate and get an access token
//! - GET /v1/api/auth/me - Current user with effective permissions

mod login;
mod me;

pub use login::login_handler;
pub use me::me_handler;
