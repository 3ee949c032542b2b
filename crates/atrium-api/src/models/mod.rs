//! API request and response models.

mod error_response;
mod login;
mod settings;
mod system;
mod users;

pub use error_response::ErrorBody;
pub use login::{LoginRequest, LoginResponse, MeResponse};
pub use settings::LoginSettingsDto;
pub use system::RestartResponse;
pub use users::{
    BalanceChangeRequest, BatchDeleteRequest, CreateUserRequest, DeletedResponse, ListUsersQuery,
    ResetPasswordAutoResponse, ResetPasswordRequest, SetStatusRequest, UpdateUserRequest,
};
