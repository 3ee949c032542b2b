//! Project-wide constants.

/// Authentication and account constants.
pub struct AuthConstants;

impl AuthConstants {
    /// Reserved identifier of the protected root account.
    pub const ROOT_USER_ID: &'static str = "u_root";

    /// Username the root account is seeded with.
    pub const ROOT_USERNAME: &'static str = "root";

    /// Dict-store key under which the login settings document is kept.
    pub const LOGIN_SETTINGS_KEY: &'static str = "login_settings";
}

/// Process exit codes used by the restart coordinator.
///
/// The relaunch code tells an external launcher the exit was requested and
/// the process should come back up; the failure code marks an abnormal end
/// of the restart sequence itself.
pub struct ExitCodes;

impl ExitCodes {
    /// Voluntary exit, relaunch expected (EX_TEMPFAIL).
    pub const RESTART_REQUESTED: i32 = 75;

    /// The restart sequence itself failed (EX_SOFTWARE).
    pub const RESTART_FAILED: i32 = 70;
}
