//! Process-control seam.
//!
//! The coordinator never touches the real process directly; it goes
//! through [`ProcessControl`], so tests can observe probe/restart/exit
//! decisions without terminating the test runner.

use std::env;
use std::process::Command;

use sysinfo::System;
use thiserror::Error;

/// Environment variable naming the application as the supervisor knows it.
pub const SUPERVISOR_APP_ENV: &str = "ATRIUM_SUPERVISOR_APP";

/// Environment variable naming a systemd unit to restart.
pub const SYSTEMD_UNIT_ENV: &str = "ATRIUM_SYSTEMD_UNIT";

/// A detected process manager and the name it knows this service by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Supervisor {
    Pm2 { app: String },
    Systemd { unit: String },
}

#[derive(Debug, Error)]
pub enum SupervisorError {
    #[error("restart command failed: {0}")]
    CommandFailed(String),

    #[error("termination failed: {0}")]
    TerminateFailed(String),
}

/// What the coordinator needs from the hosting process.
pub trait ProcessControl: Send + Sync {
    /// Probe the environment for a process manager. Environment markers
    /// are checked first, then the process list.
    fn detect_supervisor(&self) -> Option<Supervisor>;

    /// Ask the supervisor to restart the named application. The command
    /// may fail; it must not crash the caller.
    fn issue_restart(&self, supervisor: &Supervisor) -> Result<(), SupervisorError>;

    /// Terminate the current process with the given exit code so an
    /// external launcher relaunches it.
    fn terminate(&self, code: i32) -> Result<(), SupervisorError>;

    /// Last-resort termination; must not fail.
    fn force_terminate(&self, code: i32);
}

/// Production binding: real environment, real process list, real exit.
pub struct SystemProcessControl;

impl SystemProcessControl {
    pub fn new() -> Self {
        Self
    }

    fn process_running(name: &str) -> bool {
        let system = System::new_all();
        system
            .processes()
            .values()
            .any(|process| process.name().to_string_lossy().contains(name))
    }
}

impl Default for SystemProcessControl {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessControl for SystemProcessControl {
    fn detect_supervisor(&self) -> Option<Supervisor> {
        if let Ok(unit) = env::var(SYSTEMD_UNIT_ENV) {
            if !unit.is_empty() {
                return Some(Supervisor::Systemd { unit });
            }
        }

        if let Ok(app) = env::var(SUPERVISOR_APP_ENV) {
            if !app.is_empty() && Self::process_running("pm2") {
                return Some(Supervisor::Pm2 { app });
            }
        }

        None
    }

    fn issue_restart(&self, supervisor: &Supervisor) -> Result<(), SupervisorError> {
        let mut command = match supervisor {
            Supervisor::Pm2 { app } => {
                let mut cmd = Command::new("pm2");
                cmd.args(["restart", app]);
                cmd
            }
            Supervisor::Systemd { unit } => {
                let mut cmd = Command::new("systemctl");
                cmd.args(["restart", unit]);
                cmd
            }
        };

        let status = command
            .status()
            .map_err(|e| SupervisorError::CommandFailed(e.to_string()))?;

        if !status.success() {
            return Err(SupervisorError::CommandFailed(format!(
                "exit status {}",
                status.code().unwrap_or(-1)
            )));
        }

        Ok(())
    }

    fn terminate(&self, code: i32) -> Result<(), SupervisorError> {
        std::process::exit(code);
    }

    fn force_terminate(&self, code: i32) {
        std::process::exit(code);
    }
}
