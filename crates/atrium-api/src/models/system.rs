//! System operation models

use serde::Serialize;

use atrium_supervisor::RestartOutcome;

/// POST /v1/api/system/restart response
#[derive(Debug, Serialize)]
pub struct RestartResponse {
    pub status: &'static str,
}

impl From<RestartOutcome> for RestartResponse {
    fn from(outcome: RestartOutcome) -> Self {
        let status = match outcome {
            RestartOutcome::Accepted => "accepted",
            RestartOutcome::AlreadyRestarting => "already_restarting",
        };
        Self { status }
    }
}
