//! Restart coordinator.
//!
//! Two states: idle and restart-pending, held in one atomic flag that is
//! checked-and-set with a compare-exchange, so concurrent restart
//! requests from different request handlers race safely. Requests that
//! arrive while a restart is pending are declined, not queued.
//!
//! The accepted request schedules the actual restart after a short fixed
//! delay so the HTTP response is flushed before the process goes away.
//! The scheduled action probes for a process manager and prefers an
//! external restart command; without one (or when the command fails) it
//! exits with the relaunch code and leaves the comeback to the launcher.
//!
//! The flag is process-scoped, so a completed restart resets it by
//! construction. No idle transition exists on the success path; `reset`
//! is only for attempts that fail before the action is scheduled.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use atrium_commons::constants::ExitCodes;

use crate::control::ProcessControl;

/// Delay between accepting a restart and executing it. Long enough for
/// the accepted response to reach the client; not configurable.
pub const RESTART_DELAY: Duration = Duration::from_millis(500);

/// Result of a restart request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartOutcome {
    /// The restart was scheduled.
    Accepted,
    /// A restart is already in flight; this request was declined.
    AlreadyRestarting,
}

/// Singleton coordinator serializing restart requests.
pub struct RestartCoordinator {
    restarting: AtomicBool,
    control: Arc<dyn ProcessControl>,
    delay: Duration,
}

impl RestartCoordinator {
    pub fn new(control: Arc<dyn ProcessControl>) -> Self {
        Self {
            restarting: AtomicBool::new(false),
            control,
            delay: RESTART_DELAY,
        }
    }

    /// Override the scheduling delay. Tests only.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Whether a restart is currently pending.
    pub fn is_restarting(&self) -> bool {
        self.restarting.load(Ordering::SeqCst)
    }

    /// Request a process restart.
    ///
    /// Returns immediately in both cases: `Accepted` schedules the
    /// restart past the response boundary, `AlreadyRestarting` declines
    /// without rescheduling.
    pub fn request_restart(&self) -> RestartOutcome {
        if self
            .restarting
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            log::info!("restart already in flight, declining duplicate request");
            return RestartOutcome::AlreadyRestarting;
        }

        log::info!("restart accepted, executing in {:?}", self.delay);
        let control = Arc::clone(&self.control);
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            execute(control.as_ref());
        });

        RestartOutcome::Accepted
    }

    /// Clear the pending flag after a synchronous failure, so a later
    /// request can try again.
    pub fn reset(&self) {
        self.restarting.store(false, Ordering::SeqCst);
    }
}

fn execute(control: &dyn ProcessControl) {
    match control.detect_supervisor() {
        Some(supervisor) => {
            log::info!("supervisor detected ({:?}), issuing restart command", supervisor);
            match control.issue_restart(&supervisor) {
                Ok(()) => {
                    // The supervisor replaces the process from here.
                    log::info!("restart command issued");
                }
                Err(e) => {
                    log::warn!("restart command failed: {}; exiting for relaunch", e);
                    exit_for_relaunch(control);
                }
            }
        }
        None => {
            log::info!("no supervisor detected, exiting for relaunch");
            exit_for_relaunch(control);
        }
    }
}

fn exit_for_relaunch(control: &dyn ProcessControl) {
    if let Err(e) = control.terminate(ExitCodes::RESTART_REQUESTED) {
        // A wedged termination path must not leave the process alive with
        // the pending flag set forever.
        log::error!("termination failed: {}; forcing exit", e);
        control.force_terminate(ExitCodes::RESTART_FAILED);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{Supervisor, SupervisorError};
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Event {
        Restart(Supervisor),
        Terminate(i32),
        ForceTerminate(i32),
    }

    struct FakeControl {
        supervisor: Option<Supervisor>,
        restart_fails: bool,
        terminate_fails: bool,
        events: Mutex<Vec<Event>>,
    }

    impl FakeControl {
        fn new(supervisor: Option<Supervisor>) -> Self {
            Self {
                supervisor,
                restart_fails: false,
                terminate_fails: false,
                events: Mutex::new(Vec::new()),
            }
        }

        fn events(&self) -> Vec<Event> {
            self.events.lock().unwrap().clone()
        }
    }

    impl ProcessControl for FakeControl {
        fn detect_supervisor(&self) -> Option<Supervisor> {
            self.supervisor.clone()
        }

        fn issue_restart(&self, supervisor: &Supervisor) -> Result<(), SupervisorError> {
            self.events
                .lock()
                .unwrap()
                .push(Event::Restart(supervisor.clone()));
            if self.restart_fails {
                Err(SupervisorError::CommandFailed("exit status 1".to_string()))
            } else {
                Ok(())
            }
        }

        fn terminate(&self, code: i32) -> Result<(), SupervisorError> {
            self.events.lock().unwrap().push(Event::Terminate(code));
            if self.terminate_fails {
                Err(SupervisorError::TerminateFailed("simulated".to_string()))
            } else {
                Ok(())
            }
        }

        fn force_terminate(&self, code: i32) {
            self.events.lock().unwrap().push(Event::ForceTerminate(code));
        }
    }

    fn coordinator(control: Arc<FakeControl>, delay_ms: u64) -> Arc<RestartCoordinator> {
        Arc::new(
            RestartCoordinator::new(control).with_delay(Duration::from_millis(delay_ms)),
        )
    }

    #[tokio::test]
    async fn test_first_request_accepted_second_declined() {
        let control = Arc::new(FakeControl::new(None));
        // Long delay: the second request lands before the action fires.
        let coordinator = coordinator(control.clone(), 5_000);

        assert_eq!(coordinator.request_restart(), RestartOutcome::Accepted);
        assert!(coordinator.is_restarting());
        assert_eq!(coordinator.request_restart(), RestartOutcome::AlreadyRestarting);

        // The declined request did not schedule a second action.
        assert!(control.events().is_empty());
    }

    #[tokio::test]
    async fn test_supervisor_restart_command_issued() {
        let supervisor = Supervisor::Pm2 { app: "atrium".to_string() };
        let control = Arc::new(FakeControl::new(Some(supervisor.clone())));
        let coordinator = coordinator(control.clone(), 10);

        assert_eq!(coordinator.request_restart(), RestartOutcome::Accepted);
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(control.events(), vec![Event::Restart(supervisor)]);
    }

    #[tokio::test]
    async fn test_no_supervisor_exits_with_relaunch_code() {
        let control = Arc::new(FakeControl::new(None));
        let coordinator = coordinator(control.clone(), 10);

        coordinator.request_restart();
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(
            control.events(),
            vec![Event::Terminate(ExitCodes::RESTART_REQUESTED)]
        );
    }

    #[tokio::test]
    async fn test_failed_command_falls_back_to_exit() {
        let supervisor = Supervisor::Systemd { unit: "atrium.service".to_string() };
        let mut fake = FakeControl::new(Some(supervisor.clone()));
        fake.restart_fails = true;
        let control = Arc::new(fake);
        let coordinator = coordinator(control.clone(), 10);

        coordinator.request_restart();
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(
            control.events(),
            vec![
                Event::Restart(supervisor),
                Event::Terminate(ExitCodes::RESTART_REQUESTED),
            ]
        );
    }

    #[tokio::test]
    async fn test_wedged_termination_forces_failure_code() {
        let mut fake = FakeControl::new(None);
        fake.terminate_fails = true;
        let control = Arc::new(fake);
        let coordinator = coordinator(control.clone(), 10);

        coordinator.request_restart();
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(
            control.events(),
            vec![
                Event::Terminate(ExitCodes::RESTART_REQUESTED),
                Event::ForceTerminate(ExitCodes::RESTART_FAILED),
            ]
        );
    }

    #[tokio::test]
    async fn test_reset_allows_new_attempt() {
        let control = Arc::new(FakeControl::new(None));
        let coordinator = coordinator(control, 5_000);

        assert_eq!(coordinator.request_restart(), RestartOutcome::Accepted);
        coordinator.reset();
        assert!(!coordinator.is_restarting());
        assert_eq!(coordinator.request_restart(), RestartOutcome::Accepted);
    }
}
