// Atrium supervisor library
// Serializes restart requests and hands the actual restart to an
// external process manager when one is present.

mod control;
mod coordinator;

pub use control::{ProcessControl, Supervisor, SupervisorError, SystemProcessControl};
pub use coordinator::{RestartCoordinator, RestartOutcome, RESTART_DELAY};
