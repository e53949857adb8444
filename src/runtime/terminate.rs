//! Immediate process termination.
//!
//! This is deliberately not a shutdown path: nothing is flushed and no peer is
//! notified. It is only reached once the session registry has confirmed that no
//! sessions remain, and a process supervisor is expected to restart the server.

use tracing::warn;

use crate::core::ExhaustionReport;

/// Capability to end the process after a failed resource check.
pub trait Terminator: Send + Sync + 'static {
    /// End the process because of `report`.
    fn terminate(&self, report: &ExhaustionReport);
}

/// Ends the current process: `SIGTERM` to self on Unix, `exit(1)` elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessTerminator;

impl ProcessTerminator {
    /// Create a process terminator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Terminator for ProcessTerminator {
    #[cfg(unix)]
    fn terminate(&self, report: &ExhaustionReport) {
        use nix::sys::signal::{kill, Signal};
        use nix::unistd::Pid;

        let pid = Pid::this();
        if let Err(err) = kill(pid, Signal::SIGTERM) {
            warn!(
                pid = pid.as_raw(),
                error = %err,
                kind = %report.kind,
                "SIGTERM to self failed; exiting"
            );
            std::process::exit(1);
        }
    }

    #[cfg(not(unix))]
    fn terminate(&self, report: &ExhaustionReport) {
        warn!(kind = %report.kind, "exiting process");
        std::process::exit(1);
    }
}
