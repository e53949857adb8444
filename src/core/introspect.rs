//! Platform resource introspection.
//!
//! [`ResourceIntrospector`] is the single capability the rest of the governor
//! depends on for talking to the OS. The implementation for the current target
//! is chosen at build time and exported as [`PlatformIntrospector`]:
//!
//! - **Unix**: `getrlimit` for ceilings, `/proc/self/status` for the thread count
//!   (Linux/Android), and the per-process descriptor directory for open files.
//! - **Other targets**: conservative constant ceilings and best-effort usage.
//!
//! Neither method may fail. Query errors degrade to [`ResourceLimit::Unbounded`]
//! or to zero usage, so a broken probe can never cause a spurious shutdown.

#[cfg(unix)]
mod unix;
#[cfg(not(unix))]
mod fallback;

use super::resource::{ResourceKind, ResourceLimit, ResourceUsage};

/// OS queries backing limit discovery and usage sampling.
pub trait ResourceIntrospector: Send + Sync + 'static {
    /// Query the OS ceiling for `kind`. Called at most once per kind by
    /// [`LimitCache`](super::LimitCache).
    fn probe_limit(&self, kind: ResourceKind) -> ResourceLimit;

    /// Measure current consumption of `kind`. Never cached.
    fn sample_usage(&self, kind: ResourceKind) -> ResourceUsage;
}

#[cfg(unix)]
pub use unix::PlatformIntrospector;

#[cfg(not(unix))]
pub use fallback::PlatformIntrospector;

/// Extract the thread count from the contents of `/proc/<pid>/status`.
#[must_use]
pub fn parse_status_threads(status: &str) -> Option<u64> {
    status
        .lines()
        .find_map(|line| line.strip_prefix("Threads:"))
        .and_then(|rest| rest.trim().parse().ok())
}
