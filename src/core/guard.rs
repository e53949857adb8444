//! Quiescence-triggered resource guard.
//!
//! The guard subscribes to a registry's empty notification and runs a full
//! resource check each time it fires. That is the one moment the server holds
//! no sessions, so terminating there loses no in-flight work. There is no
//! timer: a check never runs while sessions are live.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use resource_governor::core::{
//!     PlatformIntrospector, QuiescenceGuard, SafetyThreshold, ThresholdChecker,
//! };
//! use resource_governor::infra::SessionRegistry;
//! use resource_governor::runtime::ProcessTerminator;
//!
//! let registry = SessionRegistry::new();
//! let guard = QuiescenceGuard::new(
//!     Arc::new(ThresholdChecker::new(PlatformIntrospector::new())),
//!     ProcessTerminator::new(),
//!     SafetyThreshold::new(0.8)?,
//! );
//! guard.install(&registry);
//! ```

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::checker::ThresholdChecker;
use super::error::GovernorError;
use super::introspect::ResourceIntrospector;
use super::resource::{ResourceKind, SafetyThreshold};
use crate::infra::registry::EmptyNotifier;
use crate::runtime::terminate::Terminator;

/// Counters describing guard activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GuardStats {
    /// Checks run in response to empty notifications.
    pub checks: u64,
    /// Checks that found an exhausted resource and invoked the terminator.
    pub terminations: u64,
    /// Checks that failed for any other reason.
    pub failures: u64,
}

#[derive(Debug, Default)]
struct GuardCounters {
    checks: AtomicU64,
    terminations: AtomicU64,
    failures: AtomicU64,
}

impl GuardCounters {
    fn snapshot(&self) -> GuardStats {
        GuardStats {
            checks: self.checks.load(Ordering::Relaxed),
            terminations: self.terminations.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}

/// Runs a resource check on every registry empty notification and hands
/// exhaustion reports to a [`Terminator`].
#[derive(Debug)]
pub struct QuiescenceGuard<I, T> {
    checker: Arc<ThresholdChecker<I>>,
    terminator: T,
    threshold: SafetyThreshold,
    installed: AtomicBool,
    counters: GuardCounters,
}

impl<I, T> QuiescenceGuard<I, T>
where
    I: ResourceIntrospector,
    T: Terminator,
{
    /// Create a guard. Nothing is checked until it is installed on a registry.
    pub fn new(
        checker: Arc<ThresholdChecker<I>>,
        terminator: T,
        threshold: SafetyThreshold,
    ) -> Arc<Self> {
        Arc::new(Self {
            checker,
            terminator,
            threshold,
            installed: AtomicBool::new(false),
            counters: GuardCounters::default(),
        })
    }

    /// Subscribe to `registry`'s empty notification.
    ///
    /// Only the first call has any effect; it returns `true`.
    pub fn install<R>(self: &Arc<Self>, registry: &R) -> bool
    where
        R: EmptyNotifier + ?Sized,
    {
        if self.installed.swap(true, Ordering::AcqRel) {
            debug!("quiescence guard already installed");
            return false;
        }

        let guard = Arc::clone(self);
        registry.on_empty(Box::new(move || guard.on_quiescence()));

        let limits = self.checker.limits();
        info!(
            threshold = self.threshold.fraction(),
            thread_limit = ?limits.limit_for(ResourceKind::ThreadCount),
            open_file_limit = ?limits.limit_for(ResourceKind::OpenFileCount),
            logical_cpus = num_cpus::get(),
            "quiescence guard installed"
        );
        true
    }

    /// Handle one empty notification: check, and terminate on exhaustion.
    pub fn on_quiescence(&self) {
        debug!("registry empty, checking resources");
        self.counters.checks.fetch_add(1, Ordering::Relaxed);

        match self.checker.evaluate(self.threshold) {
            Ok(()) => debug!("resources within limits"),
            Err(GovernorError::ResourceExhausted(report)) => {
                error!(
                    kind = %report.kind,
                    usage = report.usage,
                    cap = report.cap,
                    limit = report.limit,
                    threshold = self.threshold.fraction(),
                    hint = report.kind.ulimit_hint(),
                    "resources over the limit, server will be killed"
                );
                self.counters.terminations.fetch_add(1, Ordering::Relaxed);
                self.terminator.terminate(&report);
            }
            Err(err) => {
                self.counters.failures.fetch_add(1, Ordering::Relaxed);
                warn!(error = %err, "resource check failed");
            }
        }
    }

    /// Whether [`install`](Self::install) has run.
    pub fn is_installed(&self) -> bool {
        self.installed.load(Ordering::Acquire)
    }

    /// Threshold applied on every check.
    pub const fn threshold(&self) -> SafetyThreshold {
        self.threshold
    }

    /// Checker shared with this guard.
    pub const fn checker(&self) -> &Arc<ThresholdChecker<I>> {
        &self.checker
    }

    /// Snapshot of guard counters.
    pub fn stats(&self) -> GuardStats {
        self.counters.snapshot()
    }
}
