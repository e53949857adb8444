//! Process-wide entry points.
//!
//! The process owns a single [`ThresholdChecker`] over the platform
//! introspector, created on first use. Its limit cache therefore lives for the
//! whole process, and every caller shares the same probed ceilings.

use std::sync::{Arc, OnceLock};

use anyhow::Context;
use parking_lot::Once;

use crate::config::GuardConfig;
use crate::core::{
    AppResult, GovernorError, PlatformIntrospector, QuiescenceGuard, SafetyThreshold,
    ThresholdChecker,
};
use crate::infra::EmptyNotifier;
use crate::runtime::ProcessTerminator;

static PROCESS_CHECKER: OnceLock<Arc<ThresholdChecker<PlatformIntrospector>>> = OnceLock::new();
static GUARD_INSTALL: Once = Once::new();

/// The process-wide checker.
pub fn process_checker() -> &'static Arc<ThresholdChecker<PlatformIntrospector>> {
    PROCESS_CHECKER.get_or_init(|| Arc::new(ThresholdChecker::new(PlatformIntrospector::new())))
}

/// Check this process's thread and open-file usage against `threshold`.
///
/// Safe to call at any time for diagnostics; it never terminates anything.
///
/// # Errors
///
/// Returns [`GovernorError::ResourceExhausted`] for the first kind over its cap.
pub fn check_resources(threshold: SafetyThreshold) -> Result<(), GovernorError> {
    process_checker().evaluate(threshold)
}

/// Install the process-wide guard on `registry`, terminating the process when a
/// check at quiescence finds an exhausted resource.
///
/// Intended to be called once at startup. Only the first call in the process
/// installs anything; the return value says whether this call did.
pub fn install_quiescence_guard<R>(registry: &R, threshold: SafetyThreshold) -> bool
where
    R: EmptyNotifier + ?Sized,
{
    let mut installed = false;
    GUARD_INSTALL.call_once(|| {
        let guard = QuiescenceGuard::new(
            Arc::clone(process_checker()),
            ProcessTerminator::new(),
            threshold,
        );
        installed = guard.install(registry);
    });
    installed
}

/// Load [`GuardConfig`] from the environment and install the guard if enabled.
///
/// # Errors
///
/// Fails when the environment holds an invalid configuration.
pub fn install_from_env<R>(registry: &R) -> AppResult<bool>
where
    R: EmptyNotifier + ?Sized,
{
    let cfg = GuardConfig::from_env().context("loading resource guard configuration")?;
    if !cfg.enabled {
        tracing::info!("resource guard disabled by configuration");
        return Ok(false);
    }
    let threshold = cfg.threshold().context("resource guard threshold")?;
    Ok(install_quiescence_guard(registry, threshold))
}
