//! Builders to construct a quiescence guard from configuration.

use std::sync::Arc;

use tracing::info;

use crate::config::GuardConfig;
use crate::core::{GovernorError, QuiescenceGuard, ResourceIntrospector, ThresholdChecker};
use crate::runtime::Terminator;

/// Build a guard from configuration.
///
/// Returns `Ok(None)` when the guard is disabled. The guard still has to be
/// installed on a registry.
///
/// # Errors
///
/// Returns [`GovernorError::InvalidConfig`] if the configuration is invalid.
pub fn build_guard<I, T>(
    cfg: &GuardConfig,
    introspector: I,
    terminator: T,
) -> Result<Option<Arc<QuiescenceGuard<I, T>>>, GovernorError>
where
    I: ResourceIntrospector,
    T: Terminator,
{
    cfg.validate()
        .map_err(|e| GovernorError::InvalidConfig(format!("config invalid: {e}")))?;

    if !cfg.enabled {
        info!("resource guard disabled by configuration");
        return Ok(None);
    }

    let threshold = cfg.threshold()?;
    let checker = Arc::new(ThresholdChecker::new(introspector));
    Ok(Some(QuiescenceGuard::new(checker, terminator, threshold)))
}
