//! Threshold evaluation across resource kinds.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::GovernorError;
use super::introspect::ResourceIntrospector;
use super::limits::LimitCache;
use super::resource::{ExhaustionReport, ResourceKind, ResourceLimit, SafetyThreshold};

/// Limit and usage of one kind at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceReading {
    /// Measured kind.
    pub kind: ResourceKind,
    /// Cached OS ceiling.
    pub limit: ResourceLimit,
    /// Fresh usage sample.
    pub usage: u64,
}

/// Compares fresh usage against cached ceilings.
#[derive(Debug)]
pub struct ThresholdChecker<I> {
    limits: LimitCache<I>,
}

impl<I: ResourceIntrospector> ThresholdChecker<I> {
    /// Create a checker over `introspector` with an empty limit cache.
    pub const fn new(introspector: I) -> Self {
        Self {
            limits: LimitCache::new(introspector),
        }
    }

    /// Limit cache backing this checker.
    pub const fn limits(&self) -> &LimitCache<I> {
        &self.limits
    }

    /// Check every kind in [`ResourceKind::ALL`] order, stopping at the first
    /// violation.
    ///
    /// # Errors
    ///
    /// Returns [`GovernorError::ResourceExhausted`] for the first kind whose
    /// usage is above `floor(limit * threshold)`.
    pub fn evaluate(&self, threshold: SafetyThreshold) -> Result<(), GovernorError> {
        for kind in ResourceKind::ALL {
            self.check_kind(kind, threshold)?;
        }
        Ok(())
    }

    /// Check a single kind.
    ///
    /// Unbounded limits and zero caps pass without sampling usage.
    ///
    /// # Errors
    ///
    /// Returns [`GovernorError::ResourceExhausted`] when usage is above the cap.
    pub fn check_kind(
        &self,
        kind: ResourceKind,
        threshold: SafetyThreshold,
    ) -> Result<(), GovernorError> {
        let limit = self.limits.limit_for(kind);
        let Some(raw) = limit.value() else {
            return Ok(());
        };
        let cap = threshold.apply(raw);
        if cap == 0 {
            return Ok(());
        }

        let usage = self.limits.usage_for(kind).value;
        debug!(kind = %kind, usage, cap, limit = raw, "resource usage sampled");
        if usage <= cap {
            return Ok(());
        }
        Err(GovernorError::ResourceExhausted(ExhaustionReport {
            kind,
            usage,
            limit: raw,
            cap,
        }))
    }

    /// Current limit and usage of every kind, without evaluating them.
    pub fn snapshot(&self) -> Vec<ResourceReading> {
        ResourceKind::ALL
            .into_iter()
            .map(|kind| ResourceReading {
                kind,
                limit: self.limits.limit_for(kind),
                usage: self.limits.usage_for(kind).value,
            })
            .collect()
    }
}
