//! API-facing diagnostics models.

use serde::{Deserialize, Serialize};

use crate::core::{
    exceeds_cap, ResourceIntrospector, ResourceKind, ResourceLimit, ResourceUsage, SafetyThreshold,
    ThresholdChecker,
};

/// One resource kind as seen by a diagnostics request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceStatusEntry {
    /// Resource kind.
    pub kind: ResourceKind,
    /// OS ceiling.
    pub limit: ResourceLimit,
    /// Safety-adjusted cap, absent when unbounded.
    pub cap: Option<u64>,
    /// Current usage.
    pub usage: u64,
    /// Whether usage is above the cap.
    pub exceeded: bool,
}

/// Diagnostics response for all resource kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceStatus {
    /// No kind exceeds its cap.
    pub ok: bool,
    /// Threshold the caps were computed with.
    pub threshold: f64,
    /// Per-kind readings.
    pub resources: Vec<ResourceStatusEntry>,
}

/// Sample every kind and report it against `threshold` without terminating.
pub fn resource_status<I: ResourceIntrospector>(
    checker: &ThresholdChecker<I>,
    threshold: SafetyThreshold,
) -> ResourceStatus {
    let resources: Vec<_> = checker
        .snapshot()
        .into_iter()
        .map(|reading| ResourceStatusEntry {
            kind: reading.kind,
            limit: reading.limit,
            cap: reading.limit.cap(threshold),
            usage: reading.usage,
            exceeded: exceeds_cap(
                reading.limit,
                ResourceUsage::new(reading.kind, reading.usage),
                threshold,
            )
            .is_some(),
        })
        .collect();

    ResourceStatus {
        ok: resources.iter().all(|entry| !entry.exceeded),
        threshold: threshold.fraction(),
        resources,
    }
}
