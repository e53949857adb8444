//! Tests for the diagnostics API

use resource_governor::core::{
    ResourceIntrospector, ResourceKind, ResourceLimit, ResourceUsage, SafetyThreshold,
    ThresholdChecker,
};
use resource_governor::runtime::resource_status;

struct Introspector {
    threads: u64,
    files: u64,
}

impl ResourceIntrospector for Introspector {
    fn probe_limit(&self, kind: ResourceKind) -> ResourceLimit {
        match kind {
            ResourceKind::ThreadCount => ResourceLimit::Bounded(100),
            ResourceKind::OpenFileCount => ResourceLimit::Unbounded,
        }
    }

    fn sample_usage(&self, kind: ResourceKind) -> ResourceUsage {
        match kind {
            ResourceKind::ThreadCount => ResourceUsage::new(kind, self.threads),
            ResourceKind::OpenFileCount => ResourceUsage::new(kind, self.files),
        }
    }
}

#[test]
fn test_status_within_limits() {
    let checker = ThresholdChecker::new(Introspector { threads: 80, files: 10_000 });
    let status = resource_status(&checker, SafetyThreshold::new(0.8).unwrap());

    assert!(status.ok);
    assert_eq!(status.resources.len(), 2);
    assert_eq!(status.resources[0].cap, Some(80));
    assert!(!status.resources[0].exceeded);
    assert_eq!(status.resources[1].cap, None);
    assert!(!status.resources[1].exceeded);
}

#[test]
fn test_status_reports_exceeded_kind() {
    let checker = ThresholdChecker::new(Introspector { threads: 81, files: 3 });
    let status = resource_status(&checker, SafetyThreshold::new(0.8).unwrap());

    assert!(!status.ok);
    assert!(status.resources[0].exceeded);
    assert_eq!(status.resources[0].usage, 81);
}

#[test]
fn test_status_serializes() {
    let checker = ThresholdChecker::new(Introspector { threads: 5, files: 3 });
    let status = resource_status(&checker, SafetyThreshold::new(0.5).unwrap());
    let json = serde_json::to_value(&status).unwrap();

    assert_eq!(json["ok"], true);
    assert_eq!(json["threshold"], 0.5);
    assert_eq!(json["resources"][0]["kind"], "thread_count");
    assert_eq!(json["resources"][0]["limit"]["bounded"], 100);
    assert_eq!(json["resources"][1]["limit"], "unbounded");
}
