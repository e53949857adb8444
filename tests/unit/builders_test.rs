//! Tests for guard builders

use resource_governor::builders::build_guard;
use resource_governor::config::GuardConfig;
use resource_governor::core::{
    ExhaustionReport, GovernorError, ResourceIntrospector, ResourceKind, ResourceLimit,
    ResourceUsage,
};
use resource_governor::infra::SessionRegistry;
use resource_governor::runtime::Terminator;

#[derive(Debug)]
struct QuietIntrospector;

impl ResourceIntrospector for QuietIntrospector {
    fn probe_limit(&self, _kind: ResourceKind) -> ResourceLimit {
        ResourceLimit::Bounded(1000)
    }

    fn sample_usage(&self, kind: ResourceKind) -> ResourceUsage {
        ResourceUsage::new(kind, 1)
    }
}

#[derive(Debug)]
struct PanicTerminator;

impl Terminator for PanicTerminator {
    fn terminate(&self, report: &ExhaustionReport) {
        panic!("unexpected termination: {report}");
    }
}

#[test]
fn test_build_guard_enabled() {
    let cfg = GuardConfig {
        enabled: true,
        limit_percent: 0.5,
    };
    let guard = build_guard(&cfg, QuietIntrospector, PanicTerminator)
        .unwrap()
        .expect("guard should be built");
    assert!((guard.threshold().fraction() - 0.5).abs() < f64::EPSILON);
    assert!(!guard.is_installed());

    let registry = SessionRegistry::new();
    assert!(guard.install(&registry));
    let id = registry.register();
    registry.release(&id);
    assert_eq!(guard.stats().checks, 1);
    assert_eq!(guard.stats().terminations, 0);
}

#[test]
fn test_build_guard_disabled() {
    let cfg = GuardConfig {
        enabled: false,
        limit_percent: 0.8,
    };
    let guard = build_guard(&cfg, QuietIntrospector, PanicTerminator).unwrap();
    assert!(guard.is_none());
}

#[test]
fn test_build_guard_invalid_config() {
    let cfg = GuardConfig {
        enabled: true,
        limit_percent: 0.0,
    };
    let result = build_guard(&cfg, QuietIntrospector, PanicTerminator);
    assert!(matches!(result, Err(GovernorError::InvalidConfig(_))));
}
