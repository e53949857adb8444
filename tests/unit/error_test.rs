//! Tests for error types

use resource_governor::core::{ExhaustionReport, GovernorError, ResourceKind};

#[test]
fn test_resource_exhausted_error() {
    let err = GovernorError::ResourceExhausted(ExhaustionReport {
        kind: ResourceKind::ThreadCount,
        usage: 81,
        limit: 100,
        cap: 80,
    });
    assert_eq!(
        format!("{}", err),
        "resource exhausted: reached thread_count limit: usage 81 over cap 80 (system max: 100)"
    );
    assert_eq!(err.exhaustion().map(|r| r.usage), Some(81));
}

#[test]
fn test_invalid_threshold_error() {
    let err = GovernorError::InvalidThreshold(1.5);
    assert_eq!(
        format!("{}", err),
        "invalid threshold: 1.5 (expected a fraction in (0, 1])"
    );
    assert!(err.exhaustion().is_none());
}

#[test]
fn test_invalid_config_error() {
    let err = GovernorError::InvalidConfig("bad".to_string());
    assert_eq!(format!("{}", err), "invalid configuration: bad");
}
