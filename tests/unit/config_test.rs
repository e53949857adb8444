//! Tests for configuration validation

use std::collections::HashMap;

use resource_governor::config::{GuardConfig, ENV_ENABLED, ENV_LIMIT_PERCENT};
use resource_governor::core::GovernorError;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn test_default_config() {
    let cfg = GuardConfig::default();
    assert!(cfg.enabled);
    assert!((cfg.limit_percent - 0.8).abs() < f64::EPSILON);
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_config_invalid_limit_percent() {
    for bad in [0.0, -0.1, 1.5, f64::NAN] {
        let cfg = GuardConfig {
            enabled: true,
            limit_percent: bad,
        };
        assert!(cfg.validate().is_err(), "{bad} should be rejected");
        assert!(cfg.threshold().is_err());
    }
}

#[test]
fn test_config_from_json() {
    let cfg = GuardConfig::from_json_str(r#"{ "enabled": false, "limit_percent": 0.9 }"#).unwrap();
    assert!(!cfg.enabled);
    assert!((cfg.threshold().unwrap().fraction() - 0.9).abs() < f64::EPSILON);
}

#[test]
fn test_config_from_json_uses_defaults() {
    let cfg = GuardConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, GuardConfig::default());
}

#[test]
fn test_config_from_json_rejects_bad_percent() {
    assert!(GuardConfig::from_json_str(r#"{ "limit_percent": 2.0 }"#).is_err());
    assert!(GuardConfig::from_json_str("not json").is_err());
}

#[test]
fn test_config_from_lookup() {
    let vars = [(ENV_ENABLED, "off"), (ENV_LIMIT_PERCENT, " 0.65 ")];
    let cfg = GuardConfig::from_lookup(lookup(&vars)).unwrap();
    assert!(!cfg.enabled);
    assert!((cfg.limit_percent - 0.65).abs() < f64::EPSILON);
}

#[test]
fn test_config_from_lookup_empty_keeps_defaults() {
    let cfg = GuardConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(cfg, GuardConfig::default());
}

#[test]
fn test_config_from_lookup_rejects_garbage() {
    let err = GuardConfig::from_lookup(lookup(&[(ENV_ENABLED, "maybe")])).unwrap_err();
    assert!(matches!(err, GovernorError::InvalidConfig(_)));

    let err = GuardConfig::from_lookup(lookup(&[(ENV_LIMIT_PERCENT, "eighty")])).unwrap_err();
    assert!(matches!(err, GovernorError::InvalidConfig(_)));

    let err = GuardConfig::from_lookup(lookup(&[(ENV_LIMIT_PERCENT, "0")])).unwrap_err();
    assert!(matches!(err, GovernorError::InvalidConfig(_)));
}
