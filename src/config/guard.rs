//! Guard configuration.

use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{GovernorError, SafetyThreshold};

/// Environment variable toggling the guard.
pub const ENV_ENABLED: &str = "RESOURCE_GOVERNOR_ENABLED";
/// Environment variable holding the safety fraction.
pub const ENV_LIMIT_PERCENT: &str = "RESOURCE_GOVERNOR_LIMIT_PERCENT";

const DEFAULT_LIMIT_PERCENT: f64 = 0.8;

/// Operator-facing guard configuration.
///
/// OS ceilings themselves are raised outside the process, e.g. with
/// `ulimit -Su` (threads) and `ulimit -Sn` (open files) or the service
/// manager's limit settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Install the guard at startup.
    pub enabled: bool,
    /// Fraction of each OS ceiling the process may use, in `(0, 1]`.
    pub limit_percent: f64,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            limit_percent: DEFAULT_LIMIT_PERCENT,
        }
    }
}

impl GuardConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        SafetyThreshold::new(self.limit_percent)
            .map(|_| ())
            .map_err(|e| format!("limit_percent: {e}"))
    }

    /// The validated safety threshold.
    ///
    /// # Errors
    ///
    /// Returns [`GovernorError::InvalidThreshold`] if `limit_percent` is out of range.
    pub fn threshold(&self) -> Result<SafetyThreshold, GovernorError> {
        SafetyThreshold::new(self.limit_percent)
    }

    /// Parse configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load configuration from the environment, reading `.env` first if present.
    ///
    /// Unset variables keep their defaults. A `.env` that exists but cannot be
    /// read or parsed is logged at `debug` and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`GovernorError::InvalidConfig`] when a variable cannot be parsed
    /// or the result fails validation.
    pub fn from_env() -> Result<Self, GovernorError> {
        report_dotenv(dotenvy::dotenv());
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`from_env`](Self::from_env).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, GovernorError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(raw) = lookup(ENV_ENABLED) {
            cfg.enabled = parse_bool(&raw).ok_or_else(|| {
                GovernorError::InvalidConfig(format!(
                    "{ENV_ENABLED}: expected a boolean, got `{raw}`"
                ))
            })?;
        }
        if let Some(raw) = lookup(ENV_LIMIT_PERCENT) {
            cfg.limit_percent = raw.trim().parse().map_err(|e| {
                GovernorError::InvalidConfig(format!("{ENV_LIMIT_PERCENT}: {e}"))
            })?;
        }
        cfg.validate().map_err(GovernorError::InvalidConfig)?;
        Ok(cfg)
    }
}

/// Log the outcome of loading `.env`; returns whether a file was loaded.
fn report_dotenv(result: Result<PathBuf, dotenvy::Error>) -> bool {
    match result {
        Ok(path) => {
            debug!(path = %path.display(), "loaded .env");
            true
        }
        Err(dotenvy::Error::Io(err)) if err.kind() == io::ErrorKind::NotFound => false,
        Err(err) => {
            debug!(error = %err, "ignoring unreadable .env");
            false
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
