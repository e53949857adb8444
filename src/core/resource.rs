//! Resource kinds, limits, usage samples and exhaustion reports.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::GovernorError;

/// OS resource monitored by the governor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Live threads owned by the process.
    ThreadCount,
    /// Open file descriptors held by the process.
    OpenFileCount,
}

impl ResourceKind {
    /// Every kind, in evaluation order.
    pub const ALL: [Self; 2] = [Self::ThreadCount, Self::OpenFileCount];

    /// Stable name used in logs and serialized output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ThreadCount => "thread_count",
            Self::OpenFileCount => "open_file_count",
        }
    }

    /// Operator hint for raising the soft limit of this kind.
    #[must_use]
    pub const fn ulimit_hint(self) -> &'static str {
        match self {
            Self::ThreadCount => "set a higher limit with `ulimit -Su`",
            Self::OpenFileCount => "set a higher limit with `ulimit -Sn`",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ceiling the OS imposes on a resource kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceLimit {
    /// Enforced soft limit.
    Bounded(u64),
    /// No ceiling is enforced, or it could not be determined.
    Unbounded,
}

impl ResourceLimit {
    /// Raw limit value, `None` when unbounded.
    #[must_use]
    pub const fn value(self) -> Option<u64> {
        match self {
            Self::Bounded(value) => Some(value),
            Self::Unbounded => None,
        }
    }

    /// Whether the limit disables checking.
    #[must_use]
    pub const fn is_unbounded(self) -> bool {
        matches!(self, Self::Unbounded)
    }

    /// Safety-adjusted cap: `floor(limit * threshold)`, `None` when unbounded.
    #[must_use]
    pub fn cap(self, threshold: SafetyThreshold) -> Option<u64> {
        self.value().map(|limit| threshold.apply(limit))
    }
}

/// Usage measured at the instant of a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceUsage {
    /// Kind that was measured.
    pub kind: ResourceKind,
    /// Measured value.
    pub value: u64,
}

impl ResourceUsage {
    /// Create a usage sample.
    #[must_use]
    pub const fn new(kind: ResourceKind, value: u64) -> Self {
        Self { kind, value }
    }
}

/// Fraction of the OS ceiling the process may use, in `(0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct SafetyThreshold(f64);

impl SafetyThreshold {
    /// Validate and wrap a fraction.
    ///
    /// # Errors
    ///
    /// Returns [`GovernorError::InvalidThreshold`] for NaN, non-positive values
    /// and values above 1.
    pub fn new(fraction: f64) -> Result<Self, GovernorError> {
        if fraction.is_nan() || fraction <= 0.0 || fraction > 1.0 {
            return Err(GovernorError::InvalidThreshold(fraction));
        }
        Ok(Self(fraction))
    }

    /// The wrapped fraction.
    #[must_use]
    pub const fn fraction(self) -> f64 {
        self.0
    }

    /// `floor(limit * fraction)`.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn apply(self, limit: u64) -> u64 {
        (limit as f64 * self.0).floor() as u64
    }
}

impl TryFrom<f64> for SafetyThreshold {
    type Error = GovernorError;

    fn try_from(fraction: f64) -> Result<Self, Self::Error> {
        Self::new(fraction)
    }
}

impl<'de> Deserialize<'de> for SafetyThreshold {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let fraction = f64::deserialize(deserializer)?;
        Self::new(fraction).map_err(serde::de::Error::custom)
    }
}

/// Diagnostic payload for a kind whose usage exceeded its cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExhaustionReport {
    /// Offending kind.
    pub kind: ResourceKind,
    /// Measured usage.
    pub usage: u64,
    /// Raw OS ceiling.
    pub limit: u64,
    /// Threshold-adjusted cap that was exceeded.
    pub cap: u64,
}

impl fmt::Display for ExhaustionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "reached {} limit: usage {} over cap {} (system max: {})",
            self.kind, self.usage, self.cap, self.limit
        )
    }
}

/// Decide whether `usage` breaches the safety cap of `limit`.
///
/// Unbounded limits and zero caps never breach.
#[must_use]
pub fn exceeds_cap(
    limit: ResourceLimit,
    usage: ResourceUsage,
    threshold: SafetyThreshold,
) -> Option<ExhaustionReport> {
    let raw = limit.value()?;
    let cap = threshold.apply(raw);
    if cap == 0 || usage.value <= cap {
        return None;
    }
    Some(ExhaustionReport {
        kind: usage.kind,
        usage: usage.value,
        limit: raw,
        cap,
    })
}
