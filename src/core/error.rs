//! Error types for governor operations.

use thiserror::Error;

use super::resource::ExhaustionReport;

/// Errors produced by governor components.
#[derive(Debug, Error)]
pub enum GovernorError {
    /// Measured usage is above the safety cap for a resource kind.
    #[error("resource exhausted: {0}")]
    ResourceExhausted(ExhaustionReport),
    /// Safety threshold outside `(0, 1]`.
    #[error("invalid threshold: {0} (expected a fraction in (0, 1])")]
    InvalidThreshold(f64),
    /// Configuration could not be parsed or validated.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl GovernorError {
    /// The exhaustion report, if this is a `ResourceExhausted` error.
    #[must_use]
    pub const fn exhaustion(&self) -> Option<&ExhaustionReport> {
        match self {
            Self::ResourceExhausted(report) => Some(report),
            _ => None,
        }
    }
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
