//! Limit discovery, usage sampling and threshold evaluation.

pub mod checker;
pub mod error;
pub mod guard;
pub mod introspect;
pub mod limits;
pub mod resource;

pub use checker::{ResourceReading, ThresholdChecker};
pub use error::{AppResult, GovernorError};
pub use guard::{GuardStats, QuiescenceGuard};
pub use introspect::{parse_status_threads, PlatformIntrospector, ResourceIntrospector};
pub use limits::LimitCache;
pub use resource::{
    exceeds_cap, ExhaustionReport, ResourceKind, ResourceLimit, ResourceUsage, SafetyThreshold,
};
