//! Configuration models for the resource guard.

pub mod guard;

pub use guard::{GuardConfig, ENV_ENABLED, ENV_LIMIT_PERCENT};
