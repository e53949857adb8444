//! # Resource Governor
//!
//! A self-protecting guard for long-running servers that host many stateful
//! sessions. It tracks how close the process is to the OS caps on live threads
//! and open file descriptors, and ends the process on purpose once usage
//! crosses a configured safety margin, instead of letting it fail mid-session.
//!
//! ## When Checks Run
//!
//! Checks are tied to quiescence, not to a timer. The guard subscribes to the
//! session registry's "now empty" notification and evaluates limits only then,
//! when terminating the process loses no in-flight work. An external supervisor
//! is expected to restart the server.
//!
//! ## Components
//!
//! - **Limit probe** ([`core::LimitCache`]): OS ceilings, probed once per kind
//! - **Usage sampler** ([`core::ResourceIntrospector`]): fresh counts on every check
//! - **Threshold checker** ([`core::ThresholdChecker`]): `usage > floor(limit * threshold)`
//! - **Quiescence guard** ([`core::QuiescenceGuard`]): runs the check on each empty notification
//! - **Terminator** ([`runtime::Terminator`]): immediate process termination
//!
//! ## Usage
//!
//! ```rust,ignore
//! use resource_governor::{install_quiescence_guard, check_resources};
//! use resource_governor::core::SafetyThreshold;
//! use resource_governor::infra::SessionRegistry;
//!
//! resource_governor::util::init_tracing();
//!
//! let registry = SessionRegistry::new();
//! let threshold = SafetyThreshold::new(0.8)?;
//! install_quiescence_guard(&registry, threshold);
//!
//! // Diagnostics, independent of the guard:
//! if let Err(err) = check_resources(threshold) {
//!     tracing::warn!(error = %err, "resources tight");
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Limit discovery, usage sampling, evaluation and the quiescence guard.
pub mod core;
/// Configuration models for the guard.
pub mod config;
/// Builders to construct governor components from configuration.
pub mod builders;
/// Registry collaborators the guard subscribes to.
pub mod infra;
/// Runtime capabilities (termination) and API surface.
pub mod runtime;
/// Shared utilities.
pub mod util;

mod process;

pub use process::{check_resources, install_from_env, install_quiescence_guard, process_checker};
