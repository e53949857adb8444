//! Fallback [`ResourceIntrospector`] for targets without `getrlimit`.
//!
//! Ceilings are conservative constants. Usage always reads 0: none of the
//! crates this project builds on exposes a per-process thread list or handle
//! count here without raw OS bindings, so checks on these targets never fail.

use super::ResourceIntrospector;
use crate::core::resource::{ResourceKind, ResourceLimit, ResourceUsage};

/// Assumed per-process thread ceiling.
const MAX_THREADS: u64 = 2000;

/// C runtime stdio stream ceiling.
const MAX_OPEN_FILES: u64 = 2048;

/// Introspector using fixed ceilings.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformIntrospector;

impl PlatformIntrospector {
    /// Create the introspector for this platform.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ResourceIntrospector for PlatformIntrospector {
    fn probe_limit(&self, kind: ResourceKind) -> ResourceLimit {
        match kind {
            ResourceKind::ThreadCount => ResourceLimit::Bounded(MAX_THREADS),
            ResourceKind::OpenFileCount => ResourceLimit::Bounded(MAX_OPEN_FILES),
        }
    }

    fn sample_usage(&self, kind: ResourceKind) -> ResourceUsage {
        ResourceUsage::new(kind, 0)
    }
}
