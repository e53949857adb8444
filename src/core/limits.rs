//! Memoized OS ceilings.
//!
//! Each [`ResourceKind`] gets its own `OnceLock` slot. The first caller for a
//! kind runs the probe; concurrent callers block on the same initialization
//! instead of probing twice. Once set, a slot is never written again for the
//! lifetime of the cache.

use std::sync::OnceLock;

use tracing::debug;

use super::introspect::ResourceIntrospector;
use super::resource::{ResourceKind, ResourceLimit, ResourceUsage};

/// Per-kind cache of OS ceilings in front of an introspector.
#[derive(Debug)]
pub struct LimitCache<I> {
    introspector: I,
    threads: OnceLock<ResourceLimit>,
    open_files: OnceLock<ResourceLimit>,
}

impl<I: ResourceIntrospector> LimitCache<I> {
    /// Wrap an introspector with an empty cache.
    pub const fn new(introspector: I) -> Self {
        Self {
            introspector,
            threads: OnceLock::new(),
            open_files: OnceLock::new(),
        }
    }

    /// Ceiling for `kind`, probing the OS on first use only.
    pub fn limit_for(&self, kind: ResourceKind) -> ResourceLimit {
        *self.slot(kind).get_or_init(|| {
            let limit = self.introspector.probe_limit(kind);
            debug!(kind = %kind, ?limit, "resource limit discovered");
            limit
        })
    }

    /// Ceiling for `kind` if it has already been probed.
    pub fn cached(&self, kind: ResourceKind) -> Option<ResourceLimit> {
        self.slot(kind).get().copied()
    }

    /// Fresh usage sample for `kind`.
    pub fn usage_for(&self, kind: ResourceKind) -> ResourceUsage {
        self.introspector.sample_usage(kind)
    }

    /// Underlying introspector.
    pub const fn introspector(&self) -> &I {
        &self.introspector
    }

    const fn slot(&self, kind: ResourceKind) -> &OnceLock<ResourceLimit> {
        match kind {
            ResourceKind::ThreadCount => &self.threads,
            ResourceKind::OpenFileCount => &self.open_files,
        }
    }
}
