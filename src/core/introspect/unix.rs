//! Unix implementation of [`ResourceIntrospector`].
//!
//! Thread usage comes from `/proc/self/status` on Linux/Android and from
//! `proc_pidinfo(PROC_PIDTASKINFO)` on macOS. Other Unix targets (FreeBSD,
//! DragonFly, ...) expose no per-process thread count without procfs and report 0.

use std::fs;
use std::path::Path;

use nix::sys::resource::{getrlimit, Resource};
use tracing::debug;

use super::ResourceIntrospector;
use crate::core::resource::{ResourceKind, ResourceLimit, ResourceUsage};

#[cfg(any(target_os = "linux", target_os = "android"))]
const FD_DIR: &str = "/proc/self/fd";
#[cfg(not(any(target_os = "linux", target_os = "android")))]
const FD_DIR: &str = "/dev/fd";

#[cfg(any(target_os = "linux", target_os = "android"))]
const STATUS_FILE: &str = "/proc/self/status";

/// Introspector backed by `getrlimit` and procfs.
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
        let resource = match kind {
            ResourceKind::ThreadCount => Resource::RLIMIT_NPROC,
            ResourceKind::OpenFileCount => Resource::RLIMIT_NOFILE,
        };
        match getrlimit(resource) {
            Ok((soft, _hard)) => limit_from_raw(soft),
            Err(err) => {
                debug!(
                    kind = %kind,
                    error = %err,
                    "getrlimit failed; treating limit as unbounded"
                );
                ResourceLimit::Unbounded
            }
        }
    }

    fn sample_usage(&self, kind: ResourceKind) -> ResourceUsage {
        let value = match kind {
            ResourceKind::ThreadCount => thread_count(),
            ResourceKind::OpenFileCount => open_file_count(Path::new(FD_DIR)),
        };
        ResourceUsage::new(kind, value)
    }
}

/// Map a raw soft limit to a [`ResourceLimit`].
///
/// `rlim_t` is unsigned on Linux and macOS but `i64` on FreeBSD/DragonFly;
/// values that do not fit `u64` are treated as unbounded.
#[allow(clippy::useless_conversion)]
fn limit_from_raw(soft: nix::libc::rlim_t) -> ResourceLimit {
    if soft == nix::libc::RLIM_INFINITY {
        return ResourceLimit::Unbounded;
    }
    u64::try_from(soft).map_or(ResourceLimit::Unbounded, ResourceLimit::Bounded)
}

#[cfg(any(target_os = "linux", target_os = "android"))]
fn thread_count() -> u64 {
    match fs::read_to_string(STATUS_FILE) {
        Ok(status) => super::parse_status_threads(&status).unwrap_or_else(|| {
            debug!(path = STATUS_FILE, "no Threads field in status record");
            0
        }),
        Err(err) => {
            debug!(path = STATUS_FILE, error = %err, "failed to read status record");
            0
        }
    }
}

#[cfg(target_os = "macos")]
#[allow(unsafe_code)]
fn thread_count() -> u64 {
    use std::mem::{size_of, MaybeUninit};

    use nix::libc;

    let Ok(pid) = libc::c_int::try_from(std::process::id()) else {
        return 0;
    };
    let Ok(size) = libc::c_int::try_from(size_of::<libc::proc_taskinfo>()) else {
        return 0;
    };
    let mut info = MaybeUninit::<libc::proc_taskinfo>::zeroed();
    // SAFETY: `info` is a writable buffer of exactly `size` bytes and
    // proc_pidinfo writes at most `buffersize` bytes into it.
    let written = unsafe {
        libc::proc_pidinfo(pid, libc::PROC_PIDTASKINFO, 0, info.as_mut_ptr().cast(), size)
    };
    if written != size {
        debug!(written, "proc_pidinfo(PROC_PIDTASKINFO) failed");
        return 0;
    }
    // SAFETY: the buffer started zeroed (a valid proc_taskinfo) and the call
    // filled all of it.
    let info = unsafe { info.assume_init() };
    u64::try_from(info.pti_threadnum).unwrap_or(0)
}

#[cfg(not(any(target_os = "linux", target_os = "android", target_os = "macos")))]
fn thread_count() -> u64 {
    0
}

/// Count descriptor entries, minus the one held by the directory scan itself.
fn open_file_count(dir: &Path) -> u64 {
    match fs::read_dir(dir) {
        Ok(entries) => {
            let count = entries.filter(Result::is_ok).count() as u64;
            count.saturating_sub(1)
        }
        Err(err) => {
            debug!(path = %dir.display(), error = %err, "failed to enumerate descriptors");
            0
        }
    }
}
