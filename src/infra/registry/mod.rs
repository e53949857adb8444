//! Session registry collaborator.
//!
//! The governor only needs one thing from the registry that owns the server's
//! sessions: a notification each time it transitions into the empty state.
//! [`EmptyNotifier`] is that contract; [`SessionRegistry`] is an in-memory
//! registry that implements it.

pub mod memory;

pub use memory::{SessionId, SessionRegistry};

/// Handler invoked when a registry becomes empty.
pub type EmptyHandler = Box<dyn Fn() + Send + Sync + 'static>;

/// Registry that announces transitions into the empty state.
///
/// Implementations must deliver at most one notification per transition into
/// the empty state, never re-fire while already empty, and not deliver two
/// notifications concurrently.
pub trait EmptyNotifier {
    /// Register `handler` for every future empty transition.
    fn on_empty(&self, handler: EmptyHandler);
}
