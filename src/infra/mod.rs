//! Infrastructure adapters the governor plugs into.

pub mod registry;

pub use registry::{EmptyHandler, EmptyNotifier, SessionId, SessionRegistry};
