//! Runtime capabilities (process termination) and API surface.

pub mod api;
pub mod terminate;

pub use api::{resource_status, ResourceStatus};
pub use terminate::{ProcessTerminator, Terminator};
