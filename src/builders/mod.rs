//! Builders to construct governor components from configuration.

pub mod guard_builder;

pub use guard_builder::build_guard;
