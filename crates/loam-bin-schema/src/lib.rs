//! Shared types for loam-bin: target triples and the platform resolver.

pub mod platform;

pub use platform::*;
