//! Configuration types
//!
//! Timing parameters of the bridge. Capacities are compile-time constants
//! next to the buffers they size.

pub mod types;

pub use types::*;
