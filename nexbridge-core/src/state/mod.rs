//! State machine for the bridge cycle
//!
//! Defines the authoritative runtime behavior of the bridge.
//! The state machine is explicit, finite, and deterministic.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::State;
