//! Board-agnostic core logic for the display upload bridge
//!
//! This crate contains all bridge logic that does not depend on specific
//! hardware:
//!
//! - Interrupt-fed serial queues and the channel built on them
//! - Millisecond tick counter
//! - Baud rate table and drain-then-switch rate changes
//! - Display discovery, connect handshake and upload relay
//! - State machine and the controller that drives it
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

mod fmt;

pub mod baud;
pub mod bridge;
pub mod clock;
pub mod config;
pub mod discovery;
pub mod handshake;
pub mod serial;
pub mod state;
pub mod upload;

pub use baud::{BaudRate, RateIndex, RateSwitch, BAUD_TABLE};
pub use bridge::Bridge;
pub use clock::TickCounter;
pub use config::{BridgeConfig, ConfigError};
pub use discovery::{discover, DiscoveryError};
pub use handshake::{wait_for_connect, ListenError};
pub use serial::{Port, SerialChannel, SharedPort};
pub use state::{Event, State};
pub use upload::{await_upload, pump, RelayOutcome, RelayReport, UploadError};
