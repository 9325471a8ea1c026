//! Nexbridge Hardware Abstraction Layer
//!
//! This crate defines the hardware seams of the bridge so the relay logic
//! can run against real USARTs on the target and against simulated ports
//! on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  nexbridge-core (bridge logic)          │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  nexbridge-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ nexbridge-hal-│       │  host test    │
//! │   atmega2560  │       │  simulations  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::SerialPort`] - Buffered byte channel
//! - [`uart::UsartControl`] - USART registers (rate, enables, TX interrupt)
//! - [`uart::InterruptQueue`] - Queues behind the USART interrupt handlers
//! - [`clock::Clock`] - Millisecond time source
//! - [`gpio::OutputPin`] - Digital output

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod gpio;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use clock::{Clock, Deadline};
pub use gpio::{NoPin, OutputPin};
pub use uart::{Divisor, InterruptQueue, SerialPort, UsartControl};
