//! ATmega2560-specific HAL for the serial bridge
//!
//! This crate provides ATmega2560 implementations of the shared
//! `nexbridge-hal` traits:
//!
//! - USART0..3 register control and interrupt service helpers
//! - Timer/Counter 1 millisecond tick
//! - Status LED on PB7
//!
//! Registers are reached through the `avr-device` peripheral singletons.
//! Each driver consumes its singleton, so only one handle per peripheral
//! can exist.

#![no_std]

pub mod gpio;
pub mod timer;
pub mod usart;

pub use gpio::StatusLed;
pub use timer::TickTimer;
pub use usart::{Usart0, Usart1, Usart2, Usart3};

/// CPU clock of the board in Hz
pub const CPU_HZ: u32 = 16_000_000;
