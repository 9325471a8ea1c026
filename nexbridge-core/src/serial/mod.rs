//! Interrupt-driven serial channels
//!
//! - [`RingBuffer`] - power-of-two circular byte queue
//! - [`SharedPort`] - RX/TX queues shared with interrupt handlers
//! - [`SerialChannel`] - main-loop side, implements [`nexbridge_hal::SerialPort`]

pub mod channel;
pub mod port;
pub mod ring;

pub use channel::SerialChannel;
pub use port::SharedPort;
pub use ring::RingBuffer;

/// Receive queue capacity per port
pub const RX_CAPACITY: usize = 64;

/// Transmit queue capacity per port
pub const TX_CAPACITY: usize = 64;

/// Shared port with the default queue capacities
pub type Port = SharedPort<RX_CAPACITY, TX_CAPACITY>;
