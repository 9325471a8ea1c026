//! Serial channel abstractions
//!
//! Two layers are described here:
//!
//! - [`SerialPort`] is the byte-oriented view the bridge logic works with:
//!   readiness queries plus blocking single-byte read/write.
//! - [`UsartControl`] is the register-level view of one USART peripheral that
//!   a buffered channel needs in order to arm interrupts and switch rates.
//! - [`InterruptQueue`] is what the receive and data-register-empty
//!   interrupt handlers push to and pull from.

/// Byte-oriented serial channel
///
/// Implementations are expected to be buffered: `read` and `write` only block
/// while the receive buffer is empty or the transmit buffer is full.
pub trait SerialPort {
    /// True iff at least one received byte is buffered
    fn is_rx_ready(&self) -> bool;

    /// True iff the transmit buffer has a free slot
    fn is_tx_ready(&self) -> bool;

    /// Dequeue the oldest received byte
    ///
    /// Blocks until a byte is available.
    fn read(&mut self) -> u8;

    /// Enqueue a byte for transmission
    ///
    /// Blocks until the transmit buffer has room.
    fn write(&mut self, byte: u8);

    /// Enable the transmitter and receiver
    fn enable(&mut self);

    /// Disable the transmitter and receiver
    fn disable(&mut self);

    /// Read a byte if one is buffered, without blocking
    fn try_read(&mut self) -> Option<u8> {
        if self.is_rx_ready() {
            Some(self.read())
        } else {
            None
        }
    }

    /// Write every byte of `data`, blocking as needed
    fn write_all(&mut self, data: &[u8]) {
        for &byte in data {
            self.write(byte);
        }
    }
}

/// Baud-rate divisor as programmed into the USART
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Divisor {
    /// 12-bit rate register value
    pub value: u16,
    /// Double-speed (divide-by-8) sampling selected
    pub double_speed: bool,
}

impl Divisor {
    /// Normal-speed divisor
    pub const fn normal(value: u16) -> Self {
        Self {
            value,
            double_speed: false,
        }
    }

    /// Double-speed divisor
    pub const fn doubled(value: u16) -> Self {
        Self {
            value,
            double_speed: true,
        }
    }
}

/// Register-level control of a single USART
///
/// Everything here is a plain register poke; callers are responsible for
/// sequencing (e.g. draining before a divisor change) and for masking
/// interrupts where that matters.
pub trait UsartControl {
    /// Hardware transmit-complete flag: shift register and data register empty
    fn is_tx_complete(&self) -> bool;

    /// Enable or disable the receiver
    fn set_rx_enabled(&mut self, enabled: bool);

    /// Enable or disable the transmitter
    fn set_tx_enabled(&mut self, enabled: bool);

    /// Program the rate registers
    fn set_divisor(&mut self, divisor: Divisor);

    /// Read back the programmed rate registers
    fn divisor(&self) -> Divisor;

    /// Arm the data-register-empty interrupt so queued bytes start draining
    fn arm_tx_interrupt(&mut self);
}

/// Byte queues a USART's interrupt handlers feed and drain
///
/// The chip drivers only see this trait, so handler bodies stay independent
/// of how and where the queues are stored.
pub trait InterruptQueue {
    /// Store a byte taken from the data register
    fn on_receive(&self, byte: u8);

    /// Next byte for the data register
    ///
    /// Returns the byte and whether more bytes remain queued. `None` means
    /// the queue is empty and the data-register-empty interrupt should be
    /// disarmed.
    fn on_transmit_ready(&self) -> Option<(u8, bool)>;
}
