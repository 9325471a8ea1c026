//! Buffered serial channel
//!
//! Couples the interrupt-fed queues of a [`SharedPort`] with the USART
//! registers behind it. This is what the bridge logic sees as a
//! [`SerialPort`].

use nexbridge_hal::{Clock, SerialPort, UsartControl};

use super::port::SharedPort;
use crate::baud::{BaudRate, RateSwitch};

/// Main-loop handle of one buffered USART
pub struct SerialChannel<'a, U, const RX: usize, const TX: usize> {
    port: &'a SharedPort<RX, TX>,
    usart: U,
}

impl<'a, U: UsartControl, const RX: usize, const TX: usize> SerialChannel<'a, U, RX, TX> {
    /// Wrap the queues and registers of one USART
    pub fn new(port: &'a SharedPort<RX, TX>, usart: U) -> Self {
        Self { port, usart }
    }

    /// USART registers of this channel
    pub fn usart(&self) -> &U {
        &self.usart
    }

    /// Read a byte, giving up after `timeout_ms`
    pub fn read_within<C: Clock>(&mut self, clock: &C, timeout_ms: u32) -> Option<u8> {
        let deadline = clock.deadline(timeout_ms);
        loop {
            if let Some(byte) = self.port.pop_rx() {
                return Some(byte);
            }
            if deadline.is_expired(clock) {
                return None;
            }
            core::hint::spin_loop();
        }
    }

    /// True once the queue is empty and the last frame has left the wire
    pub fn is_drained(&self) -> bool {
        self.port.tx_len() == 0 && self.usart.is_tx_complete()
    }
}

impl<U: UsartControl, const RX: usize, const TX: usize> SerialPort
    for SerialChannel<'_, U, RX, TX>
{
    fn is_rx_ready(&self) -> bool {
        self.port.rx_len() != 0
    }

    fn is_tx_ready(&self) -> bool {
        self.port.tx_has_room()
    }

    fn read(&mut self) -> u8 {
        loop {
            if let Some(byte) = self.port.pop_rx() {
                return byte;
            }
            core::hint::spin_loop();
        }
    }

    fn write(&mut self, byte: u8) {
        while self.port.push_tx(byte).is_err() {
            core::hint::spin_loop();
        }
        self.usart.arm_tx_interrupt();
    }

    fn enable(&mut self) {
        self.usart.set_rx_enabled(true);
        self.usart.set_tx_enabled(true);
    }

    fn disable(&mut self) {
        self.usart.set_rx_enabled(false);
        self.usart.set_tx_enabled(false);
    }

    fn try_read(&mut self) -> Option<u8> {
        self.port.pop_rx()
    }
}

impl<U: UsartControl, const RX: usize, const TX: usize> RateSwitch
    for SerialChannel<'_, U, RX, TX>
{
    fn switch_rate(&mut self, rate: BaudRate) {
        while !self.is_drained() {
            core::hint::spin_loop();
        }

        let usart = &mut self.usart;
        critical_section::with(|_| {
            usart.set_rx_enabled(false);
            usart.set_tx_enabled(false);
            usart.set_divisor(rate.programmed());
            usart.set_rx_enabled(true);
            usart.set_tx_enabled(true);
        });
    }
}
