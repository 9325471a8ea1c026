//! Status LED
//!
//! The Mega 2560 board has its user LED on PB7.

use avr_device::atmega2560::PORTB;
use nexbridge_hal::OutputPin;

const LED_MASK: u8 = 1 << 7;

/// On-board LED driven as a push-pull output
pub struct StatusLed {
    port: PORTB,
}

impl StatusLed {
    /// Configure PB7 as an output, initially low
    pub fn new(port: PORTB) -> Self {
        port.portb
            .modify(|r, w| unsafe { w.bits(r.bits() & !LED_MASK) });
        port.ddrb
            .modify(|r, w| unsafe { w.bits(r.bits() | LED_MASK) });
        Self { port }
    }
}

impl OutputPin for StatusLed {
    fn set_high(&mut self) {
        self.port
            .portb
            .modify(|r, w| unsafe { w.bits(r.bits() | LED_MASK) });
    }

    fn set_low(&mut self) {
        self.port
            .portb
            .modify(|r, w| unsafe { w.bits(r.bits() & !LED_MASK) });
    }

    fn is_set_high(&self) -> bool {
        self.port.portb.read().bits() & LED_MASK != 0
    }
}
