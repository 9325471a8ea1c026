//! USART register control
//!
//! The four USARTs share one register layout, so the drivers are generated
//! by [`usart!`]. Each driver implements [`UsartControl`] for the main loop
//! and has associated functions for the receive-complete and
//! data-register-empty interrupt handlers, which cannot own the driver.
//!
//! Frames are always 8N1. Receive interrupts stay armed while the receiver
//! is enabled; the data-register-empty interrupt is armed whenever bytes are
//! queued and disarms itself once the queue runs dry.

use nexbridge_hal::{Divisor, InterruptQueue, UsartControl};

/// UCSRnA: transmit complete, cleared by writing one
const TXC: u8 = 1 << 6;
/// UCSRnA: double-speed sampling
const U2X: u8 = 1 << 1;
/// UCSRnA: multi-processor mode
const MPCM: u8 = 1 << 0;
/// UCSRnA bits that keep their value on write; the error flags must be
/// written as zero
const UCSRA_KEEP: u8 = U2X | MPCM;

/// UCSRnB: receive complete interrupt enable
const RXCIE: u8 = 1 << 7;
/// UCSRnB: data register empty interrupt enable
const UDRIE: u8 = 1 << 5;
/// UCSRnB: receiver enable
const RXEN: u8 = 1 << 4;
/// UCSRnB: transmitter enable
const TXEN: u8 = 1 << 3;

/// UCSRnC: asynchronous, no parity, one stop bit, eight data bits
const FRAME_8N1: u8 = 0b0000_0110;

macro_rules! usart {
    ($name:ident, $periph:ident, $udr:ident, $ucsra:ident, $ucsrb:ident, $ucsrc:ident, $ubrr:ident) => {
        #[doc = concat!("Driver for ", stringify!($periph))]
        pub struct $name {
            usart: avr_device::atmega2560::$periph,
            /// Set once anything was queued; TXC is meaningless before
            sent: bool,
        }

        impl $name {
            /// Configure 8N1 at `divisor` with receiver and transmitter on
            pub fn new(usart: avr_device::atmega2560::$periph, divisor: Divisor) -> Self {
                let mut this = Self { usart, sent: false };
                this.usart.$ucsrc.write(|w| unsafe { w.bits(FRAME_8N1) });
                this.set_divisor(divisor);
                this.set_rx_enabled(true);
                this.set_tx_enabled(true);
                this
            }

            fn regs() -> &'static <avr_device::atmega2560::$periph as core::ops::Deref>::Target {
                // SAFETY: the handlers only touch UDR, TXC and UDRIE, and the
                // main loop changes UCSRnB inside critical sections
                unsafe { &*avr_device::atmega2560::$periph::ptr() }
            }

            /// Receive-complete handler body
            pub fn on_receive<Q: InterruptQueue + ?Sized>(queue: &Q) {
                let byte = Self::regs().$udr.read().bits();
                queue.on_receive(byte);
            }

            /// Data-register-empty handler body
            pub fn on_data_register_empty<Q: InterruptQueue + ?Sized>(queue: &Q) {
                let regs = Self::regs();
                let more = match queue.on_transmit_ready() {
                    Some((byte, more)) => {
                        // TXC must only report the frame being loaded now
                        regs.$ucsra
                            .modify(|r, w| unsafe { w.bits((r.bits() & UCSRA_KEEP) | TXC) });
                        regs.$udr.write(|w| unsafe { w.bits(byte) });
                        more
                    }
                    None => false,
                };
                if !more {
                    regs.$ucsrb
                        .modify(|r, w| unsafe { w.bits(r.bits() & !UDRIE) });
                }
            }
        }

        impl UsartControl for $name {
            fn is_tx_complete(&self) -> bool {
                !self.sent || self.usart.$ucsra.read().bits() & TXC != 0
            }

            fn set_rx_enabled(&mut self, enabled: bool) {
                let usart = &self.usart;
                critical_section::with(|_| {
                    usart.$ucsrb.modify(|r, w| {
                        let bits = if enabled {
                            r.bits() | RXEN | RXCIE
                        } else {
                            r.bits() & !(RXEN | RXCIE)
                        };
                        unsafe { w.bits(bits) }
                    });
                });
            }

            fn set_tx_enabled(&mut self, enabled: bool) {
                let usart = &self.usart;
                critical_section::with(|_| {
                    usart.$ucsrb.modify(|r, w| {
                        let bits = if enabled {
                            r.bits() | TXEN
                        } else {
                            r.bits() & !(TXEN | UDRIE)
                        };
                        unsafe { w.bits(bits) }
                    });
                });
            }

            fn set_divisor(&mut self, divisor: Divisor) {
                self.usart.$ubrr.write(|w| unsafe { w.bits(divisor.value) });
                // Writing zero to TXC leaves it alone
                let speed = if divisor.double_speed { U2X } else { 0 };
                self.usart
                    .$ucsra
                    .modify(|r, w| unsafe { w.bits((r.bits() & MPCM) | speed) });
            }

            fn divisor(&self) -> Divisor {
                let value = self.usart.$ubrr.read().bits();
                if self.usart.$ucsra.read().bits() & U2X != 0 {
                    Divisor::doubled(value)
                } else {
                    Divisor::normal(value)
                }
            }

            fn arm_tx_interrupt(&mut self) {
                self.sent = true;
                let usart = &self.usart;
                critical_section::with(|_| {
                    usart.$ucsrb.modify(|r, w| unsafe { w.bits(r.bits() | UDRIE) });
                });
            }
        }
    };
}

usart!(Usart0, USART0, udr0, ucsr0a, ucsr0b, ucsr0c, ubrr0);
usart!(Usart1, USART1, udr1, ucsr1a, ucsr1b, ucsr1c, ubrr1);
usart!(Usart2, USART2, udr2, ucsr2a, ucsr2b, ucsr2c, ubrr2);
usart!(Usart3, USART3, udr3, ucsr3a, ucsr3b, ucsr3c, ubrr3);
