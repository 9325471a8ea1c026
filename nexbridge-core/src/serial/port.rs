//! Port state shared between interrupt handlers and the main loop
//!
//! The receive interrupt produces into `rx` and the main loop consumes; the
//! main loop produces into `tx` and the data-register-empty interrupt
//! consumes. Every access goes through a critical section, so the element
//! counts can never be torn by an interrupt landing mid-update.

use core::cell::RefCell;

use critical_section::Mutex;
use nexbridge_hal::InterruptQueue;

use super::ring::RingBuffer;

/// Ring buffers of one USART
#[derive(Debug)]
struct PortBuffers<const RX: usize, const TX: usize> {
    rx: RingBuffer<RX>,
    tx: RingBuffer<TX>,
    /// Received bytes dropped because `rx` was full
    overruns: u32,
}

/// Interrupt-safe receive and transmit queues for one USART
///
/// Intended to live in a `static` so interrupt handlers can reach it.
pub struct SharedPort<const RX: usize, const TX: usize> {
    inner: Mutex<RefCell<PortBuffers<RX, TX>>>,
}

impl<const RX: usize, const TX: usize> Default for SharedPort<RX, TX> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const RX: usize, const TX: usize> SharedPort<RX, TX> {
    /// Create empty queues
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(PortBuffers {
                rx: RingBuffer::new(),
                tx: RingBuffer::new(),
                overruns: 0,
            })),
        }
    }

    fn with<R>(&self, f: impl FnOnce(&mut PortBuffers<RX, TX>) -> R) -> R {
        critical_section::with(|cs| f(&mut self.inner.borrow_ref_mut(cs)))
    }

    /// Dequeue a received byte
    pub fn pop_rx(&self) -> Option<u8> {
        self.with(|p| p.rx.pop())
    }

    /// Queue a byte for transmission
    ///
    /// Returns the byte back if the transmit queue is full.
    pub fn push_tx(&self, byte: u8) -> Result<(), u8> {
        self.with(|p| p.tx.push(byte))
    }

    /// Number of received bytes waiting
    pub fn rx_len(&self) -> usize {
        self.with(|p| p.rx.len())
    }

    /// Number of bytes waiting to be transmitted
    pub fn tx_len(&self) -> usize {
        self.with(|p| p.tx.len())
    }

    /// True if the transmit queue has room
    pub fn tx_has_room(&self) -> bool {
        self.with(|p| !p.tx.is_full())
    }

    /// Received bytes dropped so far
    pub fn overruns(&self) -> u32 {
        self.with(|p| p.overruns)
    }

    /// Drop everything waiting in the receive queue
    pub fn flush_rx(&self) {
        self.with(|p| p.rx.clear());
    }
}

impl<const RX: usize, const TX: usize> InterruptQueue for SharedPort<RX, TX> {
    /// A full receive queue drops the byte and counts an overrun; that data
    /// loss is accepted rather than reported.
    fn on_receive(&self, byte: u8) {
        self.with(|p| {
            if p.rx.push(byte).is_err() {
                p.overruns = p.overruns.wrapping_add(1);
            }
        });
    }

    fn on_transmit_ready(&self) -> Option<(u8, bool)> {
        self.with(|p| p.tx.pop().map(|byte| (byte, !p.tx.is_empty())))
    }
}
