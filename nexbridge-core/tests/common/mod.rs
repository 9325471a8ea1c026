//! Simulated serial bus for integration tests
//!
//! Time is counted in microseconds and only moves when the code under test
//! polls a port or delays, so every timeout ends deterministically.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use nexbridge_core::{BaudRate, RateSwitch};
use nexbridge_hal::{Clock, SerialPort};

/// Simulated time charged for each port poll
pub const POLL_COST_US: u64 = 5;

/// Delay between a write and the simulated peer's reply
pub const REPLY_LATENCY_US: u64 = 1_000;

/// Microsecond clock shared by every simulated port
#[derive(Clone, Default)]
pub struct SimClock(Rc<Cell<u64>>);

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_us(&self) -> u64 {
        self.0.get()
    }

    pub fn advance_us(&self, us: u64) {
        self.0.set(self.0.get() + us);
    }
}

impl Clock for SimClock {
    fn now_ms(&self) -> u64 {
        self.0.get() / 1_000
    }

    fn delay_ms(&self, ms: u32) {
        self.advance_us(u64::from(ms) * 1_000);
    }
}

/// Peer reaction to bytes written: gets everything sent so far and the
/// current baud rate, may answer with bytes
pub type Responder = Box<dyn FnMut(&[u8], u32) -> Option<Vec<u8>>>;

/// One end of a simulated link
pub struct SimPort {
    clock: SimClock,
    inbound: VecDeque<(u64, u8)>,
    pub sent: Vec<u8>,
    pub rates: Vec<u32>,
    baud: u32,
    enabled: bool,
    responder: Option<Responder>,
}

impl SimPort {
    pub fn new(clock: &SimClock) -> Self {
        Self {
            clock: clock.clone(),
            inbound: VecDeque::new(),
            sent: Vec::new(),
            rates: Vec::new(),
            baud: 9600,
            enabled: true,
            responder: None,
        }
    }

    /// Port whose peer answers writes through `responder`
    pub fn with_responder(clock: &SimClock, responder: Responder) -> Self {
        let mut port = Self::new(clock);
        port.responder = Some(responder);
        port
    }

    pub fn baud(&self) -> u32 {
        self.baud
    }

    /// Schedule `data` to arrive at an absolute time
    pub fn feed_at(&mut self, at_us: u64, data: &[u8]) {
        for &byte in data {
            self.inbound.push_back((at_us, byte));
        }
    }

    /// Make `data` available immediately
    pub fn feed_now(&mut self, data: &[u8]) {
        let now = self.clock.now_us();
        self.feed_at(now, data);
    }

    /// Schedule `data` one byte every `spacing_us`, starting at `start_us`
    pub fn feed_spaced(&mut self, start_us: u64, spacing_us: u64, data: &[u8]) {
        for (i, &byte) in data.iter().enumerate() {
            self.inbound.push_back((start_us + i as u64 * spacing_us, byte));
        }
    }

    /// Bytes not yet read
    pub fn pending(&self) -> usize {
        self.inbound.len()
    }

    /// Arrival time of the last scheduled byte
    pub fn last_arrival_us(&self) -> Option<u64> {
        self.inbound.back().map(|&(at, _)| at)
    }

    fn arrived(&self) -> bool {
        self.inbound
            .front()
            .is_some_and(|&(at, _)| at <= self.clock.now_us())
    }
}

impl SerialPort for SimPort {
    fn is_rx_ready(&self) -> bool {
        self.clock.advance_us(POLL_COST_US);
        self.arrived()
    }

    fn is_tx_ready(&self) -> bool {
        true
    }

    fn read(&mut self) -> u8 {
        assert!(!self.inbound.is_empty(), "blocking read with nothing scheduled");
        loop {
            if let Some(byte) = self.try_read() {
                return byte;
            }
        }
    }

    fn try_read(&mut self) -> Option<u8> {
        self.clock.advance_us(POLL_COST_US);
        if self.arrived() {
            self.inbound.pop_front().map(|(_, byte)| byte)
        } else {
            None
        }
    }

    fn write(&mut self, byte: u8) {
        self.sent.push(byte);
        let baud = self.baud;
        if let Some(responder) = self.responder.as_mut() {
            if let Some(reply) = responder(&self.sent, baud) {
                let at = self.clock.now_us() + REPLY_LATENCY_US;
                for byte in reply {
                    self.inbound.push_back((at, byte));
                }
            }
        }
    }

    fn enable(&mut self) {
        self.enabled = true;
    }

    fn disable(&mut self) {
        self.enabled = false;
    }
}

impl RateSwitch for SimPort {
    fn switch_rate(&mut self, rate: BaudRate) {
        self.baud = rate.baud;
        self.rates.push(rate.baud);
    }
}

/// Display answer used across tests
pub const DISPLAY_REPLY: &[u8] =
    b"comok 1,30601-0,NX4832T035_011R,130,61488,DE6064B7E70C6521,16777216\xff\xff\xff";

/// Signature kept from [`DISPLAY_REPLY`]
pub fn display_signature() -> &'static [u8] {
    &DISPLAY_REPLY[..DISPLAY_REPLY.len() - 2]
}

/// Display that answers discovery frames only at `baud`
pub fn display_at(clock: &SimClock, baud: u32) -> SimPort {
    display_replying(clock, baud, DISPLAY_REPLY.to_vec())
}

/// Display that answers discovery frames at `baud` with `reply`
pub fn display_replying(clock: &SimClock, baud: u32, reply: Vec<u8>) -> SimPort {
    SimPort::with_responder(
        clock,
        Box::new(move |sent, current| {
            (current == baud && sent.ends_with(nexbridge_protocol::DISCOVERY_FRAME))
                .then(|| reply.clone())
        }),
    )
}

/// Status indicator that records every level it was driven to
#[derive(Default)]
pub struct RecordingLed {
    pub level: bool,
    pub history: RefCell<Vec<bool>>,
}

impl nexbridge_hal::OutputPin for RecordingLed {
    fn set_high(&mut self) {
        self.level = true;
        self.history.borrow_mut().push(true);
    }

    fn set_low(&mut self) {
        self.level = false;
        self.history.borrow_mut().push(false);
    }

    fn is_set_high(&self) -> bool {
        self.level
    }
}
