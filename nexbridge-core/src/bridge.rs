//! Bridge controller driving the state machine
//!
//! The controller owns both links and runs one blocking operation per
//! [`Bridge::step`]:
//! - Probing: discover the display and capture its signature
//! - Listening: answer the tool's connect handshake
//! - AwaitingUpload: bridge both links until the upload command
//! - Relaying: pump the upload at the requested rate
//! - RestoreRate: put both links back to the display's rate

use nexbridge_hal::{Clock, OutputPin, SerialPort};
use nexbridge_protocol::Signature;

use crate::baud::{RateIndex, RateSwitch};
use crate::config::BridgeConfig;
use crate::discovery::{self, DiscoveryError};
use crate::fmt::{debug, info};
use crate::handshake;
use crate::state::{Event, State};
use crate::upload::{self, RelayReport};

/// Runs the discovery → handshake → upload cycle over two links
pub struct Bridge<'c, H, D, C, L> {
    /// Link to the authoring tool
    host: H,
    /// Link to the display
    display: D,
    clock: &'c C,
    /// Lit while a display signature is held
    led: L,
    config: BridgeConfig,
    state: State,
    signature: Signature,
    last_relay: Option<RelayReport>,
}

impl<'c, H, D, C, L> Bridge<'c, H, D, C, L>
where
    H: SerialPort + RateSwitch,
    D: SerialPort + RateSwitch,
    C: Clock,
    L: OutputPin,
{
    /// Create a bridge in the probing state
    pub fn new(host: H, display: D, clock: &'c C, led: L, config: BridgeConfig) -> Self {
        Self {
            host,
            display,
            clock,
            led,
            config,
            state: State::Probing,
            signature: Signature::new(),
            last_relay: None,
        }
    }

    /// Get current state
    pub fn state(&self) -> State {
        self.state
    }

    /// Signature captured by the last successful discovery
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Counters from the most recent relay
    pub fn last_relay(&self) -> Option<RelayReport> {
        self.last_relay
    }

    /// Get the active configuration
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Get the host link
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Get the display link
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Get the status indicator
    pub fn led(&self) -> &L {
        &self.led
    }

    /// Split back into the owned parts
    pub fn release(self) -> (H, D, L) {
        (self.host, self.display, self.led)
    }

    /// Run the operation for the current state and advance
    ///
    /// Returns the new state.
    pub fn step(&mut self) -> State {
        let event = match self.state {
            State::Probing => self.probe(),
            State::Listening(_) => self.listen(),
            State::AwaitingUpload(_) => self.await_upload(),
            State::Relaying { upload_baud, .. } => self.relay(upload_baud),
            State::RestoreRate(rate) => self.restore(rate),
        };

        self.transition(event);
        self.state
    }

    /// Step forever
    pub fn run(&mut self) -> ! {
        loop {
            self.step();
        }
    }

    fn probe(&mut self) -> Event {
        let result = discovery::discover(
            &mut self.display,
            self.clock,
            &self.config,
            &mut self.signature,
        );
        self.led.set_state(!self.signature.is_empty());

        match result {
            Ok(rate) => {
                self.host.switch_rate(rate.rate());
                Event::DisplayFound(rate)
            }
            // An oversized signature cannot be replayed, so keep probing
            Err(DiscoveryError::SignatureTooLong { .. } | DiscoveryError::NotFound) => {
                Event::DisplayNotFound
            }
        }
    }

    fn listen(&mut self) -> Event {
        match handshake::wait_for_connect(
            &mut self.host,
            self.clock,
            self.config.handshake_timeout_ms,
            &self.signature,
        ) {
            Ok(()) => Event::HandshakeOk,
            Err(_) => Event::HandshakeTimeout,
        }
    }

    fn await_upload(&mut self) -> Event {
        match upload::await_upload(
            &mut self.host,
            &mut self.display,
            self.clock,
            self.config.upload_timeout_ms,
        ) {
            Ok(baud) => Event::UploadRequested(baud),
            Err(_) => Event::UploadTimeout,
        }
    }

    fn relay(&mut self, upload_baud: u32) -> Event {
        let report = upload::pump(
            &mut self.host,
            &mut self.display,
            self.clock,
            &self.config,
            upload_baud,
        );
        self.last_relay = Some(report);
        Event::RelayFinished(report.outcome)
    }

    fn restore(&mut self, rate: RateIndex) -> Event {
        self.host.switch_rate(rate.rate());
        self.display.switch_rate(rate.rate());
        info!("links restored to {} baud", rate.baud());
        Event::RateRestored
    }

    /// Perform a state transition
    fn transition(&mut self, event: Event) {
        let old_state = self.state;
        self.state = self.state.transition(event);

        if event.is_failure() {
            debug!("{:?} in {:?}", event, old_state);
        }
        if old_state != self.state {
            debug!("state {:?} -> {:?}", old_state, self.state);
        }
    }
}
