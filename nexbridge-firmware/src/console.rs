//! Debug console on a spare USART
//!
//! Plain text via `ufmt`; there is no debug probe on this target.

use core::convert::Infallible;

use nexbridge_core::{RelayOutcome, State};
use nexbridge_hal::SerialPort;

/// `ufmt` writer over a serial port
pub struct Console<P> {
    port: P,
}

impl<P: SerialPort> Console<P> {
    pub fn new(port: P) -> Self {
        Self { port }
    }
}

impl<P: SerialPort> ufmt::uWrite for Console<P> {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Infallible> {
        self.port.write_all(s.as_bytes());
        Ok(())
    }
}

/// Short name of a bridge state
pub fn state_name(state: State) -> &'static str {
    match state {
        State::Probing => "probing",
        State::Listening(_) => "listening",
        State::AwaitingUpload(_) => "awaiting upload",
        State::Relaying { .. } => "relaying",
        State::RestoreRate(_) => "restoring rate",
    }
}

pub fn outcome_name(outcome: RelayOutcome) -> &'static str {
    match outcome {
        RelayOutcome::Completed => "completed",
        RelayOutcome::Aborted => "aborted",
    }
}
