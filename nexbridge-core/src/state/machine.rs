//! State machine definition
//!
//! The bridge cycles through probing, handshake, upload wait and relay. No
//! state is terminal: every failure leads back to an earlier state.

use super::events::Event;
use crate::baud::RateIndex;

/// Bridge states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Searching the rate table for the display
    Probing,
    /// Display found; waiting for the tool's connect handshake
    Listening(RateIndex),
    /// Handshake done; waiting for the upload command
    AwaitingUpload(RateIndex),
    /// Passing the upload through at the requested rate
    Relaying {
        /// Rate the display was discovered at
        display: RateIndex,
        /// Rate the tool asked for
        upload_baud: u32,
    },
    /// Putting both links back to the display's own rate
    RestoreRate(RateIndex),
}

impl State {
    /// Process an event and return the next state
    ///
    /// This is the core state transition logic.
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use State::*;

        match (self, event) {
            // Probing retries until the display answers
            (Probing, DisplayFound(rate)) => Listening(rate),
            (Probing, DisplayNotFound) => Probing,

            // A missed handshake re-probes in case the display changed rate
            (Listening(rate), HandshakeOk) => AwaitingUpload(rate),
            (Listening(_), HandshakeTimeout) => Probing,

            // A missed upload command re-listens at the same rate
            (AwaitingUpload(display), UploadRequested(upload_baud)) => Relaying {
                display,
                upload_baud,
            },
            (AwaitingUpload(rate), UploadTimeout) => Listening(rate),

            // Rates are restored whatever the relay outcome
            (Relaying { display, .. }, RelayFinished(_)) => RestoreRate(display),

            (RestoreRate(_), RateRestored) => Probing,

            // Default: stay in current state
            _ => self,
        }
    }
}
