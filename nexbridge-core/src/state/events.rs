//! Events that trigger state transitions

use crate::baud::RateIndex;
use crate::upload::RelayOutcome;

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Discovery events
    /// Display answered at this rate
    DisplayFound(RateIndex),
    /// Whole rate table tried without a usable answer
    DisplayNotFound,

    // Handshake events
    /// Tool sent connect and was answered
    HandshakeOk,
    /// No connect within the window
    HandshakeTimeout,

    // Upload events
    /// Tool asked to upload at this baud rate
    UploadRequested(u32),
    /// No upload command within the window
    UploadTimeout,
    /// Relay ended
    RelayFinished(RelayOutcome),

    // Housekeeping
    /// Both links are back at the display's rate
    RateRestored,
}

impl Event {
    /// Check if this event reports a failed wait
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Event::DisplayNotFound
                | Event::HandshakeTimeout
                | Event::UploadTimeout
                | Event::RelayFinished(RelayOutcome::Aborted)
        )
    }
}
