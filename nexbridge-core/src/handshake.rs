//! Authoring-tool handshake
//!
//! The tool opens a session by sending `connect FF FF FF` and expects the
//! display's identification back. The bridge answers on the display's
//! behalf with the signature captured during discovery.

use nexbridge_hal::{Clock, SerialPort};
use nexbridge_protocol::{Signature, TokenMatcher, CONNECT_ACK, CONNECT_TOKEN};

use crate::fmt::{debug, info};

/// Why the handshake did not complete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ListenError {
    /// No connect token within the window
    Timeout,
}

/// Wait for the connect token on the host link and answer it
///
/// On a match the acknowledgement and then the stored signature are queued
/// on `host`.
pub fn wait_for_connect<H, C>(
    host: &mut H,
    clock: &C,
    timeout_ms: u32,
    signature: &Signature,
) -> Result<(), ListenError>
where
    H: SerialPort,
    C: Clock,
{
    let deadline = clock.deadline(timeout_ms);
    let mut matcher = TokenMatcher::new(CONNECT_TOKEN);

    while !deadline.is_expired(clock) {
        let Some(byte) = host.try_read() else {
            continue;
        };
        if matcher.feed(byte) {
            host.write_all(&CONNECT_ACK);
            host.write_all(signature.as_bytes());
            info!("host connected");
            return Ok(());
        }
    }

    debug!("no handshake within {} ms", timeout_ms);
    Err(ListenError::Timeout)
}
