//! Display discovery (autobaud probe)
//!
//! The display's current rate is unknown at power-up. Discovery walks the
//! rate table, sends the discovery frame at each rate and looks for a
//! `comok … FF FF FF` reply in whatever comes back within the probe window.

use heapless::Vec;
use nexbridge_hal::{Clock, SerialPort};
use nexbridge_protocol::{Signature, SignatureError, DISCOVERY_FRAME};

use crate::baud::{RateIndex, RateSwitch};
use crate::config::BridgeConfig;
use crate::fmt::{debug, info, warn};

/// Bytes of display reply kept per probed rate
pub const RESPONSE_CAPACITY: usize = 256;

/// Why discovery produced no rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DiscoveryError {
    /// No rate in the table produced a complete signature
    NotFound,
    /// A signature was found but is too long to store
    SignatureTooLong {
        /// Rate at which it was found
        rate: RateIndex,
        /// Length of the rejected signature
        len: usize,
    },
}

/// Find the display's rate and capture its signature
///
/// Leaves `display` at the returned rate. `signature` is cleared first and
/// only filled on success.
pub fn discover<D, C>(
    display: &mut D,
    clock: &C,
    config: &BridgeConfig,
    signature: &mut Signature,
) -> Result<RateIndex, DiscoveryError>
where
    D: SerialPort + RateSwitch,
    C: Clock,
{
    signature.clear();
    let mut response: Vec<u8, RESPONSE_CAPACITY> = Vec::new();

    for index in RateIndex::all() {
        response.clear();
        debug!("probing display at {} baud", index.baud());

        display.switch_rate(index.rate());
        clock.delay_ms(config.settle_ms);
        // Anything already queued was framed at the previous rate
        while display.try_read().is_some() {}

        for &byte in DISCOVERY_FRAME {
            display.write(byte);
            collect(display, &mut response);
        }
        for _ in 0..config.probe_window_ms {
            collect(display, &mut response);
            clock.delay_ms(1);
        }
        collect(display, &mut response);

        match signature.capture(&response) {
            Ok(()) => {
                info!(
                    "display found at {} baud, signature {} bytes",
                    index.baud(),
                    signature.len()
                );
                return Ok(index);
            }
            Err(SignatureError::TooLong { len }) => {
                warn!("display signature too long ({} bytes)", len);
                return Err(DiscoveryError::SignatureTooLong { rate: index, len });
            }
            Err(SignatureError::NotFound) => {}
        }
    }

    debug!("no display answered");
    Err(DiscoveryError::NotFound)
}

/// Move everything the display has sent so far into `response`
///
/// Bytes beyond the response capacity are read and dropped.
fn collect<D: SerialPort>(display: &mut D, response: &mut Vec<u8, RESPONSE_CAPACITY>) {
    while let Some(byte) = display.try_read() {
        let _ = response.push(byte);
    }
}
