//! Upload command detection and relay pump
//!
//! After the handshake the tool sends `whmi-wri <size>,<baud>,<x> FF FF FF`
//! and then streams the firmware image at `<baud>`. The bridge forwards the
//! command to the display as it parses it, moves both links to the new
//! rate, then pumps bytes in both directions until the host goes quiet.

use nexbridge_hal::{Clock, SerialPort};
use nexbridge_protocol::UploadParser;

use crate::baud::{RateIndex, RateSwitch};
use crate::config::BridgeConfig;
use crate::fmt::{debug, info};

/// Why no upload command was seen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UploadError {
    /// No complete upload command within the window
    Timeout,
}

/// How a relay ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RelayOutcome {
    /// At least one host byte was forwarded before the link went idle
    Completed,
    /// The host never sent anything at the new rate
    Aborted,
}

/// Result of a relay with transfer counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RelayReport {
    /// Whether any host data went through
    pub outcome: RelayOutcome,
    /// Rate both links ran at
    pub rate: RateIndex,
    /// Bytes forwarded host → display
    pub to_display: u32,
    /// Bytes forwarded display → host
    pub to_host: u32,
}

/// Wait for the upload command, bridging both links meanwhile
///
/// Every host byte is forwarded to the display as it is parsed, and display
/// output is forwarded back, so the command itself reaches the display at
/// the current rate. Returns the requested baud rate.
pub fn await_upload<H, D, C>(
    host: &mut H,
    display: &mut D,
    clock: &C,
    timeout_ms: u32,
) -> Result<u32, UploadError>
where
    H: SerialPort,
    D: SerialPort,
    C: Clock,
{
    let deadline = clock.deadline(timeout_ms);
    let mut parser = UploadParser::new();

    while !deadline.is_expired(clock) {
        if let Some(byte) = display.try_read() {
            host.write(byte);
        }
        if let Some(byte) = host.try_read() {
            display.write(byte);
            if let Some(baud) = parser.feed(byte) {
                info!("upload requested at {} baud", baud);
                return Ok(baud);
            }
        }
    }

    debug!("no upload command within {} ms", timeout_ms);
    Err(UploadError::Timeout)
}

/// Switch both links to `requested_baud` and relay until the host goes idle
///
/// Rates not in the table fall back to the first entry.
pub fn pump<H, D, C>(
    host: &mut H,
    display: &mut D,
    clock: &C,
    config: &BridgeConfig,
    requested_baud: u32,
) -> RelayReport
where
    H: SerialPort + RateSwitch,
    D: SerialPort + RateSwitch,
    C: Clock,
{
    let rate = RateIndex::resolve(requested_baud);
    host.switch_rate(rate.rate());
    display.switch_rate(rate.rate());
    info!("relaying at {} baud", rate.baud());

    relay(host, display, clock, config, rate)
}

/// Forward bytes both ways until the host has been idle long enough
///
/// The clock is only read once per `idle_check_interval` iterations without
/// a host byte, keeping the hot path free of critical sections. The first
/// check after host activity restarts the idle window; a later check that
/// finds the window exceeded ends the relay.
fn relay<H, D, C>(
    host: &mut H,
    display: &mut D,
    clock: &C,
    config: &BridgeConfig,
    rate: RateIndex,
) -> RelayReport
where
    H: SerialPort,
    D: SerialPort,
    C: Clock,
{
    let mut report = RelayReport {
        outcome: RelayOutcome::Aborted,
        rate,
        to_display: 0,
        to_host: 0,
    };
    let mut window_start = clock.now_ms();
    let mut active = false;
    let mut idle: u16 = 0;

    loop {
        if let Some(byte) = host.try_read() {
            display.write(byte);
            report.to_display = report.to_display.wrapping_add(1);
            report.outcome = RelayOutcome::Completed;
            active = true;
            idle = 0;
        } else {
            idle += 1;
        }

        if let Some(byte) = display.try_read() {
            host.write(byte);
            report.to_host = report.to_host.wrapping_add(1);
        }

        if idle >= config.idle_check_interval {
            idle = 0;
            let now = clock.now_ms();
            if active {
                active = false;
                window_start = now;
            } else if now.saturating_sub(window_start) > u64::from(config.relay_idle_timeout_ms) {
                break;
            }
        }
    }

    info!(
        "relay finished: {} bytes to display, {} to host",
        report.to_display,
        report.to_host
    );
    report
}
