//! Configuration type definitions
//!
//! All windows are in milliseconds of the tick clock unless noted.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Errors from validating a configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Probe window of zero would never collect a response
    ZeroProbeWindow,
    /// Handshake window of zero would never see the connect token
    ZeroHandshakeTimeout,
    /// Upload window of zero would never see the upload command
    ZeroUploadTimeout,
    /// Relay idle timeout of zero would end every relay immediately
    ZeroRelayTimeout,
    /// Idle check interval must be at least one iteration
    ZeroIdleCheckInterval,
}

/// Bridge timing configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BridgeConfig {
    /// Pause after switching the display link before probing
    pub settle_ms: u32,
    /// How long to collect the display's reply per probed rate
    pub probe_window_ms: u32,
    /// How long to listen for the connect handshake
    pub handshake_timeout_ms: u32,
    /// How long to wait for the upload command after a handshake
    pub upload_timeout_ms: u32,
    /// Host silence that ends a relay
    pub relay_idle_timeout_ms: u32,
    /// Idle relay iterations between clock reads
    pub idle_check_interval: u16,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            settle_ms: 10,
            probe_window_ms: 250,
            handshake_timeout_ms: 1000,
            upload_timeout_ms: 5000,
            relay_idle_timeout_ms: 5000,
            idle_check_interval: 256,
        }
    }
}

impl BridgeConfig {
    /// Check that every window can actually elapse with something in it
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.probe_window_ms == 0 {
            return Err(ConfigError::ZeroProbeWindow);
        }
        if self.handshake_timeout_ms == 0 {
            return Err(ConfigError::ZeroHandshakeTimeout);
        }
        if self.upload_timeout_ms == 0 {
            return Err(ConfigError::ZeroUploadTimeout);
        }
        if self.relay_idle_timeout_ms == 0 {
            return Err(ConfigError::ZeroRelayTimeout);
        }
        if self.idle_check_interval == 0 {
            return Err(ConfigError::ZeroIdleCheckInterval);
        }
        Ok(())
    }
}
