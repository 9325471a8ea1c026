//! Board wiring and timing constants
//!
//! Arduino Mega 2560 style board at 16 MHz:
//! - USART0: authoring tool (USB bridge)
//! - USART1: unused, held at 9600 baud
//! - USART2: display
//! - USART3: debug console

use nexbridge_core::{BaudRate, BridgeConfig, BAUD_TABLE};

/// Timer cycles per millisecond tick
pub const TICK_RELOAD: u16 = nexbridge_hal_atmega2560::timer::MS_RELOAD;

/// Rate every port starts at (9600 baud)
pub const BOOT_RATE: BaudRate = BAUD_TABLE[4];

/// Bridge timing used by this board
pub const BRIDGE_CONFIG: BridgeConfig = BridgeConfig {
    settle_ms: 10,
    probe_window_ms: 250,
    handshake_timeout_ms: 1000,
    upload_timeout_ms: 5000,
    relay_idle_timeout_ms: 5000,
    idle_check_interval: 256,
};
