//! Upload command detection and the relay pump

mod common;

use common::{SimClock, SimPort};
use nexbridge_core::{await_upload, pump, BridgeConfig, RateIndex, RelayOutcome, UploadError};
use nexbridge_hal::Clock;

const COMMAND: &[u8] = b"whmi-wri 1234567,115200,0\xff\xff\xff";

#[test]
fn test_upload_command_forwarded_and_parsed() {
    let clock = SimClock::new();
    let mut host = SimPort::new(&clock);
    let mut display = SimPort::new(&clock);
    host.feed_now(COMMAND);

    let baud = await_upload(&mut host, &mut display, &clock, 5000).unwrap();

    assert_eq!(baud, 115_200);
    assert_eq!(display.sent, COMMAND);
}

#[test]
fn test_rate_taken_from_second_field() {
    let clock = SimClock::new();
    let mut host = SimPort::new(&clock);
    let mut display = SimPort::new(&clock);
    host.feed_now(b"junk whmi-wri test.tft,9600,115200\xff\xff\xff");

    assert_eq!(await_upload(&mut host, &mut display, &clock, 5000), Ok(9600));
}

#[test]
fn test_display_output_reaches_host() {
    let clock = SimClock::new();
    let mut host = SimPort::new(&clock);
    let mut display = SimPort::new(&clock);
    display.feed_now(b"\x05");
    host.feed_at(10_000, COMMAND);

    assert_eq!(await_upload(&mut host, &mut display, &clock, 5000), Ok(115_200));
    assert_eq!(host.sent, b"\x05");
}

#[test]
fn test_no_command_times_out() {
    let clock = SimClock::new();
    let mut host = SimPort::new(&clock);
    let mut display = SimPort::new(&clock);
    host.feed_now(b"whmi-wri 100,9600");

    assert_eq!(
        await_upload(&mut host, &mut display, &clock, 5000),
        Err(UploadError::Timeout)
    );
    assert!(clock.now_ms() >= 5000);
    // Partial command still reaches the display
    assert_eq!(display.sent, b"whmi-wri 100,9600");
}

#[test]
fn test_pump_relays_until_host_idle() {
    let clock = SimClock::new();
    let mut host = SimPort::new(&clock);
    let mut display = SimPort::new(&clock);
    let payload: Vec<u8> = (0..100u8).collect();
    host.feed_spaced(1_000, 1_000, &payload);
    let last_ms = host.last_arrival_us().unwrap() / 1_000;
    let config = BridgeConfig::default();

    let report = pump(&mut host, &mut display, &clock, &config, 115_200);

    assert_eq!(report.outcome, RelayOutcome::Completed);
    assert_eq!(report.rate, RateIndex::find(115_200).unwrap());
    assert_eq!(report.to_display, 100);
    assert_eq!(report.to_host, 0);
    assert_eq!(display.sent, payload);
    assert_eq!(host.rates, vec![115_200]);
    assert_eq!(display.rates, vec![115_200]);

    let idle = u64::from(config.relay_idle_timeout_ms);
    let ended = clock.now_ms();
    assert!(ended > last_ms + idle, "ended at {ended}");
    assert!(ended < last_ms + idle + 100, "ended at {ended}");
}

#[test]
fn test_pump_without_host_data_aborts() {
    let clock = SimClock::new();
    let mut host = SimPort::new(&clock);
    let mut display = SimPort::new(&clock);
    let config = BridgeConfig::default();

    let report = pump(&mut host, &mut display, &clock, &config, 9600);

    assert_eq!(report.outcome, RelayOutcome::Aborted);
    assert_eq!(report.to_display, 0);
    assert!(clock.now_ms() > u64::from(config.relay_idle_timeout_ms));
}

#[test]
fn test_pump_forwards_display_replies() {
    let clock = SimClock::new();
    let mut host = SimPort::new(&clock);
    let mut display = SimPort::new(&clock);
    host.feed_now(b"data");
    display.feed_at(2_000, b"\x05\x05");

    let report = pump(&mut host, &mut display, &clock, &BridgeConfig::default(), 9600);

    assert_eq!(report.to_host, 2);
    assert_eq!(host.sent, b"\x05\x05");
    assert_eq!(display.sent, b"data");
}

#[test]
fn test_pump_unknown_rate_falls_back() {
    let clock = SimClock::new();
    let mut host = SimPort::new(&clock);
    let mut display = SimPort::new(&clock);
    let config = BridgeConfig {
        relay_idle_timeout_ms: 10,
        ..BridgeConfig::default()
    };

    let report = pump(&mut host, &mut display, &clock, &config, 12_345);

    assert_eq!(report.rate, RateIndex::FALLBACK);
    assert_eq!(host.rates, vec![2400]);
    assert_eq!(display.rates, vec![2400]);
}
