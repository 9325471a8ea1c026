//! Display discovery against a simulated display

mod common;

use common::{display_at, display_replying, display_signature, SimClock, SimPort, DISPLAY_REPLY};
use nexbridge_core::{discover, BridgeConfig, DiscoveryError, RateIndex};
use nexbridge_hal::Clock;
use nexbridge_protocol::Signature;

#[test]
fn test_finds_display_at_9600() {
    let clock = SimClock::new();
    let mut display = display_at(&clock, 9600);
    let mut signature = Signature::new();

    let rate = discover(&mut display, &clock, &BridgeConfig::default(), &mut signature).unwrap();

    assert_eq!(rate, RateIndex::new(4).unwrap());
    assert_eq!(rate.baud(), 9600);
    assert_eq!(display.rates, vec![2400, 115_200, 4800, 57_600, 9600]);
    assert_eq!(display.baud(), 9600);
    assert_eq!(signature.as_bytes(), display_signature());
}

#[test]
fn test_finds_display_at_fast_rate() {
    let clock = SimClock::new();
    let mut display = display_at(&clock, 115_200);
    let mut signature = Signature::new();

    let rate = discover(&mut display, &clock, &BridgeConfig::default(), &mut signature).unwrap();

    assert_eq!(rate.baud(), 115_200);
    assert_eq!(display.rates, vec![2400, 115_200]);
}

#[test]
fn test_every_rate_gets_a_full_frame() {
    let clock = SimClock::new();
    let mut display = SimPort::new(&clock);
    let mut signature = Signature::new();

    let _ = discover(&mut display, &clock, &BridgeConfig::default(), &mut signature);

    let frame = nexbridge_protocol::DISCOVERY_FRAME;
    assert_eq!(display.sent.len(), frame.len() * 7);
    for sent in display.sent.chunks(frame.len()) {
        assert_eq!(sent, frame);
    }
}

#[test]
fn test_no_display() {
    let clock = SimClock::new();
    let mut display = SimPort::new(&clock);
    let mut signature = Signature::new();
    signature.capture(DISPLAY_REPLY).unwrap();

    let config = BridgeConfig::default();
    let result = discover(&mut display, &clock, &config, &mut signature);

    assert_eq!(result, Err(DiscoveryError::NotFound));
    assert!(signature.is_empty());
    assert_eq!(display.rates.len(), 7);
    // Every rate waits out settle time and the full probe window
    let per_rate = u64::from(config.settle_ms + config.probe_window_ms);
    assert!(clock.now_ms() >= per_rate * 7);
}

#[test]
fn test_stale_bytes_are_discarded() {
    let clock = SimClock::new();
    let mut display = SimPort::new(&clock);
    display.feed_now(b"comok stale\xff\xff\xff");
    let mut signature = Signature::new();

    let result = discover(&mut display, &clock, &BridgeConfig::default(), &mut signature);

    assert_eq!(result, Err(DiscoveryError::NotFound));
    assert_eq!(display.pending(), 0);
}

#[test]
fn test_oversized_signature_rejected() {
    let clock = SimClock::new();
    let mut reply = b"comok ".to_vec();
    reply.extend(std::iter::repeat(b'a').take(200));
    reply.extend_from_slice(b"\xff\xff\xff");
    let mut display = display_replying(&clock, 2400, reply);
    let mut signature = Signature::new();

    let result = discover(&mut display, &clock, &BridgeConfig::default(), &mut signature);

    assert_eq!(
        result,
        Err(DiscoveryError::SignatureTooLong {
            rate: RateIndex::new(0).unwrap(),
            len: 207,
        })
    );
    assert!(signature.is_empty());
}

#[test]
fn test_unterminated_reply_is_not_a_display() {
    let clock = SimClock::new();
    let mut display = display_replying(&clock, 9600, b"comok 1,30601-0\xff\xff".to_vec());
    let mut signature = Signature::new();

    let result = discover(&mut display, &clock, &BridgeConfig::default(), &mut signature);

    assert_eq!(result, Err(DiscoveryError::NotFound));
}
