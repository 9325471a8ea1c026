//! Monotonic millisecond clock
//!
//! The clock is advanced by a periodic interrupt elsewhere; this trait only
//! exposes the read side plus a busy-wait delay built on top of it.

/// Monotonic millisecond time source
pub trait Clock {
    /// Milliseconds since the clock started
    fn now_ms(&self) -> u64;

    /// Milliseconds elapsed since the `since` timestamp
    fn elapsed_ms(&self, since: u64) -> u64 {
        self.now_ms().saturating_sub(since)
    }

    /// Busy-wait until at least `ms` milliseconds have passed
    fn delay_ms(&self, ms: u32) {
        let start = self.now_ms();
        let end = start.saturating_add(u64::from(ms));
        while self.now_ms() < end {
            core::hint::spin_loop();
        }
    }

    /// Deadline `timeout_ms` from now
    fn deadline(&self, timeout_ms: u32) -> Deadline {
        Deadline {
            at_ms: self.now_ms().saturating_add(u64::from(timeout_ms)),
        }
    }
}

/// Absolute point in time on a [`Clock`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Deadline {
    at_ms: u64,
}

impl Deadline {
    /// Check whether the deadline has passed
    pub fn is_expired<C: Clock + ?Sized>(&self, clock: &C) -> bool {
        clock.now_ms() >= self.at_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    /// Clock that advances one millisecond per read
    struct Stepping(Cell<u64>);

    impl Clock for Stepping {
        fn now_ms(&self) -> u64 {
            let now = self.0.get();
            self.0.set(now + 1);
            now
        }
    }

    #[test]
    fn test_delay_waits_full_duration() {
        let clock = Stepping(Cell::new(100));
        clock.delay_ms(10);
        assert!(clock.0.get() >= 110);
    }

    #[test]
    fn test_elapsed_saturates() {
        let clock = Stepping(Cell::new(5));
        assert_eq!(clock.elapsed_ms(50), 0);
    }

    #[test]
    fn test_deadline_expiry() {
        let clock = Stepping(Cell::new(0));
        let deadline = clock.deadline(3);
        assert_eq!(deadline.at_ms, 3);
        assert!(!deadline.is_expired(&clock)); // reads 1
        assert!(!deadline.is_expired(&clock)); // reads 2
        assert!(deadline.is_expired(&clock)); // reads 3
    }
}
