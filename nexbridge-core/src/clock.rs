//! Millisecond tick counter
//!
//! A periodic timer interrupt calls [`TickCounter::tick`] once per
//! millisecond. The counter is 64 bits wide, far wider than an 8-bit core
//! can load in one instruction, so both sides go through a critical section
//! to keep reads from tearing.

use core::cell::Cell;

use critical_section::Mutex;
use nexbridge_hal::Clock;

/// Free-running millisecond counter
pub struct TickCounter {
    ticks: Mutex<Cell<u64>>,
}

impl Default for TickCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl TickCounter {
    /// Counter starting at zero
    pub const fn new() -> Self {
        Self {
            ticks: Mutex::new(Cell::new(0)),
        }
    }

    /// Advance by one tick; called from the timer interrupt
    pub fn tick(&self) {
        critical_section::with(|cs| {
            let ticks = self.ticks.borrow(cs);
            ticks.set(ticks.get().wrapping_add(1));
        });
    }

    /// Current tick count
    pub fn ticks(&self) -> u64 {
        critical_section::with(|cs| self.ticks.borrow(cs).get())
    }
}

impl Clock for TickCounter {
    fn now_ms(&self) -> u64 {
        self.ticks()
    }
}
