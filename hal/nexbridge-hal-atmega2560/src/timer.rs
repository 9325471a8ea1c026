//! Millisecond tick from Timer/Counter 1
//!
//! TC1 free-runs at the CPU clock in normal mode. Compare match A fires
//! every `reload` cycles; the handler moves OCR1A forward by the same
//! amount, so the tick period stays exact however late the handler runs.

use avr_device::atmega2560::TC1;

/// TCCR1B clock select: no prescaling
const CS10: u8 = 1 << 0;
/// TIMSK1 compare match A interrupt enable
const OCIE1A: u8 = 1 << 1;

/// CPU cycles per millisecond at 16 MHz
pub const MS_RELOAD: u16 = 16_000;

/// Owner of TC1 while it produces ticks
pub struct TickTimer {
    _tc1: TC1,
}

impl TickTimer {
    /// Start the timer with a compare interrupt every `reload` cycles
    ///
    /// Interrupts still have to be enabled globally.
    pub fn start(tc1: TC1, reload: u16) -> Self {
        tc1.tccr1a.write(|w| unsafe { w.bits(0) });
        tc1.tcnt1.write(|w| unsafe { w.bits(0) });
        tc1.ocr1a.write(|w| unsafe { w.bits(reload) });
        tc1.timsk1.write(|w| unsafe { w.bits(OCIE1A) });
        tc1.tccr1b.write(|w| unsafe { w.bits(CS10) });
        Self { _tc1: tc1 }
    }

    /// Schedule the next compare match; call from `TIMER1_COMPA`
    pub fn on_compare(reload: u16) {
        // SAFETY: only touches OCR1A, which nothing else writes after start
        let tc1 = unsafe { &*TC1::ptr() };
        tc1.ocr1a
            .modify(|r, w| unsafe { w.bits(r.bits().wrapping_add(reload)) });
    }
}
