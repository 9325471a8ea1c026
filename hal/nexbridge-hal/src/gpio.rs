//! GPIO pin abstractions
//!
//! Only outputs are needed: the bridge drives a single status indicator.

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently set low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Output pin that goes nowhere
///
/// For boards without a status indicator.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPin {
    level: bool,
}

impl OutputPin for NoPin {
    fn set_high(&mut self) {
        self.level = true;
    }

    fn set_low(&mut self) {
        self.level = false;
    }

    fn is_set_high(&self) -> bool {
        self.level
    }
}
