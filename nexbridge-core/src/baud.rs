//! Baud rate table and rate switching
//!
//! The display can be left at any of seven standard rates. The table order
//! is the probe order: the two extremes first, then working inwards, so
//! both factory-default (9600) and common upload rates come up early.
//!
//! Divisors assume a 16 MHz peripheral clock. Every entry carries both the
//! normal (÷16) and double-speed (÷8) divisor; only 115200 uses the doubled
//! one, because its normal divisor is more than 3% off.

/// One row of the rate table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BaudRate {
    /// Nominal rate in bits per second
    pub baud: u32,
    /// Rate register value for normal-speed sampling
    pub divisor: u16,
    /// Rate register value for double-speed sampling
    pub divisor_2x: u16,
    /// Use the double-speed variant
    pub double_speed: bool,
}

impl BaudRate {
    const fn normal(baud: u32, divisor: u16, divisor_2x: u16) -> Self {
        Self {
            baud,
            divisor,
            divisor_2x,
            double_speed: false,
        }
    }

    const fn doubled(baud: u32, divisor: u16, divisor_2x: u16) -> Self {
        Self {
            baud,
            divisor,
            divisor_2x,
            double_speed: true,
        }
    }

    /// Divisor to program for this rate
    pub const fn programmed(&self) -> nexbridge_hal::Divisor {
        if self.double_speed {
            nexbridge_hal::Divisor::doubled(self.divisor_2x)
        } else {
            nexbridge_hal::Divisor::normal(self.divisor)
        }
    }
}

/// Number of entries in [`BAUD_TABLE`]
pub const RATE_COUNT: usize = 7;

/// Rate table in probe order
pub const BAUD_TABLE: [BaudRate; RATE_COUNT] = [
    BaudRate::normal(2400, 416, 832),
    BaudRate::doubled(115_200, 8, 16),
    BaudRate::normal(4800, 207, 416),
    BaudRate::normal(57_600, 16, 34),
    BaudRate::normal(9600, 103, 207),
    BaudRate::normal(38_400, 25, 51),
    BaudRate::normal(19_200, 51, 103),
];

/// Index into [`BAUD_TABLE`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RateIndex(u8);

impl RateIndex {
    /// First table entry, used when a requested rate is not in the table
    pub const FALLBACK: Self = Self(0);

    /// Index for `index`, if it is inside the table
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < RATE_COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Raw index value
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Table entry for this index
    pub const fn rate(self) -> BaudRate {
        BAUD_TABLE[self.0 as usize]
    }

    /// Nominal rate for this index
    pub const fn baud(self) -> u32 {
        self.rate().baud
    }

    /// All indices in probe order
    pub fn all() -> impl Iterator<Item = Self> {
        (0..RATE_COUNT as u8).map(Self)
    }

    /// Index of the entry whose nominal rate is exactly `baud`
    pub fn find(baud: u32) -> Option<Self> {
        Self::all().find(|idx| idx.baud() == baud)
    }

    /// Like [`RateIndex::find`], falling back to [`RateIndex::FALLBACK`]
    pub fn resolve(baud: u32) -> Self {
        Self::find(baud).unwrap_or(Self::FALLBACK)
    }
}

/// Channel whose rate can be changed at runtime
pub trait RateSwitch {
    /// Switch to `rate`
    ///
    /// Implementations must let pending output drain completely before
    /// touching the rate registers; changing rate mid-byte corrupts it.
    fn switch_rate(&mut self, rate: BaudRate);
}
