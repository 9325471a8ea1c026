//! Logging facade
//!
//! Enable with `--features defmt`. All log macros become no-ops when the
//! feature is disabled so host tests and size-constrained builds pay
//! nothing for them.

#![allow(unused_imports)]

// When defmt is enabled, re-export its macros.
#[cfg(feature = "defmt")]
pub(crate) use defmt::{debug, error, info, trace, warn};

// When defmt is disabled, provide no-op macro implementations.
#[cfg(not(feature = "defmt"))]
macro_rules! trace_noop {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "defmt"))]
macro_rules! debug_noop {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "defmt"))]
macro_rules! info_noop {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "defmt"))]
macro_rules! warn_noop {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "defmt"))]
macro_rules! error_noop {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "defmt"))]
pub(crate) use debug_noop as debug;
#[cfg(not(feature = "defmt"))]
pub(crate) use error_noop as error;
#[cfg(not(feature = "defmt"))]
pub(crate) use info_noop as info;
#[cfg(not(feature = "defmt"))]
pub(crate) use trace_noop as trace;
#[cfg(not(feature = "defmt"))]
pub(crate) use warn_noop as warn;
