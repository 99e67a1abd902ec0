//! Logging shims that forward to `defmt` when the `defmt` feature is enabled
//! and expand to nothing otherwise.
#![allow(unused_macros)]

macro_rules! debug {
  ($($arg:tt)*) => {{
    #[cfg(feature = "defmt")]
    ::defmt::debug!($($arg)*);
  }};
}

macro_rules! warning {
  ($($arg:tt)*) => {{
    #[cfg(feature = "defmt")]
    ::defmt::warn!($($arg)*);
  }};
}

pub(crate) use debug;
pub(crate) use warning;
