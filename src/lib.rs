#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Async, `no_std` driver for the ams OSRAM AS7341 11-channel spectral sensor.
//!
//! The AS7341 has more photodiodes than ADCs: six converters are shared
//! between the eight filter channels plus Clear and NIR through an internal
//! switch matrix (SMUX). A full reading therefore takes two measurement cycles
//! with the SMUX reprogrammed in between. This crate drives that protocol over
//! `embedded-hal-async` 1.0 I²C and exposes:
//!
//! - Identification and power bring-up via [`As7341::initialize`]
//! - Read-modify-write control of the shared ENABLE register bits
//! - Integration timing (ATIME/ASTEP) and ADC [`Gain`] configuration
//! - Byte-exact SMUX programming for the two [`ChannelGroup`]s
//! - A two-pass acquisition that only publishes complete 12-channel
//!   [`Sample`]s, flagging halves that never reported ready
//!
//! ```no_run
//! use embedded_hal_async::{delay::DelayNs, i2c::{I2c, SevenBitAddress}};
//! use as7341::{As7341, Channel, Config, Gain};
//!
//! async fn example<I2C, D, E>(i2c: I2C, delay: D) -> Result<(), as7341::Error<E>>
//! where
//!   I2C: I2c<SevenBitAddress, Error = E>,
//!   D: DelayNs,
//! {
//!   let mut sensor = As7341::new(i2c, delay, None);
//!   if !sensor.initialize().await? {
//!     return Ok(());
//!   }
//!   sensor.configure(&Config::default().with_gain(Gain::X64)).await?;
//!
//!   let sample = sensor.read_sample().await?;
//!   let _violet = sample.channel(Channel::Violet);
//!   let _nir = sensor.channel_by_name("nir")?;
//!   Ok(())
//! }
//! ```
mod acquisition;
mod config;
mod control;
mod fmt;
mod reg;
mod rw;
mod sample;
mod smux;

use embedded_hal::i2c::ErrorKind;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::{I2c, SevenBitAddress};

pub use acquisition::ReadyPolling;
pub use config::*;
pub use control::*;
pub use reg::DEFAULT_ADDRESS;
use reg::*;
pub use sample::*;
pub use smux::{ChannelGroup, SmuxCommand};

/// Errors that can occur while interacting with the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
  /// I²C bus transaction failed with the underlying driver error.
  I2c(E),
  /// CFG1 held a gain ordinal outside `0..=10`.
  InvalidGain(u8),
  /// A channel was requested before any acquisition completed.
  NoSample,
  /// A channel name did not match any channel of the sample layout.
  UnknownChannel,
}

impl<E: embedded_hal::i2c::Error> Error<E> {
  /// Bus-level classification of a transport failure, if this is one.
  pub fn kind(&self) -> Option<ErrorKind> {
    match self {
      Error::I2c(e) => Some(e.kind()),
      _ => None,
    }
  }
}

/// Driver for one AS7341 on an I²C bus.
///
/// The driver owns the bus and delay provider, so every register sequence runs
/// to completion before another one can start. Create an instance with
/// [`As7341::new`], call [`As7341::initialize`] to verify the chip and power it
/// up, then [`As7341::read_sample`] to acquire all twelve channels.
pub struct As7341<I, D> {
  i2c: I,
  delay: D,
  address: u8,
  state: DeviceState,
  polling: ReadyPolling,
  store: SampleStore,
}

impl<I, E, D> As7341<I, D>
where
  I: I2c<SevenBitAddress, Error = E>,
  D: DelayNs,
{
  /// Create a new driver instance.
  ///
  /// `address` of `None` selects [`DEFAULT_ADDRESS`]; any `Some` value is used
  /// verbatim. Nothing is sent to the device until a method is called.
  pub fn new(i2c: I, delay: D, address: Option<u8>) -> Self {
    Self {
      i2c,
      delay,
      address: address.unwrap_or(DEFAULT_ADDRESS),
      state: DeviceState::default(),
      polling: ReadyPolling::default(),
      store: SampleStore::new(),
    }
  }

  /// 7-bit bus address this instance talks to.
  pub fn address(&self) -> u8 {
    self.address
  }

  /// Driver-side mirror of the register state written through this instance.
  pub fn state(&self) -> DeviceState {
    self.state
  }

  /// Release the bus and delay provider.
  pub fn release(self) -> (I, D) {
    (self.i2c, self.delay)
  }
}
