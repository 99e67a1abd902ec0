use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::{I2c, SevenBitAddress};

use crate::{As7341, Error, Reg};

/// ADC gain, written to CFG1 as its ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Gain {
  X0_5 = 0,
  X1 = 1,
  X2 = 2,
  X4 = 3,
  X8 = 4,
  X16 = 5,
  X32 = 6,
  X64 = 7,
  X128 = 8,
  X256 = 9,
  X512 = 10,
}

impl Gain {
  pub const ALL: [Gain; 11] = [
    Gain::X0_5,
    Gain::X1,
    Gain::X2,
    Gain::X4,
    Gain::X8,
    Gain::X16,
    Gain::X32,
    Gain::X64,
    Gain::X128,
    Gain::X256,
    Gain::X512,
  ];
}

impl From<Gain> for u8 {
  fn from(v: Gain) -> Self {
    v as u8
  }
}

impl TryFrom<u8> for Gain {
  type Error = u8;

  fn try_from(bits: u8) -> Result<Self, Self::Error> {
    Gain::ALL.get(bits as usize).copied().ok_or(bits)
  }
}

/// Integration timing and gain applied by [`As7341::configure`].
///
/// Integration time is `(atime + 1) * (astep + 1) * 2.78 µs`.
///
/// # Example
/// ```no_run
/// use as7341::{Config, Gain};
///
/// // ~50 ms at 64x
/// let config = Config::default().with_atime(29).with_astep(599).with_gain(Gain::X64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
  /// Integration step count (ATIME).
  pub atime: u8,
  /// Integration step size (ASTEP).
  pub astep: u16,
  pub gain: Gain,
}

impl Config {
  pub const fn new(atime: u8, astep: u16, gain: Gain) -> Self {
    Self { atime, astep, gain }
  }

  pub const fn with_atime(mut self, atime: u8) -> Self {
    self.atime = atime;
    self
  }

  pub const fn with_astep(mut self, astep: u16) -> Self {
    self.astep = astep;
    self
  }

  pub const fn with_gain(mut self, gain: Gain) -> Self {
    self.gain = gain;
    self
  }
}

impl Default for Config {
  fn default() -> Self {
    Self::new(100, 999, Gain::X256)
  }
}

impl<I, E, D> As7341<I, D>
where
  I: I2c<SevenBitAddress, Error = E>,
  D: DelayNs,
{
  /// Write integration timing and gain.
  pub async fn configure(&mut self, config: &Config) -> Result<(), Error<E>> {
    self.set_integration_time(config.atime, config.astep).await?;
    self.set_gain(config.gain).await
  }

  pub async fn set_gain(&mut self, gain: Gain) -> Result<(), Error<E>> {
    self.write_u8(Reg::Cfg1, gain.into()).await?;
    self.state.gain = Some(gain);
    Ok(())
  }

  pub async fn gain(&mut self) -> Result<Gain, Error<E>> {
    let bits = self.read_u8(Reg::Cfg1).await?;
    let gain = Gain::try_from(bits).map_err(Error::InvalidGain)?;
    self.state.gain = Some(gain);
    Ok(gain)
  }

  /// Write ATIME, then ASTEP as one little-endian two-byte transfer.
  pub async fn set_integration_time(&mut self, atime: u8, astep: u16) -> Result<(), Error<E>> {
    self.write_u8(Reg::Atime, atime).await?;
    self.state.atime = Some(atime);
    self.write_u16(Reg::AstepL, astep).await?;
    self.state.astep = Some(astep);
    Ok(())
  }

  /// Read back `(atime, astep)`.
  pub async fn integration_time(&mut self) -> Result<(u8, u16), Error<E>> {
    let atime = self.read_u8(Reg::Atime).await?;
    let astep = self.read_u16(Reg::AstepL).await?;
    self.state.atime = Some(atime);
    self.state.astep = Some(astep);
    Ok((atime, astep))
  }
}

#[cfg(test)]
mod tests {
  extern crate std;

  use embedded_hal_mock::eh1::i2c::Transaction;
  use std::vec;
  use std::vec::Vec;

  use super::*;
  use crate::testing::*;

  #[tokio::test]
  async fn every_gain_round_trips() {
    let expectations: Vec<Transaction> = Gain::ALL
      .iter()
      .flat_map(|g| [write(0xAA, *g as u8), read(0xAA, *g as u8)])
      .collect();
    let mut sensor = sensor(&expectations);

    for gain in Gain::ALL {
      sensor.set_gain(gain).await.unwrap();
      assert_eq!(sensor.gain().await.unwrap(), gain);
      assert_eq!(sensor.state().gain, Some(gain));
    }
    finish(sensor);
  }

  #[tokio::test]
  async fn out_of_range_gain_is_reported() {
    let expectations = [read(0xAA, 11)];
    let mut sensor = sensor(&expectations);

    assert_eq!(sensor.gain().await, Err(Error::InvalidGain(11)));
    assert_eq!(sensor.state().gain, None);
    finish(sensor);
  }

  #[tokio::test]
  async fn read_back_fills_the_state_mirror() {
    let expectations = [
      read(0xAA, 3),
      read(0x81, 29),
      Transaction::write_read(ADDR, vec![0xCA], vec![0x57, 0x02]),
    ];
    let mut sensor = sensor(&expectations);

    assert_eq!(sensor.gain().await, Ok(Gain::X4));
    assert_eq!(sensor.integration_time().await, Ok((29, 599)));
    let state = sensor.state();
    assert_eq!((state.atime, state.astep, state.gain), (Some(29), Some(599), Some(Gain::X4)));
    finish(sensor);
  }

  #[tokio::test]
  async fn integration_time_round_trips_at_range_edges() {
    let cases: [(u8, u16); 4] = [(0, 0), (255, 65535), (29, 599), (100, 0x01FF)];
    let mut expectations = vec![];
    for (atime, astep) in cases {
      let [lo, hi] = astep.to_le_bytes();
      expectations.push(write(0x81, atime));
      expectations.push(Transaction::write(ADDR, vec![0xCA, lo, hi]));
      expectations.push(read(0x81, atime));
      expectations.push(Transaction::write_read(ADDR, vec![0xCA], vec![lo, hi]));
    }
    let mut sensor = sensor(&expectations);

    for (atime, astep) in cases {
      sensor.set_integration_time(atime, astep).await.unwrap();
      assert_eq!(sensor.integration_time().await.unwrap(), (atime, astep));
    }
    finish(sensor);
  }

  #[tokio::test]
  async fn configure_writes_timing_then_gain() {
    let expectations = [
      write(0x81, 29),
      Transaction::write(ADDR, vec![0xCA, 0x57, 0x02]),
      write(0xAA, 7),
    ];
    let mut sensor = sensor(&expectations);

    sensor.configure(&Config::default().with_atime(29).with_astep(599).with_gain(Gain::X64)).await.unwrap();
    let state = sensor.state();
    assert_eq!((state.atime, state.astep, state.gain), (Some(29), Some(599), Some(Gain::X64)));

    let delay = finish(sensor);
    assert_eq!(delay.waits, vec![20_000_000; 3]);
  }

  #[test]
  fn gain_ordinals_are_dense() {
    for (i, gain) in Gain::ALL.iter().enumerate() {
      assert_eq!(u8::from(*gain) as usize, i);
      assert_eq!(Gain::try_from(i as u8), Ok(*gain));
    }
  }
}
