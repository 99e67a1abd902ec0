use bitfield_struct::bitfield;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::{I2c, SevenBitAddress};

use crate::{As7341, Error, Reg};

/// ENABLE (0x80). Power, spectral measurement, SMUX and flicker detection all
/// share this byte, so every change is a read-modify-write.
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub(crate) struct Enable {
  /// Power on.
  pub(crate) pon: bool,
  /// Spectral measurement enable.
  pub(crate) sp_en: bool,
  __: bool,
  /// Wait time between measurements.
  pub(crate) wen: bool,
  /// Starts the SMUX command written to CFG6; self-clears when done.
  pub(crate) smuxen: bool,
  ___: bool,
  /// Flicker detection enable.
  pub(crate) fden: bool,
  ____: bool,
}

impl<I, E, D> As7341<I, D>
where
  I: I2c<SevenBitAddress, Error = E>,
  D: DelayNs,
{
  /// Switch the oscillator and internal supply on or off (PON).
  pub async fn set_power(&mut self, on: bool) -> Result<(), Error<E>> {
    self.modify_enable(|x| x.set_pon(on)).await
  }

  /// Start or stop spectral measurements (SP_EN).
  pub async fn set_spectral_measurement(&mut self, on: bool) -> Result<(), Error<E>> {
    self.modify_enable(|x| x.set_sp_en(on)).await
  }

  /// Set or clear SMUXEN, which executes the command selected in CFG6.
  pub async fn set_smux(&mut self, on: bool) -> Result<(), Error<E>> {
    self.modify_enable(|x| x.set_smuxen(on)).await
  }

  /// Start or stop flicker detection (FDEN).
  pub async fn set_flicker_detection(&mut self, on: bool) -> Result<(), Error<E>> {
    self.modify_enable(|x| x.set_fden(on)).await
  }

  /// Clear every ENABLE bit at once, leaving the device powered down.
  pub async fn disable_all(&mut self) -> Result<(), Error<E>> {
    let enable = Enable::new();
    self.write_u8(Reg::Enable, enable.into_bits()).await?;
    self.state.sync_enable(enable);
    Ok(())
  }

  async fn modify_enable<F: FnOnce(&mut Enable)>(&mut self, f: F) -> Result<(), Error<E>> {
    let enable = self.modify(Reg::Enable, f).await?;
    self.state.sync_enable(enable);
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  extern crate std;

  use std::vec;

  use super::Enable;
  use crate::testing::*;

  #[test]
  fn enable_bits_match_register_layout() {
    let enable = Enable::new().with_pon(true).with_sp_en(true).with_smuxen(true).with_fden(true);
    assert_eq!(enable.into_bits(), 0b0101_0011);
    assert!(Enable::from_bits(0b0000_1000).wen());
  }

  #[tokio::test]
  async fn spectral_toggle_preserves_other_bits() {
    let mut expectations = vec![];
    expectations.extend(modify(0x80, 0b0101_1001, 0b0101_1011));
    expectations.extend(modify(0x80, 0b0101_1011, 0b0101_1001));
    let mut sensor = sensor(&expectations);

    sensor.set_spectral_measurement(true).await.unwrap();
    assert!(sensor.state().spectral_enabled);
    sensor.set_spectral_measurement(false).await.unwrap();
    assert!(!sensor.state().spectral_enabled);
    assert!(sensor.state().smux_enabled);
    assert!(sensor.state().flicker_detection);

    let delay = finish(sensor);
    assert_eq!(delay.waits.len(), 2);
  }

  #[tokio::test]
  async fn each_setter_touches_only_its_bit() {
    let mut expectations = vec![];
    expectations.extend(modify(0x80, 0xFF, 0xFE));
    expectations.extend(modify(0x80, 0x00, 0x10));
    expectations.extend(modify(0x80, 0x00, 0x40));
    expectations.extend(modify(0x80, 0xFF, 0xBF));
    let mut sensor = sensor(&expectations);

    sensor.set_power(false).await.unwrap();
    sensor.set_smux(true).await.unwrap();
    sensor.set_flicker_detection(true).await.unwrap();
    sensor.set_flicker_detection(false).await.unwrap();
    finish(sensor);
  }

  #[tokio::test]
  async fn disable_all_is_a_blind_write() {
    let expectations = [write(0x80, 0x00)];
    let mut sensor = sensor(&expectations);

    sensor.disable_all().await.unwrap();
    assert!(!sensor.state().power_on);
    finish(sensor);
  }
}
