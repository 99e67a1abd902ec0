use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::{I2c, SevenBitAddress};

use crate::fmt::{debug, warning};
use crate::{As7341, Error, Gain, Reg, CHIP_ID};

mod bank;
mod enable;
mod led;

pub use bank::RegisterBank;
use enable::Enable;

/// What this driver instance last wrote to or read back from the device.
///
/// Fields are updated only after the corresponding transfer succeeded. Values the
/// driver has never written or read back are `None`; the physical device keeps
/// its own register contents regardless of this mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceState {
  pub power_on: bool,
  pub spectral_enabled: bool,
  pub smux_enabled: bool,
  pub flicker_detection: bool,
  pub bank: RegisterBank,
  pub gain: Option<Gain>,
  pub atime: Option<u8>,
  pub astep: Option<u16>,
}

impl DeviceState {
  pub(crate) fn sync_enable(&mut self, enable: Enable) {
    self.power_on = enable.pon();
    self.spectral_enabled = enable.sp_en();
    self.smux_enabled = enable.smuxen();
    self.flicker_detection = enable.fden();
  }
}

impl<I, E, D> As7341<I, D>
where
  I: I2c<SevenBitAddress, Error = E>,
  D: DelayNs,
{
  /// Verify the chip identifier and power the device on.
  ///
  /// Returns `Ok(false)` when `ID[7:2]` does not match the AS7341, meaning a
  /// different or absent device answered; power is left untouched in that
  /// case. Bus failures are reported as [`Error::I2c`].
  pub async fn initialize(&mut self) -> Result<bool, Error<E>> {
    let id = self.chip_id().await?;
    if id != CHIP_ID {
      warning!("AS7341: unexpected chip id {=u8:#x}", id);
      return Ok(false);
    }

    self.set_power(true).await?;
    debug!("AS7341: powered on at {=u8:#x}", self.address);
    Ok(true)
  }

  /// Part identifier, `ID[7:2]`.
  pub async fn chip_id(&mut self) -> Result<u8, Error<E>> {
    Ok(self.read_u8(Reg::Id).await? >> 2)
  }

  /// Silicon revision, `REVID[2:0]`.
  pub async fn revision(&mut self) -> Result<u8, Error<E>> {
    Ok(self.read_u8(Reg::RevId).await? & 0b111)
  }
}
