use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::{I2c, SevenBitAddress};

use crate::{As7341, Error, Reg};

/// Latch time the device needs after a state-changing write (ms).
pub(crate) const SETTLE_MS: u32 = 20;

impl<I, E, D> As7341<I, D>
where
  I: I2c<SevenBitAddress, Error = E>,
  D: DelayNs,
{
  pub(crate) async fn settle(&mut self) {
    self.delay.delay_ms(SETTLE_MS).await;
  }

  // Typed helpers
  pub(crate) async fn read<T: From<u8>>(&mut self, reg: Reg) -> Result<T, Error<E>> {
    Ok(T::from(self.read_u8(reg).await?))
  }

  pub(crate) async fn read_u8(&mut self, reg: Reg) -> Result<u8, Error<E>> {
    let mut buf = [0u8; 1];
    self.read_bytes(reg, &mut buf).await?;
    Ok(buf[0])
  }

  pub(crate) async fn read_u16(&mut self, reg: Reg) -> Result<u16, Error<E>> {
    let mut buf = [0u8; 2];
    self.read_bytes(reg, &mut buf).await?;
    Ok(u16::from_le_bytes(buf))
  }

  pub(crate) async fn read_bytes(&mut self, reg: Reg, buf: &mut [u8]) -> Result<(), Error<E>> {
    let addr = [u8::from(reg)];
    self.i2c.write_read(self.address, &addr, buf).await.map_err(Error::I2c)
  }

  /// Write one byte and wait for the device to latch it.
  pub(crate) async fn write_u8(&mut self, reg: Reg, value: u8) -> Result<(), Error<E>> {
    self.write_raw(reg.into(), value).await?;
    self.settle().await;
    Ok(())
  }

  /// Write a little-endian word to `reg` and `reg + 1` in one transaction.
  pub(crate) async fn write_u16(&mut self, reg: Reg, value: u16) -> Result<(), Error<E>> {
    let [lo, hi] = value.to_le_bytes();
    let buf = [reg.into(), lo, hi];
    self.i2c.write(self.address, &buf).await.map_err(Error::I2c)?;
    self.settle().await;
    Ok(())
  }

  /// Single `[offset, value]` write without settling, for RAM-like windows.
  pub(crate) async fn write_raw(&mut self, offset: u8, value: u8) -> Result<(), Error<E>> {
    self.i2c.write(self.address, &[offset, value]).await.map_err(Error::I2c)
  }

  /// Read `reg`, let `f` change the decoded value, then write it back.
  pub(crate) async fn modify<T, F>(&mut self, reg: Reg, f: F) -> Result<T, Error<E>>
  where
    T: From<u8> + Into<u8> + Copy,
    F: FnOnce(&mut T),
  {
    let mut value: T = self.read(reg).await?;
    f(&mut value);
    self.write_u8(reg, value.into()).await?;
    Ok(value)
  }
}
