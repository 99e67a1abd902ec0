use bitfield_struct::bitfield;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::{I2c, SevenBitAddress};

use crate::{As7341, Error, Reg};

/// CFG0 (0xA9).
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub(crate) struct Cfg0 {
  #[bits(2)]
  __: u8,
  /// Multiplies WTIME by 16.
  pub(crate) wlong: bool,
  ___: bool,
  /// Set to reach registers 0x60..=0x74, clear for 0x80 and above.
  pub(crate) reg_bank: bool,
  pub(crate) low_power: bool,
  #[bits(2)]
  ____: u8,
}

/// Register window selected by CFG0.REG_BANK.
///
/// The same offsets address different registers depending on the bank, so
/// every other operation in this crate assumes [`RegisterBank::Default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterBank {
  /// Registers 0x80 and above.
  #[default]
  Default,
  /// Registers 0x60..=0x74 (ASTATUS, ITIME, CONFIG, GPIO, LED).
  Lower,
}

impl<I, E, D> As7341<I, D>
where
  I: I2c<SevenBitAddress, Error = E>,
  D: DelayNs,
{
  /// Select the register bank.
  ///
  /// Every other method on [`As7341`] assumes [`RegisterBank::Default`] and
  /// addresses the wrong registers while [`RegisterBank::Lower`] is active.
  /// Callers switching to the lower bank must switch back before issuing any
  /// other operation. Lower-bank accesses made by the driver itself, such as
  /// [`As7341::set_led`], enter and leave the bank on their own and always
  /// finish in the default bank.
  pub async fn set_bank(&mut self, bank: RegisterBank) -> Result<(), Error<E>> {
    let lower = bank == RegisterBank::Lower;
    self.modify(Reg::Cfg0, |x: &mut Cfg0| x.set_reg_bank(lower)).await?;
    self.state.bank = bank;
    Ok(())
  }

  /// Read-modify-write a lower-bank register.
  ///
  /// The default bank is restored on every exit path once the switch itself
  /// succeeded; the first error encountered is returned.
  pub(crate) async fn modify_in_lower_bank<T, F>(&mut self, reg: Reg, f: F) -> Result<T, Error<E>>
  where
    T: From<u8> + Into<u8> + Copy,
    F: FnOnce(&mut T),
  {
    self.set_bank(RegisterBank::Lower).await?;
    let result = self.modify(reg, f).await;
    let restored = self.set_bank(RegisterBank::Default).await;
    let value = result?;
    restored?;
    Ok(value)
  }
}
