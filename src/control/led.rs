use bitfield_struct::bitfield;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::{I2c, SevenBitAddress};

use crate::{As7341, Error, Reg};

/// CONFIG (0x70).
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub(crate) struct LedConfig {
  #[bits(2)]
  pub(crate) int_mode: u8,
  pub(crate) int_sel: bool,
  /// Hand the LDR pin to the LED register.
  pub(crate) led_sel: bool,
  #[bits(4)]
  __: u8,
}

/// LED (0x74, lower bank).
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub(crate) struct Led {
  /// Drive current, `(LED_DRIVE * 2 + 4)` mA.
  #[bits(7)]
  pub(crate) drive: u8,
  /// LED active.
  pub(crate) act: bool,
}

impl<I, E, D> As7341<I, D>
where
  I: I2c<SevenBitAddress, Error = E>,
  D: DelayNs,
{
  /// Switch the LED driven from the LDR pin on or off.
  ///
  /// Best effort. CONFIG.LED_SEL is set before entering the lower register
  /// bank, and this sequence is known not to light the LED on every board.
  /// A successful return means the register writes went out, not that the LED
  /// is on.
  pub async fn set_led(&mut self, on: bool) -> Result<(), Error<E>> {
    self.modify(Reg::Config, |x: &mut LedConfig| x.set_led_sel(true)).await?;
    self.modify_in_lower_bank(Reg::Led, |x: &mut Led| x.set_act(on)).await?;
    Ok(())
  }
}
