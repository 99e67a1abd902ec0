//! SMUX programming.
//!
//! Six ADCs are shared by twelve photodiode taps. Each [`ChannelGroup`] is a
//! fixed 20-byte image of the SMUX RAM (offsets `0x00..=0x13`); every nibble
//! names the ADC (1-based, 0 = disconnected) a tap is routed to.

use bitfield_struct::bitfield;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::{I2c, SevenBitAddress};

use crate::{As7341, Error, Reg, SMUX_RAM_LEN};

/// CFG6 (0xAF).
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub(crate) struct Cfg6 {
  #[bits(3)]
  __: u8,
  #[bits(2)]
  pub(crate) smux_cmd: u8,
  #[bits(3)]
  ___: u8,
}

/// Command executed by the SMUX when SMUXEN is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum SmuxCommand {
  /// Load the ROM default configuration.
  RomReset = 0b00,
  /// Copy the SMUX chain into RAM.
  Read = 0b01,
  /// Copy RAM into the SMUX chain.
  Write = 0b10,
}

/// One of the two mutually exclusive SMUX configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelGroup {
  /// F1..F4, Clear and NIR on ADC0..ADC5.
  Low,
  /// F5..F8, Clear and NIR on ADC0..ADC5.
  High,
}

impl ChannelGroup {
  /// SMUX RAM image for this group, written to offsets `0x00..=0x13`.
  pub const fn table(self) -> &'static [u8; SMUX_RAM_LEN] {
    match self {
      ChannelGroup::Low => &LOW_GROUP,
      ChannelGroup::High => &HIGH_GROUP,
    }
  }

  /// Position of this group's six values within a sample.
  pub(crate) const fn offset(self) -> usize {
    match self {
      ChannelGroup::Low => 0,
      ChannelGroup::High => 6,
    }
  }
}

#[rustfmt::skip]
const LOW_GROUP: [u8; SMUX_RAM_LEN] = [
  0x30, // F3 left -> ADC2
  0x01, // F1 left -> ADC0
  0x00, // reserved
  0x00, // F8 left off
  0x00, // F6 left off
  0x42, // F4 left -> ADC3, F2 left -> ADC1
  0x00, // F5 left off
  0x00, // F7 left off
  0x50, // CLEAR -> ADC4
  0x00, // F5 right off
  0x00, // F7 right off
  0x00, // reserved
  0x20, // F2 right -> ADC1
  0x04, // F4 right -> ADC3
  0x00, // F6/F8 right off
  0x30, // F3 right -> ADC2
  0x01, // F1 right -> ADC0
  0x50, // CLEAR right -> ADC4
  0x00, // reserved
  0x06, // NIR -> ADC5
];

#[rustfmt::skip]
const HIGH_GROUP: [u8; SMUX_RAM_LEN] = [
  0x00, // F3 left off
  0x00, // F1 left off
  0x00, // reserved
  0x40, // F8 left -> ADC3
  0x02, // F6 left -> ADC1
  0x00, // F4/F2 left off
  0x10, // F5 left -> ADC0
  0x03, // F7 left -> ADC2
  0x50, // CLEAR -> ADC4
  0x10, // F5 right -> ADC0
  0x03, // F7 right -> ADC2
  0x00, // reserved
  0x00, // F2 right off
  0x00, // F4 right off
  0x24, // F8 right -> ADC3, F6 right -> ADC1
  0x00, // F3 right off
  0x00, // F1 right off
  0x50, // CLEAR right -> ADC4
  0x00, // reserved
  0x06, // NIR -> ADC5
];

impl<I, E, D> As7341<I, D>
where
  I: I2c<SevenBitAddress, Error = E>,
  D: DelayNs,
{
  /// Route `group` onto the six ADCs.
  ///
  /// Spectral measurement is stopped first, then the whole table is written
  /// before SMUXEN executes it, so the SMUX never runs a partial table.
  pub async fn select_channel_group(&mut self, group: ChannelGroup) -> Result<(), Error<E>> {
    self.set_spectral_measurement(false).await?;
    self.set_smux_command(SmuxCommand::Write).await?;
    for (offset, value) in (0u8..).zip(group.table().iter()) {
      self.write_raw(offset, *value).await?;
    }
    self.set_smux(true).await
  }

  /// Select the command the next SMUXEN will execute.
  pub async fn set_smux_command(&mut self, cmd: SmuxCommand) -> Result<(), Error<E>> {
    self.modify(Reg::Cfg6, |x: &mut Cfg6| x.set_smux_cmd(cmd as u8)).await?;
    Ok(())
  }
}
