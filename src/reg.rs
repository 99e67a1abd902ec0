/******************************************************************************
 * Refer to the AS7341 datasheet for more information, available here:        *
 * - https://ams-osram.com/products/sensor-solutions/ambient-light-color-spectral-proximity-sensors/ams-as7341-11-channel-spectral-color-sensor
 * ========================================================================== *
 *                        AS7341 - Registers & Memory Map                     *
*******************************************************************************/

/// Default 7-bit I²C address of the AS7341.
pub const DEFAULT_ADDRESS: u8 = 0x39;

/// Value of `ID[7:2]`.
pub(crate) const CHIP_ID: u8 = 0x09;

/// Number of SMUX RAM bytes, addressed at offsets `0x00..=0x13`.
pub(crate) const SMUX_RAM_LEN: usize = 20;

/// Bytes returned by one burst read of CH0..CH5 data.
pub(crate) const CHANNEL_DATA_LEN: usize = 12;

#[allow(dead_code)]
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Reg {
  // Lower bank, only addressable while CFG0.REG_BANK is set (0x60..0x74)
  AStatusLow = 0x60,
  ItimeL = 0x63,
  ItimeM = 0x64,
  ItimeH = 0x65,
  Config = 0x70,
  Stat = 0x71,
  Edge = 0x72,
  Gpio = 0x73,
  Led = 0x74,

  // Enable & timing (0x80..0x87)
  Enable = 0x80,
  Atime = 0x81,
  Wtime = 0x83,
  SpLowThL = 0x84,
  SpLowThH = 0x85,
  SpHighThL = 0x86,
  SpHighThH = 0x87,

  // Identification (0x90..0x92)
  AuxId = 0x90,
  RevId = 0x91,
  Id = 0x92,

  // Status & spectral data (0x93..0xA0)
  Status = 0x93,
  AStatus = 0x94,
  Ch0DataL = 0x95,
  Ch0DataH = 0x96,
  Ch1DataL = 0x97,
  Ch1DataH = 0x98,
  Ch2DataL = 0x99,
  Ch2DataH = 0x9A,
  Ch3DataL = 0x9B,
  Ch3DataH = 0x9C,
  Ch4DataL = 0x9D,
  Ch4DataH = 0x9E,
  Ch5DataL = 0x9F,
  Ch5DataH = 0xA0,

  // Measurement status (0xA3..0xA7)
  Status2 = 0xA3,
  Status3 = 0xA4,
  Status5 = 0xA6,
  Status6 = 0xA7,

  // Configuration (0xA9..0xBE)
  Cfg0 = 0xA9,
  Cfg1 = 0xAA,
  Cfg3 = 0xAC,
  Cfg6 = 0xAF,
  Cfg8 = 0xB1,
  Cfg9 = 0xB2,
  Cfg10 = 0xB3,
  Cfg12 = 0xB5,
  Pers = 0xBD,
  Gpio2 = 0xBE,

  // Integration step size (0xCA..0xCB)
  AstepL = 0xCA,
  AstepH = 0xCB,

  // Gain control & auto-zero (0xCF..0xD6)
  AgcGainMax = 0xCF,
  AzConfig = 0xD6,

  // Flicker detection (0xD7..0xDB)
  FdCfg0 = 0xD7,
  FdTime1 = 0xD8,
  FdTime2 = 0xDA,
  FdStatus = 0xDB,

  // Interrupts, control & FIFO (0xF9..0xFF)
  IntEnab = 0xF9,
  Control = 0xFA,
  FifoMap = 0xFC,
  FifoLvl = 0xFD,
  FDataL = 0xFE,
  FDataH = 0xFF,
}

impl From<Reg> for u8 {
  #[inline]
  fn from(r: Reg) -> Self {
    r as u8
  }
}
