use core::str::FromStr;

use crate::{ChannelGroup, CHANNEL_DATA_LEN};

/// Number of values in a complete sample.
pub const CHANNEL_COUNT: usize = 12;

/// Named position within a [`Sample`], in acquisition order.
///
/// The first six come from [`ChannelGroup::Low`], the last six from
/// [`ChannelGroup::High`]. Clear and NIR are routed in both groups, so each
/// appears twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Channel {
  /// F1, 415 nm.
  Violet = 0,
  /// F2, 445 nm.
  Indigo = 1,
  /// F3, 480 nm.
  Blue = 2,
  /// F4, 515 nm.
  Cyan = 3,
  /// Clear, read with the low group.
  ClearLow = 4,
  /// NIR, read with the low group.
  NirLow = 5,
  /// F5, 555 nm.
  Green = 6,
  /// F6, 590 nm.
  Yellow = 7,
  /// F7, 630 nm.
  Red = 8,
  /// F8, 680 nm.
  FarRed = 9,
  /// Clear, read with the high group.
  Clear = 10,
  /// NIR, read with the high group.
  Nir = 11,
}

impl Channel {
  pub const ALL: [Channel; CHANNEL_COUNT] = [
    Channel::Violet,
    Channel::Indigo,
    Channel::Blue,
    Channel::Cyan,
    Channel::ClearLow,
    Channel::NirLow,
    Channel::Green,
    Channel::Yellow,
    Channel::Red,
    Channel::FarRed,
    Channel::Clear,
    Channel::Nir,
  ];

  pub const fn index(self) -> usize {
    self as usize
  }

  pub const fn group(self) -> ChannelGroup {
    if self.index() < 6 {
      ChannelGroup::Low
    } else {
      ChannelGroup::High
    }
  }

  /// Peak wavelength of the eight filter channels.
  pub const fn wavelength_nm(self) -> Option<u16> {
    match self {
      Channel::Violet => Some(415),
      Channel::Indigo => Some(445),
      Channel::Blue => Some(480),
      Channel::Cyan => Some(515),
      Channel::Green => Some(555),
      Channel::Yellow => Some(590),
      Channel::Red => Some(630),
      Channel::FarRed => Some(680),
      _ => None,
    }
  }
}

/// A name did not match any [`Channel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnknownChannel;

impl FromStr for Channel {
  type Err = UnknownChannel;

  /// Accepts color names, filter names (`f1`..`f8`) and wavelengths
  /// (`415nm`), case-insensitively. `clear` and `nir` name the high-group taps;
  /// `clear0`/`nir0` the low-group ones.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    const NAMES: [(&str, Channel); 30] = [
      ("violet", Channel::Violet),
      ("f1", Channel::Violet),
      ("415nm", Channel::Violet),
      ("indigo", Channel::Indigo),
      ("f2", Channel::Indigo),
      ("445nm", Channel::Indigo),
      ("blue", Channel::Blue),
      ("f3", Channel::Blue),
      ("480nm", Channel::Blue),
      ("cyan", Channel::Cyan),
      ("f4", Channel::Cyan),
      ("515nm", Channel::Cyan),
      ("clear0", Channel::ClearLow),
      ("nir0", Channel::NirLow),
      ("green", Channel::Green),
      ("f5", Channel::Green),
      ("555nm", Channel::Green),
      ("yellow", Channel::Yellow),
      ("f6", Channel::Yellow),
      ("590nm", Channel::Yellow),
      ("red", Channel::Red),
      ("f7", Channel::Red),
      ("630nm", Channel::Red),
      ("far-red", Channel::FarRed),
      ("far_red", Channel::FarRed),
      ("f8", Channel::FarRed),
      ("680nm", Channel::FarRed),
      ("clear", Channel::Clear),
      ("nir", Channel::Nir),
      ("near-infrared", Channel::Nir),
    ];

    NAMES
      .iter()
      .find(|(name, _)| name.eq_ignore_ascii_case(s.trim()))
      .map(|(_, channel)| *channel)
      .ok_or(UnknownChannel)
  }
}

/// Outcome of polling STATUS2.AVALID for one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Readiness {
  /// AVALID was seen on poll number `attempts` (1-based).
  Ready { attempts: u8 },
  /// AVALID never set within `attempts` polls; data was read anyway.
  TimedOut { attempts: u8 },
}

impl Readiness {
  pub const fn is_timed_out(self) -> bool {
    matches!(self, Readiness::TimedOut { .. })
  }
}

/// Twelve 16-bit channel counts from one two-pass acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
  channels: [u16; CHANNEL_COUNT],
  readiness: [Readiness; 2],
  saturated: bool,
}

impl Sample {
  /// Join the low- and high-group data blocks (CH0..CH5, little-endian).
  pub(crate) fn assemble(
    low: &[u8; CHANNEL_DATA_LEN],
    high: &[u8; CHANNEL_DATA_LEN],
    readiness: [Readiness; 2],
    saturated: bool,
  ) -> Self {
    let mut channels = [0u16; CHANNEL_COUNT];
    for (value, bytes) in channels.iter_mut().zip(low.chunks_exact(2).chain(high.chunks_exact(2))) {
      *value = u16::from_le_bytes([bytes[0], bytes[1]]);
    }
    Self { channels, readiness, saturated }
  }

  pub fn channel(&self, channel: Channel) -> u16 {
    self.channels[channel.index()]
  }

  /// All counts in [`Channel::ALL`] order.
  pub fn channels(&self) -> &[u16; CHANNEL_COUNT] {
    &self.channels
  }

  /// The six ADC values read while `group` was routed.
  pub fn group(&self, group: ChannelGroup) -> &[u16] {
    let start = group.offset();
    &self.channels[start..start + 6]
  }

  pub fn readiness(&self, group: ChannelGroup) -> Readiness {
    match group {
      ChannelGroup::Low => self.readiness[0],
      ChannelGroup::High => self.readiness[1],
    }
  }

  /// `true` when either half was read without the device reporting valid data.
  pub fn is_stale(&self) -> bool {
    self.readiness.iter().any(|r| r.is_timed_out())
  }

  /// `true` when STATUS2 flagged analog or digital ADC saturation for either
  /// half.
  pub fn is_saturated(&self) -> bool {
    self.saturated
  }
}

/// Holds the most recent complete [`Sample`].
///
/// Only whole samples are ever stored; a new one replaces the previous one in a
/// single assignment.
#[derive(Debug, Clone, Default)]
pub(crate) struct SampleStore {
  latest: Option<Sample>,
}

impl SampleStore {
  pub(crate) const fn new() -> Self {
    Self { latest: None }
  }

  pub(crate) fn publish(&mut self, sample: Sample) {
    self.latest = Some(sample);
  }

  pub(crate) fn latest(&self) -> Option<&Sample> {
    self.latest.as_ref()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const READY: [Readiness; 2] = [Readiness::Ready { attempts: 1 }; 2];

  fn blocks() -> ([u8; 12], [u8; 12]) {
    let mut low = [0u8; 12];
    let mut high = [0u8; 12];
    for i in 0..12 {
      low[i] = i as u8;
      high[i] = 0x80 | i as u8;
    }
    (low, high)
  }

  #[test]
  fn halves_are_concatenated_without_reordering() {
    let (low, high) = blocks();
    let sample = Sample::assemble(&low, &high, READY, false);

    assert_eq!(
      sample.channels(),
      &[0x0100, 0x0302, 0x0504, 0x0706, 0x0908, 0x0B0A, 0x8180, 0x8382, 0x8584, 0x8786, 0x8988, 0x8B8A]
    );
    assert_eq!(sample.channel(Channel::Violet), 0x0100);
    assert_eq!(sample.channel(Channel::NirLow), 0x0B0A);
    assert_eq!(sample.channel(Channel::Green), 0x8180);
    assert_eq!(sample.channel(Channel::Nir), 0x8B8A);
    assert_eq!(sample.group(ChannelGroup::High), &sample.channels()[6..]);
  }

  #[test]
  fn any_timed_out_half_marks_sample_stale() {
    let (low, high) = blocks();
    assert!(!Sample::assemble(&low, &high, READY, false).is_stale());

    let sample = Sample::assemble(&low, &high, [Readiness::Ready { attempts: 3 }, Readiness::TimedOut { attempts: 20 }], true);
    assert!(sample.is_saturated());
    assert!(sample.is_stale());
    assert!(!sample.readiness(ChannelGroup::Low).is_timed_out());
    assert_eq!(sample.readiness(ChannelGroup::High), Readiness::TimedOut { attempts: 20 });
  }

  #[test]
  fn channel_names_parse() {
    assert_eq!("violet".parse::<Channel>(), Ok(Channel::Violet));
    assert_eq!("F8".parse::<Channel>(), Ok(Channel::FarRed));
    assert_eq!(" 555nm ".parse::<Channel>(), Ok(Channel::Green));
    assert_eq!("NIR".parse::<Channel>(), Ok(Channel::Nir));
    assert_eq!("clear0".parse::<Channel>(), Ok(Channel::ClearLow));
    assert_eq!("ultraviolet".parse::<Channel>(), Err(UnknownChannel));
  }

  #[test]
  fn channel_order_matches_groups() {
    for (i, channel) in Channel::ALL.iter().enumerate() {
      assert_eq!(channel.index(), i);
      let expected = if i < 6 { ChannelGroup::Low } else { ChannelGroup::High };
      assert_eq!(channel.group(), expected);
    }
    assert_eq!(Channel::ALL.iter().filter_map(|c| c.wavelength_nm()).count(), 8);
  }

  #[test]
  fn store_starts_empty_and_keeps_latest() {
    let (low, high) = blocks();
    let mut store = SampleStore::new();
    assert!(store.latest().is_none());

    store.publish(Sample::assemble(&low, &high, READY, false));
    store.publish(Sample::assemble(&high, &low, READY, false));
    assert_eq!(store.latest().map(|s| s.channel(Channel::Violet)), Some(0x8180));
  }
}
