use bitfield_struct::bitfield;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::{I2c, SevenBitAddress};

use crate::fmt::{debug, warning};
use crate::{As7341, Channel, ChannelGroup, Error, Readiness, Reg, Sample, CHANNEL_DATA_LEN};

/// STATUS2 (0xA3).
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub(crate) struct Status2 {
  pub(crate) fdsat_digital: bool,
  pub(crate) fdsat_analog: bool,
  __: bool,
  pub(crate) asat_analog: bool,
  pub(crate) asat_digital: bool,
  ___: bool,
  /// Spectral data of the current cycle is valid.
  pub(crate) avalid: bool,
  ____: bool,
}

impl Status2 {
  fn saturated(self) -> bool {
    self.asat_analog() || self.asat_digital()
  }
}

/// How long to wait for STATUS2.AVALID before reading a group anyway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReadyPolling {
  /// Status reads before giving up. Zero reads the data without waiting.
  pub attempts: u8,
  /// Sleep before each status read (ms).
  pub interval_ms: u32,
}

impl ReadyPolling {
  pub const fn new(attempts: u8, interval_ms: u32) -> Self {
    Self { attempts, interval_ms }
  }
}

impl Default for ReadyPolling {
  fn default() -> Self {
    Self::new(20, 100)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum AcquisitionState {
  Idle,
  GroupSelected(ChannelGroup),
  WaitingReady(ChannelGroup),
  Read(ChannelGroup),
  Assembled,
}

const fn slot(group: ChannelGroup) -> usize {
  match group {
    ChannelGroup::Low => 0,
    ChannelGroup::High => 1,
  }
}

impl<I, E, D> As7341<I, D>
where
  I: I2c<SevenBitAddress, Error = E>,
  D: DelayNs,
{
  /// Acquire all twelve channels with the driver's [`ReadyPolling`].
  ///
  /// Routes the low group, measures, routes the high group, measures again,
  /// and only then publishes the joined [`Sample`]. A bus error aborts the
  /// whole sequence and leaves the previously published sample in place. A
  /// group that never reports valid data is still read; the returned sample is
  /// then [`Sample::is_stale`].
  pub async fn read_sample(&mut self) -> Result<Sample, Error<E>> {
    let polling = self.polling;
    self.read_sample_with(polling).await
  }

  /// [`As7341::read_sample`] with a one-off polling policy.
  pub async fn read_sample_with(&mut self, polling: ReadyPolling) -> Result<Sample, Error<E>> {
    let mut state = AcquisitionState::Idle;
    let mut blocks = [[0u8; CHANNEL_DATA_LEN]; 2];
    let mut readiness = [Readiness::TimedOut { attempts: 0 }; 2];
    let mut saturated = false;

    loop {
      match state {
        AcquisitionState::Idle => {
          self.select_channel_group(ChannelGroup::Low).await?;
          state = AcquisitionState::GroupSelected(ChannelGroup::Low);
        }

        AcquisitionState::GroupSelected(group) => {
          self.set_spectral_measurement(true).await?;
          state = AcquisitionState::WaitingReady(group);
        }

        AcquisitionState::WaitingReady(group) => {
          let (ready, status) = self.wait_until_ready(polling).await?;
          if ready.is_timed_out() {
            warning!("AS7341: {} group not ready after {} polls, reading anyway", group, polling.attempts);
          }
          readiness[slot(group)] = ready;
          saturated |= status.saturated();
          state = AcquisitionState::Read(group);
        }

        AcquisitionState::Read(group) => {
          self.read_bytes(Reg::Ch0DataL, &mut blocks[slot(group)]).await?;
          debug!("AS7341: {} group read", group);
          state = match group {
            ChannelGroup::Low => {
              self.select_channel_group(ChannelGroup::High).await?;
              AcquisitionState::GroupSelected(ChannelGroup::High)
            }
            ChannelGroup::High => AcquisitionState::Assembled,
          };
        }

        AcquisitionState::Assembled => {
          let sample = Sample::assemble(&blocks[0], &blocks[1], readiness, saturated);
          self.store.publish(sample);
          return Ok(sample);
        }
      }
    }
  }

  /// `true` once the current measurement cycle has produced valid data.
  pub async fn is_data_ready(&mut self) -> Result<bool, Error<E>> {
    Ok(self.status().await?.avalid())
  }

  async fn status(&mut self) -> Result<Status2, Error<E>> {
    self.read(Reg::Status2).await
  }

  /// Sleep-and-recheck STATUS2 at most `polling.attempts` times.
  async fn wait_until_ready(&mut self, polling: ReadyPolling) -> Result<(Readiness, Status2), Error<E>> {
    let mut status = Status2::new();
    for attempt in 1..=polling.attempts {
      self.delay.delay_ms(polling.interval_ms).await;
      status = self.status().await?;
      if status.avalid() {
        return Ok((Readiness::Ready { attempts: attempt }, status));
      }
    }
    Ok((Readiness::TimedOut { attempts: polling.attempts }, status))
  }

  pub fn ready_polling(&self) -> ReadyPolling {
    self.polling
  }

  pub fn set_ready_polling(&mut self, polling: ReadyPolling) {
    self.polling = polling;
  }

  /// Most recent complete sample, if any acquisition has finished.
  pub fn latest_sample(&self) -> Option<&Sample> {
    self.store.latest()
  }

  /// One channel of the most recent sample.
  pub fn channel(&self, channel: Channel) -> Result<u16, Error<E>> {
    self.store.latest().map(|s| s.channel(channel)).ok_or(Error::NoSample)
  }

  /// [`As7341::channel`] looked up by name, see [`Channel`]'s `FromStr`.
  pub fn channel_by_name(&self, name: &str) -> Result<u16, Error<E>> {
    let channel: Channel = name.parse().map_err(|_| Error::UnknownChannel)?;
    self.channel(channel)
  }
}
