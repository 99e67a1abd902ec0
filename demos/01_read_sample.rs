//! Minimal acquisition example.
#![allow(unused)]
use embedded_hal_async::{
  delay::DelayNs,
  i2c::{I2c, SevenBitAddress},
};
use as7341::{As7341, Channel, ChannelGroup, Config, Gain, ReadyPolling};

#[allow(dead_code)]
async fn main_async<I2C, D, E>(i2c: I2C, delay: D) -> Result<(), as7341::Error<E>>
where
  I2C: I2c<SevenBitAddress, Error = E>,
  D: DelayNs,
{
  let mut dev = As7341::new(i2c, delay, None);
  if !dev.initialize().await? {
    return Ok(());
  }

  dev.configure(&Config::default().with_atime(29).with_astep(599).with_gain(Gain::X64)).await?;
  dev.set_ready_polling(ReadyPolling::new(10, 50));

  let sample = dev.read_sample().await?;
  let _filters = sample.group(ChannelGroup::Low);
  let _violet = sample.channel(Channel::Violet);
  let _stale = sample.is_stale();
  let _nir = dev.channel_by_name("nir")?;
  Ok(())
}

fn main() {}
