//! Tone output.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs as AsyncDelayNs;

use crate::Error;

/// Plays single tones.
pub trait Speaker {
    /// Play a tone of `frequency_hz` for `duration_ms`, returning when it has
    /// finished. A frequency of 0 is a rest.
    fn play_tone(&mut self, frequency_hz: u32, duration_ms: u32) -> Result<(), Error>;
}

impl<T: Speaker + ?Sized> Speaker for &mut T {
    fn play_tone(&mut self, frequency_hz: u32, duration_ms: u32) -> Result<(), Error> {
        (**self).play_tone(frequency_hz, duration_ms)
    }
}

/// Stand-in for boards without a speaker. Every tone is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSpeaker;

impl Speaker for NoSpeaker {
    fn play_tone(&mut self, _frequency_hz: u32, _duration_ms: u32) -> Result<(), Error> {
        Ok(())
    }
}

/// Square wave on a plain output pin, timed with a delay provider.
///
/// The pin is driven high and low for half a period each, for as many whole
/// periods as fit into the duration. The pin is left low.
pub struct SquareWaveSpeaker<P, D> {
    pin: P,
    delay: D,
}

/// Half period in microseconds and number of whole periods for a tone.
fn timing(frequency_hz: u32, duration_ms: u32) -> (u32, u64) {
    let half_period_us = 500_000 / frequency_hz;
    let cycles = u64::from(duration_ms) * u64::from(frequency_hz) / 1000;
    (half_period_us, cycles)
}

impl<P: OutputPin, D> SquareWaveSpeaker<P, D> {
    pub fn new(pin: P, delay: D) -> Self {
        Self { pin, delay }
    }

    /// Give back the pin and the delay.
    pub fn release(self) -> (P, D) {
        (self.pin, self.delay)
    }
}

impl<P: OutputPin, D: AsyncDelayNs> SquareWaveSpeaker<P, D> {
    /// Same as [`Speaker::play_tone`], yielding to the executor between
    /// edges.
    pub async fn play_tone_async(
        &mut self,
        frequency_hz: u32,
        duration_ms: u32,
    ) -> Result<(), Error> {
        self.pin.set_low().map_err(Error::pin)?;
        if frequency_hz == 0 {
            self.delay.delay_ms(duration_ms).await;
            return Ok(());
        }

        let (half_period_us, cycles) = timing(frequency_hz, duration_ms);
        for _ in 0..cycles {
            self.pin.set_high().map_err(Error::pin)?;
            self.delay.delay_us(half_period_us).await;
            self.pin.set_low().map_err(Error::pin)?;
            self.delay.delay_us(half_period_us).await;
        }
        Ok(())
    }
}

impl<P: OutputPin, D: DelayNs> Speaker for SquareWaveSpeaker<P, D> {
    fn play_tone(&mut self, frequency_hz: u32, duration_ms: u32) -> Result<(), Error> {
        self.pin.set_low().map_err(Error::pin)?;
        if frequency_hz == 0 {
            self.delay.delay_ms(duration_ms);
            return Ok(());
        }

        let (half_period_us, cycles) = timing(frequency_hz, duration_ms);
        for _ in 0..cycles {
            self.pin.set_high().map_err(Error::pin)?;
            self.delay.delay_us(half_period_us);
            self.pin.set_low().map_err(Error::pin)?;
            self.delay.delay_us(half_period_us);
        }
        Ok(())
    }
}
