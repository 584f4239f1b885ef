use core::fmt;

use embedded_hal::digital::ErrorKind;

/// Failures reported by the motion sensor capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionError {
    /// No sensor answered during bring-up.
    NotFound,
    /// The sensor bus reported an error.
    Bus,
    /// A reading was requested before a successful `begin`.
    NotInitialized,
}

/// Errors raised at the hardware boundary of the driver.
///
/// Drawing never fails; only the collaborators (pins, converters, the motion
/// sensor, the speaker and the pixel sink) can.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum Error {
    /// A digital pin failed to read or switch.
    Pin(ErrorKind),
    /// An analog channel failed to sample.
    Adc,
    /// The motion sensor failed or is not ready.
    Motion(MotionError),
    /// The speaker could not play.
    Speaker,
    /// A pixel sink refused a transfer.
    Transmit,
}

impl Error {
    /// Map any `embedded-hal` pin error into [`Error::Pin`].
    pub fn pin<E: embedded_hal::digital::Error>(err: E) -> Self {
        Self::Pin(err.kind())
    }
}

impl From<MotionError> for Error {
    fn from(err: MotionError) -> Self {
        Self::Motion(err)
    }
}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => f.write_str("motion sensor not found"),
            Self::Bus => f.write_str("motion sensor bus error"),
            Self::NotInitialized => f.write_str("motion sensor not initialized"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pin(kind) => write!(f, "pin error: {kind}"),
            Self::Adc => f.write_str("analog read failed"),
            Self::Motion(err) => write!(f, "{err}"),
            Self::Speaker => f.write_str("speaker error"),
            Self::Transmit => f.write_str("pixel transmit failed"),
        }
    }
}

impl core::error::Error for Error {}
