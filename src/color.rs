//! 2-bit color codes for the bicolor matrix.
//!
//! Every LED on the panel has a red and a green die. A color code selects
//! which of them are lit: bit 0 drives red, bit 1 drives green, and both
//! together give amber.

use bitfield::bitfield;
use embedded_graphics::pixelcolor::raw::RawData;
use embedded_graphics::pixelcolor::raw::RawU2;
use embedded_graphics::pixelcolor::PixelColor;

bitfield! {
    /// A color code for one matrix cell.
    ///
    /// The bit layout matches the order in which the panel shifts data in:
    /// - Bit 1: Green die
    /// - Bit 0: Red die
    ///
    /// Values are always masked to two bits, so any `u8` converts.
    #[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
    #[repr(transparent)]
    pub struct ColorCode(u8);
    impl Debug;
    pub red, set_red: 0;
    pub green, set_green: 1;
    pub u8, code, _: 1, 0;
}

#[cfg(feature = "defmt")]
impl defmt::Format for ColorCode {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "ColorCode({=u8})", self.code())
    }
}

impl ColorCode {
    /// Both dies off.
    pub const OFF: Self = Self(0);
    /// Red die only.
    pub const RED: Self = Self(1);
    /// Green die only.
    pub const GREEN: Self = Self(2);
    /// Red and green together.
    pub const AMBER: Self = Self(3);

    /// Build a color code from a raw value, dropping everything above the
    /// low two bits.
    pub const fn new(raw: u8) -> Self {
        Self(raw & 0x03)
    }

    pub const fn is_off(self) -> bool {
        self.0 & 0x03 == 0
    }
}

impl From<u8> for ColorCode {
    fn from(raw: u8) -> Self {
        Self::new(raw)
    }
}

impl From<ColorCode> for u8 {
    fn from(color: ColorCode) -> Self {
        color.code()
    }
}

impl PixelColor for ColorCode {
    type Raw = RawU2;
}

impl From<RawU2> for ColorCode {
    fn from(raw: RawU2) -> Self {
        Self::new(raw.into_inner())
    }
}

impl From<ColorCode> for RawU2 {
    fn from(color: ColorCode) -> Self {
        RawU2::new(color.code())
    }
}
