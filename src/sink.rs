//! Pixel transmit sinks.
//!
//! A flush walks the framebuffer in row-major order and hands every cell to a
//! [`PixelSink`]. The sink owns the wire: the framebuffer never touches a pin.

use embedded_hal::digital::OutputPin;

use crate::ColorCode;
use crate::Error;

/// Receives the framebuffer contents, one cell at a time.
///
/// `begin_frame` and `end_frame` bracket every flush so a sink can frame the
/// transfer (chip select, latch, ...). A sink that fails stops the flush;
/// the failed pixel is not retried.
pub trait PixelSink {
    /// Called once before the first pixel of a flush.
    fn begin_frame(&mut self) -> Result<(), Error> {
        Ok(())
    }

    /// Called once per cell, `y` outer and `x` inner.
    fn write_pixel(&mut self, x: usize, y: usize, color: ColorCode) -> Result<(), Error>;

    /// Called once after the last pixel of a flush.
    fn end_frame(&mut self) -> Result<(), Error> {
        Ok(())
    }
}

impl<T: PixelSink + ?Sized> PixelSink for &mut T {
    fn begin_frame(&mut self) -> Result<(), Error> {
        (**self).begin_frame()
    }

    fn write_pixel(&mut self, x: usize, y: usize, color: ColorCode) -> Result<(), Error> {
        (**self).write_pixel(x, y, color)
    }

    fn end_frame(&mut self) -> Result<(), Error> {
        (**self).end_frame()
    }
}

/// Adapts a closure into an infallible [`PixelSink`].
///
/// # Example
/// ```rust
/// use matrixdeck::ColorCode;
/// use matrixdeck::FnSink;
/// use matrixdeck::MatrixFrameBuffer;
///
/// let fb = MatrixFrameBuffer::new();
/// let mut lit = 0;
/// fb.flush(&mut FnSink::new(|_x, _y, color: ColorCode| {
///     if !color.is_off() {
///         lit += 1;
///     }
/// }))
/// .unwrap();
/// assert_eq!(lit, 0);
/// ```
pub struct FnSink<F>(pub F);

impl<F> FnSink<F>
where
    F: FnMut(usize, usize, ColorCode),
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> PixelSink for FnSink<F>
where
    F: FnMut(usize, usize, ColorCode),
{
    fn write_pixel(&mut self, x: usize, y: usize, color: ColorCode) -> Result<(), Error> {
        (self.0)(x, y, color);
        Ok(())
    }
}

/// Serial transmitter for the matrix shift chain.
///
/// Each pixel is clocked in as two bits, red first and green second. A bit
/// is presented with the clock low and latched on the rising edge. Chip
/// select is held low for the whole frame.
pub struct BitBangSink<DATA: OutputPin, CLK: OutputPin, CS: OutputPin> {
    data: DATA,
    clk: CLK,
    cs: CS,
}

impl<DATA: OutputPin, CLK: OutputPin, CS: OutputPin> BitBangSink<DATA, CLK, CS> {
    pub fn new(data: DATA, clk: CLK, cs: CS) -> Self {
        Self { data, clk, cs }
    }

    /// Give back the pins.
    pub fn release(self) -> (DATA, CLK, CS) {
        (self.data, self.clk, self.cs)
    }

    fn clock_in(&mut self, bit: bool) -> Result<(), Error> {
        self.clk.set_low().map_err(Error::pin)?;
        self.data.set_state(bit.into()).map_err(Error::pin)?;
        self.clk.set_high().map_err(Error::pin)?;
        Ok(())
    }
}

impl<DATA: OutputPin, CLK: OutputPin, CS: OutputPin> PixelSink for BitBangSink<DATA, CLK, CS> {
    fn begin_frame(&mut self) -> Result<(), Error> {
        self.cs.set_low().map_err(Error::pin)
    }

    fn write_pixel(&mut self, _x: usize, _y: usize, color: ColorCode) -> Result<(), Error> {
        self.clock_in(color.red())?;
        self.clock_in(color.green())
    }

    fn end_frame(&mut self) -> Result<(), Error> {
        self.cs.set_high().map_err(Error::pin)
    }
}
