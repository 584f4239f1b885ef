//! Packed 2-bit framebuffer for the LED matrix.
//!
//! The buffer holds one [`ColorCode`] per cell, four cells to a byte, in
//! row-major order. Writes outside the panel are dropped so the drawing
//! algorithms never have to clip on their own.
//!
//! # Example
//! ```rust
//! use embedded_graphics::prelude::*;
//! use embedded_graphics::primitives::PrimitiveStyle;
//! use embedded_graphics::primitives::Rectangle;
//! use matrixdeck::compute_buffer_size;
//! use matrixdeck::ColorCode;
//! use matrixdeck::FrameBuffer;
//!
//! const ROWS: usize = 16;
//! const COLS: usize = 32;
//! const SIZE: usize = compute_buffer_size(ROWS, COLS);
//!
//! let mut framebuffer = FrameBuffer::<ROWS, COLS, SIZE>::new();
//! framebuffer.set_pixel(Point::new(3, 4), ColorCode::RED);
//!
//! // embedded-graphics primitives draw through the same clipping setter
//! Rectangle::new(Point::new(28, 12), Size::new(8, 8))
//!     .into_styled(PrimitiveStyle::with_fill(ColorCode::GREEN))
//!     .draw(&mut framebuffer)
//!     .unwrap();
//!
//! assert_eq!(framebuffer.get_pixel(Point::new(3, 4)), Some(ColorCode::RED));
//! assert_eq!(framebuffer.get_pixel(Point::new(31, 15)), Some(ColorCode::GREEN));
//! assert_eq!(framebuffer.get_pixel(Point::new(32, 15)), None);
//! ```

use core::convert::Infallible;

use embedded_graphics::prelude::Point;
use embedded_graphics::prelude::Size;
use embedded_graphics::Pixel;

use crate::raster::Canvas;
use crate::sink::PixelSink;
use crate::ColorCode;
use crate::Error;

const BITS_PER_CELL: usize = 2;
const CELLS_PER_BYTE: usize = 8 / BITS_PER_CELL;
const CELL_MASK: u8 = 0x03;

/// Number of bytes needed to store `rows * cols` cells.
pub const fn compute_buffer_size(rows: usize, cols: usize) -> usize {
    (rows * cols).div_ceil(CELLS_PER_BYTE)
}

/// Framebuffer for a `COLS` x `ROWS` bicolor matrix.
///
/// # Type Parameters
/// - `ROWS`: Number of rows (panel height)
/// - `COLS`: Number of columns (panel width)
/// - `SIZE`: Storage in bytes, must be `compute_buffer_size(ROWS, COLS)`
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer<const ROWS: usize, const COLS: usize, const SIZE: usize> {
    data: [u8; SIZE],
}

impl<const ROWS: usize, const COLS: usize, const SIZE: usize> Default
    for FrameBuffer<ROWS, COLS, SIZE>
{
    fn default() -> Self {
        Self::new()
    }
}

impl<const ROWS: usize, const COLS: usize, const SIZE: usize> FrameBuffer<ROWS, COLS, SIZE> {
    /// Create a framebuffer with every cell off.
    pub const fn new() -> Self {
        assert!(SIZE == compute_buffer_size(ROWS, COLS));
        Self { data: [0; SIZE] }
    }

    pub const fn width(&self) -> usize {
        COLS
    }

    pub const fn height(&self) -> usize {
        ROWS
    }

    /// Turn every cell off.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Set a pixel. Points outside the panel are ignored.
    pub fn set_pixel(&mut self, p: Point, color: ColorCode) {
        if p.x < 0 || p.y < 0 {
            return;
        }
        self.set_pixel_internal(p.x as usize, p.y as usize, color);
    }

    fn set_pixel_internal(&mut self, x: usize, y: usize, color: ColorCode) {
        if x >= COLS || y >= ROWS {
            return;
        }
        let (byte, shift) = Self::locate(x, y);
        let cell = &mut self.data[byte];
        *cell = (*cell & !(CELL_MASK << shift)) | ((color.code() & CELL_MASK) << shift);
    }

    /// Read a pixel back, or `None` for points outside the panel.
    pub fn get_pixel(&self, p: Point) -> Option<ColorCode> {
        if p.x < 0 || p.y < 0 {
            return None;
        }
        let (x, y) = (p.x as usize, p.y as usize);
        if x >= COLS || y >= ROWS {
            return None;
        }
        Some(self.cell(x, y))
    }

    fn cell(&self, x: usize, y: usize) -> ColorCode {
        let (byte, shift) = Self::locate(x, y);
        ColorCode::new(self.data[byte] >> shift)
    }

    const fn locate(x: usize, y: usize) -> (usize, u32) {
        let index = y * COLS + x;
        (
            index / CELLS_PER_BYTE,
            ((index % CELLS_PER_BYTE) * BITS_PER_CELL) as u32,
        )
    }

    /// Every cell as `(x, y, color)`, `y` outer and `x` inner.
    pub fn pixels(&self) -> impl Iterator<Item = (usize, usize, ColorCode)> + '_ {
        (0..ROWS).flat_map(move |y| (0..COLS).map(move |x| (x, y, self.cell(x, y))))
    }

    /// Number of cells that are not off.
    pub fn lit_count(&self) -> usize {
        self.pixels().filter(|(_, _, color)| !color.is_off()).count()
    }

    /// Push the whole buffer to `sink`, one cell at a time in row-major
    /// order. The buffer is left untouched.
    ///
    /// Stops at the first sink error and returns it.
    pub fn flush<S: PixelSink + ?Sized>(&self, sink: &mut S) -> Result<(), Error> {
        sink.begin_frame()?;
        for (x, y, color) in self.pixels() {
            sink.write_pixel(x, y, color)?;
        }
        sink.end_frame()
    }
}

impl<const ROWS: usize, const COLS: usize, const SIZE: usize> Canvas
    for FrameBuffer<ROWS, COLS, SIZE>
{
    fn set_pixel(&mut self, p: Point, color: ColorCode) {
        FrameBuffer::set_pixel(self, p, color);
    }
}

impl<const ROWS: usize, const COLS: usize, const SIZE: usize>
    embedded_graphics::prelude::OriginDimensions for FrameBuffer<ROWS, COLS, SIZE>
{
    fn size(&self) -> Size {
        Size::new(COLS as u32, ROWS as u32)
    }
}

impl<const ROWS: usize, const COLS: usize, const SIZE: usize>
    embedded_graphics::draw_target::DrawTarget for FrameBuffer<ROWS, COLS, SIZE>
{
    type Color = ColorCode;

    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, color) in pixels {
            FrameBuffer::set_pixel(self, p, color);
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let code = color.code() & CELL_MASK;
        let pattern = code | (code << 2) | (code << 4) | (code << 6);
        self.data.fill(pattern);
        // unused cells in a partial last byte stay zero
        let tail = (ROWS * COLS) % CELLS_PER_BYTE;
        if tail != 0 {
            if let Some(last) = self.data.last_mut() {
                *last &= (1u8 << (tail * BITS_PER_CELL)) - 1;
            }
        }
        Ok(())
    }
}

impl<const ROWS: usize, const COLS: usize, const SIZE: usize> core::fmt::Debug
    for FrameBuffer<ROWS, COLS, SIZE>
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FrameBuffer")
            .field("rows", &ROWS)
            .field("cols", &COLS)
            .field("size", &SIZE)
            .field("lit", &self.lit_count())
            .finish()
    }
}

#[cfg(feature = "defmt")]
impl<const ROWS: usize, const COLS: usize, const SIZE: usize> defmt::Format
    for FrameBuffer<ROWS, COLS, SIZE>
{
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "FrameBuffer<{}, {}, {}>", ROWS, COLS, SIZE);
        defmt::write!(f, " lit: {}", self.lit_count());
    }
}
