//! The board driver.
//!
//! [`MatrixDeck`] owns the framebuffer and every hardware collaborator. It is
//! a [`Canvas`], so all drawing operations from
//! [`CanvasExt`](crate::CanvasExt) are available on it directly; nothing is
//! sent to the panel until [`MatrixDeck::update_display`] is called.
//!
//! # Example
//! ```rust
//! use embedded_graphics::prelude::*;
//! use matrixdeck::{
//!     AnalogInput, Button, CanvasExt, ColorCode, DeckConfig, Error, FnSink, InputProvider,
//!     JoystickAxis, MatrixDeck, NoMotion, NoSpeaker,
//! };
//!
//! struct Idle;
//!
//! impl InputProvider for Idle {
//!     fn button(&mut self, _button: Button) -> Result<bool, Error> {
//!         Ok(false)
//!     }
//!
//!     fn joystick(&mut self, _axis: JoystickAxis) -> Result<u16, Error> {
//!         Ok(2048)
//!     }
//! }
//!
//! struct Quiet;
//!
//! impl AnalogInput for Quiet {
//!     fn read(&mut self) -> Result<u16, Error> {
//!         Ok(0)
//!     }
//! }
//!
//! let mut lit = 0;
//! let sink = FnSink::new(|_x, _y, color: ColorCode| {
//!     if !color.is_off() {
//!         lit += 1;
//!     }
//! });
//! let mut deck: MatrixDeck<_, _, _, _, _> =
//!     MatrixDeck::new(sink, Idle, NoMotion, Quiet, NoSpeaker, DeckConfig::default());
//!
//! deck.begin().unwrap();
//! assert!(deck.read_motion().is_err());
//!
//! deck.draw_rect(Point::new(0, 0), Size::new(32, 16), ColorCode::GREEN);
//! deck.draw_text(Point::new(2, 5), "HI", ColorCode::AMBER, 1);
//! deck.update_display().unwrap();
//! assert_eq!(deck.joystick_position().unwrap(), Point::new(15, 7));
//!
//! drop(deck);
//! assert!(lit > 92);
//! ```

use embedded_graphics::prelude::*;

use crate::error::MotionError;
use crate::input::AnalogInput;
use crate::input::Axis;
use crate::input::Button;
use crate::input::InputProvider;
use crate::input::JoystickAxis;
use crate::input::MotionReading;
use crate::input::MotionSensor;
use crate::input::Vector3;
use crate::sink::PixelSink;
use crate::speaker::Speaker;
use crate::Canvas;
use crate::ColorCode;
use crate::Error;
use crate::FrameBuffer;
use crate::MATRIX_BUFFER_SIZE;
use crate::MATRIX_HEIGHT;
use crate::MATRIX_WIDTH;

/// Run-time settings for [`MatrixDeck`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeckConfig {
    /// Full-scale reading of the joystick and microphone converters.
    pub adc_max: u16,
    /// Push the (cleared) framebuffer once from [`MatrixDeck::begin`].
    pub flush_on_begin: bool,
}

impl DeckConfig {
    pub const ADC_10_BIT: u16 = 1023;
    pub const ADC_12_BIT: u16 = 4095;

    pub const fn new() -> Self {
        Self {
            adc_max: Self::ADC_12_BIT,
            flush_on_begin: true,
        }
    }

    pub const fn with_adc_max(mut self, adc_max: u16) -> Self {
        self.adc_max = adc_max;
        self
    }

    pub const fn with_flush_on_begin(mut self, flush_on_begin: bool) -> Self {
        self.flush_on_begin = flush_on_begin;
        self
    }
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Map `raw` from `[0, max]` onto `[0, span]`, clamping readings above `max`.
fn scale(raw: u16, max: u16, span: u32) -> u32 {
    if max == 0 {
        return 0;
    }
    u32::from(raw.min(max)) * span / u32::from(max)
}

/// The MatrixDeck board: LED matrix, buttons, joystick, motion sensor,
/// microphone and speaker.
///
/// - `S` transmits the framebuffer
/// - `I` reads buttons and joystick
/// - `M` is the motion sensor
/// - `A` samples the microphone
/// - `P` plays tones
///
/// The geometry defaults to the 32×16 panel. Because defaults do not take
/// part in inference, bind the result of [`MatrixDeck::new`] to a
/// `MatrixDeck<_, _, _, _, _>` (or a concrete alias).
pub struct MatrixDeck<
    S,
    I,
    M,
    A,
    P,
    const ROWS: usize = MATRIX_HEIGHT,
    const COLS: usize = MATRIX_WIDTH,
    const SIZE: usize = MATRIX_BUFFER_SIZE,
> {
    framebuffer: FrameBuffer<ROWS, COLS, SIZE>,
    sink: S,
    inputs: I,
    motion: M,
    microphone: A,
    speaker: P,
    config: DeckConfig,
    motion_ready: bool,
}

impl<S, I, M, A, P, const ROWS: usize, const COLS: usize, const SIZE: usize>
    MatrixDeck<S, I, M, A, P, ROWS, COLS, SIZE>
where
    S: PixelSink,
    I: InputProvider,
    M: MotionSensor,
    A: AnalogInput,
    P: Speaker,
{
    /// Create the driver with a blank framebuffer. Nothing touches the
    /// hardware until [`begin`](Self::begin).
    pub fn new(
        sink: S,
        inputs: I,
        motion: M,
        microphone: A,
        speaker: P,
        config: DeckConfig,
    ) -> Self {
        Self {
            framebuffer: FrameBuffer::new(),
            sink,
            inputs,
            motion,
            microphone,
            speaker,
            config,
            motion_ready: false,
        }
    }

    /// Bring up the motion sensor, then blank the panel if
    /// [`DeckConfig::flush_on_begin`] is set.
    ///
    /// A sensor failure is returned as is and nothing is flushed. Motion
    /// readings only become available once the whole bring-up succeeded;
    /// calling `begin` again retries it.
    pub fn begin(&mut self) -> Result<(), Error> {
        info!("matrixdeck: begin, {}x{} panel", COLS, ROWS);

        self.motion_ready = false;
        if let Err(err) = self.motion.init() {
            warn!("matrixdeck: motion sensor init failed: {}", err);
            return Err(err.into());
        }

        if self.config.flush_on_begin {
            self.update_display()?;
        }
        self.motion_ready = true;
        Ok(())
    }

    /// Send the whole framebuffer to the panel.
    pub fn update_display(&mut self) -> Result<(), Error> {
        trace!("matrixdeck: flush {}x{}", COLS, ROWS);
        self.framebuffer.flush(&mut self.sink)
    }

    /// Turn every pixel off. The panel keeps its picture until the next
    /// [`update_display`](Self::update_display).
    pub fn clear_display(&mut self) {
        self.framebuffer.clear();
    }

    pub fn set_pixel(&mut self, p: Point, color: ColorCode) {
        self.framebuffer.set_pixel(p, color);
    }

    /// `None` outside the panel.
    pub fn get_pixel(&self, p: Point) -> Option<ColorCode> {
        self.framebuffer.get_pixel(p)
    }

    pub fn read_button(&mut self, button: Button) -> Result<bool, Error> {
        self.inputs.button(button)
    }

    /// Raw converter reading, `0..=adc_max`.
    pub fn read_joystick(&mut self, axis: JoystickAxis) -> Result<u16, Error> {
        self.inputs.joystick(axis)
    }

    /// The joystick deflection as a pixel position on the panel.
    pub fn joystick_position(&mut self) -> Result<Point, Error> {
        let x = self.inputs.joystick(JoystickAxis::X)?;
        let y = self.inputs.joystick(JoystickAxis::Y)?;
        let max = self.config.adc_max;
        let x = scale(x, max, COLS.saturating_sub(1) as u32);
        let y = scale(y, max, ROWS.saturating_sub(1) as u32);
        Ok(Point::new(x as i32, y as i32))
    }

    fn motion_sensor(&mut self) -> Result<&mut M, Error> {
        if !self.motion_ready {
            return Err(MotionError::NotInitialized.into());
        }
        Ok(&mut self.motion)
    }

    /// Acceleration in m/s² and angular rate in rad/s.
    pub fn read_motion(&mut self) -> Result<MotionReading, Error> {
        Ok(self.motion_sensor()?.read_motion()?)
    }

    /// Acceleration along `axis` in m/s².
    pub fn read_accelerometer(&mut self, axis: Axis) -> Result<f32, Error> {
        Ok(self.read_motion()?.accel.get(axis))
    }

    /// Angular rate around `axis` in degrees/s.
    pub fn read_gyroscope(&mut self, axis: Axis) -> Result<f32, Error> {
        Ok(self.read_motion()?.gyro_degrees().get(axis))
    }

    /// Angular rate on all three axes in degrees/s.
    pub fn read_gyroscope_all(&mut self) -> Result<Vector3, Error> {
        Ok(self.read_motion()?.gyro_degrees())
    }

    pub fn play_tone(&mut self, frequency_hz: u32, duration_ms: u32) -> Result<(), Error> {
        self.speaker.play_tone(frequency_hz, duration_ms)
    }

    /// Raw microphone sample, `0..=adc_max`.
    pub fn read_microphone(&mut self) -> Result<u16, Error> {
        self.microphone.read()
    }

    /// The microphone sample scaled onto `0..=bars`, for level meters.
    pub fn microphone_level(&mut self, bars: u16) -> Result<u16, Error> {
        let raw = self.microphone.read()?;
        Ok(scale(raw, self.config.adc_max, u32::from(bars)) as u16)
    }

    pub fn framebuffer(&self) -> &FrameBuffer<ROWS, COLS, SIZE> {
        &self.framebuffer
    }

    pub fn framebuffer_mut(&mut self) -> &mut FrameBuffer<ROWS, COLS, SIZE> {
        &mut self.framebuffer
    }

    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    /// Give back the collaborators: sink, inputs, motion sensor, microphone
    /// and speaker.
    pub fn release(self) -> (S, I, M, A, P) {
        (
            self.sink,
            self.inputs,
            self.motion,
            self.microphone,
            self.speaker,
        )
    }
}

impl<S, I, M, A, P, const ROWS: usize, const COLS: usize, const SIZE: usize> Canvas
    for MatrixDeck<S, I, M, A, P, ROWS, COLS, SIZE>
{
    fn set_pixel(&mut self, p: Point, color: ColorCode) {
        self.framebuffer.set_pixel(p, color);
    }
}
