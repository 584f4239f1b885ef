//! Driver for the MatrixDeck board: a 32×16 bicolor LED matrix with five
//! buttons, a joystick, a motion sensor, a microphone and a speaker.
//!
//! The heart of the crate is a packed [`FrameBuffer`] and a small rasterizer
//! (lines, rectangles, circles and a 3×5 font) that draws into anything
//! implementing [`Canvas`]. Pixels reach the panel through a [`PixelSink`];
//! [`BitBangSink`] clocks them out over plain `embedded-hal` pins.
//!
//! Everything the board needs from the platform (pins, converters, the
//! motion sensor, tone output) is injected, so the crate is `no_std` and
//! HAL-agnostic. [`MatrixDeck`] bundles it all behind one owned struct.
//!
//! ## Features
//! - `defmt`: log through `defmt` and derive `defmt::Format` on public types
//! - `log`: log through the `log` facade
#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// must come first so the logging macros are visible in every module
#[macro_use]
mod fmt;

pub mod color;
pub mod deck;
pub mod error;
pub mod font;
pub mod framebuffer;
pub mod input;
pub mod raster;
pub mod sink;
pub mod speaker;

pub use color::ColorCode;
pub use deck::DeckConfig;
pub use deck::MatrixDeck;
pub use error::Error;
pub use error::MotionError;
pub use framebuffer::compute_buffer_size;
pub use framebuffer::FrameBuffer;
pub use input::AnalogInput;
pub use input::Axis;
pub use input::Button;
pub use input::GpioInputs;
pub use input::InputProvider;
pub use input::JoystickAxis;
pub use input::MotionReading;
pub use input::MotionSensor;
pub use input::NoMotion;
pub use input::Vector3;
pub use raster::Canvas;
pub use raster::CanvasExt;
pub use sink::BitBangSink;
pub use sink::FnSink;
pub use sink::PixelSink;
pub use speaker::NoSpeaker;
pub use speaker::Speaker;
pub use speaker::SquareWaveSpeaker;

/// Panel width in pixels.
pub const MATRIX_WIDTH: usize = 32;
/// Panel height in pixels.
pub const MATRIX_HEIGHT: usize = 16;
/// Bytes of framebuffer storage for the panel.
pub const MATRIX_BUFFER_SIZE: usize = compute_buffer_size(MATRIX_HEIGHT, MATRIX_WIDTH);

/// Framebuffer sized for the MatrixDeck panel.
pub type MatrixFrameBuffer = FrameBuffer<MATRIX_HEIGHT, MATRIX_WIDTH, MATRIX_BUFFER_SIZE>;
