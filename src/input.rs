//! Input capabilities: buttons, joystick, microphone and motion sensor.
//!
//! The driver only sees these traits. Board support code implements them on
//! top of whatever GPIO, ADC and I2C drivers the target provides;
//! [`GpioInputs`] covers the common case of `embedded-hal` pins plus two
//! analog channels.

use embedded_hal::digital::InputPin;

use crate::error::MotionError;
use crate::Error;

/// Radians to degrees.
pub const RAD_TO_DEG: f32 = 57.295_78;

/// The five push buttons on the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    A,
    B,
    X,
    Y,
    /// The joystick's push switch.
    Joystick,
}

impl Button {
    pub const ALL: [Button; 5] = [Button::A, Button::B, Button::X, Button::Y, Button::Joystick];

    /// Numeric button ids as printed on the board: 0=A, 1=B, 2=X, 3=Y,
    /// 4=joystick.
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::A),
            1 => Some(Self::B),
            2 => Some(Self::X),
            3 => Some(Self::Y),
            4 => Some(Self::Joystick),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum JoystickAxis {
    X,
    Y,
}

impl JoystickAxis {
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::X),
            1 => Some(Self::Y),
            _ => None,
        }
    }
}

/// Motion sensor axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::X),
            1 => Some(Self::Y),
            2 => Some(Self::Z),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub const fn get(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub fn scale(self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }
}

/// One sample from the motion sensor, in SI units.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionReading {
    /// Linear acceleration in m/s².
    pub accel: Vector3,
    /// Angular rate in rad/s.
    pub gyro: Vector3,
    /// Die temperature in °C.
    pub temperature: f32,
}

impl MotionReading {
    /// Angular rate in degrees/s.
    pub fn gyro_degrees(&self) -> Vector3 {
        self.gyro.scale(RAD_TO_DEG)
    }
}

/// Buttons and joystick.
pub trait InputProvider {
    /// `true` while `button` is held down.
    fn button(&mut self, button: Button) -> Result<bool, Error>;

    /// Raw converter reading for one joystick axis.
    fn joystick(&mut self, axis: JoystickAxis) -> Result<u16, Error>;
}

/// A single analog channel, returning raw converter counts.
pub trait AnalogInput {
    fn read(&mut self) -> Result<u16, Error>;
}

impl<T: AnalogInput + ?Sized> AnalogInput for &mut T {
    fn read(&mut self) -> Result<u16, Error> {
        (**self).read()
    }
}

/// Motion sensor access.
pub trait MotionSensor {
    /// Bring the sensor up. Either the sensor is fully usable afterwards or
    /// an error is returned.
    fn init(&mut self) -> Result<(), MotionError>;

    fn read_motion(&mut self) -> Result<MotionReading, MotionError>;
}

/// Stand-in for boards without a motion sensor.
///
/// Bring-up succeeds so the rest of the board starts normally; every reading
/// reports [`MotionError::NotFound`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMotion;

impl MotionSensor for NoMotion {
    fn init(&mut self) -> Result<(), MotionError> {
        Ok(())
    }

    fn read_motion(&mut self) -> Result<MotionReading, MotionError> {
        Err(MotionError::NotFound)
    }
}

/// Buttons on GPIO and joystick on two analog channels.
///
/// The buttons are wired to ground with pull-ups, so a low level means
/// pressed.
pub struct GpioInputs<A, B, X, Y, J, JX, JY> {
    a: A,
    b: B,
    x: X,
    y: Y,
    joystick_button: J,
    joystick_x: JX,
    joystick_y: JY,
}

impl<A, B, X, Y, J, JX, JY> GpioInputs<A, B, X, Y, J, JX, JY>
where
    A: InputPin,
    B: InputPin,
    X: InputPin,
    Y: InputPin,
    J: InputPin,
    JX: AnalogInput,
    JY: AnalogInput,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        a: A,
        b: B,
        x: X,
        y: Y,
        joystick_button: J,
        joystick_x: JX,
        joystick_y: JY,
    ) -> Self {
        Self {
            a,
            b,
            x,
            y,
            joystick_button,
            joystick_x,
            joystick_y,
        }
    }

    /// Give back the pins and channels.
    pub fn release(self) -> (A, B, X, Y, J, JX, JY) {
        (
            self.a,
            self.b,
            self.x,
            self.y,
            self.joystick_button,
            self.joystick_x,
            self.joystick_y,
        )
    }
}

fn pressed<P: InputPin>(pin: &mut P) -> Result<bool, Error> {
    pin.is_low().map_err(Error::pin)
}

impl<A, B, X, Y, J, JX, JY> InputProvider for GpioInputs<A, B, X, Y, J, JX, JY>
where
    A: InputPin,
    B: InputPin,
    X: InputPin,
    Y: InputPin,
    J: InputPin,
    JX: AnalogInput,
    JY: AnalogInput,
{
    fn button(&mut self, button: Button) -> Result<bool, Error> {
        match button {
            Button::A => pressed(&mut self.a),
            Button::B => pressed(&mut self.b),
            Button::X => pressed(&mut self.x),
            Button::Y => pressed(&mut self.y),
            Button::Joystick => pressed(&mut self.joystick_button),
        }
    }

    fn joystick(&mut self, axis: JoystickAxis) -> Result<u16, Error> {
        match axis {
            JoystickAxis::X => self.joystick_x.read(),
            JoystickAxis::Y => self.joystick_y.read(),
        }
    }
}
