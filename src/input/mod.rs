// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

#[cfg(test)]
mod tests;

/// Center value of relative 7-bit encoders, i.e. no movement.
pub const U7_ENCODER_CENTER: u8 = 0x40;

/// Combine the most and least significant 7-bit halves of a 14-bit value.
#[must_use]
pub fn u7_be_to_u14(hi: u8, lo: u8) -> u16 {
    u16::from(hi) << 7 | u16::from(lo)
}

/// A simple two-state button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonInput {
    Pressed,
    Released,
}

impl ButtonInput {
    /// Any non-zero value is considered as pressed.
    #[must_use]
    pub const fn from_u7(input: u8) -> Self {
        if input == 0 {
            Self::Released
        } else {
            Self::Pressed
        }
    }

    /// Only the maximum value is considered as pressed.
    #[must_use]
    pub const fn from_u7_max(input: u8) -> Self {
        if input == 0x7f {
            Self::Pressed
        } else {
            Self::Released
        }
    }

    #[must_use]
    pub const fn is_pressed(self) -> bool {
        matches!(self, Self::Pressed)
    }

    #[must_use]
    pub const fn to_u7(self) -> u8 {
        match self {
            Self::Pressed => 0x7f,
            Self::Released => 0x00,
        }
    }
}

/// A continuous fader or knob.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderInput {
    /// Position in the interval [0, 1]
    pub position: f64,
}

impl SliderInput {
    pub const MIN_POSITION: f64 = 0.0;
    pub const MAX_POSITION: f64 = 1.0;

    #[must_use]
    pub fn from_u7(input: u8) -> Self {
        let position = f64::from(input) / 127.0;
        Self { position }
    }
}

/// An endless encoder that sends discrete delta values when rotated
/// in CW (positive) or CCW (negative) direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepEncoderInput {
    pub delta: i32,
}

impl StepEncoderInput {
    /// Decode a relative value that is centered around [`U7_ENCODER_CENTER`].
    ///
    /// Values below the center are CCW (negative), values above are CW (positive).
    #[must_use]
    pub fn from_u7_centered(input: u8) -> Self {
        let delta = i32::from(input) - i32::from(U7_ENCODER_CENTER);
        Self { delta }
    }
}
