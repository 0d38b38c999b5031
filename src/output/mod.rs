// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

use std::borrow::Cow;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("disconnected")]
    Disconnected,
    #[error("Send: {msg}")]
    Send { msg: Cow<'static, str> },
}

pub type OutputResult<T> = std::result::Result<T, OutputError>;

/// Simple LED
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedOutput {
    Off,
    On,
}

impl LedOutput {
    const OFF_U7: u8 = 0x00;
    const ON_U7: u8 = 0x7f;

    #[must_use]
    pub const fn from_bool(on: bool) -> Self {
        if on {
            Self::On
        } else {
            Self::Off
        }
    }

    #[must_use]
    pub const fn to_u7(self) -> u8 {
        match self {
            Self::Off => Self::OFF_U7,
            Self::On => Self::ON_U7,
        }
    }

    /// The opposite state, i.e. the next phase of a blinking LED.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Off => Self::On,
            Self::On => Self::Off,
        }
    }
}

/// Lights and raw messages of the control surface.
pub trait SurfaceOutput {
    /// Send a short, 3-byte message, e.g. for switching an LED.
    fn send_short(&mut self, status: u8, data1: u8, data2: u8) -> OutputResult<()>;

    /// Send a system exclusive message, including the framing bytes.
    fn send_sysex(&mut self, data: &[u8]) -> OutputResult<()>;
}
