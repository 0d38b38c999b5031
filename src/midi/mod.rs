// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

use thiserror::Error;

use crate::{DeviceDescriptor, OutputError, OutputResult, SurfaceOutput};

#[cfg(feature = "midir")]
mod midir;

/// MIDI-related, extended [`DeviceDescriptor`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MidiDeviceDescriptor {
    pub device: DeviceDescriptor,
    pub port_name_prefix: &'static str,
}

#[derive(Debug, Error)]
#[error("invalid or unmapped MIDI input")]
pub struct MidiInputDecodeError;

pub const MIDI_SYSEX_START: u8 = 0xf0;
pub const MIDI_SYSEX_END: u8 = 0xf7;

pub trait MidiOutputConnection {
    fn send_midi_output(&mut self, output: &[u8]) -> OutputResult<()>;
}

/// Writes [`SurfaceOutput`] messages to a MIDI connection.
#[allow(missing_debug_implementations)]
pub struct MidiOutputGateway<C> {
    midi_output_connection: Option<C>,
}

impl<C> Default for MidiOutputGateway<C> {
    fn default() -> Self {
        Self {
            midi_output_connection: None,
        }
    }
}

impl<C: MidiOutputConnection> MidiOutputGateway<C> {
    #[must_use]
    pub const fn new(midi_output_connection: C) -> Self {
        Self {
            midi_output_connection: Some(midi_output_connection),
        }
    }

    pub fn attach_midi_output_connection(&mut self, midi_output_connection: &mut Option<C>) {
        assert!(self.midi_output_connection.is_none());
        assert!(midi_output_connection.is_some());
        self.midi_output_connection = midi_output_connection.take();
    }

    pub fn detach_midi_output_connection(&mut self) -> Option<C> {
        self.midi_output_connection.take()
    }

    fn send(&mut self, output: &[u8]) -> OutputResult<()> {
        let Some(midi_output_connection) = &mut self.midi_output_connection else {
            return Err(OutputError::Disconnected);
        };
        midi_output_connection.send_midi_output(output)
    }
}

impl<C: MidiOutputConnection> SurfaceOutput for MidiOutputGateway<C> {
    fn send_short(&mut self, status: u8, data1: u8, data2: u8) -> OutputResult<()> {
        debug_assert!(status & 0x80 != 0);
        self.send(&[status, data1 & 0x7f, data2 & 0x7f])
    }

    fn send_sysex(&mut self, data: &[u8]) -> OutputResult<()> {
        if data.first() != Some(&MIDI_SYSEX_START) || data.last() != Some(&MIDI_SYSEX_END) {
            return Err(OutputError::Send {
                msg: "malformed SysEx message".into(),
            });
        }
        self.send(data)
    }
}
