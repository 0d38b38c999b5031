// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

use midir::{MidiOutputConnection, SendError};

use crate::{OutputError, OutputResult};

impl From<SendError> for OutputError {
    fn from(err: SendError) -> Self {
        OutputError::Send {
            msg: err.to_string().into(),
        }
    }
}

impl super::MidiOutputConnection for MidiOutputConnection {
    fn send_midi_output(&mut self, output: &[u8]) -> OutputResult<()> {
        log::trace!("Sending MIDI output: {output:0x?}");
        self.send(output).map_err(Into::into)
    }
}
