// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

//! Decoding of MIDI input messages.
//!
//! The terms have been taken from the manual of the DDJ-REV1 and its
//! MIDI message list. Unmapped controls are rejected.

use derive_more::From;
use strum::{EnumCount, EnumIter, FromRepr};

use super::{
    Deck, MIDI_PAD_BEAT_JUMP, MIDI_PAD_SAMPLER, MIDI_STATUS_BUTTON_DECK_ONE,
    MIDI_STATUS_BUTTON_DECK_TWO, MIDI_STATUS_BUTTON_EFFECT, MIDI_STATUS_CC_DECK_ONE,
    MIDI_STATUS_CC_DECK_TWO, MIDI_STATUS_CC_EFFECT, MIDI_STATUS_PAD_DECK_ONE,
    MIDI_STATUS_PAD_DECK_TWO, MIDI_STATUS_PAD_SHIFT_DECK_ONE, MIDI_STATUS_PAD_SHIFT_DECK_TWO,
    NUM_PADS_PER_DECK,
};
use crate::{Group, MidiInputDecodeError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, From)]
pub enum Sensor {
    Deck(Deck, DeckSensor),
    Effect(EffectSensor),
    Pad(Deck, PadLayer, PadSensor),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRepr, EnumIter, EnumCount)]
#[repr(u8)]
pub enum DeckSensor {
    ShiftButton,
    // -- Jog wheel -- //
    JogWheelTouch,
    JogWheelSideEncoder,
    JogWheelTopEncoder,
    /// SHIFT + jog wheel
    JogWheelSearchEncoder,
    VinylModeButton,
    // -- Loop section -- //
    InAdjustButton,
    OutAdjustButton,
    CueLoopCallLeftButton,
    CueLoopCallRightButton,
    /// SHIFT + CUE/LOOP CALL left
    QuickJumpBackButton,
    /// SHIFT + CUE/LOOP CALL right
    QuickJumpForwardButton,
    // -- Tempo section -- //
    BeatSyncButton,
    BeatSyncLongPress,
    TempoRangeButton,
    TempoSliderMsb,
    TempoSliderLsb,
    /// SHIFT + headphone cue
    QuantizeButton,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRepr, EnumIter, EnumCount)]
#[repr(u8)]
pub enum BeatFxChannel {
    One,
    Two,
    Master,
}

impl BeatFxChannel {
    /// The group that is routed through the effect unit.
    #[must_use]
    pub const fn group(self) -> Group {
        match self {
            Self::One => Group::Channel(1),
            Self::Two => Group::Channel(2),
            Self::Master => Group::Master,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectSensor {
    BeatLeftButton,
    BeatRightButton,
    BeatFxSelectButton,
    BeatFxSelectShiftButton,
    BeatFxChannelSelect(BeatFxChannel),
    BeatFxLevelDepthKnob,
    BeatFxOnOffButton,
    BeatFxOnOffShiftButton,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PadLayer {
    Default,
    /// SHIFT is pressed
    Shifted,
}

/// Performance pads, numbered from 0 to 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadSensor {
    BeatJump(u8),
    Sampler(u8),
}

impl PadSensor {
    fn try_from_u8(data1: u8) -> Option<Self> {
        let pad_base = data1 & 0xf0;
        let pad = data1 & 0x0f;
        if pad >= NUM_PADS_PER_DECK {
            return None;
        }
        let sensor = match pad_base {
            MIDI_PAD_BEAT_JUMP => Self::BeatJump(pad),
            MIDI_PAD_SAMPLER => Self::Sampler(pad),
            _ => return None,
        };
        Some(sensor)
    }
}

fn midi_status_to_deck(status: u8) -> Deck {
    match status {
        MIDI_STATUS_BUTTON_DECK_ONE | MIDI_STATUS_CC_DECK_ONE => Deck::One,
        MIDI_STATUS_BUTTON_DECK_TWO | MIDI_STATUS_CC_DECK_TWO => Deck::Two,
        _ => unreachable!("Unexpected MIDI status {status}"),
    }
}

/// Decode a 3-byte MIDI message.
///
/// Returns the sensor together with the raw 7-bit value or `None`
/// if the message is valid but should be ignored.
pub fn try_decode_midi_input(input: &[u8]) -> Result<Option<(Sensor, u8)>, MidiInputDecodeError> {
    if let Some(ev) = try_decode_button_event(input)? {
        return Ok(Some(ev));
    }
    try_decode_cc_event(input)
}

fn try_decode_button_event(input: &[u8]) -> Result<Option<(Sensor, u8)>, MidiInputDecodeError> {
    let (sensor, value) = match *input {
        [MIDI_STATUS_BUTTON_EFFECT, data1, data2] => {
            let sensor = match data1 {
                0x10 => EffectSensor::BeatFxChannelSelect(BeatFxChannel::One),
                0x11 => EffectSensor::BeatFxChannelSelect(BeatFxChannel::Two),
                0x14 => EffectSensor::BeatFxChannelSelect(BeatFxChannel::Master),
                0x43 => EffectSensor::BeatFxOnOffShiftButton,
                0x47 => EffectSensor::BeatFxOnOffButton,
                0x4a => EffectSensor::BeatLeftButton,
                0x4b => EffectSensor::BeatRightButton,
                0x63 => EffectSensor::BeatFxSelectButton,
                0x64 => EffectSensor::BeatFxSelectShiftButton,
                _ => {
                    return Err(MidiInputDecodeError);
                }
            };
            (sensor.into(), data2)
        }
        [status @ (MIDI_STATUS_BUTTON_DECK_ONE | MIDI_STATUS_BUTTON_DECK_TWO), data1, data2] => {
            let deck = midi_status_to_deck(status);
            let sensor = match data1 {
                0x17 => DeckSensor::VinylModeButton,
                0x36 | 0x67 => DeckSensor::JogWheelTouch,
                0x3d => DeckSensor::QuickJumpForwardButton,
                0x3e => DeckSensor::QuickJumpBackButton,
                0x3f => DeckSensor::ShiftButton,
                0x4c => DeckSensor::InAdjustButton,
                0x4e => DeckSensor::OutAdjustButton,
                0x51 => DeckSensor::CueLoopCallLeftButton,
                0x53 => DeckSensor::CueLoopCallRightButton,
                0x58 => DeckSensor::BeatSyncButton,
                0x5c => DeckSensor::BeatSyncLongPress,
                0x60 => DeckSensor::TempoRangeButton,
                0x68 => DeckSensor::QuantizeButton,
                _ => {
                    return Err(MidiInputDecodeError);
                }
            };
            (Sensor::Deck(deck, sensor), data2)
        }
        [status @ (MIDI_STATUS_PAD_DECK_ONE
        | MIDI_STATUS_PAD_SHIFT_DECK_ONE
        | MIDI_STATUS_PAD_DECK_TWO
        | MIDI_STATUS_PAD_SHIFT_DECK_TWO), data1, data2] => {
            let (deck, layer) = match status {
                MIDI_STATUS_PAD_DECK_ONE => (Deck::One, PadLayer::Default),
                MIDI_STATUS_PAD_SHIFT_DECK_ONE => (Deck::One, PadLayer::Shifted),
                MIDI_STATUS_PAD_DECK_TWO => (Deck::Two, PadLayer::Default),
                _ => (Deck::Two, PadLayer::Shifted),
            };
            let Some(sensor) = PadSensor::try_from_u8(data1) else {
                return Err(MidiInputDecodeError);
            };
            if layer == PadLayer::Shifted {
                // Only the first two beat jump pads are mapped with SHIFT
                if let PadSensor::BeatJump(pad) = sensor {
                    if pad > 1 {
                        return Err(MidiInputDecodeError);
                    }
                }
            }
            (Sensor::Pad(deck, layer, sensor), data2)
        }
        _ => return Ok(None),
    };
    Ok(Some((sensor, value)))
}

fn try_decode_cc_event(input: &[u8]) -> Result<Option<(Sensor, u8)>, MidiInputDecodeError> {
    let (sensor, value) = match *input {
        [MIDI_STATUS_CC_EFFECT, data1, data2] => match data1 {
            0x02 => (EffectSensor::BeatFxLevelDepthKnob.into(), data2),
            // The 7-bit resolution of the MSB is sufficient
            0x22 => return Ok(None),
            _ => {
                return Err(MidiInputDecodeError);
            }
        },
        [status @ (MIDI_STATUS_CC_DECK_ONE | MIDI_STATUS_CC_DECK_TWO), data1, data2] => {
            let deck = midi_status_to_deck(status);
            let sensor = match data1 {
                0x00 => DeckSensor::TempoSliderMsb,
                0x20 => DeckSensor::TempoSliderLsb,
                0x21 => DeckSensor::JogWheelSideEncoder,
                0x22 => DeckSensor::JogWheelTopEncoder,
                0x26 => DeckSensor::JogWheelSearchEncoder,
                _ => {
                    return Err(MidiInputDecodeError);
                }
            };
            (Sensor::Deck(deck, sensor), data2)
        }
        _ => {
            return Err(MidiInputDecodeError);
        }
    };
    Ok(Some((sensor, value)))
}
