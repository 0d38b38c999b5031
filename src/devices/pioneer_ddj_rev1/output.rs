// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

use super::{Deck, PadLayer, MIDI_STATUS_BUTTON_EFFECT, MIDI_STATUS_TRACK_LOADED};
use crate::{LedOutput, SurfaceOutput};

const MIDI_CC_VU_METER: u8 = 0x02;

/// LEDs of a deck that share their address with the corresponding button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DeckLight {
    LoopIn = 0x10,
    LoopOut = 0x11,
    VinylMode = 0x17,
    LoopInAdjust = 0x4c,
    Reloop = 0x4d,
    LoopOutAdjust = 0x4e,
    /// Reloop/exit while SHIFT is pressed
    ReloopShifted = 0x50,
}

impl DeckLight {
    /// The in and out lights of the loop section.
    pub const LOOP_BUTTONS: [Self; 4] = [
        Self::LoopIn,
        Self::LoopOut,
        Self::LoopOutAdjust,
        Self::LoopInAdjust,
    ];

    /// Reloop lights for both layers.
    pub const RELOOP: [Self; 2] = [Self::Reloop, Self::ReloopShifted];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Light {
    BeatFx,
    /// Beat FX on/off while SHIFT is pressed
    BeatFxShifted,
    Deck(Deck, DeckLight),
    Pad {
        deck: Deck,
        layer: PadLayer,
        control: u8,
    },
    TrackLoaded(Deck),
}

impl Light {
    /// MIDI status and first data byte
    #[must_use]
    pub const fn address(self) -> (u8, u8) {
        match self {
            Self::BeatFx => (MIDI_STATUS_BUTTON_EFFECT, 0x47),
            Self::BeatFxShifted => (MIDI_STATUS_BUTTON_EFFECT, 0x43),
            Self::Deck(deck, light) => (deck.midi_status_button(), light as u8),
            Self::Pad {
                deck,
                layer,
                control,
            } => (deck.midi_status_pad(layer), control),
            #[allow(clippy::cast_possible_truncation)]
            Self::TrackLoaded(deck) => (MIDI_STATUS_TRACK_LOADED, deck.index() as u8),
        }
    }
}

pub(super) fn send_light(output: &mut dyn SurfaceOutput, light: Light, led: LedOutput) {
    let (status, data1) = light.address();
    if let Err(err) = output.send_short(status, data1, led.to_u7()) {
        log::warn!("Failed to send {led:?} to {light:?}: {err}");
    }
}

pub(super) fn set_deck_lights(
    output: &mut dyn SurfaceOutput,
    deck: Deck,
    lights: impl IntoIterator<Item = DeckLight>,
    led: LedOutput,
) {
    for light in lights {
        send_light(output, Light::Deck(deck, light), led);
    }
}

pub(super) fn set_loop_button_lights(output: &mut dyn SurfaceOutput, deck: Deck, led: LedOutput) {
    set_deck_lights(output, deck, DeckLight::LOOP_BUTTONS, led);
}

/// Lit in both layers, i.e. independent of SHIFT.
pub(super) fn set_reloop_lights(output: &mut dyn SurfaceOutput, deck: Deck, led: LedOutput) {
    set_deck_lights(output, deck, DeckLight::RELOOP, led);
}

pub(super) fn set_beat_fx_lights(output: &mut dyn SurfaceOutput, led: LedOutput) {
    send_light(output, Light::BeatFx, led);
    send_light(output, Light::BeatFxShifted, led);
}

/// Level meter of a channel, a 7-bit value.
pub(super) fn send_vu_meter(output: &mut dyn SurfaceOutput, deck: Deck, level: u8) {
    debug_assert!(level <= 0x7f);
    if let Err(err) = output.send_short(deck.midi_status_cc(), MIDI_CC_VU_METER, level) {
        log::warn!("Failed to send VU meter level {level} of {deck:?}: {err}");
    }
}
