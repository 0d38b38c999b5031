// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

//! Sampler pad mode
//!
//! The pads of deck 1 control the samplers 1 to 8, the pads of deck 2
//! the samplers 9 to 16. The pad of a playing sampler blinks.

use float_cmp::approx_eq;
use strum::EnumCount as _;

use super::{
    output, BlinkKey, Controller, Deck, Light, PadLayer, MIDI_PAD_SAMPLER, NUM_PADS_PER_DECK,
};
use crate::{engine::key, ButtonInput, Context, Group, LedOutput};

#[allow(clippy::cast_possible_truncation)]
pub(super) const NUM_SAMPLERS: u8 = NUM_PADS_PER_DECK * Deck::COUNT as u8;

#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub(super) fn sampler_group(deck: Deck, pad: u8) -> Group {
    debug_assert!(pad < NUM_PADS_PER_DECK);
    Group::Sampler(deck.index() as u8 * NUM_PADS_PER_DECK + pad + 1)
}

/// The deck and the pad (0-based) of a sampler group.
#[must_use]
pub(super) fn sampler_deck_pad(group: Group) -> Option<(Deck, u8)> {
    let Group::Sampler(number @ 1..=NUM_SAMPLERS) = group else {
        return None;
    };
    let index = number - 1;
    let deck = Deck::from_repr(index / NUM_PADS_PER_DECK)?;
    Some((deck, index % NUM_PADS_PER_DECK))
}

fn is_playing(value: f64) -> bool {
    approx_eq!(f64, value, 1.0)
}

fn set_pad_lights(ctx: &mut Context<'_>, deck: Deck, pad: u8, led: LedOutput) {
    for layer in [PadLayer::Default, PadLayer::Shifted] {
        let light = Light::Pad {
            deck,
            layer,
            control: MIDI_PAD_SAMPLER + pad,
        };
        output::send_light(ctx.output, light, led);
    }
}

impl Controller {
    /// Value changes of `play`.
    pub(super) fn on_sampler_play(&mut self, ctx: &mut Context<'_>, group: Group, value: f64) {
        if !is_playing(value) {
            // Blinking stops on the next tick
            return;
        }
        let Some((deck, pad)) = sampler_deck_pad(group) else {
            log::warn!("Unexpected sampler group {group}");
            return;
        };
        self.state.blink_timers.start(
            ctx.timers,
            BlinkKey::SamplerPad { deck, pad },
            self.config.sampler_blink_interval,
            LedOutput::On,
        );
    }

    pub(super) fn on_sampler_blink_tick(
        &mut self,
        ctx: &mut Context<'_>,
        deck: Deck,
        pad: u8,
        led: LedOutput,
    ) {
        set_pad_lights(ctx, deck, pad, led);
        let group = sampler_group(deck, pad);
        if is_playing(ctx.engine.get_value(group, &key::PLAY)) {
            return;
        }
        self.state
            .blink_timers
            .stop(ctx.timers, &BlinkKey::SamplerPad { deck, pad });
        // Loaded but not playing
        set_pad_lights(ctx, deck, pad, LedOutput::On);
    }
}

fn button_value(input: ButtonInput) -> f64 {
    if input.is_pressed() {
        1.0
    } else {
        0.0
    }
}

/// Play the sampler from its cue point or load the selected track.
pub(super) fn sampler_pad_pressed(ctx: &mut Context<'_>, group: Group, input: ButtonInput) {
    let control = if ctx.engine.get_value(group, &key::TRACK_LOADED) > 0.0 {
        key::CUE_GOTOANDPLAY
    } else {
        key::LOAD_SELECTED_TRACK
    };
    ctx.engine.set_value(group, &control, button_value(input));
}

/// Stop a playing sampler or eject a stopped one.
pub(super) fn sampler_pad_shift_pressed(
    ctx: &mut Context<'_>,
    group: Group,
    input: ButtonInput,
) {
    let control = if ctx.engine.get_value(group, &key::PLAY) > 0.0 {
        key::CUE_GOTOANDSTOP
    } else if ctx.engine.get_value(group, &key::TRACK_LOADED) > 0.0 {
        key::EJECT
    } else {
        return;
    };
    ctx.engine.set_value(group, &control, button_value(input));
}
