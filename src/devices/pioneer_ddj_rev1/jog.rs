// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

//! Jog wheels
//!
//! Turning the wheel either moves a loop point, scratches or bends
//! the pitch, in this order of precedence.

use super::{output, Controller, Deck, DeckLight, Light};
use crate::{engine::key, ButtonInput, Context, LedOutput, StepEncoderInput};

impl Controller {
    pub fn jog_turn(&self, ctx: &mut Context<'_>, deck: Deck, input: StepEncoderInput) {
        let group = deck.group();
        let delta = f64::from(input.delta);
        let loop_adjust = self.state.deck(deck).loop_adjust;
        if loop_adjust.is_adjusting() && ctx.engine.get_value(group, &key::LOOP_ENABLED) > 0.0 {
            let position_key = if loop_adjust.adjusting_in {
                key::LOOP_START_POSITION
            } else {
                key::LOOP_END_POSITION
            };
            let position = ctx.engine.get_value(group, &position_key);
            ctx.engine.set_value(
                group,
                &position_key,
                delta * self.config.loop_adjust_multiplier + position,
            );
            return;
        }
        if ctx.scratch.is_active(deck.number()) {
            ctx.scratch.tick(deck.number(), input.delta);
        } else {
            ctx.engine
                .set_value(group, &key::JOG, delta * self.config.bend_scale);
        }
    }

    pub fn jog_touch(&self, ctx: &mut Context<'_>, deck: Deck, input: ButtonInput) {
        let deck_state = self.state.deck(deck);
        if deck_state.loop_adjust.is_adjusting() {
            // Scratching would interfere with moving the loop points
            return;
        }
        if input.is_pressed() && deck_state.vinyl_mode {
            ctx.scratch.enable(deck.number(), &self.config.scratch);
        } else {
            ctx.scratch.disable(deck.number());
        }
    }

    /// Fast seek, i.e. SHIFT + jog wheel.
    pub fn jog_search(&self, ctx: &mut Context<'_>, deck: Deck, input: StepEncoderInput) {
        ctx.engine.set_value(
            deck.group(),
            &key::JOG,
            f64::from(input.delta) * self.config.fast_seek_scale,
        );
    }

    pub fn toggle_vinyl_mode(&mut self, ctx: &mut Context<'_>, deck: Deck, input: ButtonInput) {
        if !input.is_pressed() {
            return;
        }
        let deck_state = self.state.deck_mut(deck);
        deck_state.vinyl_mode = !deck_state.vinyl_mode;
        log::info!(
            "Vinyl mode of {deck:?}: {vinyl_mode}",
            vinyl_mode = deck_state.vinyl_mode
        );
        output::send_light(
            ctx.output,
            Light::Deck(deck, DeckLight::VinylMode),
            LedOutput::from_bool(deck_state.vinyl_mode),
        );
    }
}
