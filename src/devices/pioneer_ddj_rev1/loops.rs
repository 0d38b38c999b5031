// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

use super::{output, BlinkKey, Controller, Deck, DeckLight};
use crate::{engine::key, ButtonInput, Context, Group, LedOutput};

/// Jog wheel adjustment of the loop points.
///
/// At most one of the loop points is adjusted at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoopAdjust {
    pub adjusting_in: bool,
    pub adjusting_out: bool,
}

impl LoopAdjust {
    pub const NONE: Self = Self {
        adjusting_in: false,
        adjusting_out: false,
    };

    #[must_use]
    pub const fn is_adjusting(self) -> bool {
        self.adjusting_in || self.adjusting_out
    }

    #[must_use]
    pub const fn toggled_in(self) -> Self {
        Self {
            adjusting_in: !self.adjusting_in,
            adjusting_out: false,
        }
    }

    #[must_use]
    pub const fn toggled_out(self) -> Self {
        Self {
            adjusting_in: false,
            adjusting_out: !self.adjusting_out,
        }
    }
}

impl Controller {
    fn may_toggle_loop_adjust(&self, ctx: &Context<'_>, deck: Deck, input: ButtonInput) -> bool {
        if !input.is_pressed() {
            return false;
        }
        if self.config.loop_adjust_requires_loop
            && ctx.engine.get_value(deck.group(), &key::LOOP_ENABLED) <= 0.0
        {
            log::debug!("Ignoring loop adjust of {deck:?} without an enabled loop");
            return false;
        }
        true
    }

    pub fn toggle_loop_adjust_in(
        &mut self,
        ctx: &mut Context<'_>,
        deck: Deck,
        input: ButtonInput,
    ) {
        if !self.may_toggle_loop_adjust(ctx, deck, input) {
            return;
        }
        let deck_state = self.state.deck_mut(deck);
        deck_state.loop_adjust = deck_state.loop_adjust.toggled_in();
        log::debug!("Loop adjust of {deck:?}: {:?}", deck_state.loop_adjust);
    }

    pub fn toggle_loop_adjust_out(
        &mut self,
        ctx: &mut Context<'_>,
        deck: Deck,
        input: ButtonInput,
    ) {
        if !self.may_toggle_loop_adjust(ctx, deck, input) {
            return;
        }
        let deck_state = self.state.deck_mut(deck);
        deck_state.loop_adjust = deck_state.loop_adjust.toggled_out();
        log::debug!("Loop adjust of {deck:?}: {:?}", deck_state.loop_adjust);
    }

    /// Value changes of `loop_enabled`.
    pub(super) fn on_loop_enabled(&mut self, ctx: &mut Context<'_>, group: Group, value: f64) {
        let Some(deck) = Deck::from_group(group) else {
            log::warn!("Unexpected loop enabled group {group}");
            return;
        };
        let enabled = value > 0.0;
        output::set_reloop_lights(ctx.output, deck, LedOutput::from_bool(enabled));
        if enabled {
            self.start_loop_lights_blink(ctx, deck);
        } else {
            self.stop_loop_lights_blink(ctx, deck);
            self.state.deck_mut(deck).loop_adjust = LoopAdjust::NONE;
        }
    }

    fn start_loop_lights_blink(&mut self, ctx: &mut Context<'_>, deck: Deck) {
        self.stop_loop_lights_blink(ctx, deck);
        self.state.blink_timers.start(
            ctx.timers,
            BlinkKey::LoopLights { deck },
            self.config.loop_blink_interval,
            LedOutput::On,
        );
    }

    /// Stop blinking and leave the lights on.
    fn stop_loop_lights_blink(&mut self, ctx: &mut Context<'_>, deck: Deck) {
        self.state
            .blink_timers
            .stop(ctx.timers, &BlinkKey::LoopLights { deck });
        output::set_loop_button_lights(ctx.output, deck, LedOutput::On);
    }

    /// Highlights the loop point that is adjusted by turning off
    /// the lights of the other one.
    pub(super) fn on_loop_lights_tick(
        &mut self,
        ctx: &mut Context<'_>,
        deck: Deck,
        led: LedOutput,
    ) {
        let loop_adjust = self.state.deck(deck).loop_adjust;
        let in_led = if loop_adjust.adjusting_out {
            LedOutput::Off
        } else {
            led
        };
        output::set_deck_lights(
            ctx.output,
            deck,
            [DeckLight::LoopIn, DeckLight::LoopInAdjust],
            in_led,
        );
        let out_led = if loop_adjust.adjusting_in {
            LedOutput::Off
        } else {
            led
        };
        output::set_deck_lights(
            ctx.output,
            deck,
            [DeckLight::LoopOut, DeckLight::LoopOutAdjust],
            out_led,
        );
    }
}

/// Halve the size of the loop.
pub(super) fn cue_loop_call_left(ctx: &mut Context<'_>, deck: Deck, input: ButtonInput) {
    if input.is_pressed() {
        ctx.engine.set_value(deck.group(), &key::LOOP_SCALE, 0.5);
    }
}

/// Double the size of the loop.
pub(super) fn cue_loop_call_right(ctx: &mut Context<'_>, deck: Deck, input: ButtonInput) {
    if input.is_pressed() {
        ctx.engine.set_value(deck.group(), &key::LOOP_SCALE, 2.0);
    }
}
