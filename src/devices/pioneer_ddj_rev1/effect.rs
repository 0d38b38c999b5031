// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

//! Beat FX
//!
//! The beat FX section controls the effect slot of [`EFFECT_UNIT`]
//! that is currently focused.

use strum::IntoEnumIterator as _;

use super::{effect_group, output, BeatFxChannel, Controller, EFFECT_UNIT, NUM_EFFECTS_PER_UNIT};
use crate::{engine::key, ButtonInput, Context, Engine, Group, Key, LedOutput, SliderInput};

/// 1-based index of the focused effect.
///
/// Falls back to the nearest valid effect if no or an invalid
/// effect is focused.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(super) fn focused_effect(engine: &dyn Engine) -> u8 {
    let focused = engine.get_value(EFFECT_UNIT, &key::FOCUSED_EFFECT).round();
    focused.clamp(1.0, f64::from(NUM_EFFECTS_PER_UNIT)) as u8
}

#[must_use]
pub(super) fn focused_effect_group(engine: &dyn Engine) -> Group {
    effect_group(focused_effect(engine))
}

/// Move the focus by a number of steps, wrapping around in both directions.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub(super) fn change_focused_effect_by(engine: &mut dyn Engine, steps: i64) {
    let focused = engine.get_value(EFFECT_UNIT, &key::FOCUSED_EFFECT).round() as i64;
    let num_effects = i64::from(NUM_EFFECTS_PER_UNIT);
    let focused = (focused - 1 + steps).rem_euclid(num_effects) + 1;
    log::debug!("Focusing effect {focused}");
    engine.set_value(EFFECT_UNIT, &key::FOCUSED_EFFECT, focused as f64);
}

pub(super) fn beat_fx_left(ctx: &mut Context<'_>, input: ButtonInput) {
    if input.is_pressed() {
        change_focused_effect_by(ctx.engine, -1);
    }
}

pub(super) fn beat_fx_right(ctx: &mut Context<'_>, input: ButtonInput) {
    if input.is_pressed() {
        change_focused_effect_by(ctx.engine, 1);
    }
}

/// Load the next effect into the focused slot.
pub(super) fn beat_fx_select(ctx: &mut Context<'_>, input: ButtonInput) {
    if input.is_pressed() {
        let group = focused_effect_group(&*ctx.engine);
        ctx.engine.set_value(group, &key::NEXT_EFFECT, 1.0);
    }
}

/// Load the previous effect into the focused slot.
pub(super) fn beat_fx_select_shift(ctx: &mut Context<'_>, input: ButtonInput) {
    if input.is_pressed() {
        let group = focused_effect_group(&*ctx.engine);
        ctx.engine.set_value(group, &key::PREV_EFFECT, 1.0);
    }
}

pub(super) fn beat_fx_on_off(ctx: &mut Context<'_>, input: ButtonInput) {
    if !input.is_pressed() {
        return;
    }
    let group = focused_effect_group(&*ctx.engine);
    let enabled = ctx.engine.get_value(group, &key::ENABLED) > 0.0;
    ctx.engine
        .set_value(group, &key::ENABLED, if enabled { 0.0 } else { 1.0 });
}

/// Mute the effect unit and disable all effects.
pub(super) fn beat_fx_on_off_shift(ctx: &mut Context<'_>, input: ButtonInput) {
    if !input.is_pressed() {
        return;
    }
    ctx.engine.set_parameter(EFFECT_UNIT, &key::MIX, 0.0);
    ctx.engine
        .ignore_next_soft_takeover_value(EFFECT_UNIT, &key::MIX);
    for effect in 1..=NUM_EFFECTS_PER_UNIT {
        ctx.engine.set_value(effect_group(effect), &key::ENABLED, 0.0);
    }
    output::set_beat_fx_lights(ctx.output, LedOutput::Off);
}

/// Route exactly one channel through the effect unit.
pub(super) fn beat_fx_channel(ctx: &mut Context<'_>, channel: BeatFxChannel, input: ButtonInput) {
    if !input.is_pressed() {
        return;
    }
    for routed in BeatFxChannel::iter() {
        let enable = if routed == channel { 1.0 } else { 0.0 };
        ctx.engine
            .set_value(EFFECT_UNIT, &Key::group_enable(routed.group()), enable);
    }
}

impl Controller {
    /// The LEVEL/DEPTH knob controls the mix of the effect unit or,
    /// with SHIFT, the meta parameter of the focused effect.
    pub fn beat_fx_level_depth(&self, ctx: &mut Context<'_>, input: SliderInput) {
        let focused_group = focused_effect_group(&*ctx.engine);
        let parameter = input.position;
        if self.state.any_shift_pressed() {
            ctx.engine
                .ignore_next_soft_takeover_value(EFFECT_UNIT, &key::MIX);
            ctx.engine
                .set_parameter(focused_group, &key::META, parameter);
        } else {
            ctx.engine
                .ignore_next_soft_takeover_value(focused_group, &key::META);
            ctx.engine.set_parameter(EFFECT_UNIT, &key::MIX, parameter);
        }
    }
}
