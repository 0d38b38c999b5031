// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

use float_cmp::approx_eq;
use strum::EnumCount as _;

use super::{Controller, Deck};
use crate::{engine::key, u7_be_to_u14, ButtonInput, Context};

/// 14-bit value of the tempo slider that corresponds to a rate of 0.
const TEMPO_SLIDER_CENTER_U14: f64 = 8192.0;

/// Reassembles 14-bit values from two 7-bit messages.
///
/// The most significant part is sent first and cached until the least
/// significant part arrives. A missing most significant part is not
/// detected, i.e. the stale value is used instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighResAccumulator {
    tempo_slider_msb: [u8; Deck::COUNT],
}

impl HighResAccumulator {
    pub fn set_msb(&mut self, deck: Deck, msb: u8) {
        self.tempo_slider_msb[deck.index()] = msb;
    }

    #[must_use]
    pub fn combine_lsb(&self, deck: Deck, lsb: u8) -> u16 {
        u7_be_to_u14(self.tempo_slider_msb[deck.index()], lsb)
    }
}

/// The slider moves in the opposite direction of the rate.
#[must_use]
pub(super) fn tempo_slider_rate(value: u16) -> f64 {
    1.0 - f64::from(value) / TEMPO_SLIDER_CENTER_U14
}

impl Controller {
    pub fn tempo_slider_msb(&mut self, deck: Deck, value: u8) {
        self.state.high_res.set_msb(deck, value);
    }

    pub fn tempo_slider_lsb(&mut self, ctx: &mut Context<'_>, deck: Deck, value: u8) {
        let value = self.state.high_res.combine_lsb(deck, value);
        ctx.engine
            .set_value(deck.group(), &key::RATE, tempo_slider_rate(value));
    }

    /// Switch to the next tempo range.
    ///
    /// Starts over with the first range if the current range is unknown.
    pub fn cycle_tempo_range(&self, ctx: &mut Context<'_>, deck: Deck, input: ButtonInput) {
        if !input.is_pressed() {
            return;
        }
        let tempo_ranges = &self.config.tempo_ranges;
        let Some(first_range) = tempo_ranges.first() else {
            log::warn!("No tempo ranges configured");
            return;
        };
        let group = deck.group();
        let current_range = ctx.engine.get_value(group, &key::RATE_RANGE);
        let next_range = tempo_ranges
            .iter()
            .position(|range| approx_eq!(f64, *range, current_range, ulps = 2))
            .and_then(|index| tempo_ranges.get((index + 1) % tempo_ranges.len()))
            .unwrap_or(first_range);
        log::debug!("Tempo range of {deck:?}: {next_range}");
        ctx.engine.set_value(group, &key::RATE_RANGE, *next_range);
    }
}

/// Short press of BEAT SYNC.
///
/// Disables sync if enabled, otherwise syncs once.
pub(super) fn sync(ctx: &mut Context<'_>, deck: Deck, input: ButtonInput) {
    let group = deck.group();
    if input.is_pressed() && ctx.engine.get_value(group, &key::SYNC_ENABLED) > 0.0 {
        ctx.engine.set_value(group, &key::SYNC_ENABLED, 0.0);
    } else {
        let value = if input.is_pressed() { 1.0 } else { 0.0 };
        ctx.engine.set_value(group, &key::BEATSYNC, value);
    }
}

/// Long press of BEAT SYNC.
pub(super) fn sync_long_press(ctx: &mut Context<'_>, deck: Deck, input: ButtonInput) {
    if input.is_pressed() {
        ctx.engine
            .set_value(deck.group(), &key::SYNC_ENABLED, 1.0);
    }
}

pub(super) fn toggle_quantize(ctx: &mut Context<'_>, deck: Deck, input: ButtonInput) {
    if !input.is_pressed() {
        return;
    }
    let group = deck.group();
    let quantize = ctx.engine.get_value(group, &key::QUANTIZE) > 0.0;
    ctx.engine
        .set_value(group, &key::QUANTIZE, if quantize { 0.0 } else { 1.0 });
}
