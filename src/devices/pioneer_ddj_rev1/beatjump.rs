// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

//! Beat jump pad mode
//!
//! The pads 1, 3, 5 and 7 jump backward, the pads 2, 4, 6 and 8
//! jump forward. SHIFT + pad 1/2 rescale the jump sizes of all pads.

use super::{Controller, Deck, NUM_PADS_PER_DECK};
use crate::{engine::key, ButtonInput, Context};

/// SHIFT + pad 1
pub(super) const SHIFT_PAD_DECREASE: u8 = 0;

/// SHIFT + pad 2
pub(super) const SHIFT_PAD_INCREASE: u8 = 1;

const RESCALE_FACTOR: f64 = 16.0;

const MIN_REFERENCE_SIZE: f64 = 1.0 / 16.0;

const MAX_REFERENCE_SIZE: f64 = 16.0;

#[allow(clippy::cast_lossless)]
const NUM_PADS: usize = NUM_PADS_PER_DECK as usize;

/// Signed jump sizes in beats, one for each pad.
///
/// All sizes are rescaled together. The size of pad 2 serves as
/// the reference that is bounded.
#[derive(Debug, Clone, PartialEq)]
pub struct BeatjumpState {
    pad_sizes: [f64; NUM_PADS],
}

impl BeatjumpState {
    pub const INITIAL_PAD_SIZES: [f64; NUM_PADS] =
        [-1.0, 1.0, -2.0, 2.0, -4.0, 4.0, -8.0, 8.0];

    const REFERENCE_PAD: usize = 1;

    #[must_use]
    pub const fn pad_sizes(&self) -> &[f64] {
        &self.pad_sizes
    }

    #[must_use]
    pub fn pad_size(&self, pad: u8) -> Option<f64> {
        self.pad_sizes.get(usize::from(pad)).copied()
    }

    #[must_use]
    pub const fn reference_size(&self) -> f64 {
        self.pad_sizes[Self::REFERENCE_PAD]
    }

    /// Multiply all sizes by 16.
    ///
    /// Returns `false` and leaves the sizes untouched if the reference
    /// size would exceed the upper bound.
    pub fn increase(&mut self) -> bool {
        if self.reference_size() * RESCALE_FACTOR > MAX_REFERENCE_SIZE {
            return false;
        }
        self.rescale(RESCALE_FACTOR);
        true
    }

    /// Divide all sizes by 16.
    ///
    /// Returns `false` and leaves the sizes untouched if the reference
    /// size would fall below the lower bound.
    pub fn decrease(&mut self) -> bool {
        if self.reference_size() / RESCALE_FACTOR < MIN_REFERENCE_SIZE {
            return false;
        }
        self.rescale(RESCALE_FACTOR.recip());
        true
    }

    fn rescale(&mut self, factor: f64) {
        self.pad_sizes = self.pad_sizes.map(|size| size * factor);
    }
}

impl Default for BeatjumpState {
    fn default() -> Self {
        Self {
            pad_sizes: Self::INITIAL_PAD_SIZES,
        }
    }
}

impl Controller {
    pub fn beatjump_pad(&self, ctx: &mut Context<'_>, deck: Deck, pad: u8, input: ButtonInput) {
        if !input.is_pressed() {
            return;
        }
        let Some(size) = self.state.beatjump.pad_size(pad) else {
            log::warn!("Invalid beat jump pad {pad}");
            return;
        };
        let group = deck.group();
        ctx.engine.set_value(group, &key::BEATJUMP_SIZE, size.abs());
        ctx.engine.set_value(group, &key::BEATJUMP, size);
    }

    pub fn increase_beatjump_sizes(
        &mut self,
        ctx: &mut Context<'_>,
        deck: Deck,
        input: ButtonInput,
    ) {
        if !input.is_pressed() || !self.state.beatjump.increase() {
            return;
        }
        self.update_beatjump_size(ctx, deck);
    }

    pub fn decrease_beatjump_sizes(
        &mut self,
        ctx: &mut Context<'_>,
        deck: Deck,
        input: ButtonInput,
    ) {
        if !input.is_pressed() || !self.state.beatjump.decrease() {
            return;
        }
        self.update_beatjump_size(ctx, deck);
    }

    fn update_beatjump_size(&self, ctx: &mut Context<'_>, deck: Deck) {
        let size = self.state.beatjump.reference_size();
        log::debug!("Beat jump size: {size}");
        ctx.engine.set_value(deck.group(), &key::BEATJUMP_SIZE, size);
    }

    /// SHIFT + CUE/LOOP CALL left
    pub fn quick_jump_back(&self, ctx: &mut Context<'_>, deck: Deck, input: ButtonInput) {
        if input.is_pressed() {
            ctx.engine
                .set_value(deck.group(), &key::BEATJUMP, -self.config.quick_jump_size);
        }
    }

    /// SHIFT + CUE/LOOP CALL right
    pub fn quick_jump_forward(&self, ctx: &mut Context<'_>, deck: Deck, input: ButtonInput) {
        if input.is_pressed() {
            ctx.engine
                .set_value(deck.group(), &key::BEATJUMP, self.config.quick_jump_size);
        }
    }
}
