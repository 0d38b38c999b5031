// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

//! # Pioneer DDJ-REV1
//!
//! Two decks, eight performance pads per deck and a single beat FX section
//! that is assigned to the first effect unit of the engine.
//!
//! Buttons and their LEDs share the same MIDI address, i.e. the status byte
//! and the first data byte of a note message.
//!
//! Implemented:
//! - Jog wheels: scratching, bending, fast seek (SHIFT), loop in/out adjust
//! - Tempo sliders (14-bit), tempo range, beat sync
//! - Beat loop lights, CUE/LOOP CALL, quick jump (SHIFT + CUE/LOOP CALL)
//! - Beat jump and sampler pad modes
//! - Beat FX with focus selection, shared LEVEL/DEPTH knob and on/off
//!
//! Not implemented: secondary pad modes (keyboard, pad FX 1/2, key shift).

use std::time::Duration;

use strum::{EnumCount, EnumIter, FromRepr, IntoEnumIterator as _};

use crate::{
    engine::key, ActiveTimers, ButtonInput, Callback, Context, DeviceDescriptor, Group, LedOutput,
    MidiDeviceDescriptor, ScratchParams, SliderInput, StepEncoderInput, TimerId,
};

mod beatjump;
pub use self::beatjump::BeatjumpState;

mod effect;

mod input;
pub use self::input::{
    try_decode_midi_input, BeatFxChannel, DeckSensor, EffectSensor, PadLayer, PadSensor, Sensor,
};

mod jog;

mod loops;
pub use self::loops::LoopAdjust;

mod output;
pub use self::output::{DeckLight, Light};

mod sampler;

mod tempo;
pub use self::tempo::HighResAccumulator;


pub const MIDI_DEVICE_DESCRIPTOR: &MidiDeviceDescriptor = &MidiDeviceDescriptor {
    device: DeviceDescriptor {
        vendor_name: "Pioneer DJ",
        product_name: "DDJ-REV1",
    },
    port_name_prefix: "DDJ-REV1",
};

pub const DEVICE_DESCRIPTOR: &DeviceDescriptor = &MIDI_DEVICE_DESCRIPTOR.device;

pub const NUM_PADS_PER_DECK: u8 = 8;

pub const NUM_EFFECTS_PER_UNIT: u8 = 3;

/// The effect unit that is controlled by the beat FX section.
pub const EFFECT_UNIT: Group = Group::EffectUnit(1);

#[must_use]
pub const fn effect_group(effect: u8) -> Group {
    Group::Effect { unit: 1, effect }
}

/// Asks the controller to send the current positions of all
/// knobs and faders.
pub const SYSEX_QUERY_CONTROL_POSITIONS: [u8; 12] = [
    0xf0, 0x00, 0x40, 0x05, 0x00, 0x00, 0x02, 0x06, 0x00, 0x03, 0x01, 0xf7,
];

const MIDI_STATUS_BUTTON_DECK_ONE: u8 = 0x90;
const MIDI_STATUS_BUTTON_DECK_TWO: u8 = 0x91;
const MIDI_STATUS_BUTTON_EFFECT: u8 = 0x94;
const MIDI_STATUS_PAD_DECK_ONE: u8 = 0x97;
const MIDI_STATUS_PAD_SHIFT_DECK_ONE: u8 = 0x98;
const MIDI_STATUS_PAD_DECK_TWO: u8 = 0x99;
const MIDI_STATUS_PAD_SHIFT_DECK_TWO: u8 = 0x9a;
const MIDI_STATUS_TRACK_LOADED: u8 = 0x9f;
const MIDI_STATUS_CC_DECK_ONE: u8 = 0xb0;
const MIDI_STATUS_CC_DECK_TWO: u8 = 0xb1;
const MIDI_STATUS_CC_EFFECT: u8 = 0xb4;

const MIDI_PAD_HOT_CUE: u8 = 0x00;
const MIDI_PAD_BEAT_JUMP: u8 = 0x20;
const MIDI_PAD_SAMPLER: u8 = 0x30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount, FromRepr)]
#[repr(u8)]
pub enum Deck {
    One,
    Two,
}

impl Deck {
    /// 0-based index
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// 1-based deck number
    #[must_use]
    pub const fn number(self) -> u8 {
        self as u8 + 1
    }

    #[must_use]
    pub const fn group(self) -> Group {
        Group::Channel(self.number())
    }

    #[must_use]
    pub const fn from_group(group: Group) -> Option<Self> {
        match group {
            Group::Channel(1) => Some(Self::One),
            Group::Channel(2) => Some(Self::Two),
            _ => None,
        }
    }

    const fn midi_status_button(self) -> u8 {
        match self {
            Self::One => MIDI_STATUS_BUTTON_DECK_ONE,
            Self::Two => MIDI_STATUS_BUTTON_DECK_TWO,
        }
    }

    const fn midi_status_cc(self) -> u8 {
        match self {
            Self::One => MIDI_STATUS_CC_DECK_ONE,
            Self::Two => MIDI_STATUS_CC_DECK_TWO,
        }
    }

    const fn midi_status_pad(self, layer: PadLayer) -> u8 {
        match (self, layer) {
            (Self::One, PadLayer::Default) => MIDI_STATUS_PAD_DECK_ONE,
            (Self::One, PadLayer::Shifted) => MIDI_STATUS_PAD_SHIFT_DECK_ONE,
            (Self::Two, PadLayer::Default) => MIDI_STATUS_PAD_DECK_TWO,
            (Self::Two, PadLayer::Shifted) => MIDI_STATUS_PAD_SHIFT_DECK_TWO,
        }
    }
}

/// Tunable behavior of the mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Blink period of the loop lights while a loop is enabled
    pub loop_blink_interval: Duration,

    /// Blink period of the sampler pads while playing
    pub sampler_blink_interval: Duration,

    /// Positions (in samples) per jog wheel tick while adjusting a loop point
    pub loop_adjust_multiplier: f64,

    /// Only allow to toggle loop point adjustment while a loop is enabled
    ///
    /// Disabled by default, i.e. adjustment could also be armed while
    /// no loop is enabled. The jog wheel only adjusts loop points if
    /// a loop is enabled in any case.
    pub loop_adjust_requires_loop: bool,

    /// Jog wheel ticks to pitch bend
    pub bend_scale: f64,

    /// Jog wheel ticks to fast seek while SHIFT is pressed
    pub fast_seek_scale: f64,

    pub scratch: ScratchParams,

    /// Initial vinyl mode of all decks
    pub vinyl_mode: bool,

    /// Tempo ranges that are cycled through by the tempo range button
    pub tempo_ranges: Vec<f64>,

    /// Beats to jump with SHIFT + CUE/LOOP CALL
    pub quick_jump_size: f64,
}

impl Config {
    pub const DEFAULT_TEMPO_RANGES: [f64; 4] = [0.06, 0.10, 0.16, 0.25];
}

impl Default for Config {
    fn default() -> Self {
        Self {
            loop_blink_interval: Duration::from_millis(500),
            sampler_blink_interval: Duration::from_millis(250),
            loop_adjust_multiplier: 50.0,
            loop_adjust_requires_loop: false,
            bend_scale: 0.8,
            fast_seek_scale: 150.0,
            scratch: Default::default(),
            vinyl_mode: true,
            tempo_ranges: Self::DEFAULT_TEMPO_RANGES.to_vec(),
            quick_jump_size: 32.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlinkKey {
    LoopLights { deck: Deck },
    SamplerPad { deck: Deck, pad: u8 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeckState {
    pub shift_pressed: bool,
    pub vinyl_mode: bool,
    pub loop_adjust: LoopAdjust,
}

impl DeckState {
    const fn new(vinyl_mode: bool) -> Self {
        Self {
            shift_pressed: false,
            vinyl_mode,
            loop_adjust: LoopAdjust::NONE,
        }
    }
}

/// Mutable state of the mapping.
#[derive(Debug)]
pub struct ControllerState {
    pub decks: [DeckState; Deck::COUNT],
    pub beatjump: BeatjumpState,
    pub high_res: HighResAccumulator,
    pub blink_timers: ActiveTimers<BlinkKey, LedOutput>,
}

impl ControllerState {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            decks: [
                DeckState::new(config.vinyl_mode),
                DeckState::new(config.vinyl_mode),
            ],
            beatjump: Default::default(),
            high_res: Default::default(),
            blink_timers: Default::default(),
        }
    }

    #[must_use]
    pub const fn deck(&self, deck: Deck) -> &DeckState {
        &self.decks[deck.index()]
    }

    pub fn deck_mut(&mut self, deck: Deck) -> &mut DeckState {
        &mut self.decks[deck.index()]
    }

    /// SHIFT is pressed on any deck.
    #[must_use]
    pub fn any_shift_pressed(&self) -> bool {
        self.decks.iter().any(|deck| deck.shift_pressed)
    }
}

/// The mapping of the controller.
///
/// All handlers are invoked on the same event loop and run to completion.
#[derive(Debug)]
pub struct Controller {
    config: Config,
    state: ControllerState,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Controller {
    #[must_use]
    pub fn new(config: Config) -> Self {
        let state = ControllerState::new(&config);
        Self { config, state }
    }

    #[must_use]
    pub const fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn init(&mut self, ctx: &mut Context<'_>) {
        log::info!("Initializing {DEVICE_DESCRIPTOR:?}");

        ctx.engine.set_value(EFFECT_UNIT, &key::SHOW_FOCUS, 1.0);

        for deck in Deck::iter() {
            ctx.engine
                .connect(deck.group(), &key::VU_METER, Callback::VuMeter);
        }
        for deck in Deck::iter() {
            output::send_vu_meter(ctx.output, deck, 0);
        }

        for deck in Deck::iter() {
            ctx.engine.enable_soft_takeover(deck.group(), &key::RATE);
        }
        for effect in 1..=NUM_EFFECTS_PER_UNIT {
            ctx.engine
                .enable_soft_takeover(effect_group(effect), &key::META);
        }
        ctx.engine.enable_soft_takeover(EFFECT_UNIT, &key::MIX);

        for sampler in 1..=sampler::NUM_SAMPLERS {
            ctx.engine
                .connect(Group::Sampler(sampler), &key::PLAY, Callback::SamplerPlay);
        }

        for deck in Deck::iter() {
            ctx.engine
                .connect(deck.group(), &key::TRACK_LOADED, Callback::TrackLoaded);
        }
        // Play the "track loaded" animation on both decks
        for deck in Deck::iter() {
            output::send_light(ctx.output, Light::TrackLoaded(deck), LedOutput::On);
        }

        for deck in Deck::iter() {
            output::set_loop_button_lights(ctx.output, deck, LedOutput::On);
        }
        for deck in Deck::iter() {
            ctx.engine
                .connect(deck.group(), &key::LOOP_ENABLED, Callback::LoopEnabled);
        }

        for effect in 1..=NUM_EFFECTS_PER_UNIT {
            ctx.engine
                .connect(effect_group(effect), &key::ENABLED, Callback::EffectLight);
        }
        ctx.engine
            .connect(EFFECT_UNIT, &key::FOCUSED_EFFECT, Callback::EffectLight);

        if let Err(err) = ctx.output.send_sysex(&SYSEX_QUERY_CONTROL_POSITIONS) {
            log::warn!("Failed to query control positions: {err}");
        }
    }

    /// Turn off all lights and reset the state.
    ///
    /// Could be invoked repeatedly.
    pub fn shutdown(&mut self, ctx: &mut Context<'_>) {
        log::info!("Shutting down {DEVICE_DESCRIPTOR:?}");

        self.state.blink_timers.stop_all(ctx.timers);
        self.state = ControllerState::new(&self.config);

        for deck in Deck::iter() {
            output::send_vu_meter(ctx.output, deck, 0);
        }

        for pad_base in [MIDI_PAD_SAMPLER, MIDI_PAD_HOT_CUE] {
            for pad in 0..NUM_PADS_PER_DECK {
                for deck in Deck::iter() {
                    for layer in [PadLayer::Default, PadLayer::Shifted] {
                        let light = Light::Pad {
                            deck,
                            layer,
                            control: pad_base + pad,
                        };
                        output::send_light(ctx.output, light, LedOutput::Off);
                    }
                }
            }
        }

        for deck in Deck::iter() {
            output::set_loop_button_lights(ctx.output, deck, LedOutput::Off);
        }
        for deck in Deck::iter() {
            output::set_reloop_lights(ctx.output, deck, LedOutput::Off);
        }

        output::set_beat_fx_lights(ctx.output, LedOutput::Off);
    }

    /// Decode and handle a MIDI message.
    ///
    /// Returns `true` if the message has been accepted and handled
    /// or `false` otherwise.
    pub fn handle_midi_input(&mut self, ctx: &mut Context<'_>, input: &[u8]) -> bool {
        match try_decode_midi_input(input) {
            Ok(Some((sensor, value))) => {
                log::debug!("{sensor:?} {value}");
                self.handle_sensor_input(ctx, sensor, value);
                true
            }
            Ok(None) => true,
            Err(err) => {
                log::warn!("Failed to decode MIDI input {input:x?}: {err}");
                false
            }
        }
    }

    /// Dispatch an input to its handler.
    #[allow(clippy::too_many_lines)]
    pub fn handle_sensor_input(&mut self, ctx: &mut Context<'_>, sensor: Sensor, value: u8) {
        let button = ButtonInput::from_u7(value);
        match sensor {
            Sensor::Deck(deck, sensor) => match sensor {
                DeckSensor::ShiftButton => self.shift(deck, ButtonInput::from_u7_max(value)),
                DeckSensor::JogWheelTouch => self.jog_touch(ctx, deck, button),
                DeckSensor::JogWheelSideEncoder | DeckSensor::JogWheelTopEncoder => {
                    self.jog_turn(ctx, deck, StepEncoderInput::from_u7_centered(value));
                }
                DeckSensor::JogWheelSearchEncoder => {
                    self.jog_search(ctx, deck, StepEncoderInput::from_u7_centered(value));
                }
                DeckSensor::VinylModeButton => self.toggle_vinyl_mode(ctx, deck, button),
                DeckSensor::InAdjustButton => self.toggle_loop_adjust_in(ctx, deck, button),
                DeckSensor::OutAdjustButton => self.toggle_loop_adjust_out(ctx, deck, button),
                DeckSensor::CueLoopCallLeftButton => loops::cue_loop_call_left(ctx, deck, button),
                DeckSensor::CueLoopCallRightButton => {
                    loops::cue_loop_call_right(ctx, deck, button);
                }
                DeckSensor::QuickJumpBackButton => self.quick_jump_back(ctx, deck, button),
                DeckSensor::QuickJumpForwardButton => {
                    self.quick_jump_forward(ctx, deck, button);
                }
                DeckSensor::BeatSyncButton => tempo::sync(ctx, deck, button),
                DeckSensor::BeatSyncLongPress => tempo::sync_long_press(ctx, deck, button),
                DeckSensor::TempoRangeButton => self.cycle_tempo_range(ctx, deck, button),
                DeckSensor::QuantizeButton => tempo::toggle_quantize(ctx, deck, button),
                DeckSensor::TempoSliderMsb => self.tempo_slider_msb(deck, value),
                DeckSensor::TempoSliderLsb => self.tempo_slider_lsb(ctx, deck, value),
            },
            Sensor::Effect(sensor) => match sensor {
                EffectSensor::BeatLeftButton => effect::beat_fx_left(ctx, button),
                EffectSensor::BeatRightButton => effect::beat_fx_right(ctx, button),
                EffectSensor::BeatFxSelectButton => effect::beat_fx_select(ctx, button),
                EffectSensor::BeatFxSelectShiftButton => {
                    effect::beat_fx_select_shift(ctx, button);
                }
                EffectSensor::BeatFxOnOffButton => effect::beat_fx_on_off(ctx, button),
                EffectSensor::BeatFxOnOffShiftButton => {
                    effect::beat_fx_on_off_shift(ctx, button);
                }
                EffectSensor::BeatFxChannelSelect(channel) => {
                    effect::beat_fx_channel(ctx, channel, button);
                }
                EffectSensor::BeatFxLevelDepthKnob => {
                    self.beat_fx_level_depth(ctx, SliderInput::from_u7(value));
                }
            },
            Sensor::Pad(deck, layer, sensor) => match (layer, sensor) {
                (PadLayer::Default, PadSensor::BeatJump(pad)) => {
                    self.beatjump_pad(ctx, deck, pad, button);
                }
                (PadLayer::Shifted, PadSensor::BeatJump(pad)) => match pad {
                    beatjump::SHIFT_PAD_DECREASE => {
                        self.decrease_beatjump_sizes(ctx, deck, button);
                    }
                    beatjump::SHIFT_PAD_INCREASE => {
                        self.increase_beatjump_sizes(ctx, deck, button);
                    }
                    _ => log::debug!("Unmapped shifted beat jump pad {pad}"),
                },
                (PadLayer::Default, PadSensor::Sampler(pad)) => {
                    let group = sampler::sampler_group(deck, pad);
                    sampler::sampler_pad_pressed(ctx, group, button);
                }
                (PadLayer::Shifted, PadSensor::Sampler(pad)) => {
                    let group = sampler::sampler_group(deck, pad);
                    sampler::sampler_pad_shift_pressed(ctx, group, button);
                }
            },
        }
    }

    /// Handle a value change that has been subscribed by [`Self::init()`].
    pub fn on_engine_callback(
        &mut self,
        ctx: &mut Context<'_>,
        callback: Callback,
        group: Group,
        value: f64,
    ) {
        match callback {
            Callback::VuMeter => on_vu_meter(ctx, group, value),
            Callback::TrackLoaded => on_track_loaded(ctx, group, value),
            Callback::LoopEnabled => self.on_loop_enabled(ctx, group, value),
            Callback::EffectLight => update_beat_fx_lights(ctx),
            Callback::SamplerPlay => self.on_sampler_play(ctx, group, value),
        }
    }

    /// Handle a tick of a timer.
    ///
    /// Ticks of timers that have already been stopped are ignored.
    pub fn on_timer(&mut self, ctx: &mut Context<'_>, id: TimerId) {
        let Some((blink_key, led)) = self.state.blink_timers.get_mut(id) else {
            log::debug!("Ignoring tick of stopped timer {id}");
            return;
        };
        *led = led.toggled();
        let led = *led;
        match blink_key {
            BlinkKey::LoopLights { deck } => self.on_loop_lights_tick(ctx, deck, led),
            BlinkKey::SamplerPad { deck, pad } => self.on_sampler_blink_tick(ctx, deck, pad, led),
        }
    }

    pub fn shift(&mut self, deck: Deck, input: ButtonInput) {
        self.state.deck_mut(deck).shift_pressed = input.is_pressed();
    }
}

fn on_vu_meter(ctx: &mut Context<'_>, group: Group, value: f64) {
    let Some(deck) = Deck::from_group(group) else {
        log::warn!("Unexpected VU meter group {group}");
        return;
    };
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let level = (value * 150.0).clamp(0.0, 127.0) as u8;
    output::send_vu_meter(ctx.output, deck, level);
}

fn on_track_loaded(ctx: &mut Context<'_>, group: Group, value: f64) {
    let Some(deck) = Deck::from_group(group) else {
        log::warn!("Unexpected track loaded group {group}");
        return;
    };
    output::send_light(
        ctx.output,
        Light::TrackLoaded(deck),
        LedOutput::from_bool(value > 0.0),
    );
}

fn update_beat_fx_lights(ctx: &mut Context<'_>) {
    let focused = effect::focused_effect_group(&*ctx.engine);
    let enabled = ctx.engine.get_value(focused, &key::ENABLED) > 0.0;
    output::set_beat_fx_lights(ctx.output, LedOutput::from_bool(enabled));
}
