// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

//! Playback engine interface
//!
//! The engine is an external collaborator that stores parameter values
//! addressed by a [`Group`] and a [`Key`]. Value changes are reported back
//! by the host through [`Callback`]s that have been registered with
//! [`Engine::connect()`].

use std::borrow::Cow;

use derive_more::Display;

/// Addresses a set of related engine parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Group {
    #[display("[Master]")]
    Master,
    /// 1-based deck number
    #[display("[Channel{_0}]")]
    Channel(u8),
    /// 1-based sampler number
    #[display("[Sampler{_0}]")]
    Sampler(u8),
    /// 1-based effect unit number
    #[display("[EffectRack1_EffectUnit{_0}]")]
    EffectUnit(u8),
    /// 1-based effect slot within an effect unit
    #[display("[EffectRack1_EffectUnit{unit}_Effect{effect}]")]
    Effect { unit: u8, effect: u8 },
}

/// Name of a parameter within a [`Group`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub struct Key(Cow<'static, str>);

impl Key {
    #[must_use]
    pub const fn new_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Enables or disables the routing of `group` through an effect unit.
    #[must_use]
    pub fn group_enable(group: Group) -> Self {
        Self(Cow::Owned(format!("group_{group}_enable")))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Well-known parameter keys.
pub mod key {
    use super::Key;

    pub const BEATJUMP: Key = Key::new_static("beatjump");
    pub const BEATJUMP_SIZE: Key = Key::new_static("beatjump_size");
    pub const BEATSYNC: Key = Key::new_static("beatsync");
    pub const CUE_GOTOANDPLAY: Key = Key::new_static("cue_gotoandplay");
    pub const CUE_GOTOANDSTOP: Key = Key::new_static("cue_gotoandstop");
    pub const EJECT: Key = Key::new_static("eject");
    pub const ENABLED: Key = Key::new_static("enabled");
    pub const FOCUSED_EFFECT: Key = Key::new_static("focused_effect");
    pub const JOG: Key = Key::new_static("jog");
    pub const LOAD_SELECTED_TRACK: Key = Key::new_static("LoadSelectedTrack");
    pub const LOOP_ENABLED: Key = Key::new_static("loop_enabled");
    pub const LOOP_END_POSITION: Key = Key::new_static("loop_end_position");
    pub const LOOP_SCALE: Key = Key::new_static("loop_scale");
    pub const LOOP_START_POSITION: Key = Key::new_static("loop_start_position");
    pub const META: Key = Key::new_static("meta");
    pub const MIX: Key = Key::new_static("mix");
    pub const NEXT_EFFECT: Key = Key::new_static("next_effect");
    pub const PLAY: Key = Key::new_static("play");
    pub const PREV_EFFECT: Key = Key::new_static("prev_effect");
    pub const QUANTIZE: Key = Key::new_static("quantize");
    pub const RATE: Key = Key::new_static("rate");
    pub const RATE_RANGE: Key = Key::new_static("rateRange");
    pub const SHOW_FOCUS: Key = Key::new_static("show_focus");
    pub const SYNC_ENABLED: Key = Key::new_static("sync_enabled");
    pub const TRACK_LOADED: Key = Key::new_static("track_loaded");
    pub const VU_METER: Key = Key::new_static("VuMeter");
}

/// Entries of the subscription dispatch table.
///
/// The engine stores the callback together with the subscribed parameter
/// and reports each value change back to the controller, passing the
/// callback, the group and the new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Callback {
    VuMeter,
    TrackLoaded,
    LoopEnabled,
    EffectLight,
    SamplerPlay,
}

/// Parameter store of the playback engine.
pub trait Engine {
    #[must_use]
    fn get_value(&self, group: Group, key: &Key) -> f64;

    fn set_value(&mut self, group: Group, key: &Key, value: f64);

    /// Set the normalized value in the interval [0, 1].
    fn set_parameter(&mut self, group: Group, key: &Key, parameter: f64);

    /// Subscribe to value changes.
    ///
    /// Notifications are delivered synchronously on the same event loop,
    /// but never while a handler of the controller is running.
    fn connect(&mut self, group: Group, key: &Key, callback: Callback);

    fn enable_soft_takeover(&mut self, group: Group, key: &Key);

    /// Suppress exactly one soft takeover check for the parameter.
    fn ignore_next_soft_takeover_value(&mut self, group: Group, key: &Key);
}

/// Parameters of the scratch physics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScratchParams {
    /// Number of encoder ticks per revolution of the jog wheel
    pub intervals_per_rev: u32,
    /// Reference speed of the virtual vinyl
    pub rpm: f64,
    /// Smoothing filter constants
    pub alpha: f64,
    pub beta: f64,
}

impl ScratchParams {
    pub const DEFAULT_ALPHA: f64 = 1.0 / 8.0;
}

impl Default for ScratchParams {
    fn default() -> Self {
        let alpha = Self::DEFAULT_ALPHA;
        Self {
            intervals_per_rev: 720,
            rpm: 33.0 + 1.0 / 3.0,
            alpha,
            beta: alpha / 32.0,
        }
    }
}

/// Scratch physics of the engine.
///
/// Decks are addressed by their 1-based number.
pub trait ScratchPhysics {
    fn enable(&mut self, deck_number: u8, params: &ScratchParams);

    fn disable(&mut self, deck_number: u8);

    fn tick(&mut self, deck_number: u8, delta: i32);

    #[must_use]
    fn is_active(&self, deck_number: u8) -> bool;
}
