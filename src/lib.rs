// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

#![allow(rustdoc::invalid_rust_codeblocks)]
#![doc = include_str!("../README.md")]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(unreachable_pub)]
#![warn(unsafe_code)]
#![warn(clippy::pedantic)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(rustdoc::broken_intra_doc_links)]
// Repetitions of module/type names occur frequently when using many
// modules for keeping the size of the source files handy. Often
// types have the same name as their parent module.
#![allow(clippy::module_name_repetitions)]
// Repeating the type name in `..Default::default()` expressions
// is not needed since the context is obvious.
#![allow(clippy::default_trait_access)]

mod input;
pub use self::input::{
    u7_be_to_u14, ButtonInput, SliderInput, StepEncoderInput, U7_ENCODER_CENTER,
};

mod output;
pub use self::output::{LedOutput, OutputError, OutputResult, SurfaceOutput};

pub mod midi;
pub use self::midi::{
    MidiDeviceDescriptor, MidiInputDecodeError, MidiOutputConnection, MidiOutputGateway,
};

pub mod engine;
pub use self::engine::{Callback, Engine, Group, Key, ScratchParams, ScratchPhysics};

pub mod timer;
pub use self::timer::{ActiveTimers, TimerId, TimerScheduler};

#[cfg(feature = "tokio")]
pub use self::timer::tokio::TokioTimerScheduler;

#[cfg(feature = "tokio")]
pub mod controller;
#[cfg(feature = "tokio")]
pub use self::controller::{run_event_loop, ControllerThread, Event};

pub mod devices;

/// Bundles the external collaborators for a single turn of the event loop.
///
/// All handlers borrow the collaborators only for the duration of
/// a call, i.e. they never keep references across turns.
#[allow(missing_debug_implementations)]
pub struct Context<'a> {
    pub engine: &'a mut dyn Engine,
    pub scratch: &'a mut dyn ScratchPhysics,
    pub timers: &'a mut dyn TimerScheduler,
    pub output: &'a mut dyn SurfaceOutput,
}

/// Static device metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescriptor {
    pub vendor_name: &'static str,
    pub product_name: &'static str,
}
