// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

//! Tokio runtime glue
//!
//! Drives a [`Controller`] from a single task: MIDI input, engine
//! notifications and timer ticks are handled one after another and
//! each handler runs to completion.

use std::future::Future;

use futures_util::future::{AbortHandle, Abortable, Aborted};
use tokio::sync::mpsc;

use crate::{
    devices::pioneer_ddj_rev1::Controller, Callback, Context, Engine, Group, ScratchPhysics,
    SurfaceOutput, TokioTimerScheduler,
};

#[cfg(test)]
mod tests;

/// Input of the event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Raw MIDI message received from the device
    MidiInput(Vec<u8>),

    /// Value change of a connected engine parameter
    EngineCallback {
        callback: Callback,
        group: Group,
        value: f64,
    },

    /// Terminate the event loop after resetting the device.
    Shutdown,
}

/// The collaborators of the event loop.
struct Host<'a> {
    engine: &'a mut dyn Engine,
    scratch: &'a mut dyn ScratchPhysics,
    output: &'a mut dyn SurfaceOutput,
    timers: TokioTimerScheduler,
}

impl Host<'_> {
    fn context(&mut self) -> Context<'_> {
        Context {
            engine: &mut *self.engine,
            scratch: &mut *self.scratch,
            timers: &mut self.timers,
            output: &mut *self.output,
        }
    }
}

/// Run the controller until [`Event::Shutdown`] is received or all
/// event senders have been dropped.
///
/// The controller is initialized when entering and shut down before
/// leaving the event loop. Must be run within a Tokio runtime with
/// the time driver enabled.
pub async fn run_event_loop(
    controller: &mut Controller,
    engine: &mut dyn Engine,
    scratch: &mut dyn ScratchPhysics,
    output: &mut dyn SurfaceOutput,
    mut events: mpsc::UnboundedReceiver<Event>,
) {
    let (timers, mut ticks) = TokioTimerScheduler::new();
    let mut host = Host {
        engine,
        scratch,
        output,
        timers,
    };
    controller.init(&mut host.context());
    log::info!("Entering event loop");
    loop {
        tokio::select! {
            // Input takes precedence over pending ticks
            biased;
            event = events.recv() => {
                let Some(event) = event else {
                    log::info!("Event channel closed");
                    break;
                };
                match event {
                    Event::MidiInput(input) => {
                        // Undecodable input is logged and dropped
                        controller.handle_midi_input(&mut host.context(), &input);
                    }
                    Event::EngineCallback {
                        callback,
                        group,
                        value,
                    } => {
                        controller.on_engine_callback(&mut host.context(), callback, group, value);
                    }
                    Event::Shutdown => break,
                }
            }
            Some(id) = ticks.recv() => {
                controller.on_timer(&mut host.context(), id);
            }
        }
    }
    controller.shutdown(&mut host.context());
    debug_assert_eq!(0, host.timers.num_running_timers());
    log::info!("Exited event loop");
}

/// Dedicated thread for each controller.
///
/// Each controller gets its own thread to avoid blocking other controllers.
/// The task is created on the new thread, i.e. it does not need to be `Send`.
#[derive(Debug)]
pub struct ControllerThread {
    abort_handle: AbortHandle,
    os_thread: std::thread::JoinHandle<()>,
}

impl ControllerThread {
    #[must_use]
    pub fn spawn<F, T>(new_controller_task: F) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
        T: Future<Output = ()> + 'static,
    {
        let (abort_handle, abort_registration) = AbortHandle::new_pair();
        let os_thread = std::thread::spawn(move || {
            log::info!("Entering controller thread");
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()
            {
                Ok(runtime) => runtime,
                Err(err) => {
                    log::error!("Failed to create Tokio runtime: {err}");
                    return;
                }
            };
            let abortable_task = Abortable::new(new_controller_task(), abort_registration);
            runtime.block_on(async move {
                log::info!("Running controller task");
                match abortable_task.await {
                    Ok(()) => {
                        log::info!("Controller task terminated");
                    }
                    Err(Aborted) => {
                        log::info!("Controller task aborted");
                    }
                }
            });
            log::info!("Exiting controller thread");
        });
        Self {
            abort_handle,
            os_thread,
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.os_thread.is_finished()
    }

    pub fn abort_and_join(self) -> anyhow::Result<()> {
        let Self {
            abort_handle,
            os_thread,
        } = self;
        abort_handle.abort();
        os_thread
            .join()
            .map_err(|err| anyhow::anyhow!("Controller thread panicked: {err:?}"))
    }
}
