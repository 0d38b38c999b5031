// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

use std::{collections::HashMap, time::Duration};

use super::*;
use crate::{Key, OutputResult, ScratchParams};

#[derive(Default)]
struct ParameterStore {
    values: HashMap<(Group, String), f64>,
}

impl Engine for ParameterStore {
    fn get_value(&self, group: Group, key: &Key) -> f64 {
        self.values
            .get(&(group, key.as_str().to_owned()))
            .copied()
            .unwrap_or_default()
    }

    fn set_value(&mut self, group: Group, key: &Key, value: f64) {
        self.values.insert((group, key.as_str().to_owned()), value);
    }

    fn set_parameter(&mut self, group: Group, key: &Key, parameter: f64) {
        self.set_value(group, key, parameter);
    }

    fn connect(&mut self, _group: Group, _key: &Key, _callback: Callback) {}

    fn enable_soft_takeover(&mut self, _group: Group, _key: &Key) {}

    fn ignore_next_soft_takeover_value(&mut self, _group: Group, _key: &Key) {}
}

struct NoScratch;

impl ScratchPhysics for NoScratch {
    fn enable(&mut self, _deck_number: u8, _params: &ScratchParams) {}

    fn disable(&mut self, _deck_number: u8) {}

    fn tick(&mut self, _deck_number: u8, _delta: i32) {}

    fn is_active(&self, _deck_number: u8) -> bool {
        false
    }
}

#[derive(Default)]
struct Recorder {
    messages: Vec<[u8; 3]>,
}

impl Recorder {
    fn position(&self, message: [u8; 3]) -> Option<usize> {
        self.messages.iter().position(|m| *m == message)
    }
}

impl SurfaceOutput for Recorder {
    fn send_short(&mut self, status: u8, data1: u8, data2: u8) -> OutputResult<()> {
        self.messages.push([status, data1, data2]);
        Ok(())
    }

    fn send_sysex(&mut self, _data: &[u8]) -> OutputResult<()> {
        Ok(())
    }
}

const LOOP_IN_ON: [u8; 3] = [0x90, 0x10, 0x7f];
const LOOP_IN_OFF: [u8; 3] = [0x90, 0x10, 0x00];

#[tokio::test(start_paused = true)]
async fn loop_lights_blink_until_shutdown() {
    let _ = pretty_env_logger::try_init();

    let mut controller = Controller::default();
    let mut engine = ParameterStore::default();
    let mut scratch = NoScratch;
    let mut output = Recorder::default();
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    let driver = async move {
        event_tx
            .send(Event::EngineCallback {
                callback: Callback::LoopEnabled,
                group: Group::Channel(1),
                value: 1.0,
            })
            .unwrap();
        // Two ticks with the default interval of 500 ms
        tokio::time::sleep(Duration::from_millis(1_100)).await;
        event_tx.send(Event::Shutdown).unwrap();
    };
    tokio::join!(
        run_event_loop(
            &mut controller,
            &mut engine,
            &mut scratch,
            &mut output,
            event_rx
        ),
        driver,
    );

    // The first tick turns the lights off, the second one on again
    let first_off = output.position(LOOP_IN_OFF).unwrap();
    assert!(output.messages[first_off..].contains(&LOOP_IN_ON));
    // Shutdown turns all lights off
    let last_loop_in = output
        .messages
        .iter()
        .rev()
        .find(|m| m[..2] == LOOP_IN_OFF[..2]);
    assert_eq!(Some(&LOOP_IN_OFF), last_loop_in);
    assert!(controller.state().blink_timers.is_empty());
}

#[tokio::test(start_paused = true)]
async fn midi_input_until_channel_closed() {
    let _ = pretty_env_logger::try_init();

    let mut controller = Controller::default();
    let mut engine = ParameterStore::default();
    let mut output = Recorder::default();
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    // Vinyl mode is enabled initially
    event_tx
        .send(Event::MidiInput(vec![0x90, 0x17, 0x7f]))
        .unwrap();
    event_tx
        .send(Event::MidiInput(vec![0x90, 0x17, 0x00]))
        .unwrap();
    // Unmapped input is ignored
    event_tx.send(Event::MidiInput(vec![0xf8])).unwrap();
    drop(event_tx);

    run_event_loop(
        &mut controller,
        &mut engine,
        &mut NoScratch,
        &mut output,
        event_rx,
    )
    .await;

    assert!(output.position([0x90, 0x17, 0x00]).is_some());
    assert!(output.position([0x90, 0x17, 0x7f]).is_none());
}

#[test]
fn abort_controller_thread() {
    let _ = pretty_env_logger::try_init();

    let thread = ControllerThread::spawn(|| std::future::pending::<()>());
    assert!(!thread.is_finished());
    thread.abort_and_join().unwrap();
}

#[test]
fn controller_thread_terminates_with_event_loop() {
    let _ = pretty_env_logger::try_init();

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let thread = ControllerThread::spawn(move || async move {
        let mut controller = Controller::default();
        run_event_loop(
            &mut controller,
            &mut ParameterStore::default(),
            &mut NoScratch,
            &mut Recorder::default(),
            event_rx,
        )
        .await;
    });
    event_tx.send(Event::Shutdown).unwrap();
    thread.abort_and_join().unwrap();
}
