// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

use std::{collections::HashSet, time::Duration};

use super::*;

#[derive(Debug, Default)]
struct FakeScheduler {
    next_id: u64,
    running: HashSet<TimerId>,
    stopped: Vec<TimerId>,
}

impl TimerScheduler for FakeScheduler {
    fn begin_timer(&mut self, _interval: Duration) -> TimerId {
        self.next_id += 1;
        let id = TimerId::new(self.next_id);
        self.running.insert(id);
        id
    }

    fn stop_timer(&mut self, id: TimerId) {
        self.running.remove(&id);
        self.stopped.push(id);
    }
}

const INTERVAL: Duration = Duration::from_millis(250);

#[test]
fn restart_cancels_previous_timer() {
    let mut scheduler = FakeScheduler::default();
    let mut timers = ActiveTimers::<(u8, u8), u32>::default();

    let first = timers.start(&mut scheduler, (0x97, 0x30), INTERVAL, 1);
    let second = timers.start(&mut scheduler, (0x97, 0x30), INTERVAL, 2);

    assert_ne!(first, second);
    assert_eq!(1, timers.len());
    assert_eq!(vec![first], scheduler.stopped);
    assert_eq!(1, scheduler.running.len());
    assert!(scheduler.running.contains(&second));
    assert!(timers.get_mut(first).is_none());
    let (key, state) = timers.get_mut(second).unwrap();
    assert_eq!((0x97, 0x30), key);
    assert_eq!(2, *state);
}

#[test]
fn independent_keys() {
    let mut scheduler = FakeScheduler::default();
    let mut timers = ActiveTimers::<(u8, u8), ()>::default();

    timers.start(&mut scheduler, (0x97, 0x30), INTERVAL, ());
    timers.start(&mut scheduler, (0x97, 0x31), INTERVAL, ());
    timers.start(&mut scheduler, (0x99, 0x30), INTERVAL, ());

    assert_eq!(3, timers.len());
    assert!(scheduler.stopped.is_empty());
}

#[test]
fn stop_is_idempotent() {
    let mut scheduler = FakeScheduler::default();
    let mut timers = ActiveTimers::<u8, ()>::default();

    assert!(timers.stop(&mut scheduler, &1).is_none());
    let id = timers.start(&mut scheduler, 1, INTERVAL, ());
    assert!(timers.stop(&mut scheduler, &1).is_some());
    assert!(timers.stop(&mut scheduler, &1).is_none());
    assert_eq!(vec![id], scheduler.stopped);
    assert!(timers.is_empty());
}

#[test]
fn stop_all() {
    let mut scheduler = FakeScheduler::default();
    let mut timers = ActiveTimers::<u8, ()>::default();

    for key in 0..4 {
        timers.start(&mut scheduler, key, INTERVAL, ());
    }
    timers.stop_all(&mut scheduler);

    assert!(timers.is_empty());
    assert!(scheduler.running.is_empty());
    assert_eq!(4, scheduler.stopped.len());

    // Nothing left to stop
    timers.stop_all(&mut scheduler);
    assert_eq!(4, scheduler.stopped.len());
}
