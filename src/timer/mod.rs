// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

use std::{collections::HashMap, hash::Hash, time::Duration};

use derive_more::Display;

#[cfg(feature = "tokio")]
pub mod tokio;

#[cfg(test)]
mod tests;

/// Opaque handle of a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[repr(transparent)]
pub struct TimerId(u64);

impl TimerId {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }
}

/// Schedules periodic callbacks on the event loop.
///
/// Each tick of a timer is delivered as a separate turn of the event loop
/// by passing the [`TimerId`] back to the controller.
pub trait TimerScheduler {
    fn begin_timer(&mut self, interval: Duration) -> TimerId;

    /// Cancel a timer.
    ///
    /// Stopping an unknown or already stopped timer is a no-op.
    fn stop_timer(&mut self, id: TimerId);
}

/// Live timers, at most one per key.
///
/// Each timer carries some state `S` that is passed to the tick handler.
#[derive(Debug)]
pub struct ActiveTimers<K, S> {
    by_key: HashMap<K, (TimerId, S)>,
    key_by_id: HashMap<TimerId, K>,
}

impl<K, S> Default for ActiveTimers<K, S> {
    fn default() -> Self {
        Self {
            by_key: HashMap::new(),
            key_by_id: HashMap::new(),
        }
    }
}

impl<K, S> ActiveTimers<K, S>
where
    K: Copy + Eq + Hash + std::fmt::Debug,
{
    #[must_use]
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.by_key.len(), self.key_by_id.len());
        self.by_key.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn timer_id(&self, key: &K) -> Option<TimerId> {
        self.by_key.get(key).map(|(id, _)| *id)
    }

    /// Start a new timer for `key`.
    ///
    /// An existing timer for the same key is stopped first.
    pub fn start(
        &mut self,
        scheduler: &mut dyn TimerScheduler,
        key: K,
        interval: Duration,
        state: S,
    ) -> TimerId {
        self.stop(scheduler, &key);
        let id = scheduler.begin_timer(interval);
        log::debug!("Started timer {id} for {key:?} with interval {interval:?}");
        self.by_key.insert(key, (id, state));
        self.key_by_id.insert(id, key);
        id
    }

    /// Stop the timer for `key`.
    ///
    /// Returns the state of the stopped timer or `None` if no timer
    /// was running.
    pub fn stop(&mut self, scheduler: &mut dyn TimerScheduler, key: &K) -> Option<S> {
        let (id, state) = self.by_key.remove(key)?;
        self.key_by_id.remove(&id);
        scheduler.stop_timer(id);
        log::debug!("Stopped timer {id} for {key:?}");
        Some(state)
    }

    /// Stop all timers.
    pub fn stop_all(&mut self, scheduler: &mut dyn TimerScheduler) {
        for (key, (id, _)) in self.by_key.drain() {
            scheduler.stop_timer(id);
            log::debug!("Stopped timer {id} for {key:?}");
        }
        self.key_by_id.clear();
    }

    /// Look up a live timer by its id.
    ///
    /// Ticks of already stopped timers might still be delivered and
    /// must be ignored, i.e. `None` is not an error.
    pub fn get_mut(&mut self, id: TimerId) -> Option<(K, &mut S)> {
        let key = *self.key_by_id.get(&id)?;
        let (_, state) = self.by_key.get_mut(&key)?;
        Some((key, state))
    }
}
