// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

use std::{collections::HashMap, future::Future, time::Duration};

use futures_util::future::{AbortHandle, Abortable, Aborted};
use tokio::sync::mpsc;

use super::{TimerId, TimerScheduler};

#[allow(clippy::manual_async_fn)] // Explicit return type to enforce the trait bounds
fn timer_task(
    id: TimerId,
    interval: Duration,
    tick_tx: mpsc::UnboundedSender<TimerId>,
) -> impl Future<Output = ()> + Send + 'static {
    async move {
        let mut interval = tokio::time::interval(interval);
        // Unlikely that a tick is missed. If it happens, then simply delay the next tick.
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick arrives immediately and must be skipped.
        interval.tick().await;
        loop {
            interval.tick().await;
            if tick_tx.send(id).is_err() {
                log::debug!("Timer {id} orphaned: event loop terminated");
                break;
            }
        }
    }
}

/// [`TimerScheduler`] that runs each timer as a Tokio task.
///
/// The ticks of all timers are sent through a single channel. The receiver
/// must be polled by the event loop that drives the controller. Must be used
/// from within a Tokio runtime with the time driver enabled.
#[derive(Debug)]
pub struct TokioTimerScheduler {
    next_id: u64,
    abort_handles: HashMap<TimerId, AbortHandle>,
    tick_tx: mpsc::UnboundedSender<TimerId>,
}

impl TokioTimerScheduler {
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerId>) {
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            next_id: 0,
            abort_handles: HashMap::new(),
            tick_tx,
        };
        (scheduler, tick_rx)
    }

    #[must_use]
    pub fn num_running_timers(&self) -> usize {
        self.abort_handles.len()
    }
}

impl TimerScheduler for TokioTimerScheduler {
    fn begin_timer(&mut self, interval: Duration) -> TimerId {
        self.next_id = self.next_id.wrapping_add(1);
        let id = TimerId::new(self.next_id);
        let (abort_handle, abort_registration) = AbortHandle::new_pair();
        let task = Abortable::new(
            timer_task(id, interval, self.tick_tx.clone()),
            abort_registration,
        );
        tokio::spawn(async move {
            match task.await {
                Ok(()) => (),
                Err(Aborted) => {
                    log::trace!("Timer {id} aborted");
                }
            }
        });
        self.abort_handles.insert(id, abort_handle);
        id
    }

    fn stop_timer(&mut self, id: TimerId) {
        let Some(abort_handle) = self.abort_handles.remove(&id) else {
            return;
        };
        abort_handle.abort();
    }
}

impl Drop for TokioTimerScheduler {
    fn drop(&mut self) {
        for (_, abort_handle) in self.abort_handles.drain() {
            abort_handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn ticks_until_stopped() {
        let (mut scheduler, mut tick_rx) = TokioTimerScheduler::new();
        let id = scheduler.begin_timer(Duration::from_millis(250));
        let started = tokio::time::Instant::now();

        assert_eq!(Some(id), tick_rx.recv().await);
        assert!(started.elapsed() >= Duration::from_millis(250));
        assert_eq!(Some(id), tick_rx.recv().await);
        assert!(started.elapsed() >= Duration::from_millis(500));

        scheduler.stop_timer(id);
        assert_eq!(0, scheduler.num_running_timers());
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(tick_rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn timers_are_independent() {
        let (mut scheduler, mut tick_rx) = TokioTimerScheduler::new();
        let slow = scheduler.begin_timer(Duration::from_millis(500));
        let fast = scheduler.begin_timer(Duration::from_millis(200));

        assert_eq!(Some(fast), tick_rx.recv().await);
        assert_eq!(Some(fast), tick_rx.recv().await);
        assert_eq!(Some(slow), tick_rx.recv().await);
    }
}
