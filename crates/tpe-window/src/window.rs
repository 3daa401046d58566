// SPDX-License-Identifier: Apache-2.0

//! A single in-flight window: its lifecycle state, remaining row budget,
//! input queue, and timer handles.

use std::cell::Cell;
use std::rc::Rc;

use tpe_channel::BoundedQueue;
use tpe_pdata::Batch;

/// Identifies a window, unique and monotonically increasing within one
/// coordinator's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub(crate) u64);

/// A window's position in its lifecycle.
///
/// At most one window is `Starting` or `Running` at a time; every other
/// live window is `Stopping`, draining its remaining output before it is
/// erased.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    Starting,
    Running,
    Stopping,
}

/// A disposable handle to a scheduled timer callback.
///
/// Disposing marks the timer cancelled so a callback that was already
/// queued becomes a no-op when it runs: rotation must tolerate a timer that
/// raced a state change rather than treat it as an error.
#[derive(Debug, Clone)]
pub struct TimerHandle {
    cancelled: Rc<Cell<bool>>,
}

impl TimerHandle {
    /// Creates a handle paired with the flag its scheduled callback should
    /// check before firing.
    pub(crate) fn new() -> (Self, Rc<Cell<bool>>) {
        let flag = Rc::new(Cell::new(false));
        (TimerHandle { cancelled: Rc::clone(&flag) }, flag)
    }

    /// Cancels the timer. A no-op if it already fired or was disposed.
    pub fn dispose(&self) {
        self.cancelled.set(true);
    }
}

/// One in-flight instance of the configured inner pipeline.
pub struct Window {
    pub id: WindowId,
    pub state: WindowState,
    pub remaining: Option<usize>,
    pub inputs: BoundedQueue<Batch>,
    pub period_timer: Option<TimerHandle>,
    pub idle_timer: Option<TimerHandle>,
}

impl Window {
    #[must_use]
    pub fn new(id: WindowId, remaining: Option<usize>, input_capacity: usize) -> Self {
        Window {
            id,
            state: WindowState::Starting,
            remaining,
            inputs: BoundedQueue::new(input_capacity),
            period_timer: None,
            idle_timer: None,
        }
    }

    /// Disposes both timers, if armed. Idempotent.
    pub fn dispose_timers(&mut self) {
        if let Some(timer) = self.period_timer.take() {
            timer.dispose();
        }
        self.dispose_idle_timer();
    }

    /// Disposes the idle timer alone, if armed. Used when the idle timer is
    /// about to be replaced by a freshly-armed one.
    pub fn dispose_idle_timer(&mut self) {
        if let Some(timer) = self.idle_timer.take() {
            timer.dispose();
        }
    }
}
