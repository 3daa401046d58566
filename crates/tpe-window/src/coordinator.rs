// SPDX-License-Identifier: Apache-2.0

//! The window coordinator: owns every live window, performs rotation, and
//! mediates the four channels that connect the outer pipeline and each
//! window's inner pipeline instance.
//!
//! This is a single-threaded cooperative actor: all state lives behind one
//! `Rc<RefCell<_>>`, mutated synchronously inside [`rotate`] and the public
//! request methods, with suspension only at queue boundaries. Nothing here
//! is `Send`; it is driven entirely from a `tokio::task::LocalSet`.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};
use std::time::{Duration, Instant};

use arrow_schema::SchemaRef;
use serde_json::Value;
use tpe_channel::BoundedQueue;
use tpe_engine::{BatchSink, EngineError, InnerPipelineFactory};
use tpe_pdata::Batch;
use tpe_telemetry::{Diagnostic, DiagnosticSink, MetricId, MetricsSink, OperatorIndex};

use crate::adapter::{Snk, Src};
use crate::config::WindowConfig;
use crate::error::CoordinatorError;
use crate::window::{TimerHandle, Window, WindowId, WindowState};

const OPERATOR_NAME: &str = "window";

struct Inner {
    schema: SchemaRef,
    config: WindowConfig,
    factory: Rc<dyn InnerPipelineFactory>,
    diagnostic_sink: Rc<dyn DiagnosticSink>,
    metrics_sink: Rc<dyn MetricsSink>,

    /// Front = the currently active (`Starting`/`Running`) window, if any.
    /// Everything behind it is `Stopping`, draining toward erasure.
    windows: VecDeque<Window>,
    outputs: BoundedQueue<Batch>,
    blocked_inputs: VecDeque<Batch>,
    blocked_drain_waker: Option<Waker>,
    outer_done: bool,
    next_start: Option<Instant>,
    retry_after_window_done: usize,
    next_id: u64,
    metrics_map: HashMap<(usize, u64), u64>,
    next_outer_metric_id: u64,
    terminated: bool,
    fatal_error: Option<CoordinatorError>,
}

/// Owns the set of live windows and mediates all four channels described in
/// the coordinator's public contract. Cheaply cloneable: every clone shares
/// the same underlying state.
#[derive(Clone)]
pub struct Coordinator {
    inner: Rc<RefCell<Inner>>,
}

impl Coordinator {
    /// Builds a new coordinator and performs the start-up rotation, which
    /// opens the first window even though no input has arrived yet. The
    /// first wall-clock period (when `period` is configured) is measured
    /// from this moment, not from the first batch received.
    #[must_use]
    pub fn new(
        schema: SchemaRef,
        config: WindowConfig,
        factory: Rc<dyn InnerPipelineFactory>,
        diagnostic_sink: Rc<dyn DiagnosticSink>,
        metrics_sink: Rc<dyn MetricsSink>,
    ) -> Self {
        let outputs_capacity = config.outer_queue_capacity();
        let next_start = config.period.map(|_| Instant::now());
        let inner = Inner {
            schema,
            config,
            factory,
            diagnostic_sink,
            metrics_sink,
            windows: VecDeque::new(),
            outputs: BoundedQueue::new(outputs_capacity),
            blocked_inputs: VecDeque::new(),
            blocked_drain_waker: None,
            outer_done: false,
            next_start,
            retry_after_window_done: 0,
            next_id: 0,
            metrics_map: HashMap::new(),
            next_outer_metric_id: 0,
            terminated: false,
            fatal_error: None,
        };
        let coordinator = Coordinator { inner: Rc::new(RefCell::new(inner)) };
        rotate(&coordinator);
        coordinator
    }

    /// Accepts one batch from the outer pipeline. A zero-row batch marks
    /// outer EOF.
    pub async fn push_outer(&self, batch: Batch) -> Result<(), CoordinatorError> {
        if let Some(err) = self.fatal_error() {
            return Err(err);
        }

        if batch.is_eof() {
            // Always rotate rather than short-circuiting straight to a final
            // EOF push: rotate()'s own step 1 closes whatever window is
            // still active, so its last output batches reach the outputs
            // queue (in order) before the terminal sentinel does, and its
            // eventual completion is what actually finalizes things. Without
            // this, a window with budget still remaining when the outer
            // stream ends would never be told to stop.
            {
                let mut guard = self.inner.borrow_mut();
                guard.outer_done = true;
            }
            rotate(self);
            return Ok(());
        }

        enum Route {
            Dropped,
            Blocked,
            Active(WindowId),
        }

        let route = {
            let guard = self.inner.borrow();
            match guard.windows.front() {
                Some(window) if window.state == WindowState::Running => Route::Active(window.id),
                _ if guard.config.nonblocking => Route::Dropped,
                _ => Route::Blocked,
            }
        };

        match route {
            Route::Dropped => Ok(()),
            Route::Blocked => {
                {
                    let mut guard = self.inner.borrow_mut();
                    guard.blocked_inputs.push_back(batch);
                }
                BlockedDrainFuture { inner: Rc::clone(&self.inner) }.await;
                Ok(())
            }
            Route::Active(id) => self.push_into_active_window(id, batch).await,
        }
    }

    async fn push_into_active_window(&self, id: WindowId, batch: Batch) -> Result<(), CoordinatorError> {
        let remaining_before = {
            let guard = self.inner.borrow();
            guard.windows.iter().find(|w| w.id == id).and_then(|w| w.remaining)
        };

        let (head, tail) = match remaining_before {
            Some(remaining) => {
                let at = remaining.min(batch.row_count());
                let (head, tail) = batch.split_at(at);
                (head, if tail.row_count() > 0 { Some(tail) } else { None })
            }
            None => (batch, None),
        };
        let head_rows = head.row_count();

        let push_future = {
            let mut guard = self.inner.borrow_mut();
            let window = guard
                .windows
                .iter_mut()
                .find(|w| w.id == id)
                .ok_or_else(|| CoordinatorError::InternalInvariant("active window vanished during push".to_owned()))?;
            window.inputs.push(head)
        };
        push_future.await;

        let (exhausted, idle) = {
            let mut guard = self.inner.borrow_mut();
            let idle = guard.config.idle;
            let window = guard
                .windows
                .iter_mut()
                .find(|w| w.id == id)
                .ok_or_else(|| CoordinatorError::InternalInvariant("active window vanished after push".to_owned()))?;
            if let Some(remaining) = window.remaining {
                window.remaining = Some(remaining - head_rows);
            }
            window.dispose_idle_timer();
            (window.remaining == Some(0), idle)
        };

        if let Some(idle) = idle {
            let (handle, flag) = TimerHandle::new();
            {
                let mut guard = self.inner.borrow_mut();
                if let Some(window) = guard.windows.iter_mut().find(|w| w.id == id) {
                    window.idle_timer = Some(handle);
                }
            }
            spawn_timer(self, idle, flag);
        }

        if exhausted {
            if let Some(tail) = tail {
                let mut guard = self.inner.borrow_mut();
                guard.blocked_inputs.push_back(tail);
            }
            rotate(self);
        }

        Ok(())
    }

    /// Called by `SRC` inside window `window_id`'s executor: pulls the next
    /// input batch for that window.
    pub async fn pull_inner(&self, window_id: WindowId) -> Result<Batch, CoordinatorError> {
        if let Some(err) = self.fatal_error() {
            return Err(err);
        }
        let queue = {
            let guard = self.inner.borrow();
            guard.windows.iter().find(|w| w.id == window_id).map(|w| w.inputs.clone())
        };
        let queue = queue.ok_or(CoordinatorError::Terminated)?;
        queue.pull().await.map_err(|_| CoordinatorError::Terminated)
    }

    /// Called by `SNK` inside window `window_id`'s executor: forwards one
    /// output batch into the shared outputs queue. Callers must not pass a
    /// zero-row batch; `window_id` identifies the call site but every
    /// window shares the same downstream queue.
    pub async fn push_inner(&self, window_id: WindowId, batch: Batch) -> Result<(), CoordinatorError> {
        if let Some(err) = self.fatal_error() {
            return Err(err);
        }
        let _ = window_id;
        debug_assert!(!batch.is_eof(), "zero-row batches must not be forwarded via inner.push");
        let push_future = {
            let guard = self.inner.borrow();
            guard.outputs.push(batch)
        };
        push_future.await;
        Ok(())
    }

    /// Called by POST: pulls the next batch bound for the outer pipeline. A
    /// zero-row batch signals final EOF.
    pub async fn pull_outer(&self) -> Result<Batch, CoordinatorError> {
        if let Some(err) = self.fatal_error() {
            return Err(err);
        }
        let queue = {
            let guard = self.inner.borrow();
            guard.outputs.clone()
        };
        queue.pull().await.map_err(|_| CoordinatorError::Terminated)
    }

    /// Forwards a diagnostic from an inner pipeline verbatim. Does not by
    /// itself terminate the operator.
    pub fn forward_diagnostic(&self, diagnostic: Diagnostic) {
        self.inner.borrow().diagnostic_sink.emit(diagnostic);
    }

    /// Remaps an inner pipeline's `(operator_index, metric_id)` to a fresh
    /// outer metric id on first sight, registering it with the metrics
    /// sink, and returns the outer id either way.
    pub fn remap_metric_registration(&self, operator: OperatorIndex, metric: MetricId, schema: Value) -> MetricId {
        let mut guard = self.inner.borrow_mut();
        let key = (operator.0, metric.0);
        if let Some(outer) = guard.metrics_map.get(&key) {
            return MetricId(*outer);
        }
        let outer_id = guard.next_outer_metric_id;
        guard.next_outer_metric_id += 1;
        guard.metrics_map.insert(key, outer_id);
        guard.metrics_sink.register(operator, MetricId(outer_id), schema);
        MetricId(outer_id)
    }

    /// Records a sample under its remapped outer metric id. A sample for a
    /// metric never registered is silently dropped.
    pub fn remap_metric_sample(&self, operator: OperatorIndex, metric: MetricId, sample: Value) {
        let guard = self.inner.borrow();
        let key = (operator.0, metric.0);
        if let Some(outer_id) = guard.metrics_map.get(&key).copied() {
            guard.metrics_sink.record(operator, MetricId(outer_id), sample);
        }
    }

    /// Terminates all live windows and fails every subsequent request with
    /// [`CoordinatorError::ShutdownRequested`].
    pub fn shutdown(&self, reason: impl Into<String>) {
        fail(self, CoordinatorError::ShutdownRequested(reason.into()));
    }

    /// The fatal error the coordinator terminated with, if any.
    #[must_use]
    pub fn fatal_error(&self) -> Option<CoordinatorError> {
        self.inner.borrow().fatal_error.clone()
    }

    /// Number of currently live windows (for tests and diagnostics).
    #[must_use]
    pub fn live_window_count(&self) -> usize {
        self.inner.borrow().windows.len()
    }
}

/// Resolves once `blocked_inputs` has been fully drained, releasing the
/// single back-pressure completion an outer push was awaiting.
struct BlockedDrainFuture {
    inner: Rc<RefCell<Inner>>,
}

impl Future for BlockedDrainFuture {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let mut guard = self.inner.borrow_mut();
        if guard.blocked_inputs.is_empty() {
            Poll::Ready(())
        } else {
            guard.blocked_drain_waker = Some(cx.waker().clone());
            Poll::Pending
        }
    }
}

fn spawn_timer(coordinator: &Coordinator, delay: Duration, cancelled: Rc<Cell<bool>>) {
    let coordinator = coordinator.clone();
    tokio::task::spawn_local(async move {
        tokio::time::sleep(delay).await;
        if !cancelled.get() {
            rotate(&coordinator);
        }
    });
}

/// Schedules a coordinator-level (not window-owned) deferred rotation, used
/// when a configured period has not yet elapsed and no window is open to
/// own a cancellable timer.
fn schedule_deferred_rotate(coordinator: &Coordinator, delay: Duration) {
    let coordinator = coordinator.clone();
    tokio::task::spawn_local(async move {
        tokio::time::sleep(delay).await;
        rotate(&coordinator);
    });
}

/// Drains `blocked_inputs` into `window` until its budget is exhausted or
/// the queue empties, splitting the head batch if it overruns the budget.
fn drain_blocked_inputs(inner: &mut Inner, window: &mut Window) {
    loop {
        let Some(head) = inner.blocked_inputs.pop_front() else { break };
        match window.remaining {
            None => window.inputs.force_push(head),
            Some(remaining) if head.row_count() <= remaining => {
                window.remaining = Some(remaining - head.row_count());
                let exhausted = window.remaining == Some(0);
                window.inputs.force_push(head);
                if exhausted {
                    break;
                }
            }
            Some(remaining) => {
                let (take, rest) = head.split_at(remaining);
                window.remaining = Some(0);
                window.inputs.force_push(take);
                inner.blocked_inputs.push_front(rest);
                break;
            }
        }
    }

    if inner.blocked_inputs.is_empty() {
        if let Some(waker) = inner.blocked_drain_waker.take() {
            waker.wake();
        }
    }
}

/// The single method that advances window lifecycle: closes the active
/// window, opens the next one (subject to period/parallel gating), and
/// drains anything buffered in `blocked_inputs` into it.
pub(crate) fn rotate(coordinator: &Coordinator) {
    let mut guard = coordinator.inner.borrow_mut();
    if guard.terminated {
        return;
    }

    // Step 1: close the active window.
    if let Some(active) = guard.windows.front_mut() {
        active.state = WindowState::Stopping;
        let eof = Batch::eof(guard.schema.clone());
        active.inputs.force_push(eof);
        active.dispose_timers();
        tracing::debug!(operator = OPERATOR_NAME, window_id = active.id.0, "closing window");
    }

    // Step 2: once the outer is done and nothing is left to replay, no new
    // window will ever be created again. The final sentinel is only
    // forwarded once every window has actually finished, though: one may
    // still be draining its last output, and that output must reach the
    // outputs queue before the sentinel does.
    if guard.outer_done && guard.blocked_inputs.is_empty() {
        if guard.windows.is_empty() {
            let eof = Batch::eof(guard.schema.clone());
            guard.outputs.force_push(eof);
        }
        return;
    }

    // Step 3: clamp next_start so a long inputless gap does not cause a
    // burst of catch-up windows once input resumes.
    let now = Instant::now();
    if !guard.config.nonblocking {
        if let Some(next_start) = guard.next_start {
            if next_start < now {
                guard.next_start = Some(now);
            }
        }
    }

    // Step 4: defer until the next scheduled period boundary.
    if guard.config.period.is_some() {
        let next_start = guard.next_start.expect("next_start is set whenever period is configured");
        if next_start > now {
            let delay = next_start - now;
            drop(guard);
            schedule_deferred_rotate(coordinator, delay);
            return;
        }
    }

    // Step 5: defer if parallel is saturated; the completion monitor will
    // retry once a slot frees up.
    if guard.windows.len() >= guard.config.parallel {
        guard.retry_after_window_done += 1;
        return;
    }

    // Step 6: open the new window.
    let id = WindowId(guard.next_id);
    guard.next_id += 1;
    tracing::debug!(operator = OPERATOR_NAME, window_id = id.0, "opening window");
    let remaining = guard.config.window_size.as_rows();
    let capacity = guard.config.window_input_capacity();
    let mut window = Window::new(id, remaining, capacity);

    // Step 7: drain anything buffered while no window was open.
    drain_blocked_inputs(&mut guard, &mut window);

    // Close the window right away, without waiting for a future push to
    // discover it, whenever nothing more can ever arrive for it: either its
    // row budget was exactly used up by the drain above (the same thing
    // that happens when a live push_outer call exhausts a window, just
    // reached from the drain path instead), or the outer stream has
    // already ended and the drain absorbed everything buffered. Its own
    // completion drives the next rotation.
    let exhausted = window.remaining == Some(0);
    if exhausted || (guard.outer_done && guard.blocked_inputs.is_empty()) {
        window.state = WindowState::Stopping;
        let eof = Batch::eof(guard.schema.clone());
        window.inputs.force_push(eof);
    } else {
        // Step 8: advance and re-arm the period timer.
        if let Some(period) = guard.config.period {
            let next_start = guard.next_start.unwrap_or(now) + period;
            guard.next_start = Some(next_start);
            let delay = next_start.saturating_duration_since(Instant::now());
            let (handle, flag) = TimerHandle::new();
            window.period_timer = Some(handle);
            spawn_timer(coordinator, delay, flag);
        }

        // Step 9: arm the idle timer.
        if let Some(idle) = guard.config.idle {
            let (handle, flag) = TimerHandle::new();
            window.idle_timer = Some(handle);
            spawn_timer(coordinator, idle, flag);
        }
    }

    let more_to_drain = !guard.blocked_inputs.is_empty();
    guard.windows.push_front(window);
    drop(guard);

    // Step 10: spawn the inner pipeline instance for the new window.
    spawn_window(coordinator, id);

    // The drain above could only hand this window a prefix of what was
    // blocked (it filled up first). Rather than wait for this window to
    // finish before the rest gets anywhere, try opening another one right
    // away: with room under `parallel`, it proceeds immediately; once
    // saturated, step 5 defers it exactly as it would any other rotation.
    if more_to_drain {
        rotate(coordinator);
    }
}

fn spawn_window(coordinator: &Coordinator, id: WindowId) {
    let (start_result, has_terminal_sink) = {
        let guard = coordinator.inner.borrow();
        (guard.factory.start(), guard.factory.has_terminal_sink())
    };

    let pipeline = match start_result {
        Ok(pipeline) => pipeline,
        Err(source) => {
            fail(coordinator, CoordinatorError::Start { window_id: id.0, source });
            return;
        }
    };

    {
        let mut guard = coordinator.inner.borrow_mut();
        if let Some(window) = guard.windows.iter_mut().find(|w| w.id == id) {
            if window.state == WindowState::Starting {
                window.state = WindowState::Running;
            }
        }
    }

    let src = Src::new(coordinator.clone(), id);
    let sink: Option<Box<dyn BatchSink>> =
        if has_terminal_sink { None } else { Some(Box::new(Snk::new(coordinator.clone(), id))) };

    let coordinator_for_task = coordinator.clone();
    tokio::task::spawn_local(async move {
        let result = pipeline.run(Box::new(src), sink).await;
        on_window_finished(&coordinator_for_task, id, result);
    });
}

fn on_window_finished(coordinator: &Coordinator, id: WindowId, result: Result<(), EngineError>) {
    let mut guard = coordinator.inner.borrow_mut();
    if guard.terminated {
        return;
    }

    guard.windows.retain_mut(|w| {
        if w.id == id {
            w.dispose_timers();
            false
        } else {
            true
        }
    });

    if let Err(source) = result {
        drop(guard);
        fail(coordinator, CoordinatorError::Runtime { window_id: id.0, source });
        return;
    }

    let should_retry = guard.retry_after_window_done > 0;
    if should_retry {
        guard.retry_after_window_done -= 1;
    }
    // With no period configured, completion is the only thing that ever
    // drives the next rotation. Once the outer is done, it is also the only
    // thing that can still finalize: that window's own period timer (if
    // any) was already disposed when it was closed, so nothing else would
    // ever call rotate() again to notice there is nothing left to do.
    let no_period = guard.config.period.is_none();
    let outer_done = guard.outer_done;
    drop(guard);

    if should_retry || no_period || outer_done {
        rotate(coordinator);
    }
}

fn fail(coordinator: &Coordinator, error: CoordinatorError) {
    let mut guard = coordinator.inner.borrow_mut();
    if guard.terminated {
        return;
    }
    guard.terminated = true;
    tracing::error!(operator = OPERATOR_NAME, %error, "window operator terminated");
    guard.diagnostic_sink.emit(Diagnostic::internal_error(OPERATOR_NAME, error.to_string()));
    guard.fatal_error = Some(error);
    for window in guard.windows.iter_mut() {
        window.dispose_timers();
        window.inputs.close();
    }
    guard.windows.clear();
    guard.outputs.close();
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tpe_engine::testing::{ErrorDuringRunFactory, ErrorOnStartFactory, IdentityPipelineFactory};
    use tpe_pdata::testing::{id_batch, id_schema, row_ids};
    use tpe_telemetry::diagnostic::TracingDiagnosticSink;
    use tpe_telemetry::metrics::NoopMetricsSink;

    use super::*;
    use crate::config::{WindowArgs, WindowConfig};

    fn local_rt() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap()
    }

    fn config(args: WindowArgs) -> WindowConfig {
        WindowConfig::resolve(&args, false, true).unwrap()
    }

    fn new_coordinator(config: WindowConfig, factory: Rc<dyn InnerPipelineFactory>) -> Coordinator {
        Coordinator::new(
            id_schema(),
            config,
            factory,
            Rc::new(TracingDiagnosticSink),
            Rc::new(NoopMetricsSink),
        )
    }

    #[test]
    fn window_size_rotation_splits_across_windows() {
        let local = tokio::task::LocalSet::new();
        local.block_on(&local_rt(), async {
            let config = config(WindowArgs {
                window_size: Some(2),
                parallel: Some(1),
                ..Default::default()
            });
            let coordinator = new_coordinator(config, Rc::new(IdentityPipelineFactory));

            coordinator.push_outer(id_batch(&[1, 2])).await.unwrap();
            coordinator.push_outer(id_batch(&[3, 4, 5])).await.unwrap();
            coordinator.push_outer(id_batch(&[])).await.unwrap();

            let mut seen = Vec::new();
            loop {
                let batch = coordinator.pull_outer().await.unwrap();
                if batch.is_eof() {
                    break;
                }
                seen.push(row_ids(&batch));
            }

            assert_eq!(seen, vec![vec![1, 2], vec![3, 4], vec![5]]);
        });
    }

    #[test]
    fn fatal_start_error_terminates_with_no_output() {
        let local = tokio::task::LocalSet::new();
        local.block_on(&local_rt(), async {
            let config = config(WindowArgs {
                window_size: Some(2),
                parallel: Some(1),
                ..Default::default()
            });
            let coordinator = new_coordinator(config, Rc::new(ErrorOnStartFactory));

            tokio::task::yield_now().await;
            let err = coordinator.push_outer(id_batch(&[1])).await.unwrap_err();
            assert!(matches!(err, CoordinatorError::Start { .. }));
        });
    }

    #[test]
    fn fatal_runtime_error_terminates_operator() {
        let local = tokio::task::LocalSet::new();
        local.block_on(&local_rt(), async {
            let config = config(WindowArgs {
                window_size: Some(2),
                parallel: Some(1),
                ..Default::default()
            });
            let coordinator = new_coordinator(config, Rc::new(ErrorDuringRunFactory));

            tokio::task::yield_now().await;
            let err = coordinator.pull_outer().await.unwrap_err();
            assert!(matches!(err, CoordinatorError::Runtime { .. }));
        });
    }

    #[test]
    fn parallel_saturation_defers_rotation_until_a_slot_frees() {
        let local = tokio::task::LocalSet::new();
        local.block_on(&local_rt(), async {
            let config = config(WindowArgs {
                window_size: Some(1),
                parallel: Some(1),
                ..Default::default()
            });
            let coordinator = new_coordinator(config, Rc::new(IdentityPipelineFactory));
            assert!(coordinator.live_window_count() <= 1);

            coordinator.push_outer(id_batch(&[1])).await.unwrap();
            coordinator.push_outer(id_batch(&[2])).await.unwrap();
            coordinator.push_outer(id_batch(&[])).await.unwrap();

            let mut seen = Vec::new();
            loop {
                let batch = coordinator.pull_outer().await.unwrap();
                if batch.is_eof() {
                    break;
                }
                seen.push(row_ids(&batch));
            }
            assert_eq!(seen, vec![vec![1], vec![2]]);
        });
    }

    #[test]
    fn idle_timeout_rotates_without_further_input() {
        let local = tokio::task::LocalSet::new();
        local.block_on(&local_rt(), async {
            let config = config(WindowArgs {
                idle_timeout: Some(Duration::from_millis(5)),
                parallel: Some(1),
                ..Default::default()
            });
            let coordinator = new_coordinator(config, Rc::new(IdentityPipelineFactory));

            coordinator.push_outer(id_batch(&[1])).await.unwrap();
            tokio::time::sleep(Duration::from_millis(30)).await;
            coordinator.push_outer(id_batch(&[])).await.unwrap();

            let mut seen = Vec::new();
            loop {
                let batch = coordinator.pull_outer().await.unwrap();
                if batch.is_eof() {
                    break;
                }
                seen.push(row_ids(&batch));
            }
            assert_eq!(seen, vec![vec![1]]);
        });
    }
}
