// SPDX-License-Identifier: Apache-2.0

//! End-to-end scenarios exercising the coordinator and the `PRE`/`POST`
//! pair together, beyond the per-unit coverage in `coordinator.rs`.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use tpe_engine::testing::{IdentityPipelineFactory, SleepThenEmitPipelineFactory};
use tpe_engine::{BatchSink, BatchSource, EngineError, InnerPipelineFactory};
use tpe_pdata::testing::{id_batch, id_schema, row_ids};
use tpe_pdata::Batch;
use tpe_telemetry::diagnostic::TracingDiagnosticSink;
use tpe_telemetry::metrics::NoopMetricsSink;
use tpe_window::{Coordinator, WindowArgs, WindowConfig, WindowOperator};

fn local_rt() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap()
}

fn config(args: WindowArgs) -> WindowConfig {
    WindowConfig::resolve(&args, false, true).unwrap()
}

fn new_coordinator(config: WindowConfig, factory: Rc<dyn InnerPipelineFactory>) -> Coordinator {
    Coordinator::new(id_schema(), config, factory, Rc::new(TracingDiagnosticSink), Rc::new(NoopMetricsSink))
}

async fn drain(coordinator: &Coordinator) -> Vec<Vec<i64>> {
    let mut seen = Vec::new();
    loop {
        let batch = coordinator.pull_outer().await.unwrap();
        if batch.is_eof() {
            break;
        }
        seen.push(row_ids(&batch));
    }
    seen
}

/// `window_size = ∞, parallel = 1, period = none, idle = none`, identity
/// inner pipeline: the operator must be perfectly transparent.
#[test]
fn identity_round_trip_preserves_the_input_stream() {
    let local = tokio::task::LocalSet::new();
    local.block_on(&local_rt(), async {
        let config = config(WindowArgs { parallel: Some(1), ..unbounded_args() });
        let coordinator = new_coordinator(config, Rc::new(IdentityPipelineFactory));

        coordinator.push_outer(id_batch(&[1, 2, 3])).await.unwrap();
        coordinator.push_outer(id_batch(&[4, 5])).await.unwrap();
        coordinator.push_outer(id_batch(&[])).await.unwrap();

        let seen = drain(&coordinator).await;
        assert_eq!(seen, vec![vec![1, 2, 3], vec![4, 5]]);
    });
}

fn unbounded_args() -> WindowArgs {
    // `WindowConfig::resolve` requires at least one bound; `timeout` set far
    // larger than the test's own lifetime keeps this an effectively
    // unbounded single window for round-trip purposes.
    WindowArgs { timeout: Some(Duration::from_secs(3600)), ..Default::default() }
}

/// `window_size=3, parallel=1, nonblocking=true`, inner pipeline that sleeps
/// before its first output: batches arriving while the sole window is
/// `STOPPING` and no replacement has opened yet are dropped rather than
/// buffered, keeping the operator itself unbounded-memory-safe under
/// backlog.
#[test]
fn nonblocking_drops_batches_with_no_window_to_receive_them() {
    let local = tokio::task::LocalSet::new();
    local.block_on(&local_rt(), async {
        let config = config(WindowArgs {
            window_size: Some(3),
            parallel: Some(1),
            nonblocking: true,
            ..Default::default()
        });
        let factory = Rc::new(SleepThenEmitPipelineFactory { delay: Duration::from_millis(50) });
        let coordinator = new_coordinator(config, factory);

        // Exactly exhausts window 1's budget, triggering rotation; the sole
        // window is now `STOPPING` and `parallel = 1` defers its
        // replacement until completion.
        coordinator.push_outer(id_batch(&[1, 2, 3])).await.unwrap();
        // Window 1 is still asleep; these have nowhere to land and are
        // dropped rather than queued.
        coordinator.push_outer(id_batch(&[4, 5, 6])).await.unwrap();
        coordinator.push_outer(id_batch(&[7, 8, 9])).await.unwrap();
        coordinator.push_outer(id_batch(&[])).await.unwrap();

        let seen = drain(&coordinator).await;
        let total_rows: usize = seen.iter().map(Vec::len).sum();
        assert!(total_rows <= 9, "dropped rows must never be fabricated back: got {seen:?}");
        assert_eq!(seen, vec![vec![1, 2, 3]], "only the first window's rows survive nonblocking drops");
    });
}

/// `window_size=∞, timeout=P`, identity inner pipeline: windows rotate
/// purely on the period timer, and the window live when outer EOF arrives
/// is still told to close and still contributes whatever it was holding.
#[test]
fn period_rotation_closes_the_window_live_at_outer_eof() {
    let local = tokio::task::LocalSet::new();
    local.block_on(&local_rt(), async {
        let config = config(WindowArgs {
            timeout: Some(Duration::from_millis(10)),
            parallel: Some(1),
            ..Default::default()
        });
        let coordinator = new_coordinator(config, Rc::new(IdentityPipelineFactory));

        coordinator.push_outer(id_batch(&[1])).await.unwrap();
        tokio::time::sleep(Duration::from_millis(25)).await; // crosses one period boundary
        coordinator.push_outer(id_batch(&[2])).await.unwrap();
        tokio::time::sleep(Duration::from_millis(25)).await; // crosses another
        coordinator.push_outer(id_batch(&[])).await.unwrap();

        let seen = drain(&coordinator).await;
        assert_eq!(seen, vec![vec![1], vec![2]]);
    });
}

/// `timeout=P, idle=I, parallel=2`, identity inner pipeline, steady input
/// faster than `P`: at most `parallel` windows are ever live, and every row
/// reaches the output exactly once even though sibling windows' outputs may
/// interleave.
#[test]
fn concurrent_windows_never_exceed_parallel_and_preserve_every_row() {
    let local = tokio::task::LocalSet::new();
    local.block_on(&local_rt(), async {
        let config = config(WindowArgs {
            timeout: Some(Duration::from_millis(20)),
            idle_timeout: Some(Duration::from_millis(5)),
            parallel: Some(2),
            ..Default::default()
        });
        let coordinator = new_coordinator(config, Rc::new(IdentityPipelineFactory));

        let max_live = Rc::new(RefCell::new(0usize));
        for row in 1..=50i64 {
            coordinator.push_outer(id_batch(&[row])).await.unwrap();
            *max_live.borrow_mut() = (*max_live.borrow()).max(coordinator.live_window_count());
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        coordinator.push_outer(id_batch(&[])).await.unwrap();

        let seen = drain(&coordinator).await;
        let mut rows: Vec<i64> = seen.into_iter().flatten().collect();
        rows.sort_unstable();
        assert_eq!(rows, (1..=50).collect::<Vec<_>>(), "no row may be lost or duplicated");
        assert!(*max_live.borrow() <= 2, "parallel = 2 must never be exceeded");
    });
}

struct VecSource {
    batches: std::vec::IntoIter<Batch>,
}

#[async_trait(?Send)]
impl BatchSource for VecSource {
    async fn next_batch(&mut self) -> Result<Batch, EngineError> {
        Ok(self.batches.next().unwrap_or_else(|| id_batch(&[])))
    }
}

struct VecSink {
    collected: Rc<RefCell<Vec<Vec<i64>>>>,
}

#[async_trait(?Send)]
impl BatchSink for VecSink {
    async fn accept(&mut self, batch: Batch) -> Result<(), EngineError> {
        self.collected.borrow_mut().push(row_ids(&batch));
        Ok(())
    }
}

/// The full `PRE`/`POST` expansion, wired the way the operator factory
/// would wire it, behaves identically to driving the coordinator directly.
#[test]
fn pre_post_expansion_round_trips_through_the_outer_pipeline() {
    let local = tokio::task::LocalSet::new();
    local.block_on(&local_rt(), async {
        let args = WindowArgs { window_size: Some(2), parallel: Some(1), ..Default::default() };
        let collected = Rc::new(RefCell::new(Vec::new()));
        let source = Box::new(VecSource {
            batches: vec![id_batch(&[1, 2, 3]), id_batch(&[4]), id_batch(&[])].into_iter(),
        });
        let sink = Box::new(VecSink { collected: Rc::clone(&collected) });

        let (pre, post, placement) = WindowOperator::build(
            &args,
            id_schema(),
            Rc::new(IdentityPipelineFactory),
            true,
            false,
            Rc::new(TracingDiagnosticSink),
            Rc::new(NoopMetricsSink),
            source,
            sink,
        )
        .unwrap();
        assert_eq!(placement, tpe_window::Placement::Unconstrained);

        let pre_task = tokio::task::spawn_local(Box::new(pre).run());
        let post_task = tokio::task::spawn_local(Box::new(post).run());
        pre_task.await.unwrap().unwrap();
        post_task.await.unwrap().unwrap();

        // Window 1 takes rows 1-2 (its size-2 budget); the split-off row 3
        // and the standalone batch [4] both land in window 2, but as two
        // separate batches — the operator splits an overrunning batch, it
        // never recombines distinct ones.
        assert_eq!(*collected.borrow(), vec![vec![1, 2], vec![3], vec![4]]);
    });
}
