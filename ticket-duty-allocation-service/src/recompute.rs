//! Recomputation of the duty allocation, serialized behind one worker.
//!
//! Wishlist changes trigger recomputation fire-and-forget. Two concurrent
//! passes would each publish a full run and delete what they take to be the
//! superseded one, so the publish step must never overlap itself: all
//! passes run on a single worker task, one after another.

use std::collections::HashSet;

use ticket_duty_allocation_database::runs::replace_latest_run;
use ticket_duty_allocation_database::snapshot::load_snapshot;
use ticket_duty_allocation_database::Pool;
use ticket_duty_allocation_engine::compute_assignments;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::error::ServiceError;

/// What one finished pass looked like, for the log and for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub run_id: i32,
    pub total_attendees: i32,
    pub total_events: i32,
    pub soft_errors: usize,
    pub unused_capacity: usize,
}

/// One full pass: snapshot, allocate, publish.
pub async fn run_recomputation(pool: &Pool, cap: usize) -> Result<RunSummary, ServiceError> {
    let (roster, declarations) = load_snapshot(pool).await?;
    let distinct_events: HashSet<i32> = declarations
        .iter()
        .map(|declaration| declaration.event_id)
        .collect();

    let outcome = compute_assignments(&roster, &declarations, cap);
    for soft_error in &outcome.soft_errors {
        warn!(%soft_error, "allocation reported a problem");
    }

    let assigned: usize = outcome
        .assignments
        .iter()
        .map(|assignment| assignment.total_duties)
        .sum();

    let run = replace_latest_run(
        pool,
        i32::try_from(distinct_events.len()).unwrap_or(i32::MAX),
        &outcome,
    )
    .await?;

    let summary = RunSummary {
        run_id: run.id,
        total_attendees: run.total_attendees,
        total_events: run.total_events,
        soft_errors: run.soft_errors.len(),
        unused_capacity: (roster.len() * cap).saturating_sub(assigned),
    };
    info!(
        run_id = summary.run_id,
        total_attendees = summary.total_attendees,
        total_events = summary.total_events,
        soft_errors = summary.soft_errors,
        unused_capacity = summary.unused_capacity,
        "published new calculation run"
    );
    Ok(summary)
}

/// Fire-and-forget trigger for the recompute worker. Cheap to clone; the
/// wishlist layer calls [`RecomputeHandle::trigger`] and answers its request
/// without waiting.
#[derive(Debug, Clone)]
pub struct RecomputeHandle {
    tx: mpsc::Sender<()>,
}

impl RecomputeHandle {
    /// Requests a recomputation. While a pass is running one more request
    /// can be queued; anything beyond that folds into the queued one, which
    /// will read the newer wishlist state anyway.
    pub fn trigger(&self) {
        let _ = self.tx.try_send(());
    }
}

/// Spawns the worker that owns all recomputation. Passes run strictly one
/// after another; dropping every handle shuts the worker down.
pub fn spawn_single_flight<MakeTask, Task>(mut task: MakeTask) -> (RecomputeHandle, JoinHandle<()>)
where
    MakeTask: FnMut() -> Task + Send + 'static,
    Task: core::future::Future<Output = ()> + Send + 'static,
{
    let (tx, mut rx) = mpsc::channel(1);
    let worker = tokio::spawn(async move {
        while rx.recv().await.is_some() {
            task().await;
        }
    });
    (RecomputeHandle { tx }, worker)
}

/// The production worker: one serialized compute-and-publish per trigger.
/// A failed pass is logged and the previous run stays published.
#[must_use]
pub fn spawn_recompute_worker(pool: Pool, cap: usize) -> (RecomputeHandle, JoinHandle<()>) {
    spawn_single_flight(move || {
        let pool = pool.clone();
        async move {
            if let Err(error) = run_recomputation(&pool, cap).await {
                error!(%error, "recomputation failed");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use tokio::sync::Semaphore;

    use super::spawn_single_flight;

    #[tokio::test]
    async fn triggers_coalesce_while_a_pass_runs() {
        let runs = Arc::new(AtomicUsize::new(0));
        let gate = Arc::new(Semaphore::new(0));

        let (handle, worker) = spawn_single_flight({
            let runs = Arc::clone(&runs);
            let gate = Arc::clone(&gate);
            move || {
                let runs = Arc::clone(&runs);
                let gate = Arc::clone(&gate);
                async move {
                    gate.acquire().await.unwrap().forget();
                    runs.fetch_add(1, Ordering::SeqCst);
                }
            }
        });

        handle.trigger();
        // let the worker dequeue the first request and park on the gate
        tokio::task::yield_now().await;
        handle.trigger();
        handle.trigger();
        handle.trigger();

        gate.add_permits(4);
        drop(handle);
        worker.await.unwrap();

        // the running pass finished, exactly one follow-up was queued, the
        // other two triggers folded into it
        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn the_worker_exits_once_every_handle_is_gone() {
        let (handle, worker) = spawn_single_flight(|| async {});
        drop(handle);
        worker.await.unwrap();
    }
}
