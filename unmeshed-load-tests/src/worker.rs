use std::fmt::Display;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::latch::CompletionLatch;
use crate::sample::{RunSample, RunSampleCollection};

/// Shape of a load run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadConfig {
    pub total_requests: usize,
    /// Maximum number of units in flight at once. Zero is treated as one.
    pub concurrency: u32,
    /// Upper bound on waiting for outstanding units once the last one is submitted.
    /// `None` waits indefinitely.
    pub max_wait: Option<Duration>,
    /// How long in-flight units may take to release their slots after the wait.
    pub grace_period: Duration,
}

/// Raw results of a load run.
#[derive(Debug)]
pub struct LoadRun {
    /// One entry per successful unit, in completion order.
    pub samples: Vec<RunSample>,
    pub failures: u64,
    /// Units that finished (successfully or not) before results were collected.
    pub completed: usize,
    /// `false` if the pool was still busy when the grace period ran out.
    pub drained: bool,
    pub elapsed_secs: f64,
}

impl LoadRun {
    /// Process exit code for the run: `1` if any unit failed, `0` otherwise.
    /// An undrained pool is only a warning; its partial results still count.
    pub fn exit_code(&self) -> i32 {
        if self.failures > 0 {
            1
        } else {
            0
        }
    }
}

/// Execute `op(iteration)` for every iteration in `0..total_requests`, with at
/// most `concurrency` in flight.
///
/// Only successful units contribute a sample. A failed unit is counted in
/// `failures`; success, failure and panic all release the completion latch.
/// If units are still running when the wait and the grace period have both
/// elapsed they are left running, a warning is logged and the samples collected
/// so far are returned.
pub async fn run<F, Fut, T, E>(config: LoadConfig, op: F) -> LoadRun
where
    F: Fn(usize) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Display + Send + 'static,
{
    let concurrency = config.concurrency.max(1);
    let op = Arc::new(op);
    let samples = Arc::new(RunSampleCollection::with_capacity(config.total_requests));
    let latch = Arc::new(CompletionLatch::new(config.total_requests));
    let slots = Arc::new(Semaphore::new(concurrency as usize));
    let failures = Arc::new(AtomicU64::new(0));

    let run_start = Instant::now();

    for iteration in 0..config.total_requests {
        let Ok(permit) = Arc::clone(&slots).acquire_owned().await else {
            break;
        };
        let op = Arc::clone(&op);
        let samples = Arc::clone(&samples);
        let failures = Arc::clone(&failures);
        let done = latch.guard();

        tokio::spawn(async move {
            let _permit = permit;
            let _done = done;

            let op_start = Instant::now();
            match (*op)(iteration).await {
                Ok(_) => {
                    let op_end = Instant::now();
                    samples.push(RunSample::new(
                        (op_start - run_start).as_millis() as u64,
                        (op_end - op_start).as_millis() as u64,
                    ));
                }
                Err(e) => {
                    failures.fetch_add(1, Ordering::Relaxed);
                    debug!(iteration, error = %e, "unit of work failed");
                }
            }
        });
    }

    let finished = match config.max_wait {
        Some(limit) => latch.wait_timeout(limit).await,
        None => {
            latch.wait().await;
            true
        }
    };
    if !finished {
        warn!(remaining = latch.remaining(), "not every unit finished within the maximum wait");
    }

    // Every slot back in the semaphore means nothing is in flight any more.
    let drained = matches!(
        tokio::time::timeout(config.grace_period, slots.acquire_many(concurrency)).await,
        Ok(Ok(_))
    );
    let completed = config.total_requests - latch.remaining();
    if drained {
        info!(completed, "worker pool drained");
    } else {
        warn!(
            grace_secs = config.grace_period.as_secs_f64(),
            "worker pool did not drain within the grace period; summarizing partial results"
        );
    }

    LoadRun {
        samples: samples.snapshot(),
        failures: failures.load(Ordering::Relaxed),
        completed,
        drained,
        elapsed_secs: run_start.elapsed().as_secs_f64(),
    }
}
