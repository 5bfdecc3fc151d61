//! Bounded pool of OS threads for parallel lookups.
//!
//! `WorkerPool` runs one async job per input on a fixed number of worker
//! threads. Each job gets its own current-thread tokio runtime, built when the
//! job starts and dropped when it finishes, so no scheduler state is shared
//! between workers or carried from one job to the next.
//!
//! # Capacity Model
//!
//! - `capacity`: number of worker threads, and therefore the maximum number
//!   of jobs executing at once
//! - Jobs beyond `capacity` wait in the pool's queue until a worker is free
//!
//! # Result Order
//!
//! Results are returned in completion order. Two runs over the same inputs
//! may return the same values in a different order.
//!
//! # Examples
//!
//! ```rust
//! use catalog_fanout::pool::WorkerPool;
//!
//! let pool = WorkerPool::try_new(4).unwrap();
//! let mut doubled = pool.run(1..=3, |value| async move { value * 2 }).unwrap();
//! doubled.sort_unstable();
//! assert_eq!(doubled, vec![2, 4, 6]);
//! ```

use std::fmt;
use std::future::Future;
use std::io;

use parking_lot::Mutex;
use thiserror::Error;
use tokio::runtime::Builder;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when building or running a `WorkerPool`.
#[derive(Debug, Error)]
pub enum PoolError {
    /// The pool capacity was set to zero.
    #[error("worker pool capacity must be greater than 0")]
    InvalidCapacity,

    /// The worker threads could not be started.
    #[error("failed to start worker threads: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// A worker could not build its private runtime.
    #[error("failed to build a worker runtime: {0}")]
    WorkerRuntime(#[from] io::Error),
}

// =============================================================================
// WorkerPool
// =============================================================================

/// A fixed-size pool of worker threads, each job driven by a private runtime.
pub struct WorkerPool {
    capacity: usize,
    threads: rayon::ThreadPool,
}

impl fmt::Debug for WorkerPool {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("WorkerPool")
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl WorkerPool {
    /// Starts a pool with `capacity` worker threads.
    ///
    /// # Errors
    ///
    /// - [`PoolError::InvalidCapacity`] if `capacity` is 0
    /// - [`PoolError::ThreadPool`] if the operating system refuses the threads
    pub fn try_new(capacity: usize) -> Result<Self, PoolError> {
        if capacity == 0 {
            return Err(PoolError::InvalidCapacity);
        }

        let threads = rayon::ThreadPoolBuilder::new()
            .num_threads(capacity)
            .thread_name(|index| format!("catalog-worker-{index}"))
            .build()?;

        Ok(Self { capacity, threads })
    }

    /// Maximum number of jobs executing at once.
    #[must_use]
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Runs `job` once per input and waits for every job to finish.
    ///
    /// Each job's future is driven to completion by a fresh current-thread
    /// runtime (time driver enabled) on one of the worker threads. The
    /// calling thread blocks until the last job completes.
    ///
    /// # Returns
    ///
    /// The job outputs in completion order.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::WorkerRuntime`] if any worker failed to build its
    /// runtime. All other jobs still run to completion before the error is
    /// returned.
    pub fn run<I, F, Fut>(&self, inputs: I, job: F) -> Result<Vec<Fut::Output>, PoolError>
    where
        I: IntoIterator,
        I::Item: Send,
        F: Fn(I::Item) -> Fut + Sync,
        Fut: Future,
        Fut::Output: Send,
    {
        let inputs: Vec<I::Item> = inputs.into_iter().collect();
        let job_count = inputs.len();
        tracing::debug!(jobs = job_count, capacity = self.capacity, "dispatching to worker pool");

        let completed = Mutex::new(Vec::with_capacity(job_count));
        let failure: Mutex<Option<io::Error>> = Mutex::new(None);

        self.threads.scope(|scope| {
            for input in inputs {
                let job = &job;
                let completed = &completed;
                let failure = &failure;
                scope.spawn(move |_| match run_on_private_runtime(job(input)) {
                    Ok(output) => completed.lock().push(output),
                    Err(error) => {
                        failure.lock().get_or_insert(error);
                    }
                });
            }
        });

        if let Some(error) = failure.into_inner() {
            tracing::error!(%error, "worker runtime could not be built");
            return Err(PoolError::WorkerRuntime(error));
        }
        Ok(completed.into_inner())
    }
}

/// Builds a runtime for exactly one future and tears it down afterwards.
fn run_on_private_runtime<Fut: Future>(future: Fut) -> io::Result<Fut::Output> {
    let runtime = Builder::new_current_thread().enable_time().build()?;
    Ok(runtime.block_on(future))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn try_new_creates_pool_with_capacity() {
        let pool = WorkerPool::try_new(3).unwrap();
        assert_eq!(pool.capacity(), 3);
    }

    #[rstest]
    fn try_new_rejects_zero_capacity() {
        let result = WorkerPool::try_new(0);
        assert!(matches!(result, Err(PoolError::InvalidCapacity)));
    }

    #[rstest]
    fn run_with_no_inputs_returns_empty() {
        let pool = WorkerPool::try_new(2).unwrap();
        let results = pool
            .run(Vec::<u32>::new(), |value| async move { value })
            .unwrap();
        assert!(results.is_empty());
    }

    #[rstest]
    fn run_drives_timers_on_private_runtime() {
        let pool = WorkerPool::try_new(2).unwrap();
        let mut results = pool
            .run(0..4_u64, |value| async move {
                tokio::time::sleep(std::time::Duration::from_millis(1)).await;
                value
            })
            .unwrap();
        results.sort_unstable();
        assert_eq!(results, vec![0, 1, 2, 3]);
    }

    #[rstest]
    fn run_returns_outputs_in_completion_order() {
        let pool = WorkerPool::try_new(4).unwrap();
        let order = pool
            .run([80_u64, 60, 40, 20], |millis| async move {
                tokio::time::sleep(std::time::Duration::from_millis(millis)).await;
                millis
            })
            .unwrap();
        assert_eq!(order, vec![20, 40, 60, 80]);
    }

    #[rstest]
    fn pool_error_display() {
        assert_eq!(
            PoolError::InvalidCapacity.to_string(),
            "worker pool capacity must be greater than 0"
        );
    }

    #[rstest]
    fn debug_shows_capacity() {
        let pool = WorkerPool::try_new(5).unwrap();
        let debug = format!("{pool:?}");
        assert!(debug.contains("WorkerPool"));
        assert!(debug.contains("capacity: 5"));
    }
}
