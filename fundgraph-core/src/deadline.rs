//! Run a blocking collaborator call with an upper bound on its wall time.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use crate::errors::RetrievalError;

/// Detached workers a guard tolerates before it refuses new calls.
pub const DEFAULT_MAX_STRAGGLERS: usize = 1;

/// Run `f` on a helper thread and wait at most `timeout` for it.
///
/// On timeout the helper thread is detached and its result discarded; the
/// caller gets `RetrievalError::Timeout` and degrades. Nothing limits how
/// many detached threads pile up; use a [`DeadlineGuard`] for a
/// collaborator that is called repeatedly.
pub fn run_with_deadline<T, F>(
    timeout: Duration,
    operation: &str,
    f: F,
) -> Result<T, RetrievalError>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    spawn_and_wait(timeout, operation, None, f)
}

/// Circuit breaker over one collaborator's deadline calls.
///
/// Every call that times out leaves a detached worker behind. While
/// `max_stragglers` of them are still running the guard is open and calls
/// fail fast with `RetrievalError::WorkerUnavailable`. It closes again on
/// its own once a straggler finishes.
#[derive(Debug, Clone)]
pub struct DeadlineGuard {
    timeout: Duration,
    max_stragglers: usize,
    stragglers: Arc<AtomicUsize>,
}

impl DeadlineGuard {
    pub fn new(timeout: Duration) -> Self {
        Self::with_max_stragglers(timeout, DEFAULT_MAX_STRAGGLERS)
    }

    pub fn with_max_stragglers(timeout: Duration, max_stragglers: usize) -> Self {
        Self {
            timeout,
            max_stragglers: max_stragglers.max(1),
            stragglers: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Detached workers still running.
    pub fn stragglers(&self) -> usize {
        self.stragglers.load(Ordering::SeqCst)
    }

    pub fn is_open(&self) -> bool {
        self.stragglers() >= self.max_stragglers
    }

    pub fn run<T, F>(&self, operation: &str, f: F) -> Result<T, RetrievalError>
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        let pending = self.stragglers();
        if pending >= self.max_stragglers {
            tracing::warn!(
                operation,
                stragglers = pending,
                "deadline guard open, call refused"
            );
            return Err(RetrievalError::WorkerUnavailable {
                operation: operation.to_string(),
                reason: format!("{pending} earlier call(s) still running past their deadline"),
            });
        }
        spawn_and_wait(self.timeout, operation, Some(&self.stragglers), f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WorkerState {
    Running,
    Finished,
    Detached,
}

fn spawn_and_wait<T, F>(
    timeout: Duration,
    operation: &str,
    stragglers: Option<&Arc<AtomicUsize>>,
    f: F,
) -> Result<T, RetrievalError>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let state = Arc::new(Mutex::new(WorkerState::Running));
    let counter = stragglers.cloned();
    let (tx, rx) = mpsc::sync_channel(1);
    let worker_state = Arc::clone(&state);
    let worker_operation = operation.to_string();
    let spawned = thread::Builder::new()
        .name(format!("deadline-{operation}"))
        .spawn(move || {
            let out = f();
            let mut state = worker_state.lock().unwrap_or_else(PoisonError::into_inner);
            if *state == WorkerState::Detached {
                if let Some(counter) = &counter {
                    counter.fetch_sub(1, Ordering::SeqCst);
                }
                tracing::debug!(operation = %worker_operation, "detached worker finished");
            }
            *state = WorkerState::Finished;
            // Receiver may be gone after a timeout.
            let _ = tx.send(out);
        });
    if let Err(e) = spawned {
        return Err(RetrievalError::WorkerUnavailable {
            operation: operation.to_string(),
            reason: e.to_string(),
        });
    }

    match rx.recv_timeout(timeout) {
        Ok(out) => Ok(out),
        Err(_) => {
            let mut worker = state.lock().unwrap_or_else(PoisonError::into_inner);
            // The worker may have finished between the timeout and the lock.
            if *worker == WorkerState::Running {
                *worker = WorkerState::Detached;
                if let Some(counter) = stragglers {
                    counter.fetch_add(1, Ordering::SeqCst);
                }
                tracing::warn!(
                    operation,
                    timeout_ms = timeout.as_millis() as u64,
                    "deadline exceeded, worker thread detached"
                );
            } else if let Ok(out) = rx.try_recv() {
                return Ok(out);
            }
            Err(RetrievalError::Timeout {
                operation: operation.to_string(),
                timeout_ms: timeout.as_millis() as u64,
            })
        }
    }
}
