//! Path jobs and the pending-job queue shared with the worker.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tilenav_core::Point;

use crate::buffer::PathBuffer;

/// One path request: tiles to connect and where to put the result.
#[derive(Debug)]
pub(crate) struct Job {
    pub(crate) start: Point,
    pub(crate) end: Point,
    pub(crate) buffer: PathBuffer,
    /// Buffer generation at submission time.
    pub(crate) generation: u64,
}

#[derive(Debug, Default)]
struct Pending {
    jobs: Vec<Job>,
    shutdown: bool,
}

/// Pending jobs, handed to the worker a whole batch at a time.
#[derive(Debug, Default)]
pub(crate) struct JobQueue {
    pending: Mutex<Pending>,
    wake: Condvar,
}

impl JobQueue {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            pending: Mutex::new(Pending {
                jobs: Vec::with_capacity(capacity),
                shutdown: false,
            }),
            wake: Condvar::new(),
        }
    }

    /// Append a job. Returns `false` and drops it after shutdown.
    pub(crate) fn push(&self, job: Job) -> bool {
        let mut pending = self.lock();
        if pending.shutdown {
            return false;
        }
        pending.jobs.push(job);
        drop(pending);
        self.wake.notify_one();
        true
    }

    /// Swap every pending job into `active`, which must be empty.
    ///
    /// Waits up to `poll` when nothing is pending. Returns `false` once
    /// shutdown has been requested.
    pub(crate) fn take_batch(&self, active: &mut Vec<Job>, poll: Duration) -> bool {
        debug_assert!(active.is_empty());
        let pending = self.lock();
        let (mut pending, _) = self
            .wake
            .wait_timeout_while(pending, poll, |p| p.jobs.is_empty() && !p.shutdown)
            .unwrap_or_else(PoisonError::into_inner);
        if pending.shutdown {
            return false;
        }
        std::mem::swap(&mut pending.jobs, active);
        true
    }

    /// Request shutdown and drop every pending job. Returns how many were
    /// dropped.
    pub(crate) fn shutdown(&self) -> usize {
        let mut pending = self.lock();
        pending.shutdown = true;
        let dropped = pending.jobs.len();
        pending.jobs.clear();
        drop(pending);
        self.wake.notify_all();
        dropped
    }

    pub(crate) fn is_shutdown(&self) -> bool {
        self.lock().shutdown
    }

    pub(crate) fn len(&self) -> usize {
        self.lock().jobs.len()
    }

    fn lock(&self) -> MutexGuard<'_, Pending> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
