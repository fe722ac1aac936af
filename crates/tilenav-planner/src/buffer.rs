//! Caller-owned output buffers for asynchronous path requests.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tilenav_core::WorldPoint;

#[derive(Debug, Default)]
struct Slot {
    /// Bumped on every submission; results for older generations are dropped.
    generation: u64,
    ready: bool,
    reached: bool,
    waypoints: Vec<WorldPoint>,
}

#[derive(Debug, Default)]
struct Shared {
    slot: Mutex<Slot>,
    done: Condvar,
    /// Mirrors `slot.ready` for lock-free polling.
    ready: AtomicBool,
}

/// Output buffer for a path request submitted to a
/// [`Planner`](crate::Planner).
///
/// Cloning yields another handle to the **same** buffer. The worker swaps
/// the waypoints in and then raises a completion flag, so a caller can
/// poll [`is_ready`](Self::is_ready) every frame or block with
/// [`wait`](Self::wait) or [`wait_timeout`](Self::wait_timeout). Waypoints are ordered from the
/// destination back to the origin.
///
/// Submitting a new request on a buffer supersedes any request still in
/// flight on it: only the latest submission's result is ever stored.
#[derive(Clone, Default)]
pub struct PathBuffer {
    shared: Arc<Shared>,
}

impl PathBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the latest submitted request has completed.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.shared.ready.load(Ordering::Acquire)
    }

    /// Block until the latest request completes.
    ///
    /// Never returns if the planner is shut down before running it; prefer
    /// [`wait_timeout`](Self::wait_timeout) outside tooling.
    pub fn wait(&self) {
        let slot = self.lock();
        let _slot = self
            .shared
            .done
            .wait_while(slot, |s| !s.ready)
            .unwrap_or_else(PoisonError::into_inner);
    }

    /// Block until the latest request completes or `timeout` elapses.
    /// Returns whether the buffer is ready.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let slot = self.lock();
        let (slot, _) = self
            .shared
            .done
            .wait_timeout_while(slot, timeout, |s| !s.ready)
            .unwrap_or_else(PoisonError::into_inner);
        slot.ready
    }

    /// A copy of the waypoints. Empty while the request is pending.
    pub fn waypoints(&self) -> Vec<WorldPoint> {
        self.lock().waypoints.clone()
    }

    /// Move the waypoints out if the request has completed, leaving the
    /// buffer empty and not ready.
    pub fn take(&self) -> Option<Vec<WorldPoint>> {
        let mut slot = self.lock();
        if !slot.ready {
            return None;
        }
        slot.ready = false;
        self.shared.ready.store(false, Ordering::Release);
        Some(std::mem::take(&mut slot.waypoints))
    }

    /// Whether the completed path ends at the requested goal. `None` while
    /// pending; `Some(false)` for a best-effort path toward an unreachable
    /// goal.
    pub fn reached(&self) -> Option<bool> {
        let slot = self.lock();
        slot.ready.then_some(slot.reached)
    }

    /// Number of waypoints currently held.
    pub fn len(&self) -> usize {
        self.lock().waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether two handles refer to the same buffer.
    pub fn same_buffer(&self, other: &PathBuffer) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }

    /// Start a new request: clear the buffer and return the generation
    /// the result must carry.
    pub(crate) fn begin(&self) -> u64 {
        let mut slot = self.lock();
        slot.generation += 1;
        slot.ready = false;
        slot.waypoints.clear();
        self.shared.ready.store(false, Ordering::Release);
        slot.generation
    }

    /// Whether `generation` is still the latest request on this buffer.
    pub(crate) fn is_current(&self, generation: u64) -> bool {
        self.lock().generation == generation
    }

    /// Swap a result in. Returns `false` and discards it if a newer request
    /// has been submitted since `generation` was issued.
    pub(crate) fn publish(&self, generation: u64, mut waypoints: Vec<WorldPoint>, reached: bool) -> bool {
        let mut slot = self.lock();
        if slot.generation != generation {
            return false;
        }
        std::mem::swap(&mut slot.waypoints, &mut waypoints);
        slot.reached = reached;
        slot.ready = true;
        self.shared.ready.store(true, Ordering::Release);
        drop(slot);
        self.shared.done.notify_all();
        true
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.shared.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for PathBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = self.lock();
        f.debug_struct("PathBuffer")
            .field("generation", &slot.generation)
            .field("ready", &slot.ready)
            .field("waypoints", &slot.waypoints.len())
            .finish()
    }
}
