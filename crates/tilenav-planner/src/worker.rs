//! The background path worker.
//!
//! The worker drains the job queue one batch at a time: it takes every
//! pending job at once, runs them last-submitted first, and only then looks
//! at the queue again. Each job is searched against the grid published at
//! the moment it runs.

use std::sync::{Arc, PoisonError, RwLock};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tilenav_core::Grid;
use tilenav_paths::{Astar, SearchCosts, waypoints};

use crate::config::PlannerConfig;
use crate::error::Result;
use crate::job::{Job, JobQueue};

/// Grid snapshot shared between the facade and the worker.
pub(crate) type SharedGrid = Arc<RwLock<Option<Arc<Grid>>>>;

pub(crate) const WORKER_THREAD_NAME: &str = "tilenav-worker";

/// Worker thread state.
pub(crate) struct Worker {
    queue: Arc<JobQueue>,
    grid: SharedGrid,
    costs: SearchCosts,
    poll_interval: Duration,
    astar: Astar,
    active: Vec<Job>,
}

impl Worker {
    pub(crate) fn new(config: &PlannerConfig, queue: Arc<JobQueue>, grid: SharedGrid) -> Self {
        Self {
            queue,
            grid,
            costs: config.costs,
            poll_interval: config.poll_interval,
            astar: Astar::new(Default::default()),
            active: Vec::with_capacity(config.batch_capacity),
        }
    }

    /// Start the worker on its own named thread.
    pub(crate) fn spawn(self) -> Result<JoinHandle<()>> {
        let handle = thread::Builder::new()
            .name(WORKER_THREAD_NAME.into())
            .spawn(move || self.run())?;
        Ok(handle)
    }

    /// Run until the queue is shut down.
    pub(crate) fn run(mut self) {
        log::debug!("path worker started");
        while self.drain_active() && self.queue.take_batch(&mut self.active, self.poll_interval) {
            if !self.active.is_empty() {
                log::trace!("path worker took a batch of {} jobs", self.active.len());
            }
        }
        if !self.active.is_empty() {
            log::warn!("path worker dropping {} unrun jobs", self.active.len());
            self.active.clear();
        }
        log::debug!("path worker stopped");
    }

    /// Run the active batch, last job first. Returns `false` if shutdown
    /// interrupted it; the unrun jobs stay in `active`.
    fn drain_active(&mut self) -> bool {
        while let Some(job) = self.active.pop() {
            if self.queue.is_shutdown() {
                self.active.push(job);
                return false;
            }
            self.run_job(job);
        }
        true
    }

    fn run_job(&mut self, job: Job) {
        if !job.buffer.is_current(job.generation) {
            log::trace!("skipping superseded path job {} -> {}", job.start, job.end);
            return;
        }
        let Some(grid) = self.snapshot() else {
            log::warn!("dropping path job {} -> {}: no grid configured", job.start, job.end);
            return;
        };
        let outcome = self.astar.search_grid(&grid, self.costs, job.start, job.end);
        log::trace!(
            "path {} -> {}: {} waypoints, {} expanded, reached: {}",
            job.start,
            job.end,
            outcome.path.len(),
            outcome.expanded,
            outcome.reached
        );
        let points = waypoints(&grid, &outcome.path);
        if !job.buffer.publish(job.generation, points, outcome.reached) {
            log::trace!("discarding superseded result {} -> {}", job.start, job.end);
        }
    }

    fn snapshot(&self) -> Option<Arc<Grid>> {
        self.grid
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(Arc::clone)
    }
}
