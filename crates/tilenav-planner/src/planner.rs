//! The [`Planner`] facade.

use std::sync::{Arc, PoisonError, RwLock};
use std::thread::JoinHandle;

use tilenav_core::{Grid, GridError, Point, WorldPoint};
use tilenav_paths::{Astar, waypoints};

use crate::buffer::PathBuffer;
use crate::config::PlannerConfig;
use crate::error::Result;
use crate::job::{Job, JobQueue};
use crate::worker::{SharedGrid, Worker};

/// Path planning service for one level.
///
/// Owns the grid and a background worker thread that runs submitted path
/// requests. The worker starts in [`new`](Self::new) and is stopped and
/// joined by [`shutdown`](Self::shutdown) or on drop; requests it has not
/// run by then are dropped and their buffers never become ready.
///
/// Every grid query and path request panics if no grid has been configured
/// yet: that is a setup bug, not a runtime condition.
pub struct Planner {
    config: PlannerConfig,
    grid: Option<Arc<Grid>>,
    /// Whether `grid` has changed since it was last handed to the worker.
    unpublished: bool,
    shared_grid: SharedGrid,
    queue: Arc<JobQueue>,
    worker: Option<JoinHandle<()>>,
    astar: Astar,
}

impl Planner {
    /// Validate `config` and start the worker thread.
    pub fn new(config: PlannerConfig) -> Result<Self> {
        config.validate()?;
        let queue = Arc::new(JobQueue::with_capacity(config.batch_capacity));
        let shared_grid: SharedGrid = Arc::new(RwLock::new(None));
        let worker = Worker::new(&config, Arc::clone(&queue), Arc::clone(&shared_grid)).spawn()?;
        Ok(Self {
            config,
            grid: None,
            unpublished: false,
            shared_grid,
            queue,
            worker: Some(worker),
            astar: Astar::new(Default::default()),
        })
    }

    /// Size a fresh, fully open grid. Call once per level load, before
    /// registering solid tiles; replaces any previous grid.
    pub fn configure_grid(
        &mut self,
        width: i32,
        height: i32,
        tile_size: f32,
        origin_offset: WorldPoint,
    ) -> std::result::Result<(), GridError> {
        let grid = Grid::new(width, height, tile_size, origin_offset)?;
        self.load_grid(grid);
        Ok(())
    }

    /// Install a prebuilt grid, e.g. one parsed with [`Grid::from_ascii`].
    pub fn load_grid(&mut self, grid: Grid) {
        self.grid = Some(Arc::new(grid));
        self.unpublished = true;
    }

    /// Flag a tile as impassable. Returns `false` if it is outside the grid
    /// or already solid.
    pub fn mark_solid(&mut self, p: Point) -> bool {
        let Some(grid) = self.grid.as_mut() else {
            panic!("Planner::mark_solid called before configure_grid");
        };
        // Copies the grid only if the worker still holds the published one.
        let changed = Arc::make_mut(grid).mark_solid(p);
        self.unpublished |= changed;
        changed
    }

    /// Queue a path request and return immediately.
    ///
    /// The result lands in `buffer` once the worker has run the search; a
    /// pending request on the same buffer is superseded.
    pub fn submit(&mut self, start: WorldPoint, end: WorldPoint, buffer: &PathBuffer) {
        self.publish_grid();
        let grid = self.configured_grid("submit");
        let job_start = grid.world_to_tile(start);
        let job_end = grid.world_to_tile(end);
        let generation = buffer.begin();
        let queued = self.queue.push(Job {
            start: job_start,
            end: job_end,
            buffer: buffer.clone(),
            generation,
        });
        if queued {
            log::trace!("queued path job {job_start} -> {job_end}");
        } else {
            log::warn!("path worker is stopped; dropping job {job_start} -> {job_end}");
        }
    }

    /// Run a path search on the calling thread.
    ///
    /// Blocks for the whole search; meant for tooling and rare one-off
    /// queries. Waypoints are ordered destination first.
    pub fn plot_path_sync(&mut self, start: WorldPoint, end: WorldPoint) -> Vec<WorldPoint> {
        let Some(grid) = self.grid.as_deref() else {
            panic!("Planner::plot_path_sync called before configure_grid");
        };
        let outcome = self.astar.search_grid(
            grid,
            self.config.costs,
            grid.world_to_tile(start),
            grid.world_to_tile(end),
        );
        waypoints(grid, &outcome.path)
    }

    /// Whether `a` can see `b` across the grid. Negation of
    /// [`is_sight_blocked`](Self::is_sight_blocked).
    pub fn is_visible(&self, a: WorldPoint, b: WorldPoint) -> bool {
        tilenav_sight::is_visible(self.configured_grid("is_visible"), a, b)
    }

    /// Line-of-sight query: whether a solid tile lies between `a` and `b`.
    /// Two points in the same tile are never blocked.
    pub fn is_sight_blocked(&self, a: WorldPoint, b: WorldPoint) -> bool {
        tilenav_sight::is_sight_blocked(self.configured_grid("is_sight_blocked"), a, b)
    }

    /// Whether tile `p` is solid or outside the grid.
    pub fn is_blocked(&self, p: Point) -> bool {
        self.configured_grid("is_blocked").is_blocked(p)
    }

    /// The current grid, if one has been configured.
    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_deref()
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Requests queued but not yet taken by the worker.
    pub fn pending_jobs(&self) -> usize {
        self.queue.len()
    }

    /// Stop the worker and wait for it to exit.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        let Some(handle) = self.worker.take() else {
            return;
        };
        let dropped = self.queue.shutdown();
        if dropped > 0 {
            log::warn!("planner shutdown dropped {dropped} pending jobs");
        }
        if handle.join().is_err() {
            log::error!("path worker panicked");
        }
    }

    /// Hand the current grid to the worker if it changed.
    fn publish_grid(&mut self) {
        if !self.unpublished {
            return;
        }
        let mut shared = self.shared_grid.write().unwrap_or_else(PoisonError::into_inner);
        *shared = self.grid.clone();
        self.unpublished = false;
    }

    fn configured_grid(&self, op: &str) -> &Grid {
        match self.grid.as_deref() {
            Some(grid) => grid,
            None => panic!("Planner::{op} called before configure_grid"),
        }
    }
}

impl Drop for Planner {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for Planner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Planner")
            .field("config", &self.config)
            .field("grid", &self.grid.as_deref().map(Grid::bounds))
            .field("pending_jobs", &self.pending_jobs())
            .field("running", &self.worker.is_some())
            .finish()
    }
}
