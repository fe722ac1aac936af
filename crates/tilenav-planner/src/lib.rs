//! Asynchronous path planning for game AI.
//!
//! A [`Planner`] owns a level's occupancy grid and one background worker
//! thread. Gameplay code configures the grid at level load, then either
//! submits path requests that the worker fills into caller-owned
//! [`PathBuffer`]s, or runs the synchronous queries directly:
//!
//! ```no_run
//! use std::time::Duration;
//! use tilenav_planner::{PathBuffer, Planner, PlannerConfig, Point, WorldPoint};
//!
//! let mut planner = Planner::new(PlannerConfig::default())?;
//! planner.configure_grid(10, 10, 32.0, WorldPoint::new(16.0, 16.0))?;
//! planner.mark_solid(Point::new(4, 4));
//!
//! let path = PathBuffer::new();
//! planner.submit(WorldPoint::new(16.0, 16.0), WorldPoint::new(300.0, 300.0), &path);
//! if path.wait_timeout(Duration::from_millis(100)) {
//!     let waypoints = path.waypoints(); // destination first
//!     # let _ = waypoints;
//! }
//! let visible = planner.is_visible(WorldPoint::new(16.0, 16.0), WorldPoint::new(300.0, 16.0));
//! # let _ = visible;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Synchronous queries never touch the job queue lock and never wait on
//! the worker.

mod buffer;
mod config;
mod error;
mod job;
mod planner;
mod worker;

pub use buffer::PathBuffer;
pub use config::PlannerConfig;
pub use error::{PlannerError, Result};
pub use planner::Planner;

pub use tilenav_core::{Grid, GridError, Point, WorldPoint};
pub use tilenav_paths::SearchCosts;
