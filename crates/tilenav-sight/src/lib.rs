//! Line-of-sight for tile grids.
//!
//! A query converts both world positions to tiles and walks a
//! [`SupercoverRay`] between them, stopping at the first solid tile. Queries
//! only read the grid and never allocate, so they are cheap enough to run
//! every frame for every agent, from any thread holding a `&Grid`.

mod los;
mod ray;

pub use los::{first_blocked, is_sight_blocked, is_visible, raycast};
pub use ray::SupercoverRay;
