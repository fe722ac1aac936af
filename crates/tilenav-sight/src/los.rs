//! Line-of-sight queries against an occupancy grid.

use tilenav_core::{Grid, Point, WorldPoint};

use crate::ray::SupercoverRay;

/// First blocked tile on the supercover walk from tile `from` to tile `to`.
///
/// A segment that never leaves its tile crosses nothing and is never
/// blocked. Otherwise both end tiles are tested, and tiles outside the grid
/// count as solid.
pub fn first_blocked(grid: &Grid, from: Point, to: Point) -> Option<Point> {
    if from == to {
        return None;
    }
    SupercoverRay::new(from, to).find(|&p| grid.is_blocked(p))
}

/// First blocked tile between two world positions, if any.
pub fn raycast(grid: &Grid, a: WorldPoint, b: WorldPoint) -> Option<Point> {
    first_blocked(grid, grid.world_to_tile(a), grid.world_to_tile(b))
}

/// Whether a solid tile lies between two world positions.
///
/// This is the line-of-sight query: `true` means sight is blocked.
#[inline]
pub fn is_sight_blocked(grid: &Grid, a: WorldPoint, b: WorldPoint) -> bool {
    raycast(grid, a, b).is_some()
}

/// Whether `a` can see `b`: the negation of [`is_sight_blocked`].
#[inline]
pub fn is_visible(grid: &Grid, a: WorldPoint, b: WorldPoint) -> bool {
    !is_sight_blocked(grid, a, b)
}
