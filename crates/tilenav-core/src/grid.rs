//! The [`Grid`] type: a tile occupancy mask with world-space metadata.
//!
//! A grid is sized once, then solid tiles are registered during level load.
//! After setup it is treated as read-only and may be shared freely between
//! threads. Every read query treats coordinates outside the grid as solid,
//! so callers may probe one step past an entity without bounds checks.

use crate::error::{GridError, Result};
use crate::geom::{Point, Range, WorldPoint};

/// Character marking a solid tile in [`Grid::from_ascii`] layouts.
pub const SOLID_TILE: char = '#';

/// A 2D occupancy mask: one byte per tile, solid or open.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    bounds: Range,
    width: usize,
    solid: Vec<bool>,
    /// Solid tiles in registration order. Mirrors `solid`.
    solids: Vec<Point>,
    tile_size: f32,
    origin_offset: WorldPoint,
}

impl Grid {
    /// Create an open grid of `width × height` tiles.
    ///
    /// `tile_size` is the side of a tile in world units. `origin_offset` is
    /// added when converting a tile coordinate to world space; half a tile
    /// places waypoints at tile centers.
    pub fn new(width: i32, height: i32, tile_size: f32, origin_offset: WorldPoint) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(GridError::InvalidSize { width, height });
        }
        if !tile_size.is_finite() || tile_size <= 0.0 {
            return Err(GridError::InvalidTileSize(tile_size));
        }
        let bounds = Range::new(0, 0, width, height);
        log::debug!("grid configured: {width}x{height} tiles of {tile_size} units");
        Ok(Self {
            bounds,
            width: width as usize,
            solid: vec![false; bounds.len()],
            solids: Vec::new(),
            tile_size,
            origin_offset,
        })
    }

    /// Build a grid from a text layout, one line per row.
    ///
    /// `#` is solid; `.` and space are open. Trailing newlines are ignored.
    pub fn from_ascii(text: &str, tile_size: f32, origin_offset: WorldPoint) -> Result<Self> {
        let rows: Vec<&str> = text.lines().collect();
        let width = rows.first().map_or(0, |r| r.chars().count());
        let mut grid = Self::new(width as i32, rows.len() as i32, tile_size, origin_offset)?;
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(GridError::RaggedRow {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                let pos = Point::new(x as i32, y as i32);
                match ch {
                    SOLID_TILE => {
                        grid.mark_solid(pos);
                    }
                    '.' | ' ' => {}
                    _ => return Err(GridError::UnknownTile { ch, pos }),
                }
            }
        }
        Ok(grid)
    }

    /// Flag `p` as impassable.
    ///
    /// Returns `false` if `p` is outside the grid or already solid; the
    /// solid list never holds duplicates.
    pub fn mark_solid(&mut self, p: Point) -> bool {
        let Some(i) = self.idx(p) else {
            log::debug!("ignoring solid tile {p} outside {}", self.bounds);
            return false;
        };
        if self.solid[i] {
            return false;
        }
        self.solid[i] = true;
        self.solids.push(p);
        true
    }

    /// Whether `p` is solid or outside the grid.
    #[inline]
    pub fn is_blocked(&self, p: Point) -> bool {
        self.idx(p).is_none_or(|i| self.solid[i])
    }

    /// Whether `p` lies outside the grid.
    #[inline]
    pub fn is_out_of_bounds(&self, p: Point) -> bool {
        !self.bounds.contains(p)
    }

    /// Solid tiles in the order they were registered.
    #[inline]
    pub fn solids(&self) -> &[Point] {
        &self.solids
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    #[inline]
    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    #[inline]
    pub fn origin_offset(&self) -> WorldPoint {
        self.origin_offset
    }

    /// World position of tile `p`: `p × tile_size + origin_offset`.
    #[inline]
    pub fn tile_to_world(&self, p: Point) -> WorldPoint {
        WorldPoint::new(
            p.x as f32 * self.tile_size + self.origin_offset.x,
            p.y as f32 * self.tile_size + self.origin_offset.y,
        )
    }

    /// The tile whose world position is nearest `w`.
    ///
    /// Inverse of [`tile_to_world`](Self::tile_to_world); the result may lie
    /// outside the grid. Coordinates beyond the `i32` range saturate, and a
    /// NaN coordinate maps to `i32::MIN`, so neither lands inside the grid.
    #[inline]
    pub fn world_to_tile(&self, w: WorldPoint) -> Point {
        let fx = (w.x - self.origin_offset.x) / self.tile_size + 0.5;
        let fy = (w.y - self.origin_offset.y) / self.tile_size + 0.5;
        Point::new(tile_axis(fx), tile_axis(fy))
    }

    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some(p.y as usize * self.width + p.x as usize)
    }
}

#[inline]
fn tile_axis(f: f32) -> i32 {
    if f.is_nan() { i32::MIN } else { f.floor() as i32 }
}
