use tilenav_core::{Grid, Point, WorldPoint};

use crate::distance::manhattan;
use crate::traits::{AstarPather, Pather, WeightedPather};

/// Integer step costs for eight-way grid movement.
///
/// The defaults approximate Euclidean distance scaled by ten: a diagonal
/// step costs 14, just under `10 × √2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchCosts {
    pub cardinal: i32,
    pub diagonal: i32,
    /// Multiplier applied to the Manhattan tile distance used as `H`.
    pub heuristic_scale: i32,
}

impl SearchCosts {
    pub const CARDINAL: i32 = 10;
    pub const DIAGONAL: i32 = 14;

    /// Whether a diagonal step is cheaper than two cardinal steps but
    /// dearer than one, and every cost is positive.
    pub fn is_valid(&self) -> bool {
        self.cardinal > 0
            && self.heuristic_scale >= 0
            && self.cardinal < self.diagonal
            && self.diagonal < 2 * self.cardinal
    }
}

impl Default for SearchCosts {
    fn default() -> Self {
        Self {
            cardinal: Self::CARDINAL,
            diagonal: Self::DIAGONAL,
            heuristic_scale: 1,
        }
    }
}

/// [`AstarPather`] over an occupancy [`Grid`].
///
/// Neighbors are the eight surrounding tiles that are neither solid nor
/// outside the grid.
#[derive(Debug, Clone, Copy)]
pub struct GridPather<'a> {
    grid: &'a Grid,
    costs: SearchCosts,
}

impl<'a> GridPather<'a> {
    pub fn new(grid: &'a Grid, costs: SearchCosts) -> Self {
        Self { grid, costs }
    }

    #[inline]
    pub fn grid(&self) -> &'a Grid {
        self.grid
    }
}

impl Pather for GridPather<'_> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        buf.extend(p.neighbors_8().into_iter().filter(|&n| !self.grid.is_blocked(n)));
    }
}

impl WeightedPather for GridPather<'_> {
    fn cost(&self, from: Point, to: Point) -> i32 {
        if from.x == to.x || from.y == to.y {
            self.costs.cardinal
        } else {
            self.costs.diagonal
        }
    }
}

impl AstarPather for GridPather<'_> {
    fn estimate(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to).saturating_mul(self.costs.heuristic_scale)
    }
}

/// Convert a tile path to world-space waypoints at tile centers, keeping
/// its order.
pub fn waypoints(grid: &Grid, path: &[Point]) -> Vec<WorldPoint> {
    path.iter().map(|&p| grid.tile_to_world(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        let mut g = Grid::new(3, 3, 1.0, WorldPoint::ZERO).unwrap();
        g.mark_solid(Point::new(1, 0));
        g
    }

    #[test]
    fn default_costs_are_valid() {
        let c = SearchCosts::default();
        assert!(c.is_valid());
        assert!(c.diagonal > c.cardinal && c.diagonal < 2 * c.cardinal);
        let flat = SearchCosts {
            diagonal: 20,
            ..c
        };
        assert!(!flat.is_valid());
    }

    #[test]
    fn neighbors_skip_blocked_tiles() {
        let g = grid();
        let pather = GridPather::new(&g, SearchCosts::default());
        let mut buf = Vec::new();
        pather.neighbors(Point::new(0, 0), &mut buf);
        assert_eq!(buf, vec![Point::new(1, 1), Point::new(0, 1)]);
    }

    #[test]
    fn step_costs() {
        let g = grid();
        let pather = GridPather::new(&g, SearchCosts::default());
        assert_eq!(pather.cost(Point::new(1, 1), Point::new(2, 1)), 10);
        assert_eq!(pather.cost(Point::new(1, 1), Point::new(1, 2)), 10);
        assert_eq!(pather.cost(Point::new(1, 1), Point::new(2, 2)), 14);
        assert_eq!(pather.estimate(Point::new(0, 0), Point::new(2, 1)), 3);
    }

    #[test]
    fn waypoints_follow_tile_centers() {
        let g = Grid::new(4, 4, 32.0, WorldPoint::new(16.0, 16.0)).unwrap();
        let w = waypoints(&g, &[Point::new(1, 0), Point::new(0, 0)]);
        assert_eq!(w, vec![WorldPoint::new(48.0, 16.0), WorldPoint::new(16.0, 16.0)]);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn costs_fill_missing_fields_with_defaults() {
        let c: SearchCosts = serde_json::from_str(r#"{"diagonal": 15}"#).unwrap();
        assert_eq!(c.cardinal, SearchCosts::CARDINAL);
        assert_eq!(c.diagonal, 15);
        assert_eq!(c.heuristic_scale, 1);
    }
}
