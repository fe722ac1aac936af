use tilenav_core::{Grid, Point};

use crate::arena::{Astar, NO_PARENT, Node};
use crate::costs::{GridPather, SearchCosts};
use crate::traits::AstarPather;

/// Result of one A* search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Tile path from the terminal node back to the start (destination
    /// first). Never empty.
    pub path: Vec<Point>,
    /// Whether the terminal node is the requested goal. When `false` the
    /// path leads to the last node examined before the open list ran dry.
    pub reached: bool,
    /// Number of nodes expanded.
    pub expanded: usize,
}

impl SearchOutcome {
    fn single(p: Point, reached: bool) -> Self {
        Self {
            path: vec![p],
            reached,
            expanded: 0,
        }
    }
}

impl Astar {
    /// Compute a path from `from` to `to` using A*.
    ///
    /// The open list is scanned linearly for the lowest `g + h`, ties going
    /// to the node opened first. The goal is not required to be passable:
    /// when it cannot be reached the search runs until the open list is
    /// empty and the path leads to the last node examined instead.
    pub fn search<P: AstarPather>(&mut self, pather: &P, from: Point, to: Point) -> SearchOutcome {
        if from == to {
            return SearchOutcome::single(from, true);
        }
        let Some(start_slot) = self.idx(from) else {
            return SearchOutcome::single(from, false);
        };

        self.begin();
        let cur_gen = self.generation;
        let root = self.open_node(
            start_slot,
            Node {
                pos: from,
                g: 0,
                h: pather.estimate(from, to),
                parent: NO_PARENT,
            },
        );

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut last = root;
        let mut reached = false;
        let mut expanded = 0;

        while let Some(ci) = self.pop_lowest() {
            last = ci;
            let Node { pos: cp, g: cg, .. } = self.nodes[ci];
            if let Some(si) = self.idx(cp) {
                self.slots[si].closed = true;
            }
            if cp == to {
                reached = true;
                break;
            }
            expanded += 1;

            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(si) = self.idx(np) else {
                    continue;
                };
                let tentative_g = cg.saturating_add(pather.cost(cp, np));
                let slot = self.slots[si];
                if slot.generation == cur_gen {
                    if slot.closed {
                        continue;
                    }
                    // Already open: relax in place, keeping its list position.
                    let n = &mut self.nodes[slot.node];
                    if tentative_g < n.g {
                        n.g = tentative_g;
                        n.parent = ci;
                    }
                    continue;
                }
                self.open_node(
                    si,
                    Node {
                        pos: np,
                        g: tentative_g,
                        h: pather.estimate(np, to),
                        parent: ci,
                    },
                );
            }
        }

        self.nbuf = nbuf;

        let mut path = Vec::new();
        let mut ci = last;
        while ci != NO_PARENT {
            path.push(self.nodes[ci].pos);
            ci = self.nodes[ci].parent;
        }
        SearchOutcome {
            path,
            reached,
            expanded,
        }
    }

    /// Search `grid` with eight-way movement priced by `costs`.
    ///
    /// Re-targets the workspace to the grid's bounds first if they differ.
    pub fn search_grid(
        &mut self,
        grid: &Grid,
        costs: SearchCosts,
        from: Point,
        to: Point,
    ) -> SearchOutcome {
        if self.rng != grid.bounds() {
            self.set_range(grid.bounds());
        }
        self.search(&GridPather::new(grid, costs), from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{chebyshev, manhattan};
    use tilenav_core::WorldPoint;

    fn open_grid(w: i32, h: i32) -> Grid {
        Grid::new(w, h, 32.0, WorldPoint::new(16.0, 16.0)).unwrap()
    }

    fn search(grid: &Grid, from: Point, to: Point) -> SearchOutcome {
        Astar::new(grid.bounds()).search_grid(grid, SearchCosts::default(), from, to)
    }

    fn path_cost(path: &[Point]) -> i32 {
        path.windows(2)
            .map(|w| {
                let d = w[0] - w[1];
                if d.x != 0 && d.y != 0 { 14 } else { 10 }
            })
            .sum()
    }

    fn assert_connected(path: &[Point], grid: &Grid) {
        for w in path.windows(2) {
            assert_eq!(chebyshev(w[0], w[1]), 1, "gap between {} and {}", w[0], w[1]);
        }
        for &p in path {
            assert!(!grid.is_blocked(p), "path crosses solid tile {p}");
        }
    }

    #[test]
    fn start_equals_end() {
        let g = open_grid(5, 5);
        let out = search(&g, Point::new(2, 2), Point::new(2, 2));
        assert_eq!(out.path, vec![Point::new(2, 2)]);
        assert!(out.reached);
    }

    #[test]
    fn open_grid_diagonal() {
        let g = open_grid(10, 10);
        let from = Point::new(0, 0);
        let to = Point::new(9, 9);
        let out = search(&g, from, to);
        assert!(out.reached);
        assert_eq!(out.path.first(), Some(&to));
        assert_eq!(out.path.last(), Some(&from));
        assert_eq!(out.path.len(), 10);
        for w in out.path.windows(2) {
            assert!(manhattan(w[1], from) < manhattan(w[0], from));
        }
    }

    #[test]
    fn open_grid_endpoints_for_many_pairs() {
        let g = open_grid(7, 5);
        let pairs = [
            (Point::new(0, 0), Point::new(6, 4)),
            (Point::new(6, 0), Point::new(0, 4)),
            (Point::new(3, 2), Point::new(3, 0)),
            (Point::new(1, 4), Point::new(5, 3)),
        ];
        for (from, to) in pairs {
            let out = search(&g, from, to);
            assert!(out.reached);
            assert_eq!(out.path[0], to);
            assert_eq!(*out.path.last().unwrap(), from);
            assert_eq!(out.path.len() as i32, chebyshev(from, to) + 1);
            assert_connected(&out.path, &g);
        }
    }

    #[test]
    fn diagonal_shortcut_beats_cardinal_detour() {
        let g = open_grid(4, 4);
        let out = search(&g, Point::new(0, 0), Point::new(3, 3));
        // Three diagonal steps (42) instead of six cardinal ones (60).
        assert_eq!(out.path.len(), 4);
        assert_eq!(path_cost(&out.path), 42);

        let out = search(&g, Point::new(0, 0), Point::new(3, 1));
        // One diagonal and two cardinal steps; a diagonal is dearer than a
        // single cardinal step, so no zig-zag appears.
        assert_eq!(path_cost(&out.path), 34);
        assert_eq!(out.path.len(), 4);
    }

    #[test]
    fn routes_through_gap_in_wall() {
        let mut g = open_grid(10, 10);
        for x in 0..10 {
            if x != 3 {
                g.mark_solid(Point::new(x, 5));
            }
        }
        let out = search(&g, Point::new(0, 0), Point::new(9, 9));
        assert!(out.reached);
        assert!(out.path.contains(&Point::new(3, 5)));
        assert_connected(&out.path, &g);
    }

    #[test]
    fn enclosed_goal_returns_best_effort_path() {
        let mut g = open_grid(9, 9);
        let goal = Point::new(6, 6);
        for n in goal.neighbors_8() {
            g.mark_solid(n);
        }
        let from = Point::new(0, 0);
        let out = search(&g, from, goal);
        assert!(!out.reached);
        assert!(!out.path.is_empty());
        assert_eq!(*out.path.last().unwrap(), from);
        assert!(!out.path.contains(&goal));
        assert_connected(&out.path, &g);
        // Every open tile outside the ring got expanded.
        assert_eq!(out.expanded, 81 - 9);
    }

    #[test]
    fn walled_in_start_returns_single_point() {
        let mut g = open_grid(5, 5);
        let from = Point::new(2, 2);
        for n in from.neighbors_8() {
            g.mark_solid(n);
        }
        let out = search(&g, from, Point::new(0, 0));
        assert!(!out.reached);
        assert_eq!(out.path, vec![from]);
    }

    #[test]
    fn solid_goal_is_not_entered() {
        let mut g = open_grid(6, 1);
        g.mark_solid(Point::new(5, 0));
        let out = search(&g, Point::new(0, 0), Point::new(5, 0));
        assert!(!out.reached);
        assert!(!out.path.contains(&Point::new(5, 0)));
    }

    #[test]
    fn start_outside_grid() {
        let g = open_grid(3, 3);
        let out = search(&g, Point::new(-4, 1), Point::new(1, 1));
        assert!(!out.reached);
        assert_eq!(out.path, vec![Point::new(-4, 1)]);
    }

    #[test]
    fn goal_at_coordinate_limits_gives_best_effort_path() {
        let g = open_grid(5, 5);
        let from = Point::new(2, 2);
        for to in [Point::new(i32::MAX, i32::MAX), Point::new(i32::MIN, i32::MIN)] {
            let out = search(&g, from, to);
            assert!(!out.reached);
            assert_eq!(*out.path.last().unwrap(), from);
            assert_connected(&out.path, &g);
            assert_eq!(out.expanded, 25);
        }
    }

    #[test]
    fn workspace_is_reusable_across_searches_and_grids() {
        let small = open_grid(4, 4);
        let mut large = open_grid(12, 3);
        large.mark_solid(Point::new(6, 1));
        let mut astar = Astar::new(small.bounds());
        for _ in 0..3 {
            let a = astar.search_grid(&small, SearchCosts::default(), Point::new(0, 0), Point::new(3, 0));
            assert_eq!(a.path.len(), 4);
            let b = astar.search_grid(&large, SearchCosts::default(), Point::new(0, 1), Point::new(11, 1));
            assert!(b.reached);
            assert_connected(&b.path, &large);
        }
        assert_eq!(astar.range(), large.bounds());
    }

    #[test]
    fn shortest_around_obstacle() {
        let g = Grid::from_ascii(
            "\
.....
.###.
.....",
            1.0,
            WorldPoint::ZERO,
        )
        .unwrap();
        let out = search(&g, Point::new(0, 1), Point::new(4, 1));
        assert!(out.reached);
        // Diagonal off the wall end, two cardinal steps along it, diagonal
        // back: 14 + 10 + 10 + 14.
        assert_eq!(path_cost(&out.path), 48);
        assert_connected(&out.path, &g);
    }
}
