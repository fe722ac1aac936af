//! A* path search for tile grids.
//!
//! [`Astar`] is a reusable search workspace: a node arena indexed by
//! position, with parent links stored as arena indices, and an open list
//! kept in insertion order. The open list is scanned linearly for the
//! lowest score, so ties resolve to the node opened first. Callers can
//! observe that ordering in the exact paths returned.
//!
//! Paths come back destination-first. A search toward an unreachable goal
//! never fails outright: it yields the path to the last node examined, with
//! [`SearchOutcome::reached`] set to `false`.
//!
//! # Trait hierarchy
//!
//! | Trait | Provides |
//! |---|---|
//! | [`Pather`] | neighbor enumeration |
//! | [`WeightedPather`] : [`Pather`] | step costs |
//! | [`AstarPather`] : [`WeightedPather`] | heuristic |
//!
//! [`GridPather`] implements all three over a [`tilenav_core::Grid`].

mod arena;
mod astar;
mod costs;
mod distance;
mod traits;

pub use arena::Astar;
pub use astar::SearchOutcome;
pub use costs::{GridPather, SearchCosts, waypoints};
pub use distance::{chebyshev, manhattan};
pub use traits::{AstarPather, Pather, WeightedPather};
