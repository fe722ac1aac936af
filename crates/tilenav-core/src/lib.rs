//! **tilenav-core** — core types for tile-based navigation.
//!
//! This crate provides the foundational types used across the *tilenav*
//! crates: tile and world geometry primitives and the occupancy [`Grid`]
//! that path searches and line-of-sight queries read from.

pub mod error;
pub mod geom;
pub mod grid;

pub use error::GridError;
pub use geom::{Point, Range, WorldPoint};
pub use grid::Grid;
