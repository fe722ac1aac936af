//! Grid construction errors.

use thiserror::Error;

use crate::geom::Point;

/// Errors produced while building a [`Grid`](crate::Grid).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GridError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidSize { width: i32, height: i32 },

    #[error("tile size must be finite and positive, got {0}")]
    InvalidTileSize(f32),

    #[error("level row {row} has {found} tiles, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown tile {ch:?} at {pos}")]
    UnknownTile { ch: char, pos: Point },
}

pub type Result<T> = std::result::Result<T, GridError>;
