use thiserror::Error;

use crate::grid::CellPos;

// ============================================================================
// Maze Errors
// ============================================================================

// Every variant points at a configuration or algorithm bug, never at a transient
// runtime condition. Callers log and abort instead of retrying.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MazeError {
    #[error("invalid maze dimensions {width}x{height}: both must be at least 1")]
    InvalidDimension { width: i32, height: i32 },

    #[error("invalid cell size {0}: must be a positive finite number")]
    InvalidCellSize(f32),

    #[error("cells {a} and {b} are not grid-adjacent")]
    NotAdjacent { a: CellPos, b: CellPos },

    #[error("cell {pos} is outside the {width}x{height} grid")]
    OutOfBounds { pos: CellPos, width: i32, height: i32 },

    #[error("no path from {from} to {to}")]
    NoPathFound { from: CellPos, to: CellPos },
}

pub type Result<T> = std::result::Result<T, MazeError>;
