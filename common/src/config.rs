use bevy_math::Vec3;

use crate::{
    constants::*,
    error::{MazeError, Result},
};

// ============================================================================
// Maze Configuration
// ============================================================================

// Runtime maze settings. Defaults come from constants; the runner layers CLI flags on top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MazeConfig {
    pub width: i32,
    pub height: i32,
    pub cell_size: f32,
    pub wall_height: f32,
    pub enemy_count: usize,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: MAZE_WIDTH,
            height: MAZE_HEIGHT,
            cell_size: CELL_SIZE,
            wall_height: WALL_HEIGHT,
            enemy_count: ENEMY_COUNT,
        }
    }
}

impl MazeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(MazeError::InvalidDimension {
                width: self.width,
                height: self.height,
            });
        }
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(MazeError::InvalidCellSize(self.cell_size));
        }
        Ok(())
    }

    // World offset between two consecutive maze instances: the old exit cell becomes the new origin
    #[must_use]
    pub fn origin_step(&self) -> Vec3 {
        Vec3::new(
            (self.width - 1) as f32 * self.cell_size,
            0.0,
            (self.height - 1) as f32 * self.cell_size,
        )
    }
}
