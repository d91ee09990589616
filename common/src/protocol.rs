#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::{grid::CellPos, maze::MazeBuilder, path::PathSolver};

// ============================================================================
// Level Snapshot
// ============================================================================

// Read-only summary of one maze instance for the geometry builder and the path
// overlay. Rebuilt after every regeneration, never persisted.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct LevelSnapshot {
    pub level: u32,
    pub width: i32,
    pub height: i32,
    pub cell_size: f32,
    pub wall_height: f32,
    pub origin: [f32; 3],
    pub exit: [f32; 3],
    pub removed_walls: usize,
    pub path: Vec<CellPos>,
}

impl LevelSnapshot {
    #[must_use]
    pub fn capture(level: u32, builder: &MazeBuilder, solver: &PathSolver) -> Self {
        Self {
            level,
            width: builder.width(),
            height: builder.height(),
            cell_size: builder.cell_size(),
            wall_height: builder.wall_height(),
            origin: builder.origin().to_array(),
            exit: builder.exit_world_position().to_array(),
            removed_walls: builder.grid().removed_internal_walls(),
            path: solver.cells().to_vec(),
        }
    }

    #[cfg(feature = "json")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MazeConfig;

    #[test]
    fn snapshot_tracks_the_current_instance() {
        let config = MazeConfig {
            width: 4,
            height: 4,
            cell_size: 1.0,
            ..MazeConfig::default()
        };
        let mut builder = MazeBuilder::with_seed(config, 2).unwrap();
        let mut solver = PathSolver::new(config.cell_size);
        solver.reconfigure(builder.origin(), builder.grid()).unwrap();

        let first = LevelSnapshot::capture(0, &builder, &solver);
        assert_eq!(first.origin, [0.0, 0.0, 0.0]);
        assert_eq!(first.exit, [3.0, 0.0, 3.0]);
        assert_eq!(first.removed_walls, 15);
        assert_eq!(first.path.first(), Some(&CellPos::new(0, 0)));
        assert_eq!(first.path.last(), Some(&CellPos::new(3, 3)));

        builder.regenerate(&mut solver).unwrap();
        let second = LevelSnapshot::capture(1, &builder, &solver);
        assert_eq!(second.origin, first.exit);
        assert_eq!(second.path, solver.cells());
    }

    #[cfg(feature = "json")]
    #[test]
    fn snapshot_serializes_to_json() {
        let snapshot = LevelSnapshot {
            level: 2,
            width: 1,
            height: 1,
            cell_size: 4.0,
            wall_height: 4.0,
            origin: [0.0; 3],
            exit: [0.0; 3],
            removed_walls: 0,
            path: vec![CellPos::new(0, 0)],
        };
        let json = snapshot.to_json().unwrap();
        assert!(json.contains("\"level\":2"));
        assert!(json.contains("\"path\":[{\"x\":0,\"y\":0}]"));

        let back: LevelSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
