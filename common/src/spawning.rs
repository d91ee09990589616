use bevy_math::Vec3;
use rand::Rng;

use crate::{
    constants::*,
    grid::{CellPos, Grid},
    maze::cell_center,
};

// ============================================================================
// Placement Rules
// ============================================================================

// True for cells within FORBIDDEN_ZONE_RADIUS (Chebyshev) of the entrance or the exit
#[must_use]
pub const fn in_forbidden_zone(pos: CellPos, width: i32, height: i32) -> bool {
    let entrance = CellPos::new(0, 0);
    let exit = CellPos::new(width - 1, height - 1);
    pos.chebyshev_distance(entrance) <= FORBIDDEN_ZONE_RADIUS || pos.chebyshev_distance(exit) <= FORBIDDEN_ZONE_RADIUS
}

// Pick up to `count` distinct enemy cells outside the forbidden zone
pub fn enemy_spawn_cells<R: Rng + ?Sized>(grid: &Grid, count: usize, rng: &mut R) -> Vec<CellPos> {
    let (width, height) = (grid.width(), grid.height());
    let mut cells: Vec<CellPos> = grid
        .positions()
        .filter(|pos| !in_forbidden_zone(*pos, width, height))
        .collect();

    // Shuffle randomly
    for i in (1..cells.len()).rev() {
        let j = rng.random_range(0..=i);
        cells.swap(i, j);
    }

    cells.truncate(count);
    cells
}

// ============================================================================
// World Positions
// ============================================================================

// The player starts above the entrance cell
#[must_use]
pub fn player_spawn_position(origin: Vec3) -> Vec3 {
    origin + Vec3::Y * PLAYER_SPAWN_HEIGHT
}

// The player faces away from the maze, towards the entrance opening
pub const PLAYER_SPAWN_FACING: Vec3 = Vec3::NEG_X;

#[must_use]
pub fn enemy_spawn_position(origin: Vec3, pos: CellPos, cell_size: f32) -> Vec3 {
    cell_center(origin, pos, cell_size) + Vec3::Y * ENEMY_SPAWN_HEIGHT
}

#[must_use]
pub fn exit_marker_position(origin: Vec3, grid: &Grid, cell_size: f32) -> Vec3 {
    cell_center(origin, grid.exit(), cell_size) + Vec3::Y * EXIT_MARKER_HEIGHT
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn forbidden_zone_is_two_three_by_three_blocks() {
        let grid = Grid::new(6, 5).unwrap();
        let forbidden: HashSet<CellPos> = grid
            .positions()
            .filter(|pos| in_forbidden_zone(*pos, 6, 5))
            .collect();

        assert_eq!(forbidden.len(), 8);
        assert!(forbidden.contains(&CellPos::new(1, 1)));
        assert!(forbidden.contains(&CellPos::new(4, 3)));
        assert!(!forbidden.contains(&CellPos::new(2, 2)));
    }

    #[test]
    fn enemies_avoid_forbidden_zone_and_never_share_cells() {
        let grid = Grid::new(10, 10).unwrap();
        let mut rng = StdRng::seed_from_u64(21);

        for _ in 0..32 {
            let cells = enemy_spawn_cells(&grid, 5, &mut rng);
            assert_eq!(cells.len(), 5);
            assert!(cells.iter().all(|pos| !in_forbidden_zone(*pos, 10, 10)));
            assert!(cells.iter().all(|pos| grid.contains(*pos)));
            assert_eq!(cells.iter().collect::<HashSet<_>>().len(), 5);
        }
    }

    #[test]
    fn enemy_count_is_capped_by_free_cells() {
        let grid = Grid::new(4, 4).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        // 16 cells minus two 2x2 corners
        assert_eq!(enemy_spawn_cells(&grid, 100, &mut rng).len(), 8);

        let tiny = Grid::new(2, 2).unwrap();
        assert!(enemy_spawn_cells(&tiny, 3, &mut rng).is_empty());
    }

    #[test]
    fn spawn_positions_follow_origin() {
        let origin = Vec3::new(36.0, 0.0, 36.0);
        assert_eq!(player_spawn_position(origin), Vec3::new(36.0, 2.0, 36.0));
        assert_eq!(
            enemy_spawn_position(origin, CellPos::new(2, 3), 4.0),
            Vec3::new(44.0, 1.0, 48.0)
        );

        let grid = Grid::new(10, 10).unwrap();
        assert_eq!(exit_marker_position(origin, &grid, 4.0), Vec3::new(72.0, 0.0, 72.0));
    }
}
