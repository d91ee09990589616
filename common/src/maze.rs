//! Perfect-maze generation and in-place reconfiguration.
//!
//! Mazes are carved with a randomized depth-first backtracker, so the open walls
//! always form a spanning tree over the grid: every cell is reachable from every
//! other cell through exactly one simple path. The [`MazeBuilder`] resource owns
//! the current grid and its world origin, and rebuilds both when a level is
//! completed.

use bevy_ecs::prelude::*;
use bevy_math::Vec3;
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::debug;

use crate::{
    config::MazeConfig,
    error::Result,
    grid::{CellPos, Direction, Grid},
    spawning::in_forbidden_zone,
};

/// Order in which unvisited neighbors are offered to the [`CarvePicker`].
pub const CARVE_ORDER: [Direction; 4] = [Direction::North, Direction::South, Direction::East, Direction::West];

/// Outward wall removed from the entrance cell `(0, 0)`.
pub const ENTRANCE_OPENING: Direction = Direction::West;

/// Outward wall removed from the exit cell `(width - 1, height - 1)`.
pub const EXIT_OPENING: Direction = Direction::North;

// ============================================================================
// Randomness Seam
// ============================================================================

/// Chooses which unvisited neighbor the backtracker carves into next.
///
/// Every [`rand::Rng`] is a picker. Tests plug in scripted pickers to force a
/// known spanning tree.
pub trait CarvePicker {
    /// Returns an index in `0..options`. `options` is never zero.
    fn pick(&mut self, options: usize) -> usize;
}

impl<R: Rng + ?Sized> CarvePicker for R {
    fn pick(&mut self, options: usize) -> usize {
        self.random_range(0..options)
    }
}

// ============================================================================
// Generation
// ============================================================================

/// Carves a fresh perfect maze and opens the entrance and exit walls.
pub fn carve_maze<P: CarvePicker + ?Sized>(width: i32, height: i32, picker: &mut P) -> Result<Grid> {
    let mut grid = Grid::new(width, height)?;
    let total = grid.cell_count();

    let mut current = grid.entrance();
    grid.mark_visited(current)?;
    let mut visited = 1;
    let mut stack = Vec::with_capacity(total);
    let mut candidates = Vec::with_capacity(CARVE_ORDER.len());

    while visited < total {
        candidates.clear();
        candidates.extend(
            CARVE_ORDER
                .into_iter()
                .map(|dir| current.step(dir))
                .filter(|next| grid.contains(*next) && !grid.is_visited(*next)),
        );

        if candidates.is_empty() {
            // A rectangular grid is fully connected, so the stack only runs dry once every cell is visited
            let Some(previous) = stack.pop() else {
                unreachable!("backtracker stalled with {visited} of {total} cells visited");
            };
            current = previous;
            continue;
        }

        let chosen = candidates[picker.pick(candidates.len()) % candidates.len()];
        grid.remove_wall_between(current, chosen)?;
        stack.push(current);
        current = chosen;
        grid.mark_visited(current)?;
        visited += 1;
    }

    grid.clear_visited();
    grid.open_boundary(grid.entrance(), ENTRANCE_OPENING)?;
    grid.open_boundary(grid.exit(), EXIT_OPENING)?;
    Ok(grid)
}

/// World position of a cell center for a maze instance placed at `origin`.
#[must_use]
pub fn cell_center(origin: Vec3, pos: CellPos, cell_size: f32) -> Vec3 {
    origin + Vec3::new(pos.x as f32 * cell_size, 0.0, pos.y as f32 * cell_size)
}

// ============================================================================
// Reconfiguration Notifications
// ============================================================================

/// Receives the new `(origin, grid)` snapshot after every regeneration.
///
/// The grid is only borrowed for the duration of the call.
pub trait MazeObserver {
    fn reconfigure(&mut self, origin: Vec3, grid: &Grid) -> Result<()>;
}

/// Summary of one regeneration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rebuild {
    /// Regenerations since the last reset, including this one.
    pub regeneration: u32,
    pub origin: Vec3,
    pub removed_walls: usize,
}

// ============================================================================
// Maze Builder
// ============================================================================

/// Owns the current maze grid and the world origin of the current instance.
#[derive(Resource)]
pub struct MazeBuilder {
    config: MazeConfig,
    grid: Grid,
    origin: Vec3,
    regenerations: u32,
    rng: StdRng,
}

impl MazeBuilder {
    /// Builds the first maze at the zero origin with an OS-seeded random source.
    pub fn new(config: MazeConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Same as [`MazeBuilder::new`] but reproducible.
    pub fn with_seed(config: MazeConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: MazeConfig, mut rng: StdRng) -> Result<Self> {
        config.validate()?;
        let grid = carve_maze(config.width, config.height, &mut rng)?;
        debug!(
            "generated {}x{} maze with {} open walls",
            config.width,
            config.height,
            grid.removed_internal_walls()
        );

        Ok(Self {
            config,
            grid,
            origin: Vec3::ZERO,
            regenerations: 0,
            rng,
        })
    }

    /// Moves the maze forward so the old exit becomes the new origin, carves a
    /// brand-new layout there and hands it to `observer`.
    ///
    /// The observer sees the committed state. Its error is returned as is.
    pub fn regenerate<O: MazeObserver + ?Sized>(&mut self, observer: &mut O) -> Result<Rebuild> {
        let grid = carve_maze(self.config.width, self.config.height, &mut self.rng)?;
        self.grid = grid;
        self.origin += self.config.origin_step();
        self.regenerations += 1;

        let rebuild = Rebuild {
            regeneration: self.regenerations,
            origin: self.origin,
            removed_walls: self.grid.removed_internal_walls(),
        };
        debug!(
            "regenerated maze #{} at {:?} with {} open walls",
            rebuild.regeneration, rebuild.origin, rebuild.removed_walls
        );

        observer.reconfigure(self.origin, &self.grid)?;
        Ok(rebuild)
    }

    /// Explicit level reset: back to the zero origin with a fresh layout.
    pub fn reset(&mut self) -> Result<()> {
        self.grid = carve_maze(self.config.width, self.config.height, &mut self.rng)?;
        self.origin = Vec3::ZERO;
        self.regenerations = 0;
        debug!("maze reset to origin");
        Ok(())
    }

    #[must_use]
    pub const fn config(&self) -> &MazeConfig {
        &self.config
    }

    #[must_use]
    pub const fn width(&self) -> i32 {
        self.config.width
    }

    #[must_use]
    pub const fn height(&self) -> i32 {
        self.config.height
    }

    #[must_use]
    pub const fn cell_size(&self) -> f32 {
        self.config.cell_size
    }

    #[must_use]
    pub const fn wall_height(&self) -> f32 {
        self.config.wall_height
    }

    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub const fn origin(&self) -> Vec3 {
        self.origin
    }

    #[must_use]
    pub const fn regenerations(&self) -> u32 {
        self.regenerations
    }

    #[must_use]
    pub fn cell_world_position(&self, pos: CellPos) -> Vec3 {
        cell_center(self.origin, pos, self.config.cell_size)
    }

    #[must_use]
    pub fn entrance_world_position(&self) -> Vec3 {
        self.cell_world_position(self.grid.entrance())
    }

    /// Where the level-exit trigger should sit. Equals the next origin.
    #[must_use]
    pub fn exit_world_position(&self) -> Vec3 {
        self.cell_world_position(self.grid.exit())
    }

    /// True for cells next to the entrance or exit, which stay free of enemies.
    #[must_use]
    pub const fn is_forbidden(&self, pos: CellPos) -> bool {
        in_forbidden_zone(pos, self.config.width, self.config.height)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::error::MazeError;

    // Replays a fixed list of choices, then always takes the first option
    struct ScriptedPicks(std::vec::IntoIter<usize>);

    impl ScriptedPicks {
        fn new(picks: &[usize]) -> Self {
            Self(picks.to_vec().into_iter())
        }
    }

    impl CarvePicker for ScriptedPicks {
        fn pick(&mut self, _options: usize) -> usize {
            self.0.next().unwrap_or(0)
        }
    }

    #[derive(Default)]
    struct Recorder {
        seen: Vec<(Vec3, Grid)>,
    }

    impl MazeObserver for Recorder {
        fn reconfigure(&mut self, origin: Vec3, grid: &Grid) -> Result<()> {
            self.seen.push((origin, grid.clone()));
            Ok(())
        }
    }

    fn config(width: i32, height: i32) -> MazeConfig {
        MazeConfig {
            width,
            height,
            cell_size: 2.0,
            ..MazeConfig::default()
        }
    }

    // Open internal edges as (cell, east-or-north neighbor) pairs
    fn open_edges(grid: &Grid) -> HashSet<(CellPos, CellPos)> {
        grid.positions()
            .flat_map(|pos| {
                [Direction::East, Direction::North]
                    .into_iter()
                    .filter(move |dir| grid.contains(pos.step(*dir)) && !grid.has_wall(pos, *dir))
                    .map(move |dir| (pos, pos.step(dir)))
            })
            .collect()
    }

    fn edge(ax: i32, ay: i32, bx: i32, by: i32) -> (CellPos, CellPos) {
        (CellPos::new(ax, ay), CellPos::new(bx, by))
    }

    fn assert_perfect(grid: &Grid) {
        assert_eq!(grid.removed_internal_walls(), grid.cell_count() - 1);
        assert!(grid.all_cells_reachable());
    }

    fn assert_only_designated_openings(grid: &Grid) {
        for pos in grid.positions() {
            for dir in Direction::ALL {
                if grid.contains(pos.step(dir)) {
                    continue;
                }
                let opening = (pos == grid.entrance() && dir == ENTRANCE_OPENING)
                    || (pos == grid.exit() && dir == EXIT_OPENING);
                assert_eq!(grid.has_wall(pos, dir), !opening, "boundary wall {dir:?} of {pos}");
            }
        }
    }

    #[test]
    fn carved_mazes_are_spanning_trees() {
        let mut rng = StdRng::seed_from_u64(7);
        for width in 1..=7 {
            for height in 1..=7 {
                let grid = carve_maze(width, height, &mut rng).unwrap();
                assert_perfect(&grid);
                assert_only_designated_openings(&grid);
                assert!(grid.positions().all(|pos| !grid.cell(pos).unwrap().is_visited()));
            }
        }
    }

    #[test]
    fn single_cell_maze_has_both_openings() {
        let grid = carve_maze(1, 1, &mut ScriptedPicks::new(&[])).unwrap();
        let cell = grid.cell(CellPos::new(0, 0)).unwrap();

        assert_eq!(grid.removed_internal_walls(), 0);
        assert!(!cell.has_wall(Direction::West));
        assert!(!cell.has_wall(Direction::North));
        assert!(cell.has_wall(Direction::South));
        assert!(cell.has_wall(Direction::East));
        assert_eq!(grid.to_string(), "# #\n  #\n###");
    }

    #[test]
    fn rejects_empty_mazes() {
        assert_eq!(
            carve_maze(0, 3, &mut ScriptedPicks::new(&[])).err(),
            Some(MazeError::InvalidDimension { width: 0, height: 3 })
        );
        assert!(matches!(
            MazeBuilder::with_seed(config(4, 0), 1),
            Err(MazeError::InvalidDimension { .. })
        ));
        assert!(matches!(
            MazeBuilder::with_seed(MazeConfig { cell_size: 0.0, ..config(4, 4) }, 1),
            Err(MazeError::InvalidCellSize(_))
        ));
    }

    #[test]
    fn first_choice_carves_column_serpentine() {
        let grid = carve_maze(5, 5, &mut ScriptedPicks::new(&[])).unwrap();

        let mut expected = HashSet::new();
        for x in 0..5 {
            for y in 0..4 {
                expected.insert(edge(x, y, x, y + 1));
            }
        }
        expected.insert(edge(0, 4, 1, 4));
        expected.insert(edge(1, 0, 2, 0));
        expected.insert(edge(2, 4, 3, 4));
        expected.insert(edge(3, 0, 4, 0));

        assert_eq!(open_edges(&grid), expected);
        assert_perfect(&grid);
    }

    #[test]
    fn scripted_choices_backtrack() {
        // Dead end at (2, 0) forces a backtrack to (1, 2) before (0, 2) and (0, 1) get carved
        let grid = carve_maze(3, 3, &mut ScriptedPicks::new(&[1])).unwrap();

        let expected: HashSet<_> = [
            edge(0, 0, 1, 0),
            edge(1, 0, 1, 1),
            edge(1, 1, 1, 2),
            edge(1, 2, 2, 2),
            edge(2, 1, 2, 2),
            edge(2, 0, 2, 1),
            edge(0, 2, 1, 2),
            edge(0, 1, 0, 2),
        ]
        .into_iter()
        .collect();

        assert_eq!(open_edges(&grid), expected);
        assert_perfect(&grid);
    }

    #[test]
    fn same_seed_same_maze() {
        let a = MazeBuilder::with_seed(config(8, 6), 42).unwrap();
        let b = MazeBuilder::with_seed(config(8, 6), 42).unwrap();
        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.origin(), Vec3::ZERO);
        assert_eq!(a.regenerations(), 0);
    }

    #[test]
    fn regeneration_keeps_maze_perfect_and_advances_origin() {
        let mut builder = MazeBuilder::with_seed(config(4, 3), 99).unwrap();
        let mut recorder = Recorder::default();
        let step = Vec3::new(6.0, 0.0, 4.0);

        for k in 1..=6 {
            let rebuild = builder.regenerate(&mut recorder).unwrap();

            assert_eq!(rebuild.regeneration, k);
            assert_eq!(rebuild.origin, step * k as f32);
            assert_eq!(rebuild.removed_walls, 11);
            assert_eq!(builder.origin(), step * k as f32);
            assert_perfect(builder.grid());
            assert_only_designated_openings(builder.grid());

            let (origin, grid) = recorder.seen.last().unwrap();
            assert_eq!(*origin, builder.origin());
            assert_eq!(grid, builder.grid());
        }
        assert_eq!(recorder.seen.len(), 6);
    }

    #[test]
    fn exit_becomes_next_entrance() {
        let mut builder = MazeBuilder::with_seed(config(5, 7), 3).unwrap();
        let exit = builder.exit_world_position();
        assert_eq!(exit, Vec3::new(8.0, 0.0, 12.0));

        builder.regenerate(&mut Recorder::default()).unwrap();
        assert_eq!(builder.entrance_world_position(), exit);
        assert_eq!(builder.exit_world_position(), exit * 2.0);
    }

    #[test]
    fn reset_returns_to_origin() {
        let mut builder = MazeBuilder::with_seed(config(3, 3), 5).unwrap();
        let mut recorder = Recorder::default();
        builder.regenerate(&mut recorder).unwrap();
        builder.regenerate(&mut recorder).unwrap();
        assert_eq!(builder.origin(), Vec3::new(8.0, 0.0, 8.0));

        builder.reset().unwrap();
        assert_eq!(builder.origin(), Vec3::ZERO);
        assert_eq!(builder.regenerations(), 0);
        assert_perfect(builder.grid());
    }

    #[test]
    fn observer_errors_propagate() {
        struct Failing;
        impl MazeObserver for Failing {
            fn reconfigure(&mut self, _origin: Vec3, grid: &Grid) -> Result<()> {
                Err(MazeError::NoPathFound {
                    from: grid.entrance(),
                    to: grid.exit(),
                })
            }
        }

        let mut builder = MazeBuilder::with_seed(config(2, 2), 11).unwrap();
        assert!(matches!(
            builder.regenerate(&mut Failing),
            Err(MazeError::NoPathFound { .. })
        ));
    }

    #[test]
    fn forbidden_zone_surrounds_entrance_and_exit() {
        let builder = MazeBuilder::with_seed(config(6, 6), 8).unwrap();
        assert!(builder.is_forbidden(CellPos::new(0, 0)));
        assert!(builder.is_forbidden(CellPos::new(1, 1)));
        assert!(builder.is_forbidden(CellPos::new(4, 5)));
        assert!(!builder.is_forbidden(CellPos::new(2, 0)));
        assert!(!builder.is_forbidden(CellPos::new(3, 3)));
    }
}
