//! Breadth-first shortest path from the maze entrance to its exit.

use std::collections::VecDeque;

use bevy_ecs::prelude::*;
use bevy_math::Vec3;
use tracing::debug;

use crate::{
    constants::PATH_LINE_Y_OFFSET,
    error::{MazeError, Result},
    grid::{CellPos, Grid},
    maze::{MazeObserver, cell_center},
};

/// Shortest path in cell-edge count from `start` to `goal`, both ends included.
///
/// Neighbors are explored South, East, North, West, so ties always resolve the
/// same way for a given grid.
pub fn shortest_path(grid: &Grid, start: CellPos, goal: CellPos) -> Result<Vec<CellPos>> {
    for pos in [start, goal] {
        if !grid.contains(pos) {
            return Err(MazeError::OutOfBounds {
                pos,
                width: grid.width(),
                height: grid.height(),
            });
        }
    }

    let width = grid.width() as usize;
    let index = |pos: CellPos| pos.y as usize * width + pos.x as usize;

    let mut visited = vec![false; grid.cell_count()];
    let mut parent: Vec<Option<CellPos>> = vec![None; grid.cell_count()];
    let mut queue = VecDeque::new();

    visited[index(start)] = true;
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        if current == goal {
            break;
        }
        for next in grid.open_neighbors(current) {
            let i = index(next);
            if !visited[i] {
                visited[i] = true;
                parent[i] = Some(current);
                queue.push_back(next);
            }
        }
    }

    if !visited[index(goal)] {
        return Err(MazeError::NoPathFound { from: start, to: goal });
    }

    let mut path = vec![goal];
    let mut cursor = goal;
    while let Some(previous) = parent[index(cursor)] {
        path.push(previous);
        cursor = previous;
    }
    path.reverse();
    Ok(path)
}

/// Read-only consumer of the maze grid that keeps the entrance-to-exit guide
/// path in sync with the current maze instance.
#[derive(Resource, Debug, Clone)]
pub struct PathSolver {
    origin: Vec3,
    cell_size: f32,
    line_y_offset: f32,
    cells: Vec<CellPos>,
    world: Vec<Vec3>,
}

impl PathSolver {
    #[must_use]
    pub const fn new(cell_size: f32) -> Self {
        Self {
            origin: Vec3::ZERO,
            cell_size,
            line_y_offset: PATH_LINE_Y_OFFSET,
            cells: Vec::new(),
            world: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_line_offset(mut self, line_y_offset: f32) -> Self {
        self.line_y_offset = line_y_offset;
        self
    }

    /// Recomputes the path on `grid` at the current origin. A failed solve
    /// leaves the path empty rather than stale.
    pub fn solve(&mut self, grid: &Grid) -> Result<&[CellPos]> {
        self.cells.clear();
        self.world.clear();

        let cells = shortest_path(grid, grid.entrance(), grid.exit())?;
        self.world = cells
            .iter()
            .map(|pos| cell_center(self.origin, *pos, self.cell_size) + Vec3::Y * self.line_y_offset)
            .collect();
        self.cells = cells;

        debug!("solved path of {} cells at {:?}", self.cells.len(), self.origin);
        Ok(&self.cells)
    }

    /// Drops the previous path and solves again from scratch for the new instance.
    pub fn reconfigure(&mut self, new_origin: Vec3, new_grid: &Grid) -> Result<()> {
        self.origin = new_origin;
        self.solve(new_grid)?;
        Ok(())
    }

    /// Guide line points in world space, entrance first.
    #[must_use]
    pub fn current_path(&self) -> &[Vec3] {
        &self.world
    }

    #[must_use]
    pub fn cells(&self) -> &[CellPos] {
        &self.cells
    }

    #[must_use]
    pub const fn origin(&self) -> Vec3 {
        self.origin
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl MazeObserver for PathSolver {
    fn reconfigure(&mut self, origin: Vec3, grid: &Grid) -> Result<()> {
        Self::reconfigure(self, origin, grid)
    }
}
