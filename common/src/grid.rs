use std::fmt;

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::error::{MazeError, Result};

// ============================================================================
// Cell Coordinates
// ============================================================================

// Grid coordinates. x runs along world X, y along world Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct CellPos {
    pub x: i32,
    pub y: i32,
}

impl CellPos {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.offset();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    // Direction leading from self to other, if the two cells are grid-adjacent
    #[must_use]
    pub fn direction_to(self, other: Self) -> Option<Direction> {
        Direction::ALL.into_iter().find(|dir| self.step(*dir) == other)
    }

    #[must_use]
    pub const fn chebyshev_distance(self, other: Self) -> i32 {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        if dx > dy { dx } else { dy }
    }
}

impl fmt::Display for CellPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ============================================================================
// Directions
// ============================================================================

// Discriminants double as wall indices: bottom, right, top, left.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub enum Direction {
    South = 0,
    East = 1,
    North = 2,
    West = 3,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::South, Self::East, Self::North, Self::West];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::South => Self::North,
            Self::East => Self::West,
            Self::North => Self::South,
            Self::West => Self::East,
        }
    }

    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::South => (0, -1),
            Self::East => (1, 0),
            Self::North => (0, 1),
            Self::West => (-1, 0),
        }
    }
}

// ============================================================================
// Cell
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    walls: [bool; 4],
    visited: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            walls: [true; 4],
            visited: false,
        }
    }
}

impl Cell {
    #[must_use]
    pub const fn has_wall(&self, dir: Direction) -> bool {
        self.walls[dir.index()]
    }

    // Only meaningful while a generation pass is running
    #[must_use]
    pub const fn is_visited(&self) -> bool {
        self.visited
    }

    #[must_use]
    pub fn wall_count(&self) -> usize {
        self.walls.iter().filter(|wall| **wall).count()
    }
}

// ============================================================================
// Grid
// ============================================================================

// Fixed-shape cell container, row-major. Internal walls are always symmetric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(MazeError::InvalidDimension { width, height });
        }

        Ok(Self {
            width,
            height,
            cells: vec![Cell::default(); (width * height) as usize],
        })
    }

    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    #[must_use]
    pub const fn cell_count(&self) -> usize {
        (self.width * self.height) as usize
    }

    #[must_use]
    pub const fn entrance(&self) -> CellPos {
        CellPos::new(0, 0)
    }

    #[must_use]
    pub const fn exit(&self) -> CellPos {
        CellPos::new(self.width - 1, self.height - 1)
    }

    #[must_use]
    pub const fn contains(&self, pos: CellPos) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    const fn index(&self, pos: CellPos) -> Option<usize> {
        if self.contains(pos) {
            Some((pos.y * self.width + pos.x) as usize)
        } else {
            None
        }
    }

    const fn out_of_bounds(&self, pos: CellPos) -> MazeError {
        MazeError::OutOfBounds {
            pos,
            width: self.width,
            height: self.height,
        }
    }

    #[must_use]
    pub fn cell(&self, pos: CellPos) -> Option<&Cell> {
        self.index(pos).map(|i| &self.cells[i])
    }

    fn cell_mut(&mut self, pos: CellPos) -> Result<&mut Cell> {
        match self.index(pos) {
            Some(i) => Ok(&mut self.cells[i]),
            None => Err(self.out_of_bounds(pos)),
        }
    }

    // Out-of-bounds cells count as solid
    #[must_use]
    pub fn has_wall(&self, pos: CellPos, dir: Direction) -> bool {
        self.cell(pos).is_none_or(|cell| cell.has_wall(dir))
    }

    // Iterate all positions, row by row starting at y = 0
    pub fn positions(&self) -> impl Iterator<Item = CellPos> + use<> {
        let width = self.width;
        (0..self.height).flat_map(move |y| (0..width).map(move |x| CellPos::new(x, y)))
    }

    pub fn remove_wall_between(&mut self, a: CellPos, b: CellPos) -> Result<()> {
        if !self.contains(a) {
            return Err(self.out_of_bounds(a));
        }
        if !self.contains(b) {
            return Err(self.out_of_bounds(b));
        }
        let Some(dir) = a.direction_to(b) else {
            return Err(MazeError::NotAdjacent { a, b });
        };

        self.cell_mut(a)?.walls[dir.index()] = false;
        self.cell_mut(b)?.walls[dir.opposite().index()] = false;
        Ok(())
    }

    // Clear an outward-facing wall on the grid boundary (entrance and exit openings).
    // Internal walls must go through remove_wall_between to stay symmetric.
    pub fn open_boundary(&mut self, pos: CellPos, dir: Direction) -> Result<()> {
        let beyond = pos.step(dir);
        if self.contains(beyond) {
            return Err(MazeError::NotAdjacent { a: pos, b: beyond });
        }
        self.cell_mut(pos)?.walls[dir.index()] = false;
        Ok(())
    }

    // In-bounds neighbors in Direction::ALL order, regardless of walls
    #[must_use]
    pub fn neighbors4(&self, pos: CellPos) -> Vec<CellPos> {
        Direction::ALL
            .into_iter()
            .map(|dir| pos.step(dir))
            .filter(|next| self.contains(*next))
            .collect()
    }

    // In-bounds neighbors reachable through an open wall, in Direction::ALL order
    #[must_use]
    pub fn open_neighbors(&self, pos: CellPos) -> Vec<CellPos> {
        let Some(cell) = self.cell(pos) else {
            return Vec::new();
        };
        Direction::ALL
            .into_iter()
            .filter(|dir| !cell.has_wall(*dir))
            .map(|dir| pos.step(dir))
            .filter(|next| self.contains(*next))
            .collect()
    }

    // Number of open walls between two in-bounds cells. Boundary openings don't count.
    #[must_use]
    pub fn removed_internal_walls(&self) -> usize {
        self.positions()
            .map(|pos| {
                [Direction::East, Direction::North]
                    .into_iter()
                    .filter(|dir| self.contains(pos.step(*dir)) && !self.has_wall(pos, *dir))
                    .count()
            })
            .sum()
    }

    // Flood fill from the entrance through open walls
    #[must_use]
    pub fn all_cells_reachable(&self) -> bool {
        let mut seen = vec![false; self.cell_count()];
        let mut stack = vec![self.entrance()];
        let mut reached = 0;

        while let Some(pos) = stack.pop() {
            let Some(i) = self.index(pos) else {
                continue;
            };
            if seen[i] {
                continue;
            }
            seen[i] = true;
            reached += 1;
            stack.extend(self.open_neighbors(pos));
        }

        reached == self.cell_count()
    }

    pub(crate) fn mark_visited(&mut self, pos: CellPos) -> Result<()> {
        self.cell_mut(pos)?.visited = true;
        Ok(())
    }

    pub(crate) fn is_visited(&self, pos: CellPos) -> bool {
        self.cell(pos).is_some_and(Cell::is_visited)
    }

    pub(crate) fn clear_visited(&mut self) {
        for cell in &mut self.cells {
            cell.visited = false;
        }
    }
}

// ASCII layout, north at the top: '#' is a wall, ' ' is open
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let wall = |solid: bool| if solid { '#' } else { ' ' };

        for y in (0..self.height).rev() {
            let mut top = String::from("#");
            let mut middle = String::new();
            for x in 0..self.width {
                let pos = CellPos::new(x, y);
                top.push(wall(self.has_wall(pos, Direction::North)));
                top.push('#');
                middle.push(wall(self.has_wall(pos, Direction::West)));
                middle.push(' ');
            }
            middle.push(wall(self.has_wall(CellPos::new(self.width - 1, y), Direction::East)));
            writeln!(f, "{top}")?;
            writeln!(f, "{middle}")?;
        }

        let mut bottom = String::from("#");
        for x in 0..self.width {
            bottom.push(wall(self.has_wall(CellPos::new(x, 0), Direction::South)));
            bottom.push('#');
        }
        write!(f, "{bottom}")
    }
}
