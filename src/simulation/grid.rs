//! Grid model for pathfinding
//!
//! Cells are stored in a flat row-major arena. Predecessor links are plain
//! coordinates, so the search chain never owns another cell.

use std::collections::BTreeSet;

use super::catalog::{CatalogError, ProblemSpec};
use super::types::Coord;

/// Largest grid accepted, in cells
pub const MAX_GRID_CELLS: usize = 1 << 20;

/// A single grid cell with its per-search bookkeeping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    pub is_obstacle: bool,
    /// Best known distance from start; `None` means not reached yet
    pub distance: Option<u32>,
    /// Cell we arrived from on the best known route
    pub predecessor: Option<Coord>,
}

/// Rectangular grid with obstacles and 4-directional adjacency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridModel {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    start: Coord,
    exit: Coord,
}

impl GridModel {
    /// Build a square grid from a catalog entry
    pub fn build(spec: &ProblemSpec) -> Result<Self, CatalogError> {
        Self::new(
            spec.size,
            spec.size,
            spec.start,
            spec.exit,
            spec.obstacles.iter().copied(),
        )
    }

    /// Build a `rows` x `cols` grid, rejecting anything that could never produce a valid run
    pub fn new(
        rows: usize,
        cols: usize,
        start: Coord,
        exit: Coord,
        obstacles: impl IntoIterator<Item = Coord>,
    ) -> Result<Self, CatalogError> {
        if rows == 0 || cols == 0 {
            return Err(CatalogError::ZeroSize);
        }
        let cell_count = rows
            .checked_mul(cols)
            .filter(|count| *count <= MAX_GRID_CELLS)
            .ok_or(CatalogError::TooLarge {
                rows,
                cols,
                max: MAX_GRID_CELLS,
            })?;

        let mut grid = Self {
            rows,
            cols,
            cells: vec![Cell::default(); cell_count],
            start,
            exit,
        };

        for coord in [start, exit] {
            if !grid.contains(coord) {
                return Err(CatalogError::OutOfBounds { coord, rows, cols });
            }
        }

        for coord in obstacles {
            let cell = grid
                .cell_mut(coord)
                .ok_or(CatalogError::OutOfBounds { coord, rows, cols })?;
            cell.is_obstacle = true;
        }

        if grid.is_obstacle(start) {
            return Err(CatalogError::StartIsObstacle(start));
        }
        if grid.is_obstacle(exit) {
            return Err(CatalogError::ExitIsObstacle(exit));
        }

        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn start(&self) -> Coord {
        self.start
    }

    pub fn exit(&self) -> Coord {
        self.exit
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        self.contains(coord).then(|| coord.row * self.cols + coord.col)
    }

    /// Whether the coordinate lies inside the grid
    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    pub fn cell(&self, coord: Coord) -> Option<&Cell> {
        self.index(coord).and_then(|index| self.cells.get(index))
    }

    pub fn cell_mut(&mut self, coord: Coord) -> Option<&mut Cell> {
        let index = self.index(coord)?;
        self.cells.get_mut(index)
    }

    /// Out-of-bounds coordinates are not obstacles, they are simply absent
    pub fn is_obstacle(&self, coord: Coord) -> bool {
        self.cell(coord).is_some_and(|cell| cell.is_obstacle)
    }

    /// In bounds and not an obstacle
    pub fn is_walkable(&self, coord: Coord) -> bool {
        self.cell(coord).is_some_and(|cell| !cell.is_obstacle)
    }

    /// In-bounds neighbours in the fixed order up, down, left, right
    ///
    /// The order only matters for tie-breaking during the search.
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        let Coord { row, col } = coord;
        let up = row.checked_sub(1).map(|r| Coord::new(r, col));
        let down = Some(Coord::new(row + 1, col));
        let left = col.checked_sub(1).map(|c| Coord::new(row, c));
        let right = Some(Coord::new(row, col + 1));

        [up, down, left, right]
            .into_iter()
            .flatten()
            .filter(move |neighbor| self.contains(*neighbor))
    }

    /// Clear search bookkeeping so the grid can be searched again
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            cell.distance = None;
            cell.predecessor = None;
        }
    }

    /// All obstacle coordinates in row-major order
    pub fn obstacles(&self) -> BTreeSet<Coord> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_obstacle)
            .map(|(index, _)| Coord::new(index / self.cols, index % self.cols))
            .collect()
    }
}
