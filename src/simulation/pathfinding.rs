//! Shortest-path search over the grid
//!
//! Dijkstra with unit edge weights. The frontier is ordered by
//! `(distance, row, col)`, which makes the discovered route reproducible when
//! several shortest paths exist.

use log::debug;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::grid::GridModel;
use super::types::{Coord, Path};

/// Find the shortest path from the grid's start to its exit
///
/// Returns an empty path when the exit cannot be reached. The grid's search
/// bookkeeping is reset first, so the same grid can be searched repeatedly.
pub fn shortest_path(grid: &mut GridModel) -> Path {
    grid.reset();

    let start = grid.start();
    let exit = grid.exit();

    if let Some(cell) = grid.cell_mut(start) {
        cell.distance = Some(0);
    }

    let mut frontier = BinaryHeap::new();
    frontier.push(Reverse((0u32, start.row, start.col)));
    let mut popped = 0usize;

    while let Some(Reverse((distance, row, col))) = frontier.pop() {
        let current = Coord::new(row, col);
        popped += 1;

        // Skip entries superseded by a shorter route
        if grid
            .cell(current)
            .and_then(|cell| cell.distance)
            .is_some_and(|best| distance > best)
        {
            continue;
        }

        if current == exit {
            break;
        }

        let next_distance = distance + 1;
        let neighbors: Vec<Coord> = grid.neighbors(current).collect();
        for neighbor in neighbors {
            let Some(cell) = grid.cell_mut(neighbor) else {
                continue;
            };
            if cell.is_obstacle {
                continue;
            }
            if cell.distance.map_or(true, |best| next_distance < best) {
                cell.distance = Some(next_distance);
                cell.predecessor = Some(current);
                frontier.push(Reverse((next_distance, neighbor.row, neighbor.col)));
            }
        }
    }

    let path = reconstruct(grid);
    debug!(
        "Searched {} -> {}: popped {} entries, path length {}",
        start,
        exit,
        popped,
        path.len()
    );
    path
}

/// Walk predecessor links back from the exit
fn reconstruct(grid: &GridModel) -> Path {
    let exit = grid.exit();
    if grid.cell(exit).and_then(|cell| cell.distance).is_none() {
        return Path::unreachable();
    }

    let mut cells = vec![exit];
    let mut current = exit;
    while let Some(previous) = grid.cell(current).and_then(|cell| cell.predecessor) {
        cells.push(previous);
        current = previous;
    }
    cells.reverse();
    Path::new(cells)
}

/// Check that a path starts at the grid start, ends at the exit, and only
/// steps between adjacent walkable cells
pub fn is_valid_path(grid: &GridModel, path: &Path) -> bool {
    if path.first() != Some(grid.start()) || path.last() != Some(grid.exit()) {
        return false;
    }
    if !path.cells().iter().all(|coord| grid.is_walkable(*coord)) {
        return false;
    }
    path.cells()
        .windows(2)
        .all(|pair| pair[0].is_adjacent(&pair[1]))
}
