//! Core types for the pathfinding simulation
//!
//! These are standalone types shared by the grid, the pathfinder and the
//! animation controller.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Default simulation cadence (ticks per second)
pub const DEFAULT_TICK_RATE: u32 = 30;

/// A cell coordinate on the grid, addressed as (row, col)
///
/// Serialized as a two-element array `[row, col]` so catalog files stay compact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[usize; 2]", into = "[usize; 2]")]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance between two coordinates
    pub fn manhattan(&self, other: &Coord) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// True when the two coordinates share an edge
    pub fn is_adjacent(&self, other: &Coord) -> bool {
        self.manhattan(other) == 1
    }
}

impl From<[usize; 2]> for Coord {
    fn from([row, col]: [usize; 2]) -> Self {
        Self { row, col }
    }
}

impl From<Coord> for [usize; 2] {
    fn from(coord: Coord) -> Self {
        [coord.row, coord.col]
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Ordered cells from start to exit, inclusive
///
/// An empty path means the exit is unreachable. The cells live behind an `Arc`
/// so handing a path across the shared lock is a pointer copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path(Arc<[Coord]>);

impl Path {
    pub fn new(cells: Vec<Coord>) -> Self {
        Self(cells.into())
    }

    /// The "no route" result
    pub fn unreachable() -> Self {
        Self::default()
    }

    pub fn cells(&self) -> &[Coord] {
        &self.0
    }

    /// Number of cells in the path (moves + 1)
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Coord> {
        self.0.get(index).copied()
    }

    pub fn first(&self) -> Option<Coord> {
        self.0.first().copied()
    }

    pub fn last(&self) -> Option<Coord> {
        self.0.last().copied()
    }

    /// Number of moves needed to walk the path
    pub fn moves(&self) -> usize {
        self.0.len().saturating_sub(1)
    }
}

impl From<Vec<Coord>> for Path {
    fn from(cells: Vec<Coord>) -> Self {
        Self::new(cells)
    }
}

/// Animation state of the current run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationState {
    /// No active run; player waits at the start cell
    #[default]
    Idle,
    /// Player is walking the path, one cell per tick
    Running,
    /// Player reached the exit
    Completed,
    /// Run ended without reaching the exit
    Failed,
}

impl AnimationState {
    /// Completed and Failed end the current run
    pub fn is_terminal(&self) -> bool {
        matches!(self, AnimationState::Completed | AnimationState::Failed)
    }
}

impl fmt::Display for AnimationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnimationState::Idle => "idle",
            AnimationState::Running => "running",
            AnimationState::Completed => "completed",
            AnimationState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Why a run ended in `Failed`
///
/// These are recoverable outcomes recorded in shared state, not process faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Pathfinding found no route to the exit
    UnreachableExit,
    /// A tick tried to move onto an obstacle or outside the grid
    InvalidStepEncountered,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::UnreachableExit => f.write_str("exit is unreachable"),
            FailureKind::InvalidStepEncountered => f.write_str("invalid step encountered"),
        }
    }
}
