//! Animation controller for walking a computed path
//!
//! Holds the current path and a cursor into it, and advances the cursor one
//! cell per tick until the exit is reached or a bad step is detected.

use log::warn;

use super::grid::GridModel;
use super::types::{AnimationState, Coord, FailureKind, Path};

/// Result of handing a freshly computed path to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// A run began at cursor 0
    Started,
    /// A run is already in flight; nothing changed
    AlreadyRunning,
    /// The path was empty, the run failed immediately
    Unreachable,
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing to advance (not running)
    Idle,
    /// Moved onto the given cell and still running
    Advanced(Coord),
    /// The exit has been reached
    Completed,
    /// The next cell was out of bounds or an obstacle
    Failed(FailureKind),
}

/// State machine over Idle, Running, Completed and Failed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnimationController {
    state: AnimationState,
    path: Path,
    cursor: usize,
    last_failure: Option<FailureKind>,
}

impl AnimationController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn last_failure(&self) -> Option<FailureKind> {
        self.last_failure
    }

    pub fn is_running(&self) -> bool {
        self.state == AnimationState::Running
    }

    /// Cell the player currently occupies, if a run exists
    pub fn position(&self) -> Option<Coord> {
        self.path.get(self.cursor)
    }

    /// Cells already walked, including the current one
    pub fn trail(&self) -> &[Coord] {
        let end = (self.cursor + 1).min(self.path.len());
        &self.path.cells()[..end]
    }

    /// Begin walking a freshly computed path
    ///
    /// Ignored while a run is in flight, so a duplicated command cannot reset
    /// the cursor.
    pub fn start(&mut self, path: Path) -> StartOutcome {
        if self.is_running() {
            return StartOutcome::AlreadyRunning;
        }

        self.cursor = 0;
        if path.is_empty() {
            self.path = path;
            self.state = AnimationState::Failed;
            self.last_failure = Some(FailureKind::UnreachableExit);
            return StartOutcome::Unreachable;
        }

        self.path = path;
        self.state = AnimationState::Running;
        self.last_failure = None;
        StartOutcome::Started
    }

    /// Advance the cursor by one cell
    pub fn tick(&mut self, grid: &GridModel) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Idle;
        }

        let next = self.cursor + 1;
        let Some(coord) = self.path.get(next) else {
            self.state = AnimationState::Completed;
            return TickOutcome::Completed;
        };

        if !grid.is_walkable(coord) {
            warn!(
                "Invalid step at cursor {} onto {}: cell is {}",
                next,
                coord,
                if grid.contains(coord) {
                    "an obstacle"
                } else {
                    "out of bounds"
                }
            );
            self.state = AnimationState::Failed;
            self.last_failure = Some(FailureKind::InvalidStepEncountered);
            return TickOutcome::Failed(FailureKind::InvalidStepEncountered);
        }

        self.cursor = next;
        TickOutcome::Advanced(coord)
    }

    /// Drop the current run and go back to Idle, whatever the current state
    pub fn reset_for_new_problem(&mut self) {
        *self = Self::default();
    }
}
