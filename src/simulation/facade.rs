//! Command and query surface
//!
//! Every operation here reads or writes the shared state; none of them advance
//! the animation. Pathfinding for "start" runs outside the lock on a private
//! copy of the grid, and only the result is published under the lock.

use log::{info, warn};
use serde::Serialize;
use std::sync::Arc;

use super::animation::StartOutcome;
use super::catalog::{CatalogError, ProblemCatalog};
use super::pathfinding::shortest_path;
use super::render::Frame;
use super::state::{SharedSimulationState, SimulationState, StateSnapshot};
use super::types::{AnimationState, FailureKind};

/// Acknowledgement for a "start" command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum StartAck {
    /// A new run began
    Started { path_length: usize },
    /// A run was already in flight and was left untouched
    AlreadyRunning,
    /// No route exists; the run failed immediately
    Unreachable,
    /// The problem changed while the path was being computed; the result was dropped
    Superseded,
}

/// Acknowledgement for a "next problem" command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum NextAck {
    Advanced { problem_index: usize },
    /// Already on the last problem; nothing changed
    AtLastProblem { problem_index: usize },
}

/// External command/query handle
///
/// Cheap to clone; every clone talks to the same shared state.
#[derive(Debug, Clone)]
pub struct CommandFacade {
    state: SharedSimulationState,
    catalog: Arc<ProblemCatalog>,
}

impl CommandFacade {
    /// Create the shared state on the catalog's first problem
    pub fn new(catalog: ProblemCatalog) -> Result<Self, CatalogError> {
        let grid = catalog.shared_grid(0).ok_or(CatalogError::Empty)?;
        let state = SharedSimulationState::new(SimulationState::new(grid, 0, catalog.len()));
        Ok(Self {
            state,
            catalog: Arc::new(catalog),
        })
    }

    /// Shared state handle for the simulation loop
    pub fn shared_state(&self) -> SharedSimulationState {
        self.state.clone()
    }

    pub fn catalog(&self) -> &ProblemCatalog {
        &self.catalog
    }

    /// Most recently published frame, or `None` before the first tick
    pub fn get_frame(&self) -> Option<Frame> {
        self.state.frame()
    }

    pub fn get_state(&self) -> StateSnapshot {
        self.state.snapshot()
    }

    /// Compute a path on the current grid and begin animating it
    pub fn start(&self) -> StartAck {
        let (grid, problem_index) = {
            let state = self.state.lock();
            if state.controller.is_running() {
                return StartAck::AlreadyRunning;
            }
            (Arc::clone(&state.grid), state.problem_index)
        };

        // Search a private copy; the published grid is never mutated in place
        let mut scratch = (*grid).clone();
        let path = shortest_path(&mut scratch);
        let path_length = path.len();

        let mut state = self.state.lock();
        if state.problem_index != problem_index || !Arc::ptr_eq(&state.grid, &grid) {
            info!(
                "Discarding path for problem {}: problem changed during search",
                problem_index
            );
            return StartAck::Superseded;
        }

        let outcome = state.controller.start(path);
        match outcome {
            StartOutcome::AlreadyRunning => return StartAck::AlreadyRunning,
            StartOutcome::Started => {
                state.last_error = None;
                info!(
                    "Started problem {}: path of {} cells",
                    problem_index, path_length
                );
            }
            StartOutcome::Unreachable => {
                state.last_error = Some(FailureKind::UnreachableExit);
                warn!("Problem {}: exit is unreachable", problem_index);
            }
        }
        state.grid = Arc::new(scratch);
        state.revision += 1;

        match outcome {
            StartOutcome::Unreachable => StartAck::Unreachable,
            _ => StartAck::Started { path_length },
        }
    }

    /// Move to the next catalog problem, preempting any run in flight
    pub fn next_problem(&self) -> NextAck {
        let mut state = self.state.lock();
        let current = state.problem_index;
        if current >= self.catalog.last_index() {
            info!("Already at last problem {}", current);
            return NextAck::AtLastProblem {
                problem_index: current,
            };
        }

        let next = current + 1;
        let Some(grid) = self.catalog.shared_grid(next) else {
            return NextAck::AtLastProblem {
                problem_index: current,
            };
        };
        let preempted = state.controller.state() == AnimationState::Running;
        state.load_problem(next, grid);
        info!(
            "Advanced to problem {}{}",
            next,
            if preempted { " (preempted running animation)" } else { "" }
        );

        NextAck::Advanced {
            problem_index: next,
        }
    }

    /// Return to the first problem with no active run
    pub fn reset(&self) -> StateSnapshot {
        let first = self.catalog.shared_grid(0);
        let mut state = self.state.lock();
        if let Some(grid) = first {
            state.load_problem(0, grid);
            info!("Reset to problem 0");
        }
        state.snapshot()
    }
}
