//! Shared simulation state
//!
//! The single record touched by both the simulation loop and external callers.
//! Every read and write goes through one mutex, and the lock is only ever held
//! long enough to copy or swap a few fields.

use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::animation::AnimationController;
use super::grid::GridModel;
use super::render::Frame;
use super::types::{AnimationState, FailureKind};

/// The mutable record behind the shared lock
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Index into the problem catalog
    pub problem_index: usize,
    pub total_problems: usize,
    /// Grid of the active problem, replaced wholesale and never mutated in place
    pub grid: Arc<GridModel>,
    pub controller: AnimationController,
    /// Most recently published frame
    pub frame: Option<Frame>,
    pub last_error: Option<FailureKind>,
    /// Bumped on every published change
    pub revision: u64,
    /// Revision the current frame was rendered from
    pub frame_revision: Option<u64>,
    /// Ticks completed by the simulation loop
    pub ticks: u64,
}

impl SimulationState {
    pub fn new(grid: Arc<GridModel>, problem_index: usize, total_problems: usize) -> Self {
        Self {
            problem_index,
            total_problems,
            grid,
            controller: AnimationController::new(),
            frame: None,
            last_error: None,
            revision: 0,
            frame_revision: None,
            ticks: 0,
        }
    }

    /// Swap in a new problem and drop any run in flight
    pub fn load_problem(&mut self, problem_index: usize, grid: Arc<GridModel>) {
        self.problem_index = problem_index;
        self.grid = grid;
        self.controller.reset_for_new_problem();
        self.last_error = None;
        self.revision += 1;
    }

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            current_problem_index: self.problem_index,
            total_problems: self.total_problems,
            animation_state: self.controller.state(),
            cursor: self.controller.cursor(),
            path_length: self.controller.path().len(),
            is_running: self.controller.is_running(),
            last_error: self.last_error,
            ticks: self.ticks,
        }
    }
}

/// Point-in-time copy of the control state, taken under one lock acquisition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StateSnapshot {
    pub current_problem_index: usize,
    pub total_problems: usize,
    pub animation_state: AnimationState,
    pub cursor: usize,
    pub path_length: usize,
    pub is_running: bool,
    pub last_error: Option<FailureKind>,
    pub ticks: u64,
}

/// Reference-counted handle to the shared record
#[derive(Debug, Clone)]
pub struct SharedSimulationState {
    inner: Arc<Mutex<SimulationState>>,
}

impl SharedSimulationState {
    pub fn new(state: SimulationState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    /// Acquire the shared lock, recovering it if poisoned
    pub fn lock(&self) -> MutexGuard<'_, SimulationState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> StateSnapshot {
        self.lock().snapshot()
    }

    pub fn frame(&self) -> Option<Frame> {
        self.lock().frame.clone()
    }
}
