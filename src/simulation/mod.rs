//! Standalone pathfinding simulation module
//!
//! This module contains the grid model, the pathfinder, the animation state
//! machine, the shared state and the background simulation loop. It has no
//! dependency on the HTTP server and can be driven directly from tests or the
//! headless runner.

mod animation;
mod catalog;
mod engine;
mod facade;
mod grid;
mod pathfinding;
mod render;
mod state;
mod types;

pub use animation::{AnimationController, StartOutcome, TickOutcome};
pub use catalog::{CatalogError, ProblemCatalog, ProblemSpec};
pub use engine::{LoopHandle, SimulationLoop, TickReport};
pub use facade::{CommandFacade, NextAck, StartAck};
pub use grid::{Cell, GridModel, MAX_GRID_CELLS};
pub use pathfinding::{is_valid_path, shortest_path};
pub use render::{
    cell_size_for, rgba_pixel, AsciiRenderer, Frame, FrameRenderer, RendererKind, RgbaRenderer,
    Scene, CELL_SIZE, FRAME_HEIGHT, FRAME_WIDTH,
};
pub use state::{SharedSimulationState, SimulationState, StateSnapshot};
pub use types::{AnimationState, Coord, FailureKind, Path, DEFAULT_TICK_RATE};
