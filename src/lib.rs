//! Grid Pathfinding Simulation Library
//!
//! A concurrent shortest-path animation engine that can run headless or behind
//! an HTTP command/query server.

pub mod simulation;

#[cfg(feature = "server")]
pub mod server;
