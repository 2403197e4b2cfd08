//! HTTP command/query server
//!
//! A thin axum layer over [`CommandFacade`](crate::simulation::CommandFacade).
//! The simulation loop runs on its own thread; handlers only take the shared
//! lock briefly through the façade.
//!
//! ```text
//! ┌──────────────────────┐        ┌──────────────────────┐
//! │ Simulation Thread    │        │ Axum Server (tokio)  │
//! │ (fixed-rate loop)    │        │                      │
//! │  tick → render ──────┼─lock──►│  GET  /frame /state  │
//! │                      │◄─lock──┼─ POST /start /next   │
//! └──────────────────────┘        └──────────────────────┘
//! ```

pub mod app;
pub mod error;
pub mod routes;

pub use app::{create_app, serve, ServerConfig};
pub use error::{AppError, AppResult};
