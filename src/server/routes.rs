//! Route handlers
//!
//! Each handler extracts the command façade and forwards to it. No simulation
//! logic lives here.

use axum::extract::State;
use axum::http::{header, HeaderName, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use super::error::{AppError, AppResult};
use crate::simulation::{CommandFacade, NextAck, StartAck, StateSnapshot};

/// Header carrying the tick a frame was rendered on
pub const FRAME_TICK_HEADER: &str = "x-frame-tick";

/// Latest frame: `GET /frame`
pub async fn get_frame(State(facade): State<CommandFacade>) -> AppResult<Response> {
    let frame = facade.get_frame().ok_or(AppError::FrameUnavailable)?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, frame.content_type())],
        [(
            HeaderName::from_static(FRAME_TICK_HEADER),
            frame.tick().to_string(),
        )],
        frame.as_bytes().to_vec(),
    )
        .into_response())
}

/// Control state snapshot: `GET /state`
pub async fn get_state(State(facade): State<CommandFacade>) -> Json<StateSnapshot> {
    Json(facade.get_state())
}

/// Start animating the current problem: `POST /start`
pub async fn post_start(State(facade): State<CommandFacade>) -> Json<StartAck> {
    Json(facade.start())
}

/// Advance to the next problem: `POST /next`
pub async fn post_next(State(facade): State<CommandFacade>) -> Json<NextAck> {
    Json(facade.next_problem())
}

/// Back to the first problem: `POST /reset`
pub async fn post_reset(State(facade): State<CommandFacade>) -> Json<StateSnapshot> {
    Json(facade.reset())
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub ticks: u64,
}

/// Liveness probe: `GET /health`
pub async fn health(State(facade): State<CommandFacade>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        ticks: facade.get_state().ticks,
    })
}

/// Fallback for unknown routes
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
