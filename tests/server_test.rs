//! HTTP handlers, called directly with the façade as state
#![cfg(feature = "server")]

use axum::body::to_bytes;
use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::IntoResponse;
use pathfinder_sim::server::routes::{
    get_frame, get_state, health, not_found, post_next, post_reset, post_start, FRAME_TICK_HEADER,
};
use pathfinder_sim::server::{create_app, AppError, ServerConfig};
use pathfinder_sim::simulation::{
    AnimationState, CommandFacade, NextAck, ProblemCatalog, RgbaRenderer, SimulationLoop,
    StartAck, FRAME_HEIGHT, FRAME_WIDTH,
};
use serde_json::{json, Value};
use std::sync::Arc;

fn facade() -> CommandFacade {
    CommandFacade::new(ProblemCatalog::builtin()).expect("builtin catalog")
}

#[test]
fn test_server_config_default() {
    let config = ServerConfig::default();
    assert_eq!(config.port, 5000);
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.bind_addr(), "127.0.0.1:5000");
    assert_eq!(ServerConfig::new("0.0.0.0", 8080).bind_addr(), "0.0.0.0:8080");
}

#[test]
fn test_create_app() {
    let _app = create_app(facade());
}

#[tokio::test]
async fn test_frame_unavailable_before_first_tick() {
    let result = get_frame(State(facade())).await;
    let response = match result {
        Ok(_) => panic!("expected no frame before the first tick"),
        Err(err) => {
            assert!(matches!(err, AppError::FrameUnavailable));
            err.into_response()
        }
    };

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let value: Value = serde_json::from_slice(&body).expect("json body");
    assert_eq!(value["status"], 503);
    assert!(value["error"].as_str().is_some());
}

#[tokio::test]
async fn test_frame_served_as_raw_rgba() {
    let facade = facade();
    let sim = SimulationLoop::new(facade.shared_state(), Arc::new(RgbaRenderer));
    sim.step();

    let response = match get_frame(State(facade)).await {
        Ok(response) => response,
        Err(err) => panic!("expected a frame, got {}", err),
    };
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        RgbaRenderer::CONTENT_TYPE
    );
    assert_eq!(response.headers()[FRAME_TICK_HEADER], "1");

    let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    assert_eq!(body.len(), FRAME_WIDTH * FRAME_HEIGHT * 4);
}

#[tokio::test]
async fn test_start_and_state() {
    let facade = facade();

    let ack = post_start(State(facade.clone())).await.0;
    assert_eq!(ack, StartAck::Started { path_length: 9 });
    assert_eq!(
        serde_json::to_value(ack).expect("json"),
        json!({ "result": "started", "path_length": 9 })
    );

    let again = post_start(State(facade.clone())).await.0;
    assert_eq!(
        serde_json::to_value(again).expect("json"),
        json!({ "result": "already_running" })
    );

    let snapshot = get_state(State(facade)).await.0;
    assert_eq!(snapshot.animation_state, AnimationState::Running);
    let value = serde_json::to_value(snapshot).expect("json");
    assert_eq!(value["animation_state"], "running");
    assert_eq!(value["current_problem_index"], 0);
    assert_eq!(value["is_running"], true);
    assert_eq!(value["last_error"], Value::Null);
}

#[tokio::test]
async fn test_next_and_reset() {
    let facade = facade();

    assert_eq!(
        post_next(State(facade.clone())).await.0,
        NextAck::Advanced { problem_index: 1 }
    );
    post_next(State(facade.clone())).await;
    let at_end = post_next(State(facade.clone())).await.0;
    assert_eq!(
        serde_json::to_value(at_end).expect("json"),
        json!({ "result": "at_last_problem", "problem_index": 2 })
    );

    let snapshot = post_reset(State(facade)).await.0;
    assert_eq!(snapshot.current_problem_index, 0);
}

#[tokio::test]
async fn test_health() {
    let response = health(State(facade())).await.0;
    assert_eq!(response.status, "ok");
    assert_eq!(response.ticks, 0);
}

#[tokio::test]
async fn test_unknown_route() {
    let uri: Uri = "/nope".parse().expect("uri");
    let response = not_found(uri).await.into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let value: Value = serde_json::from_slice(&body).expect("json body");
    assert_eq!(value["status"], 404);
    assert!(value["error"].as_str().unwrap_or_default().contains("/nope"));
}
