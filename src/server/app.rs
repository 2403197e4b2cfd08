//! Axum application builder
//!
//! Routes:
//! - `GET /frame` - latest rendered frame
//! - `GET /state` - control state snapshot
//! - `POST /start` - start the current problem
//! - `POST /next` - advance to the next problem
//! - `POST /reset` - back to the first problem
//! - `GET /health` - liveness

use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::Router;
use log::info;

use super::routes;
use crate::simulation::CommandFacade;

/// Create the Axum application with all routes.
pub fn create_app(facade: CommandFacade) -> Router {
    Router::new()
        .route("/frame", get(routes::get_frame))
        .route("/state", get(routes::get_state))
        .route("/start", post(routes::post_start))
        .route("/next", post(routes::post_next))
        .route("/reset", post(routes::post_reset))
        .route("/health", get(routes::health))
        .fallback(routes::not_found)
        .with_state(facade)
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 5000,
        }
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Bind and serve until Ctrl-C.
pub async fn serve(config: ServerConfig, facade: CommandFacade) -> Result<()> {
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, create_app(facade))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        log::warn!("Could not install Ctrl-C handler; server will run until killed");
        std::future::pending::<()>().await;
    }
}
