//! Frame2D Solver HTTP Server
//!
//! Stateless: every request builds and analyzes its own model.

use std::net::SocketAddr;

use anyhow::Context;
use axum::{
    extract::Json,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use log::info;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};

use frame2d_solver::prelude::*;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn analyze(Json(definition): Json<StructureDefinition>) -> impl IntoResponse {
    let output = analyze_structure(&definition);
    let status = if output.is_stable {
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };
    (status, Json(output))
}

fn bind_address() -> anyhow::Result<SocketAddr> {
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8086".to_string());
    format!("{host}:{port}")
        .parse()
        .with_context(|| format!("invalid HOST/PORT: {host}:{port}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/api/v1/analyze", post(analyze))
        .layer(cors);

    let addr = bind_address()?;
    info!("Frame2D Solver Server listening on http://{}", addr);
    info!("  Health check: GET  /health");
    info!("  Analysis:     POST /api/v1/analyze");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await?;
    Ok(())
}
