//! 健康检查路由

use axum::{Json, Router, routing::get};
use serde::Serialize;

use super::ApiState;

pub fn router() -> Router<ApiState> {
    Router::new().route("/health", get(health))
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
