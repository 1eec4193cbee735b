//! Catalog API 模块 (restaurants, tables, services)

mod handler;

use axum::{Router, routing::get};

use super::ApiState;

pub fn router() -> Router<ApiState> {
    Router::new()
        .route("/restaurants/{id}", get(handler::get_restaurant))
        .route("/tables", get(handler::list_tables))
        .route("/services", get(handler::list_services))
}
