//! Booking API 模块

mod handler;

use axum::{Router, routing::get};

use super::ApiState;

pub fn router() -> Router<ApiState> {
    Router::new()
        .route("/bookings", get(handler::list).post(handler::create))
        .route("/bookings/{id}", get(handler::get_by_id).put(handler::replace))
}
