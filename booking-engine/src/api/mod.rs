//! Store API 路由模块
//!
//! REST resources consumed by the booking client:
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /health | GET | 健康检查 |
//! | /restaurants/{id} | GET | Restaurant |
//! | /tables?restaurantId= | GET | Tables of a restaurant |
//! | /services?restaurantId= | GET | Services of a restaurant |
//! | /bookings?restaurantId= or ?customerId= | GET | Bookings |
//! | /bookings/{id} | GET | Booking |
//! | /bookings | POST | Create (atomic conflict check, idempotency key) |
//! | /bookings/{id} | PUT | Replace full record |
//!
//! Success bodies are the bare resource; errors use the `ApiResponse`
//! envelope with the HTTP status of the error code.

pub mod bookings;
pub mod catalog;
pub mod health;

use std::sync::Arc;

use axum::Router;
use shared::{BookingRepository, CatalogGateway};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Handler state: the collaborators the API serves
#[derive(Clone)]
pub struct ApiState {
    pub catalog: Arc<dyn CatalogGateway>,
    pub bookings: Arc<dyn BookingRepository>,
}

impl ApiState {
    pub fn new(catalog: Arc<dyn CatalogGateway>, bookings: Arc<dyn BookingRepository>) -> Self {
        Self { catalog, bookings }
    }
}

/// All routes, no middleware
pub fn build_router() -> Router<ApiState> {
    Router::new()
        .merge(health::router())
        .merge(catalog::router())
        .merge(bookings::router())
}

/// Routes with middleware and state, ready to serve
pub fn build_app(state: ApiState) -> Router {
    build_router()
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
