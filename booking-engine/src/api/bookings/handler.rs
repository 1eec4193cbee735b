//! Booking API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::StoreError;
use shared::models::{Booking, BookingCreate};

use crate::api::ApiState;
use crate::utils::{AppError, AppResult, ErrorCode};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingQuery {
    pub restaurant_id: Option<i64>,
    pub customer_id: Option<i64>,
}

/// Map a store error, reporting a miss as `code`
fn not_found_as(code: ErrorCode) -> impl Fn(StoreError) -> AppError {
    move |err| match err {
        StoreError::NotFound(msg) => AppError::with_message(code, msg),
        other => other.into(),
    }
}

/// GET /bookings?restaurantId= | ?customerId=
pub async fn list(
    State(state): State<ApiState>,
    Query(query): Query<BookingQuery>,
) -> AppResult<Json<Vec<Booking>>> {
    let bookings = match (query.restaurant_id, query.customer_id) {
        (Some(restaurant_id), customer_id) => {
            let mut bookings = state.bookings.list_by_restaurant(restaurant_id).await?;
            if let Some(customer_id) = customer_id {
                bookings.retain(|b| b.customer_id == customer_id);
            }
            bookings
        }
        (None, Some(customer_id)) => state.bookings.list_by_customer(customer_id).await?,
        (None, None) => {
            return Err(AppError::invalid_request(
                "restaurantId or customerId query parameter is required",
            ));
        }
    };
    Ok(Json(bookings))
}

/// GET /bookings/{id}
pub async fn get_by_id(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Booking>> {
    let booking = state
        .bookings
        .get_by_id(id)
        .await
        .map_err(not_found_as(ErrorCode::BookingNotFound))?;
    Ok(Json(booking))
}

/// POST /bookings - 创建预订
pub async fn create(
    State(state): State<ApiState>,
    Json(payload): Json<BookingCreate>,
) -> AppResult<Json<Booking>> {
    // The only reference a create can miss is its restaurant
    let booking = state
        .bookings
        .create(payload)
        .await
        .map_err(not_found_as(ErrorCode::RestaurantNotFound))?;
    Ok(Json(booking))
}

/// PUT /bookings/{id} - 替换完整记录
pub async fn replace(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    Json(mut payload): Json<Booking>,
) -> AppResult<Json<Booking>> {
    payload.id = id;
    let booking = state
        .bookings
        .replace(payload)
        .await
        .map_err(not_found_as(ErrorCode::BookingNotFound))?;
    Ok(Json(booking))
}
