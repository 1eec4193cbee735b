//! Catalog API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::models::{DiningTable, Restaurant, ServiceItem};
use shared::StoreError;

use crate::api::ApiState;
use crate::utils::{AppError, AppResult, ErrorCode};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantQuery {
    pub restaurant_id: i64,
}

/// GET /restaurants/{id}
pub async fn get_restaurant(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Restaurant>> {
    let restaurant = state.catalog.get_restaurant(id).await.map_err(|e| match e {
        StoreError::NotFound(msg) => AppError::with_message(ErrorCode::RestaurantNotFound, msg),
        other => other.into(),
    })?;
    Ok(Json(restaurant))
}

/// GET /tables?restaurantId= - 获取餐厅桌台
pub async fn list_tables(
    State(state): State<ApiState>,
    Query(query): Query<RestaurantQuery>,
) -> AppResult<Json<Vec<DiningTable>>> {
    let tables = state.catalog.list_tables(query.restaurant_id).await?;
    Ok(Json(tables))
}

/// GET /services?restaurantId=
pub async fn list_services(
    State(state): State<ApiState>,
    Query(query): Query<RestaurantQuery>,
) -> AppResult<Json<Vec<ServiceItem>>> {
    let services = state.catalog.list_services(query.restaurant_id).await?;
    Ok(Json(services))
}
