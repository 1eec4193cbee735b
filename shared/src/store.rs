//! Collaborator interfaces
//!
//! The booking engine never talks to a data store directly. It consumes:
//! - [`CatalogGateway`]: restaurant / table / service lookups
//! - [`BookingRepository`]: booking create / read / update
//!
//! Implementations: the in-memory store of `booking-engine` and the REST
//! client of `booking-client`.

use async_trait::async_trait;
use thiserror::Error;

use crate::error::{AppError, ErrorCode};
use crate::models::{
    Booking, BookingCreate, BookingStatus, BookingUpdate, DiningTable, Restaurant, ServiceItem,
};

/// Store error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// The store could not be reached or answered with a server error
    #[error("Transport error: {0}")]
    Transport(String),

    /// The call did not complete within the configured bound
    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    #[error("Not found: {0}")]
    NotFound(String),

    /// The requested tables are already booked in the conflict window
    #[error("Conflict: {message}")]
    Conflict { message: String, table_ids: Vec<i64> },

    #[error("Validation error: {0}")]
    Validation(String),

    /// The requested status change is not a legal lifecycle step
    #[error("Invalid status transition: {0}")]
    InvalidStatusTransition(String),

    /// The store answered with something that is not the expected shape
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl StoreError {
    /// Failures reaching the store, as opposed to semantic rejections
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout(_) | Self::Decode(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Transport(msg) => AppError::with_message(ErrorCode::NetworkError, msg),
            StoreError::Timeout(ms) => {
                AppError::timeout(format!("Store call timed out after {ms} ms"))
            }
            StoreError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            StoreError::Conflict { message, table_ids } => {
                AppError::booking_conflict(message, &table_ids)
            }
            StoreError::Validation(msg) => AppError::validation(msg),
            StoreError::InvalidStatusTransition(msg) => {
                AppError::with_message(ErrorCode::InvalidStatusTransition, msg)
            }
            StoreError::Decode(msg) => AppError::internal(msg),
        }
    }
}

impl From<AppError> for StoreError {
    fn from(err: AppError) -> Self {
        match err.code {
            ErrorCode::NotFound
            | ErrorCode::BookingNotFound
            | ErrorCode::RestaurantNotFound
            | ErrorCode::TableNotFound
            | ErrorCode::ServiceNotFound => StoreError::NotFound(err.message),
            ErrorCode::BookingConflict => {
                let table_ids = err
                    .details
                    .as_ref()
                    .and_then(|d| d.get("conflicting_tables"))
                    .and_then(|v| serde_json::from_value::<Vec<i64>>(v.clone()).ok())
                    .unwrap_or_default();
                StoreError::Conflict {
                    message: err.message,
                    table_ids,
                }
            }
            ErrorCode::InvalidStatusTransition => StoreError::InvalidStatusTransition(err.message),
            ErrorCode::TimeoutError => StoreError::Timeout(0),
            code if code.http_status().is_client_error() => StoreError::Validation(err.message),
            _ => StoreError::Transport(err.message),
        }
    }
}

/// Catalog lookups (restaurants, tables, services)
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    async fn get_restaurant(&self, id: i64) -> StoreResult<Restaurant>;
    async fn list_tables(&self, restaurant_id: i64) -> StoreResult<Vec<DiningTable>>;
    async fn list_services(&self, restaurant_id: i64) -> StoreResult<Vec<ServiceItem>>;
}

/// Booking persistence
///
/// The underlying store only supports whole-record replacement, so partial
/// updates are read-merge-write: fetch, merge, `replace`. This is not atomic
/// and the last writer wins.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Insert a new booking; the store assigns id, `PENDING` status and timestamps
    async fn create(&self, data: BookingCreate) -> StoreResult<Booking>;

    async fn get_by_id(&self, id: i64) -> StoreResult<Booking>;

    /// Replace the full record (PUT)
    async fn replace(&self, booking: Booking) -> StoreResult<Booking>;

    async fn list_by_restaurant(&self, restaurant_id: i64) -> StoreResult<Vec<Booking>>;

    async fn list_by_customer(&self, customer_id: i64) -> StoreResult<Vec<Booking>>;

    /// Partial update via read-merge-write
    async fn update(&self, id: i64, data: BookingUpdate) -> StoreResult<Booking> {
        let mut current = self.get_by_id(id).await?;
        if let Some(next) = data.status
            && next != current.status
            && !current.status.can_transition_to(next)
        {
            return Err(StoreError::InvalidStatusTransition(format!(
                "Booking {id} cannot go from {} to {next}",
                current.status
            )));
        }
        current.apply(data, chrono::Utc::now());
        self.replace(current).await
    }

    async fn set_status(&self, id: i64, status: BookingStatus) -> StoreResult<Booking> {
        self.update(id, BookingUpdate::status(status)).await
    }

    async fn confirm(&self, id: i64) -> StoreResult<Booking> {
        self.set_status(id, BookingStatus::Confirmed).await
    }

    async fn complete(&self, id: i64) -> StoreResult<Booking> {
        self.set_status(id, BookingStatus::Completed).await
    }

    async fn cancel(&self, id: i64) -> StoreResult<Booking> {
        self.set_status(id, BookingStatus::Cancelled).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use support::Records;

    /// Minimal repository used to exercise the provided methods
    mod support {
        use super::*;
        use std::sync::Mutex;

        #[derive(Default)]
        pub struct Records {
            pub bookings: Mutex<Vec<Booking>>,
        }

        #[async_trait]
        impl BookingRepository for Records {
            async fn create(&self, data: BookingCreate) -> StoreResult<Booking> {
                let mut bookings = self.bookings.lock().unwrap();
                let booking = data.into_booking(bookings.len() as i64 + 1, Utc::now());
                bookings.push(booking.clone());
                Ok(booking)
            }

            async fn get_by_id(&self, id: i64) -> StoreResult<Booking> {
                let bookings = self.bookings.lock().unwrap();
                bookings
                    .iter()
                    .find(|b| b.id == id)
                    .cloned()
                    .ok_or_else(|| StoreError::NotFound(format!("Booking {id} not found")))
            }

            async fn replace(&self, booking: Booking) -> StoreResult<Booking> {
                let mut bookings = self.bookings.lock().unwrap();
                let slot = bookings
                    .iter_mut()
                    .find(|b| b.id == booking.id)
                    .ok_or_else(|| StoreError::NotFound(format!("Booking {} not found", booking.id)))?;
                *slot = booking.clone();
                Ok(booking)
            }

            async fn list_by_restaurant(&self, restaurant_id: i64) -> StoreResult<Vec<Booking>> {
                let bookings = self.bookings.lock().unwrap();
                Ok(bookings.iter().filter(|b| b.restaurant_id == restaurant_id).cloned().collect())
            }

            async fn list_by_customer(&self, customer_id: i64) -> StoreResult<Vec<Booking>> {
                let bookings = self.bookings.lock().unwrap();
                Ok(bookings.iter().filter(|b| b.customer_id == customer_id).cloned().collect())
            }
        }
    }

    fn payload() -> BookingCreate {
        BookingCreate {
            restaurant_id: 1,
            customer_id: 2,
            booking_time: Utc.with_ymd_and_hms(2026, 11, 2, 19, 0, 0).unwrap(),
            guest_count: 2,
            table_ids: vec![],
            service_ids: vec![],
            deposit_amount: 0.0,
            note: String::new(),
            idempotency_key: None,
        }
    }

    #[tokio::test]
    async fn test_cancel_is_status_update() {
        let repo = Records::default();
        let created = repo.create(payload()).await.unwrap();
        let cancelled = repo.cancel(created.id).await.unwrap();
        assert_eq!(cancelled.status, BookingStatus::Cancelled);
        assert_eq!(repo.get_by_id(created.id).await.unwrap().status, BookingStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_illegal_transition_rejected() {
        let repo = Records::default();
        let created = repo.create(payload()).await.unwrap();
        let err = repo.complete(created.id).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidStatusTransition(_)));

        repo.confirm(created.id).await.unwrap();
        let done = repo.complete(created.id).await.unwrap();
        assert_eq!(done.status, BookingStatus::Completed);
        assert!(repo.cancel(created.id).await.is_err());
    }

    #[tokio::test]
    async fn test_update_preserves_untouched_fields() {
        let repo = Records::default();
        let created = repo.create(payload()).await.unwrap();
        let updated = repo
            .update(
                created.id,
                BookingUpdate {
                    note: Some("Birthday".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.note, "Birthday");
        assert_eq!(updated.guest_count, 2);
        assert_eq!(updated.status, BookingStatus::Pending);
    }

    #[test]
    fn test_store_error_app_error_mapping() {
        let conflict = StoreError::Conflict {
            message: "taken".into(),
            table_ids: vec![5],
        };
        let app: AppError = conflict.clone().into();
        assert_eq!(app.code, ErrorCode::BookingConflict);
        let back: StoreError = app.into();
        assert_eq!(back, conflict);

        let app: AppError = StoreError::Transport("down".into()).into();
        assert_eq!(app.code, ErrorCode::NetworkError);
        assert!(StoreError::from(app).is_transport());

        let app = AppError::with_message(ErrorCode::GuestCountOutOfRange, "too many");
        assert!(matches!(StoreError::from(app), StoreError::Validation(_)));

        let app = AppError::with_message(ErrorCode::BookingNotFound, "gone");
        assert!(StoreError::from(app).is_not_found());

        let transition = StoreError::InvalidStatusTransition("PENDING to COMPLETED".into());
        let app: AppError = transition.clone().into();
        assert_eq!(app.code, ErrorCode::InvalidStatusTransition);
        assert_eq!(StoreError::from(app), transition);
    }
}
