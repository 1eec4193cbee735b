//! Availability Evaluator
//!
//! Decides whether a restaurant can seat a party at a requested time,
//! either on an explicit set of candidate tables or by auto-assignment from
//! the whole inventory.
//!
//! Transport failures fail open: the request is reported as available and a
//! WARN event with `fail_open = true` is emitted on target `availability`.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::models::{BookingStatus, total_capacity};
use shared::{BookingRepository, CatalogGateway, StoreResult};

use super::bounded;
use super::conflict::ConflictPolicy;

/// Message returned when the check could not complete
pub const FAIL_OPEN_MESSAGE: &str = "Tables are available";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRequest {
    pub restaurant_id: i64,
    pub requested_time: DateTime<Utc>,
    pub guest_count: i32,
    /// Empty means auto-assign
    #[serde(default)]
    pub candidate_table_ids: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResult {
    pub available: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conflicting_tables: Vec<i64>,
}

impl AvailabilityResult {
    pub fn available(message: impl Into<String>) -> Self {
        Self {
            available: true,
            message: message.into(),
            conflicting_tables: Vec::new(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            available: false,
            message: message.into(),
            conflicting_tables: Vec::new(),
        }
    }

    pub fn conflict(message: impl Into<String>, tables: Vec<i64>) -> Self {
        Self {
            available: false,
            message: message.into(),
            conflicting_tables: tables,
        }
    }
}

pub struct AvailabilityEvaluator {
    catalog: Arc<dyn CatalogGateway>,
    bookings: Arc<dyn BookingRepository>,
    policy: ConflictPolicy,
    timeout: Duration,
    fail_open: AtomicU64,
}

impl AvailabilityEvaluator {
    pub fn new(
        catalog: Arc<dyn CatalogGateway>,
        bookings: Arc<dyn BookingRepository>,
        policy: ConflictPolicy,
        timeout: Duration,
    ) -> Self {
        Self {
            catalog,
            bookings,
            policy,
            timeout,
            fail_open: AtomicU64::new(0),
        }
    }

    pub fn policy(&self) -> &ConflictPolicy {
        &self.policy
    }

    /// How many checks have been answered by the fail-open path
    pub fn fail_open_count(&self) -> u64 {
        self.fail_open.load(Ordering::Relaxed)
    }

    /// Check availability; transport failures are reported as available.
    ///
    /// Semantic store errors (not found, validation) are treated the same way,
    /// the evaluator never blocks a booking on its own failure.
    pub async fn check(&self, request: &AvailabilityRequest) -> AvailabilityResult {
        match self.try_check(request).await {
            Ok(result) => result,
            Err(e) => {
                let total = self.fail_open.fetch_add(1, Ordering::Relaxed) + 1;
                tracing::warn!(
                    target: "availability",
                    fail_open = true,
                    fail_open_total = total,
                    restaurant_id = request.restaurant_id,
                    transport = e.is_transport(),
                    error = %e,
                    "Availability check failed, treating as available"
                );
                AvailabilityResult::available(FAIL_OPEN_MESSAGE)
            }
        }
    }

    /// Check availability, surfacing store failures to the caller
    pub async fn try_check(&self, request: &AvailabilityRequest) -> StoreResult<AvailabilityResult> {
        let bookings = bounded(
            self.timeout,
            self.bookings.list_by_restaurant(request.restaurant_id),
        )
        .await?;
        let bookings: Vec<_> = bookings
            .into_iter()
            .filter(|b| b.status != BookingStatus::Cancelled)
            .collect();
        let taken = self
            .policy
            .conflicting_table_ids(&bookings, request.requested_time);

        if !request.candidate_table_ids.is_empty() {
            let mut clashes: Vec<i64> = request
                .candidate_table_ids
                .iter()
                .copied()
                .filter(|id| taken.contains(id))
                .collect();
            if !clashes.is_empty() {
                clashes.sort_unstable();
                clashes.dedup();
                tracing::debug!(
                    restaurant_id = request.restaurant_id,
                    tables = ?clashes,
                    "Candidate tables already booked"
                );
                return Ok(AvailabilityResult::conflict(
                    "Some of the selected tables are already booked at this time",
                    clashes,
                ));
            }

            let tables = bounded(self.timeout, self.catalog.list_tables(request.restaurant_id)).await?;
            let selected = tables
                .iter()
                .filter(|t| request.candidate_table_ids.contains(&t.id));
            let capacity = total_capacity(selected);
            if capacity < i64::from(request.guest_count) {
                return Ok(AvailabilityResult::unavailable(format!(
                    "Selected tables seat {capacity} guests, party of {} requested",
                    request.guest_count
                )));
            }
            return Ok(AvailabilityResult::available("Selected tables are available"));
        }

        // Auto-assign
        let tables = bounded(self.timeout, self.catalog.list_tables(request.restaurant_id)).await?;
        if tables.is_empty() {
            return Ok(AvailabilityResult::available("Tables are available"));
        }
        let free = tables.iter().filter(|t| !taken.contains(&t.id));
        let capacity = total_capacity(free);
        if capacity < i64::from(request.guest_count) {
            return Ok(AvailabilityResult::unavailable(format!(
                "Not enough free seats at this time ({capacity} free, {} requested)",
                request.guest_count
            )));
        }
        Ok(AvailabilityResult::available("Tables are available"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::utils::FixedClock;
    use chrono::TimeZone;
    use shared::StoreError;
    use shared::models::{
        Booking, BookingCreate, BookingUpdate, DiningTable, Restaurant, ServiceItem, TableStatus,
    };

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 11, 1, 9, 0, 0).unwrap()
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 11, 2, 12, 0, 0).unwrap()
    }

    fn store() -> Arc<MemoryStore> {
        let store = MemoryStore::new(Arc::new(FixedClock::new(now())), ConflictPolicy::default());
        store.insert_restaurant(Restaurant {
            id: 1,
            name: "Trattoria".into(),
            address: None,
            phone: None,
        });
        Arc::new(store)
    }

    fn table(id: i64, capacity: i32) -> DiningTable {
        DiningTable {
            id,
            restaurant_id: 1,
            name: format!("T{id}"),
            capacity,
            deposit_amount: 0.0,
            status: TableStatus::Available,
        }
    }

    fn evaluator(store: &Arc<MemoryStore>) -> AvailabilityEvaluator {
        AvailabilityEvaluator::new(
            store.clone(),
            store.clone(),
            ConflictPolicy::default(),
            Duration::from_secs(1),
        )
    }

    fn request(time: DateTime<Utc>, guests: i32, tables: Vec<i64>) -> AvailabilityRequest {
        AvailabilityRequest {
            restaurant_id: 1,
            requested_time: time,
            guest_count: guests,
            candidate_table_ids: tables,
        }
    }

    async fn book(store: &MemoryStore, time: DateTime<Utc>, tables: Vec<i64>) -> Booking {
        store
            .create(BookingCreate {
                restaurant_id: 1,
                customer_id: 7,
                booking_time: time,
                guest_count: 2,
                table_ids: tables,
                service_ids: vec![],
                deposit_amount: 0.0,
                note: String::new(),
                idempotency_key: None,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_no_tables_no_bookings_is_available() {
        let store = store();
        let eval = evaluator(&store);
        for guests in [1, 2, 20] {
            let result = eval.check(&request(t0(), guests, vec![])).await;
            assert!(result.available);
        }
    }

    #[tokio::test]
    async fn test_candidate_conflict_window() {
        let store = store();
        store.insert_table(table(5, 4));
        book(&store, t0(), vec![5]).await;
        let eval = evaluator(&store);

        let result = eval
            .check(&request(t0() + chrono::Duration::minutes(90), 2, vec![5]))
            .await;
        assert!(!result.available);
        assert_eq!(result.conflicting_tables, vec![5]);

        let result = eval
            .check(&request(t0() + chrono::Duration::minutes(150), 2, vec![5]))
            .await;
        assert!(result.available);
        assert!(result.conflicting_tables.is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_booking_frees_table() {
        let store = store();
        store.insert_table(table(5, 4));
        let booking = book(&store, t0(), vec![5]).await;
        store.cancel(booking.id).await.unwrap();

        let result = evaluator(&store).check(&request(t0(), 2, vec![5])).await;
        assert!(result.available);
    }

    #[tokio::test]
    async fn test_candidate_capacity() {
        let store = store();
        store.insert_table(table(1, 4));
        store.insert_table(table(2, 2));
        let eval = evaluator(&store);

        assert!(eval.check(&request(t0(), 6, vec![1, 2])).await.available);
        let result = eval.check(&request(t0(), 5, vec![1])).await;
        assert!(!result.available);
        assert!(result.conflicting_tables.is_empty());
    }

    #[tokio::test]
    async fn test_auto_assign_capacity() {
        let store = store();
        store.insert_table(table(1, 4));
        store.insert_table(table(2, 2));
        let eval = evaluator(&store);

        assert!(eval.check(&request(t0(), 6, vec![])).await.available);
        assert!(!eval.check(&request(t0(), 7, vec![])).await.available);
    }

    #[tokio::test]
    async fn test_auto_assign_excludes_conflicting_tables() {
        let store = store();
        store.insert_table(table(1, 4));
        store.insert_table(table(2, 2));
        book(&store, t0(), vec![1]).await;
        let eval = evaluator(&store);

        assert!(eval.check(&request(t0() + chrono::Duration::minutes(60), 2, vec![])).await.available);
        assert!(!eval.check(&request(t0() + chrono::Duration::minutes(60), 3, vec![])).await.available);
        // Next day, table 1 is free again
        assert!(eval.check(&request(t0() + chrono::Duration::days(1), 6, vec![])).await.available);
    }

    #[tokio::test]
    async fn test_auto_assign_booking_does_not_block_tables() {
        let store = store();
        store.insert_table(table(1, 4));
        book(&store, t0(), vec![]).await;

        let result = evaluator(&store).check(&request(t0(), 4, vec![1])).await;
        assert!(result.available);
    }

    /// Repository that always fails to answer
    struct Unreachable;

    #[async_trait::async_trait]
    impl BookingRepository for Unreachable {
        async fn create(&self, _: BookingCreate) -> StoreResult<Booking> {
            Err(StoreError::Transport("connection refused".into()))
        }
        async fn get_by_id(&self, _: i64) -> StoreResult<Booking> {
            Err(StoreError::Transport("connection refused".into()))
        }
        async fn replace(&self, _: Booking) -> StoreResult<Booking> {
            Err(StoreError::Transport("connection refused".into()))
        }
        async fn list_by_restaurant(&self, _: i64) -> StoreResult<Vec<Booking>> {
            Err(StoreError::Transport("connection refused".into()))
        }
        async fn list_by_customer(&self, _: i64) -> StoreResult<Vec<Booking>> {
            Err(StoreError::Transport("connection refused".into()))
        }
        async fn update(&self, _: i64, _: BookingUpdate) -> StoreResult<Booking> {
            Err(StoreError::Transport("connection refused".into()))
        }
    }

    /// Catalog that never answers
    struct Stalled;

    #[async_trait::async_trait]
    impl CatalogGateway for Stalled {
        async fn get_restaurant(&self, _: i64) -> StoreResult<Restaurant> {
            std::future::pending().await
        }
        async fn list_tables(&self, _: i64) -> StoreResult<Vec<DiningTable>> {
            std::future::pending().await
        }
        async fn list_services(&self, _: i64) -> StoreResult<Vec<ServiceItem>> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_transport_failure_fails_open() {
        let store = store();
        let eval = AvailabilityEvaluator::new(
            store,
            Arc::new(Unreachable),
            ConflictPolicy::default(),
            Duration::from_secs(1),
        );
        let req = request(t0(), 20, vec![1]);

        assert!(eval.try_check(&req).await.unwrap_err().is_transport());
        let result = eval.check(&req).await;
        assert!(result.available);
        assert_eq!(result.message, FAIL_OPEN_MESSAGE);
        assert_eq!(eval.fail_open_count(), 1);
    }

    #[tokio::test]
    async fn test_stalled_catalog_times_out_and_fails_open() {
        let store = store();
        let eval = AvailabilityEvaluator::new(
            Arc::new(Stalled),
            store,
            ConflictPolicy::default(),
            Duration::from_millis(20),
        );
        let req = request(t0(), 2, vec![]);

        let err = eval.try_check(&req).await.unwrap_err();
        assert_eq!(err, StoreError::Timeout(20));
        assert!(eval.check(&req).await.available);
        assert_eq!(eval.fail_open_count(), 1);
    }
}
