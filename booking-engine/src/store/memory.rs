//! In-memory booking store
//!
//! Reference implementation of both collaborator traits. Booking creation
//! checks table conflicts and inserts under the same lock, so two concurrent
//! creates for the same table and window cannot both succeed.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use shared::models::{
    Booking, BookingCreate, BookingStatus, DiningTable, Restaurant, ServiceItem, total_capacity,
};
use shared::util::snowflake_id;
use shared::{BookingRepository, CatalogGateway, StoreError, StoreResult, rules};
use uuid::Uuid;

use super::seed::CatalogSeed;
use crate::booking::ConflictPolicy;
use crate::utils::Clock;

#[derive(Debug, Default)]
struct StoreData {
    restaurants: BTreeMap<i64, Restaurant>,
    tables: BTreeMap<i64, DiningTable>,
    services: BTreeMap<i64, ServiceItem>,
    bookings: BTreeMap<i64, Booking>,
    /// idempotency key → booking id
    idempotency: HashMap<Uuid, i64>,
}

impl StoreData {
    fn bookings_of(&self, restaurant_id: i64) -> Vec<Booking> {
        self.bookings
            .values()
            .filter(|b| b.restaurant_id == restaurant_id)
            .cloned()
            .collect()
    }

    /// Explicit tables must exist, belong to the restaurant and seat the party
    fn check_tables(&self, restaurant_id: i64, table_ids: &[i64], guest_count: i32) -> StoreResult<()> {
        if table_ids.is_empty() {
            return Ok(());
        }
        let mut selected = Vec::with_capacity(table_ids.len());
        for id in table_ids {
            match self.tables.get(id) {
                Some(t) if t.restaurant_id == restaurant_id => selected.push(t),
                _ => {
                    return Err(StoreError::Validation(format!(
                        "Table {id} does not belong to restaurant {restaurant_id}"
                    )));
                }
            }
        }
        let capacity = total_capacity(selected);
        if capacity < i64::from(guest_count) {
            return Err(StoreError::Validation(format!(
                "Selected tables seat {capacity} guests, party of {guest_count} requested"
            )));
        }
        Ok(())
    }

    /// Tables of `candidate` already held by another booking in the window
    fn conflicts_for(&self, policy: &ConflictPolicy, candidate: &Booking) -> Vec<i64> {
        if candidate.table_ids.is_empty() || candidate.status == BookingStatus::Cancelled {
            return Vec::new();
        }
        let others: Vec<Booking> = self
            .bookings_of(candidate.restaurant_id)
            .into_iter()
            .filter(|b| b.id != candidate.id)
            .collect();
        let taken = policy.conflicting_table_ids(&others, candidate.booking_time);
        let clashes: BTreeSet<i64> = candidate
            .table_ids
            .iter()
            .copied()
            .filter(|id| taken.contains(id))
            .collect();
        clashes.into_iter().collect()
    }
}

pub struct MemoryStore {
    data: Mutex<StoreData>,
    clock: Arc<dyn Clock>,
    policy: ConflictPolicy,
}

impl MemoryStore {
    pub fn new(clock: Arc<dyn Clock>, policy: ConflictPolicy) -> Self {
        Self {
            data: Mutex::new(StoreData::default()),
            clock,
            policy,
        }
    }

    /// Build a store pre-populated with a catalog
    pub fn with_seed(clock: Arc<dyn Clock>, policy: ConflictPolicy, seed: CatalogSeed) -> Self {
        let store = Self::new(clock, policy);
        store.load_seed(seed);
        store
    }

    pub fn load_seed(&self, seed: CatalogSeed) {
        let mut data = self.data.lock();
        let (r, t, s) = (seed.restaurants.len(), seed.tables.len(), seed.services.len());
        data.restaurants.extend(seed.restaurants.into_iter().map(|x| (x.id, x)));
        data.tables.extend(seed.tables.into_iter().map(|x| (x.id, x)));
        data.services.extend(seed.services.into_iter().map(|x| (x.id, x)));
        tracing::info!(restaurants = r, tables = t, services = s, "Catalog seed loaded");
    }

    pub fn insert_restaurant(&self, restaurant: Restaurant) {
        self.data.lock().restaurants.insert(restaurant.id, restaurant);
    }

    pub fn insert_table(&self, table: DiningTable) {
        self.data.lock().tables.insert(table.id, table);
    }

    pub fn insert_service(&self, service: ServiceItem) {
        self.data.lock().services.insert(service.id, service);
    }

    /// Remove a catalog table (bookings referencing it are left untouched)
    pub fn remove_table(&self, id: i64) -> Option<DiningTable> {
        self.data.lock().tables.remove(&id)
    }

    pub fn booking_count(&self) -> usize {
        self.data.lock().bookings.len()
    }
}

#[async_trait]
impl CatalogGateway for MemoryStore {
    async fn get_restaurant(&self, id: i64) -> StoreResult<Restaurant> {
        self.data
            .lock()
            .restaurants
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("Restaurant {id} not found")))
    }

    async fn list_tables(&self, restaurant_id: i64) -> StoreResult<Vec<DiningTable>> {
        let data = self.data.lock();
        Ok(data
            .tables
            .values()
            .filter(|t| t.restaurant_id == restaurant_id)
            .cloned()
            .collect())
    }

    async fn list_services(&self, restaurant_id: i64) -> StoreResult<Vec<ServiceItem>> {
        let data = self.data.lock();
        Ok(data
            .services
            .values()
            .filter(|s| s.restaurant_id == restaurant_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl BookingRepository for MemoryStore {
    async fn create(&self, payload: BookingCreate) -> StoreResult<Booking> {
        rules::validate_booking_create(&payload)?;

        let mut data = self.data.lock();

        if let Some(key) = payload.idempotency_key
            && let Some(existing) = data.idempotency.get(&key).and_then(|id| data.bookings.get(id))
        {
            if !existing.matches_create(&payload) {
                tracing::warn!(booking_id = existing.id, %key, "Idempotency key reused for a different booking");
                return Err(StoreError::Validation(
                    "Idempotency key was already used for a different booking".into(),
                ));
            }
            tracing::debug!(booking_id = existing.id, %key, "Replayed create, returning existing booking");
            return Ok(existing.clone());
        }

        if !data.restaurants.contains_key(&payload.restaurant_id) {
            return Err(StoreError::NotFound(format!(
                "Restaurant {} not found",
                payload.restaurant_id
            )));
        }
        data.check_tables(payload.restaurant_id, &payload.table_ids, payload.guest_count)?;

        let mut id = snowflake_id();
        while data.bookings.contains_key(&id) {
            id = snowflake_id();
        }
        let booking = payload.into_booking(id, self.clock.now());

        let clashes = data.conflicts_for(&self.policy, &booking);
        if !clashes.is_empty() {
            tracing::info!(
                restaurant_id = booking.restaurant_id,
                tables = ?clashes,
                "Create rejected, tables already booked"
            );
            return Err(StoreError::Conflict {
                message: "Some of the selected tables are already booked at this time".into(),
                table_ids: clashes,
            });
        }

        if let Some(key) = booking.idempotency_key {
            data.idempotency.insert(key, id);
        }
        data.bookings.insert(id, booking.clone());
        tracing::info!(
            booking_id = id,
            restaurant_id = booking.restaurant_id,
            guests = booking.guest_count,
            "Booking created"
        );
        Ok(booking)
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<Booking> {
        self.data
            .lock()
            .bookings
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("Booking {id} not found")))
    }

    async fn replace(&self, mut booking: Booking) -> StoreResult<Booking> {
        rules::validate_booking_fields(booking.guest_count, booking.deposit_amount, &booking.note)?;

        let mut data = self.data.lock();
        let current = data
            .bookings
            .get(&booking.id)
            .ok_or_else(|| StoreError::NotFound(format!("Booking {} not found", booking.id)))?;

        if current.status != booking.status && !current.status.can_transition_to(booking.status) {
            return Err(StoreError::InvalidStatusTransition(format!(
                "Booking {} cannot go from {} to {}",
                booking.id, current.status, booking.status
            )));
        }

        // Server-owned fields
        booking.restaurant_id = current.restaurant_id;
        booking.created_at = current.created_at;
        booking.idempotency_key = current.idempotency_key;
        booking.updated_at = self.clock.now();

        if booking.table_ids != current.table_ids || booking.guest_count != current.guest_count {
            data.check_tables(booking.restaurant_id, &booking.table_ids, booking.guest_count)?;
        }
        let clashes = data.conflicts_for(&self.policy, &booking);
        if !clashes.is_empty() {
            return Err(StoreError::Conflict {
                message: "Some of the selected tables are already booked at this time".into(),
                table_ids: clashes,
            });
        }

        data.bookings.insert(booking.id, booking.clone());
        tracing::info!(booking_id = booking.id, status = %booking.status, "Booking updated");
        Ok(booking)
    }

    async fn list_by_restaurant(&self, restaurant_id: i64) -> StoreResult<Vec<Booking>> {
        let mut bookings = self.data.lock().bookings_of(restaurant_id);
        bookings.sort_by_key(|b| (b.booking_time, b.id));
        Ok(bookings)
    }

    async fn list_by_customer(&self, customer_id: i64) -> StoreResult<Vec<Booking>> {
        let data = self.data.lock();
        let mut bookings: Vec<Booking> = data
            .bookings
            .values()
            .filter(|b| b.customer_id == customer_id)
            .cloned()
            .collect();
        bookings.sort_by_key(|b| (b.booking_time, b.id));
        Ok(bookings)
    }
}
