//! Booking Model
//!
//! A booking record moves through `PENDING → CONFIRMED → COMPLETED`, and can
//! be cancelled from either of the first two statuses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Booking lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    /// Cancelled and completed bookings never change again
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed)
    }

    /// Whether `self → next` is a legal lifecycle step
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed)
                | (Self::Pending, Self::Cancelled)
                | (Self::Confirmed, Self::Completed)
                | (Self::Confirmed, Self::Cancelled)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Cancelled => "CANCELLED",
            Self::Completed => "COMPLETED",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted booking entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    pub restaurant_id: i64,
    pub customer_id: i64,
    pub booking_time: DateTime<Utc>,
    pub guest_count: i32,
    /// Empty means the restaurant assigns tables itself
    #[serde(default)]
    pub table_ids: Vec<i64>,
    #[serde(default)]
    pub service_ids: Vec<i64>,
    #[serde(default)]
    pub deposit_amount: f64,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub status: BookingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Merge a partial update into this booking (read-merge-write).
    pub fn apply(&mut self, update: BookingUpdate, now: DateTime<Utc>) {
        if let Some(t) = update.booking_time {
            self.booking_time = t;
        }
        if let Some(g) = update.guest_count {
            self.guest_count = g;
        }
        if let Some(ids) = update.table_ids {
            self.table_ids = ids;
        }
        if let Some(ids) = update.service_ids {
            self.service_ids = ids;
        }
        if let Some(d) = update.deposit_amount {
            self.deposit_amount = d;
        }
        if let Some(n) = update.note {
            self.note = n;
        }
        if let Some(s) = update.status {
            self.status = s;
        }
        self.updated_at = now;
    }

    /// Whether this record is what `payload` would have created
    pub fn matches_create(&self, payload: &BookingCreate) -> bool {
        self.restaurant_id == payload.restaurant_id
            && self.customer_id == payload.customer_id
            && self.booking_time == payload.booking_time
            && self.guest_count == payload.guest_count
            && self.table_ids == payload.table_ids
            && self.service_ids == payload.service_ids
            && self.deposit_amount == payload.deposit_amount
            && self.note == payload.note
    }
}

/// Create booking payload (POST /bookings)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingCreate {
    pub restaurant_id: i64,
    pub customer_id: i64,
    pub booking_time: DateTime<Utc>,
    pub guest_count: i32,
    #[serde(default)]
    pub table_ids: Vec<i64>,
    #[serde(default)]
    pub service_ids: Vec<i64>,
    #[serde(default)]
    pub deposit_amount: f64,
    #[serde(default)]
    pub note: String,
    /// Repeating a create with the same key returns the first booking
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<Uuid>,
}

impl BookingCreate {
    /// Build the persisted record; the server assigns id, status and timestamps.
    pub fn into_booking(self, id: i64, now: DateTime<Utc>) -> Booking {
        Booking {
            id,
            restaurant_id: self.restaurant_id,
            customer_id: self.customer_id,
            booking_time: self.booking_time,
            guest_count: self.guest_count,
            table_ids: self.table_ids,
            service_ids: self.service_ids,
            deposit_amount: self.deposit_amount,
            note: self.note,
            status: BookingStatus::Pending,
            idempotency_key: self.idempotency_key,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial booking update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_ids: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_ids: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deposit_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,
}

impl BookingUpdate {
    pub fn status(status: BookingStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_create() -> BookingCreate {
        BookingCreate {
            restaurant_id: 1,
            customer_id: 7,
            booking_time: Utc.with_ymd_and_hms(2026, 11, 2, 19, 0, 0).unwrap(),
            guest_count: 4,
            table_ids: vec![5],
            service_ids: vec![],
            deposit_amount: 20.0,
            note: "Window seat".to_string(),
            idempotency_key: None,
        }
    }

    #[test]
    fn test_status_transitions() {
        use BookingStatus::*;
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Completed));
        assert!(Confirmed.can_transition_to(Cancelled));
        assert!(!Pending.can_transition_to(Completed));
        assert!(!Cancelled.can_transition_to(Confirmed));
        assert!(!Completed.can_transition_to(Cancelled));
        assert!(!Pending.can_transition_to(Pending));
        assert!(Cancelled.is_terminal());
        assert!(!Confirmed.is_terminal());
    }

    #[test]
    fn test_into_booking_sets_server_fields() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap();
        let booking = sample_create().into_booking(99, now);
        assert_eq!(booking.id, 99);
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.created_at, now);
        assert_eq!(booking.updated_at, now);
        assert_eq!(booking.table_ids, vec![5]);
    }

    #[test]
    fn test_matches_create() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap();
        let booking = sample_create().into_booking(1, now);
        assert!(booking.matches_create(&sample_create()));

        let mut other = sample_create();
        other.guest_count = 6;
        assert!(!booking.matches_create(&other));
    }

    #[test]
    fn test_apply_merges_only_present_fields() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap();
        let later = now + chrono::Duration::hours(1);
        let mut booking = sample_create().into_booking(1, now);
        booking.apply(
            BookingUpdate {
                guest_count: Some(6),
                ..Default::default()
            },
            later,
        );
        assert_eq!(booking.guest_count, 6);
        assert_eq!(booking.note, "Window seat");
        assert_eq!(booking.table_ids, vec![5]);
        assert_eq!(booking.updated_at, later);
        assert_eq!(booking.created_at, now);
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap();
        let booking = sample_create().into_booking(1, now);
        let json = serde_json::to_value(&booking).unwrap();
        assert_eq!(json["restaurantId"], 1);
        assert_eq!(json["guestCount"], 4);
        assert_eq!(json["status"], "PENDING");
        assert!(json.get("idempotencyKey").is_none());
    }
}
