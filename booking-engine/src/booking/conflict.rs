//! Conflict policy
//!
//! Two bookings conflict when they fall on the same calendar date (in the
//! business timezone) and start less than the conflict window apart.
//!
//! This approximates a seating-duration overlap. Known gaps:
//! - only start times are compared, seating length is not modelled;
//! - a 23:00 booking and a 00:30 booking the next day never conflict, even
//!   though they are 90 minutes apart.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use shared::models::{Booking, BookingStatus};
use shared::rules;

use crate::utils::time::local_date;

#[derive(Debug, Clone, Copy)]
pub struct ConflictPolicy {
    window: Duration,
    timezone: Tz,
}

impl ConflictPolicy {
    pub fn new(timezone: Tz) -> Self {
        Self {
            window: rules::conflict_window(),
            timezone,
        }
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Same local date and strictly less than the window apart
    pub fn conflicts(&self, a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
        local_date(a, self.timezone) == local_date(b, self.timezone) && (a - b).abs() < self.window
    }

    /// Non-cancelled bookings that conflict with `requested`
    pub fn conflicting_bookings<'a>(
        &self,
        bookings: &'a [Booking],
        requested: DateTime<Utc>,
    ) -> impl Iterator<Item = &'a Booking> {
        let policy = *self;
        bookings
            .iter()
            .filter(|b| b.status != BookingStatus::Cancelled)
            .filter(move |b| policy.conflicts(b.booking_time, requested))
    }

    /// Table ids held by conflicting bookings.
    ///
    /// Bookings without explicit tables (auto-assign) contribute nothing.
    pub fn conflicting_table_ids(
        &self,
        bookings: &[Booking],
        requested: DateTime<Utc>,
    ) -> BTreeSet<i64> {
        self.conflicting_bookings(bookings, requested)
            .flat_map(|b| b.table_ids.iter().copied())
            .collect()
    }
}

impl Default for ConflictPolicy {
    fn default() -> Self {
        Self::new(Tz::UTC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn booking(id: i64, time: DateTime<Utc>, tables: Vec<i64>, status: BookingStatus) -> Booking {
        Booking {
            id,
            restaurant_id: 1,
            customer_id: 1,
            booking_time: time,
            guest_count: 2,
            table_ids: tables,
            service_ids: vec![],
            deposit_amount: 0.0,
            note: String::new(),
            status,
            idempotency_key: None,
            created_at: time,
            updated_at: time,
        }
    }

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 11, 2, h, m, 0).unwrap()
    }

    #[test]
    fn test_window_is_strict() {
        let policy = ConflictPolicy::default();
        assert!(policy.conflicts(at(18, 0), at(19, 59)));
        assert!(!policy.conflicts(at(18, 0), at(20, 0)));
        assert!(policy.conflicts(at(20, 0), at(18, 30)));
    }

    #[test]
    fn test_different_dates_never_conflict() {
        let policy = ConflictPolicy::default();
        let late = Utc.with_ymd_and_hms(2026, 11, 2, 23, 30, 0).unwrap();
        let early = Utc.with_ymd_and_hms(2026, 11, 3, 0, 30, 0).unwrap();
        assert!(!policy.conflicts(late, early));
    }

    #[test]
    fn test_date_uses_business_timezone() {
        // 22:30 and 23:30 UTC share a UTC date but straddle midnight in Madrid (UTC+1)
        let policy = ConflictPolicy::new(chrono_tz::Europe::Madrid);
        let a = Utc.with_ymd_and_hms(2026, 11, 2, 22, 30, 0).unwrap();
        let b = Utc.with_ymd_and_hms(2026, 11, 2, 23, 30, 0).unwrap();
        assert!(!policy.conflicts(a, b));
        assert!(ConflictPolicy::default().conflicts(a, b));
    }

    #[test]
    fn test_conflicting_table_ids_skips_cancelled_and_auto_assign() {
        let policy = ConflictPolicy::default();
        let bookings = vec![
            booking(1, at(19, 0), vec![5], BookingStatus::Pending),
            booking(2, at(19, 30), vec![6, 7], BookingStatus::Cancelled),
            booking(3, at(19, 0), vec![], BookingStatus::Confirmed),
            booking(4, at(12, 0), vec![8], BookingStatus::Confirmed),
            booking(5, at(20, 0), vec![9], BookingStatus::Confirmed),
        ];
        let ids = policy.conflicting_table_ids(&bookings, at(20, 30));
        assert_eq!(ids.into_iter().collect::<Vec<_>>(), vec![5, 9]);
    }
}
