//! Step validation
//!
//! Pure functions over the draft; each returns the field errors found (empty
//! when the step passes). They never touch the network.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use shared::models::{DiningTable, total_capacity};
use shared::rules::{
    self, MAX_GUESTS, MAX_NOTE_LENGTH, MIN_DEPOSIT, MIN_GUESTS, TIME_BUFFER_MINUTES,
};

use super::form::{BookingDraft, DraftField, FieldErrors};
use crate::utils::time::{local_date, local_to_utc, parse_date, parse_time};

/// Fields each validation pass owns; a pass replaces their errors
pub const DETAILS_FIELDS: &[DraftField] = &[DraftField::GuestCount, DraftField::Date, DraftField::Time];
pub const TABLES_FIELDS: &[DraftField] = &[DraftField::Tables];
pub const CONFIRM_FIELDS: &[DraftField] = &[
    DraftField::GuestCount,
    DraftField::Date,
    DraftField::Time,
    DraftField::DepositAmount,
    DraftField::Note,
];

/// Step 1: guests, date, time
pub fn validate_details(draft: &BookingDraft, now: DateTime<Utc>, tz: Tz) -> FieldErrors {
    let mut errors = FieldErrors::new();

    match draft.parsed_guest_count() {
        _ if draft.guest_count.trim().is_empty() => {
            errors.insert(DraftField::GuestCount, "Number of guests is required".into());
        }
        None => {
            errors.insert(DraftField::GuestCount, "Number of guests must be a whole number".into());
        }
        Some(n) if !rules::is_guest_count_in_range(n) => {
            errors.insert(
                DraftField::GuestCount,
                format!("Number of guests must be between {MIN_GUESTS} and {MAX_GUESTS}"),
            );
        }
        Some(_) => {}
    }

    let today = local_date(now, tz);
    let date = if draft.date.trim().is_empty() {
        errors.insert(DraftField::Date, "Date is required".into());
        None
    } else {
        match parse_date(&draft.date) {
            None => {
                errors.insert(DraftField::Date, "Date must be YYYY-MM-DD".into());
                None
            }
            Some(d) if d < today => {
                errors.insert(DraftField::Date, "Date cannot be in the past".into());
                None
            }
            Some(d) => Some(d),
        }
    };

    let time = if draft.time.trim().is_empty() {
        errors.insert(DraftField::Time, "Time is required".into());
        None
    } else {
        match parse_time(&draft.time) {
            Some(t) if rules::is_valid_time_slot(t) => Some(t),
            _ => {
                errors.insert(DraftField::Time, "Please choose one of the available time slots".into());
                None
            }
        }
    };

    if let (Some(date), Some(time)) = (date, time)
        && local_to_utc(date, time, tz) < now + rules::time_buffer()
    {
        errors.insert(
            DraftField::Time,
            format!("Bookings must be made at least {TIME_BUFFER_MINUTES} minutes in advance"),
        );
    }

    errors
}

/// Step 2: table selection against the loaded inventory
pub fn validate_tables(draft: &BookingDraft, tables: &[DiningTable]) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if tables.is_empty() {
        return errors;
    }
    let guests = i64::from(draft.parsed_guest_count().unwrap_or(0));

    if draft.table_ids.is_empty() {
        let inventory = total_capacity(tables.iter().filter(|t| t.is_selectable()));
        if inventory < guests {
            errors.insert(
                DraftField::Tables,
                format!("Not enough tables available for {guests} guests"),
            );
        }
        return errors;
    }

    let mut selected = Vec::with_capacity(draft.table_ids.len());
    for id in &draft.table_ids {
        match tables.iter().find(|t| t.id == *id) {
            Some(t) if t.is_selectable() => selected.push(t),
            Some(t) => {
                errors.insert(DraftField::Tables, format!("Table {} is not available", t.name));
                return errors;
            }
            None => {
                errors.insert(DraftField::Tables, format!("Table {id} does not exist"));
                return errors;
            }
        }
    }
    let capacity = total_capacity(selected);
    if capacity < guests {
        errors.insert(
            DraftField::Tables,
            format!("Selected tables seat {capacity} guests, please add tables for {guests}"),
        );
    }
    errors
}

/// Step 4: details again, plus deposit and note
pub fn validate_confirm(draft: &BookingDraft, now: DateTime<Utc>, tz: Tz) -> FieldErrors {
    let mut errors = validate_details(draft, now, tz);

    match draft.parsed_deposit() {
        Some(v) if v >= MIN_DEPOSIT => {}
        _ => {
            errors.insert(DraftField::DepositAmount, "Deposit must be a non-negative amount".into());
        }
    }

    if rules::note_length(&draft.note) > MAX_NOTE_LENGTH {
        errors.insert(
            DraftField::Note,
            format!("Note cannot exceed {MAX_NOTE_LENGTH} characters"),
        );
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use shared::models::TableStatus;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 11, 2, 18, 0, 0).unwrap()
    }

    fn draft(guests: &str, date: &str, time: &str) -> BookingDraft {
        let mut d = BookingDraft::new(1, 1);
        d.guest_count = guests.into();
        d.date = date.into();
        d.time = time.into();
        d
    }

    fn table(id: i64, capacity: i32, status: TableStatus) -> DiningTable {
        DiningTable {
            id,
            restaurant_id: 1,
            name: format!("T{id}"),
            capacity,
            deposit_amount: 0.0,
            status,
        }
    }

    #[test]
    fn test_guest_count_range() {
        for bad in ["0", "-1", "21", "100", "", "two", "2.5"] {
            let errors = validate_details(&draft(bad, "2026-11-03", "19:00"), now(), Tz::UTC);
            assert!(errors.contains_key(&DraftField::GuestCount), "accepted {bad:?}");
        }
        for good in ["1", "20", " 6 "] {
            let errors = validate_details(&draft(good, "2026-11-03", "19:00"), now(), Tz::UTC);
            assert!(errors.is_empty(), "rejected {good:?}: {errors:?}");
        }
    }

    #[test]
    fn test_time_buffer() {
        // now = 18:00, buffer 30 min
        let errors = validate_details(&draft("2", "2026-11-02", "18:00"), now(), Tz::UTC);
        assert!(errors.contains_key(&DraftField::Time));
        let errors = validate_details(&draft("2", "2026-11-02", "18:00"), now() - chrono::Duration::minutes(29), Tz::UTC);
        assert!(errors.contains_key(&DraftField::Time));
        let errors = validate_details(&draft("2", "2026-11-02", "18:30"), now(), Tz::UTC);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_past_date_and_slots() {
        let errors = validate_details(&draft("2", "2026-11-01", "19:00"), now(), Tz::UTC);
        assert_eq!(errors.get(&DraftField::Date).map(String::as_str), Some("Date cannot be in the past"));

        for bad in ["10:30", "23:00", "19:15", "7pm"] {
            let errors = validate_details(&draft("2", "2026-11-03", bad), now(), Tz::UTC);
            assert!(errors.contains_key(&DraftField::Time), "accepted {bad}");
        }

        let errors = validate_details(&draft("2", "", ""), now(), Tz::UTC);
        assert!(errors.contains_key(&DraftField::Date));
        assert!(errors.contains_key(&DraftField::Time));
    }

    #[test]
    fn test_today_in_business_timezone() {
        // 23:30 UTC on Nov 2 is already Nov 3 in Madrid
        let late = Utc.with_ymd_and_hms(2026, 11, 2, 23, 30, 0).unwrap();
        let errors = validate_details(&draft("2", "2026-11-02", "22:30"), late, chrono_tz::Europe::Madrid);
        assert!(errors.contains_key(&DraftField::Date));
    }

    #[test]
    fn test_tables_step() {
        let tables = vec![
            table(1, 4, TableStatus::Available),
            table(2, 2, TableStatus::Available),
            table(3, 8, TableStatus::Occupied),
        ];

        let mut d = draft("6", "2026-11-03", "19:00");
        assert!(validate_tables(&d, &tables).is_empty());

        d.guest_count = "7".into();
        assert!(validate_tables(&d, &tables).contains_key(&DraftField::Tables));

        d.table_ids = [1].into();
        d.guest_count = "4".into();
        assert!(validate_tables(&d, &tables).is_empty());
        d.guest_count = "5".into();
        assert!(validate_tables(&d, &tables).contains_key(&DraftField::Tables));

        d.table_ids = [3].into();
        assert!(validate_tables(&d, &tables).contains_key(&DraftField::Tables));
        d.table_ids = [99].into();
        assert!(validate_tables(&d, &tables).contains_key(&DraftField::Tables));

        assert!(validate_tables(&draft("20", "", ""), &[]).is_empty());
    }

    #[test]
    fn test_confirm_adds_deposit_and_note() {
        let mut d = draft("2", "2026-11-03", "19:00");
        assert!(validate_confirm(&d, now(), Tz::UTC).is_empty());

        d.deposit_amount = "-5".into();
        d.note = "x".repeat(MAX_NOTE_LENGTH + 1);
        let errors = validate_confirm(&d, now(), Tz::UTC);
        assert!(errors.contains_key(&DraftField::DepositAmount));
        assert!(errors.contains_key(&DraftField::Note));

        d.deposit_amount = "0".into();
        d.note = "é".repeat(MAX_NOTE_LENGTH);
        assert!(validate_confirm(&d, now(), Tz::UTC).is_empty());
    }
}
