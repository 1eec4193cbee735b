//! Booking rules
//!
//! Limits shared by the wizard (client-side validation) and the store
//! (server-side validation of create/update payloads).

use chrono::{Duration, NaiveTime};

use crate::error::{AppError, ErrorCode};
use crate::models::BookingCreate;

// ── Limits ──────────────────────────────────────────────────────────

/// Smallest party that can book
pub const MIN_GUESTS: i32 = 1;

/// Largest party that can book
pub const MAX_GUESTS: i32 = 20;

/// A booking must start at least this many minutes after "now"
pub const TIME_BUFFER_MINUTES: i64 = 30;

/// Manual deposit lower bound
pub const MIN_DEPOSIT: f64 = 0.0;

/// Notes (special requests) upper bound, in characters
pub const MAX_NOTE_LENGTH: usize = 500;

/// Two bookings on the same date closer than this are treated as overlapping
pub const CONFLICT_WINDOW_MINUTES: i64 = 120;

// ── Time slots ──────────────────────────────────────────────────────

/// First bookable slot (11:00)
const FIRST_SLOT_MINUTES: u32 = 11 * 60;
/// Last bookable slot (22:30)
const LAST_SLOT_MINUTES: u32 = 22 * 60 + 30;
/// Slot granularity
const SLOT_STEP_MINUTES: u32 = 30;

pub fn conflict_window() -> Duration {
    Duration::minutes(CONFLICT_WINDOW_MINUTES)
}

pub fn time_buffer() -> Duration {
    Duration::minutes(TIME_BUFFER_MINUTES)
}

/// Bookable times of day: 11:00, 11:30, ..., 22:30
pub fn time_slots() -> Vec<NaiveTime> {
    (FIRST_SLOT_MINUTES..=LAST_SLOT_MINUTES)
        .step_by(SLOT_STEP_MINUTES as usize)
        .filter_map(|m| NaiveTime::from_hms_opt(m / 60, m % 60, 0))
        .collect()
}

/// Whether `time` is exactly one of [`time_slots`]
pub fn is_valid_time_slot(time: NaiveTime) -> bool {
    use chrono::Timelike;
    if time.second() != 0 || time.nanosecond() != 0 {
        return false;
    }
    let minutes = time.hour() * 60 + time.minute();
    (FIRST_SLOT_MINUTES..=LAST_SLOT_MINUTES).contains(&minutes)
        && (minutes - FIRST_SLOT_MINUTES) % SLOT_STEP_MINUTES == 0
}

// ── Validation helpers ──────────────────────────────────────────────

pub fn is_guest_count_in_range(guest_count: i32) -> bool {
    (MIN_GUESTS..=MAX_GUESTS).contains(&guest_count)
}

/// Length in characters, not bytes
pub fn note_length(note: &str) -> usize {
    note.chars().count()
}

/// Server-side checks on a create payload.
///
/// The time buffer is enforced by the wizard against its own clock; the store
/// only checks what does not depend on "now".
pub fn validate_booking_create(data: &BookingCreate) -> Result<(), AppError> {
    validate_booking_fields(data.guest_count, data.deposit_amount, &data.note)
}

/// Field checks shared by create and full replacement
pub fn validate_booking_fields(guest_count: i32, deposit_amount: f64, note: &str) -> Result<(), AppError> {
    if !is_guest_count_in_range(guest_count) {
        return Err(AppError::with_message(
            ErrorCode::GuestCountOutOfRange,
            format!(
                "guest_count must be between {MIN_GUESTS} and {MAX_GUESTS}, got {}",
                guest_count
            ),
        )
        .with_detail("field", "guest_count"));
    }
    if !deposit_amount.is_finite() || deposit_amount < MIN_DEPOSIT {
        return Err(AppError::with_message(
            ErrorCode::InvalidDeposit,
            format!("deposit_amount must be >= {MIN_DEPOSIT}, got {deposit_amount}"),
        )
        .with_detail("field", "deposit_amount"));
    }
    let len = note_length(note);
    if len > MAX_NOTE_LENGTH {
        return Err(AppError::with_message(
            ErrorCode::NoteTooLong,
            format!("note is too long ({len} chars, max {MAX_NOTE_LENGTH})"),
        )
        .with_detail("field", "note"));
    }
    Ok(())
}
