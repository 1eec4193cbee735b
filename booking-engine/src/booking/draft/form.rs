//! Booking draft
//!
//! Unpersisted form state owned by one wizard. Inputs are kept as the
//! customer typed them; parsing happens in validation.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use uuid::Uuid;

use crate::utils::time::{local_to_utc, parse_date, parse_time};

/// Draft fields that can carry a validation error
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DraftField {
    GuestCount,
    Date,
    Time,
    Tables,
    DepositAmount,
    Note,
}

pub type FieldErrors = BTreeMap<DraftField, String>;

/// A single customer edit
#[derive(Debug, Clone, PartialEq)]
pub enum DraftEdit {
    GuestCount(String),
    /// `YYYY-MM-DD`
    Date(String),
    /// `HH:MM`
    Time(String),
    ToggleTable(i64),
    /// Empty selection means auto-assign
    SetTables(Vec<i64>),
    ToggleService(i64),
    DepositAmount(String),
    Note(String),
}

impl DraftEdit {
    pub fn field(&self) -> Option<DraftField> {
        match self {
            Self::GuestCount(_) => Some(DraftField::GuestCount),
            Self::Date(_) => Some(DraftField::Date),
            Self::Time(_) => Some(DraftField::Time),
            Self::ToggleTable(_) | Self::SetTables(_) => Some(DraftField::Tables),
            Self::ToggleService(_) => None,
            Self::DepositAmount(_) => Some(DraftField::DepositAmount),
            Self::Note(_) => Some(DraftField::Note),
        }
    }

    /// Edits that change what the availability check was run against
    fn invalidates_availability(&self) -> bool {
        matches!(
            self,
            Self::GuestCount(_)
                | Self::Date(_)
                | Self::Time(_)
                | Self::ToggleTable(_)
                | Self::SetTables(_)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    pub restaurant_id: i64,
    pub customer_id: i64,
    pub guest_count: String,
    pub date: String,
    pub time: String,
    pub table_ids: BTreeSet<i64>,
    pub service_ids: BTreeSet<i64>,
    pub deposit_amount: String,
    pub note: String,

    pub errors: FieldErrors,
    pub availability_checked: bool,
    pub availability_error: Option<String>,
    pub conflicting_tables: Vec<i64>,
    /// Step-level message (submission failures)
    pub banner: Option<String>,
    /// Sent with the create call so a retried submission cannot double-book
    pub idempotency_key: Uuid,
}

impl BookingDraft {
    pub fn new(restaurant_id: i64, customer_id: i64) -> Self {
        Self {
            restaurant_id,
            customer_id,
            guest_count: String::new(),
            date: String::new(),
            time: String::new(),
            table_ids: BTreeSet::new(),
            service_ids: BTreeSet::new(),
            deposit_amount: String::new(),
            note: String::new(),
            errors: FieldErrors::new(),
            availability_checked: false,
            availability_error: None,
            conflicting_tables: Vec::new(),
            banner: None,
            idempotency_key: Uuid::new_v4(),
        }
    }

    /// Pre-select tables picked on a previous screen
    pub fn with_tables(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.table_ids.extend(ids);
        self
    }

    /// Pre-select services picked on a previous screen
    pub fn with_services(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.service_ids.extend(ids);
        self
    }

    /// Apply an edit. The edited field's error is cleared without re-validating.
    ///
    /// Any edit that changes the draft gets a new idempotency key, so a create
    /// that already reached the store under the old key is never replayed for
    /// a different booking.
    pub fn apply(&mut self, edit: DraftEdit) {
        if let Some(field) = edit.field() {
            self.errors.remove(&field);
        }
        if edit.invalidates_availability() {
            self.reset_availability();
        }
        let changed = match edit {
            DraftEdit::GuestCount(v) => set_if_changed(&mut self.guest_count, v),
            DraftEdit::Date(v) => set_if_changed(&mut self.date, v),
            DraftEdit::Time(v) => set_if_changed(&mut self.time, v),
            DraftEdit::ToggleTable(id) => {
                toggle(&mut self.table_ids, id);
                true
            }
            DraftEdit::SetTables(ids) => set_if_changed(&mut self.table_ids, ids.into_iter().collect()),
            DraftEdit::ToggleService(id) => {
                toggle(&mut self.service_ids, id);
                true
            }
            DraftEdit::DepositAmount(v) => set_if_changed(&mut self.deposit_amount, v),
            DraftEdit::Note(v) => set_if_changed(&mut self.note, v),
        };
        if changed {
            self.idempotency_key = Uuid::new_v4();
        }
    }

    pub fn reset_availability(&mut self) {
        self.availability_checked = false;
        self.availability_error = None;
        self.conflicting_tables.clear();
    }

    pub fn parsed_guest_count(&self) -> Option<i32> {
        self.guest_count.trim().parse().ok()
    }

    /// Manual deposit; blank means zero, `None` when not a number
    pub fn parsed_deposit(&self) -> Option<f64> {
        let raw = self.deposit_amount.trim();
        if raw.is_empty() {
            return Some(0.0);
        }
        raw.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    /// Requested instant, if date and time both parse
    pub fn booking_time(&self, tz: Tz) -> Option<DateTime<Utc>> {
        let date = parse_date(&self.date)?;
        let time = parse_time(&self.time)?;
        Some(local_to_utc(date, time, tz))
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

fn set_if_changed<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

fn toggle(ids: &mut BTreeSet<i64>, id: i64) {
    if !ids.remove(&id) {
        ids.insert(id);
    }
}
