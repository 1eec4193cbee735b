//! Dining Table Model

use serde::{Deserialize, Serialize};

/// Static table status as maintained by the restaurant (桌台状态)
///
/// Only `Available` tables can be picked by a customer in the booking
/// wizard. The availability check additionally looks at overlapping
/// bookings, so an `Available` table may still be taken at a given time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableStatus {
    #[default]
    Available,
    Reserved,
    Occupied,
    Cleaning,
}

/// Dining table entity (桌台)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiningTable {
    pub id: i64,
    pub restaurant_id: i64,
    #[serde(default)]
    pub name: String,
    pub capacity: i32,
    #[serde(default)]
    pub deposit_amount: f64,
    #[serde(default)]
    pub status: TableStatus,
}

impl DiningTable {
    /// Whether a customer may select this table while drafting a booking
    pub fn is_selectable(&self) -> bool {
        self.status == TableStatus::Available
    }
}

/// Sum of seat capacity over a set of tables
pub fn total_capacity<'a>(tables: impl IntoIterator<Item = &'a DiningTable>) -> i64 {
    tables.into_iter().map(|t| i64::from(t.capacity.max(0))).sum()
}
