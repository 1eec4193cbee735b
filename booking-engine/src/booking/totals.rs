//! Booking totals using rust_decimal for precision
//!
//! All sums are done using `Decimal` internally, then converted to `f64`
//! (rounded to 2 decimal places) for serialization.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use shared::models::{DiningTable, ServiceItem};

/// Rounding strategy for monetary values (2 decimal places, half away from zero)
const DECIMAL_PLACES: u32 = 2;

/// Amounts due for a booking draft
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingTotals {
    /// Σ deposit of the selected tables
    pub tables_deposit: f64,
    /// Σ price of the selected services
    pub services_total: f64,
    /// Manual deposit entered by the customer
    pub manual_deposit: f64,
    /// tables_deposit + manual_deposit (what is charged up front)
    pub total_deposit: f64,
    /// total_deposit + services_total
    pub total_amount: f64,
}

/// Convert f64 to Decimal, non-finite values count as zero
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in booking total, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Compute totals for a selection. Pure; call again whenever selection,
/// manual deposit or catalog data changes.
pub fn calculate_totals<'a, 'b>(
    selected_tables: impl IntoIterator<Item = &'a DiningTable>,
    selected_services: impl IntoIterator<Item = &'b ServiceItem>,
    manual_deposit: f64,
) -> BookingTotals {
    let tables_deposit: Decimal = selected_tables
        .into_iter()
        .map(|t| to_decimal(t.deposit_amount))
        .sum();
    let services_total: Decimal = selected_services
        .into_iter()
        .map(|s| to_decimal(s.price))
        .sum();
    let manual = to_decimal(manual_deposit);
    let total_deposit = tables_deposit + manual;
    let total_amount = total_deposit + services_total;

    BookingTotals {
        tables_deposit: to_f64(tables_deposit),
        services_total: to_f64(services_total),
        manual_deposit: to_f64(manual),
        total_deposit: to_f64(total_deposit),
        total_amount: to_f64(total_amount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::TableStatus;

    fn table(id: i64, deposit: f64) -> DiningTable {
        DiningTable {
            id,
            restaurant_id: 1,
            name: format!("T{id}"),
            capacity: 4,
            deposit_amount: deposit,
            status: TableStatus::Available,
        }
    }

    fn service(id: i64, price: f64) -> ServiceItem {
        ServiceItem {
            id,
            restaurant_id: 1,
            name: format!("S{id}"),
            price,
            category: None,
            description: None,
        }
    }

    #[test]
    fn test_totals_formula() {
        let tables = [table(1, 10.0), table(2, 15.5)];
        let services = [service(1, 30.0), service(2, 12.25)];
        let totals = calculate_totals(&tables, &services, 5.0);
        assert_eq!(totals.tables_deposit, 25.5);
        assert_eq!(totals.services_total, 42.25);
        assert_eq!(totals.manual_deposit, 5.0);
        assert_eq!(totals.total_deposit, 30.5);
        assert_eq!(totals.total_amount, 72.75);
    }

    #[test]
    fn test_empty_selection_is_manual_deposit_only() {
        let totals = calculate_totals(&[], &[], 0.0);
        assert_eq!(totals, BookingTotals::default());

        let totals = calculate_totals(&[], &[], 8.0);
        assert_eq!(totals.total_deposit, 8.0);
        assert_eq!(totals.total_amount, 8.0);
    }

    #[test]
    fn test_decimal_precision() {
        // 0.1 + 0.2 in f64 is 0.30000000000000004
        let services = [service(1, 0.1), service(2, 0.2)];
        let totals = calculate_totals(&[], &services, 0.0);
        assert_eq!(totals.services_total, 0.3);
    }

    #[test]
    fn test_idempotent() {
        let tables = [table(1, 10.0)];
        let services = [service(1, 30.0)];
        let first = calculate_totals(&tables, &services, 2.0);
        let second = calculate_totals(&tables, &services, 2.0);
        assert_eq!(first, second);
    }

    #[test]
    fn test_service_price_change_touches_only_service_sums() {
        let tables = [table(1, 10.0)];
        let before = calculate_totals(&tables, &[service(1, 30.0)], 2.0);
        let after = calculate_totals(&tables, &[service(1, 45.0)], 2.0);
        assert_eq!(before.tables_deposit, after.tables_deposit);
        assert_eq!(before.total_deposit, after.total_deposit);
        assert_ne!(before.services_total, after.services_total);
        assert_eq!(after.total_amount - before.total_amount, 15.0);
    }

    #[test]
    fn test_non_finite_counts_as_zero() {
        let totals = calculate_totals(&[table(1, f64::NAN)], &[], 0.0);
        assert_eq!(totals.tables_deposit, 0.0);
    }
}
