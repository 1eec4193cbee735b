//! 预订核心 - availability, totals and the booking wizard
//!
//! # 模块结构
//!
//! - [`conflict`] - conflict policy (same date, 2h window)
//! - [`availability`] - can the restaurant seat this party
//! - [`totals`] - deposits and amounts due
//! - [`draft`] - the 4-step booking wizard
//! - [`engine`] - shared collaborators for the above

pub mod availability;
pub mod conflict;
pub mod draft;
pub mod engine;
pub mod totals;

use std::future::Future;
use std::time::Duration;

use shared::{StoreError, StoreResult};

pub use availability::{AvailabilityEvaluator, AvailabilityRequest, AvailabilityResult};
pub use conflict::ConflictPolicy;
pub use draft::{BookingDraft, BookingWizard, DraftEdit, DraftField, WizardError, WizardStep};
pub use engine::BookingEngine;
pub use totals::{BookingTotals, calculate_totals};

/// Run a store call with an upper bound on its duration
pub(crate) async fn bounded<T>(
    limit: Duration,
    call: impl Future<Output = StoreResult<T>>,
) -> StoreResult<T> {
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(StoreError::Timeout(limit.as_millis() as u64)),
    }
}
