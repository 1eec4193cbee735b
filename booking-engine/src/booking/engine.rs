//! Booking engine
//!
//! Holds the collaborators (catalog, booking store, clock) and hands out
//! wizards and availability checks that share them.

use std::sync::Arc;
use std::time::Duration;

use chrono_tz::Tz;
use shared::{BookingRepository, CatalogGateway};

use super::availability::{AvailabilityEvaluator, AvailabilityRequest, AvailabilityResult};
use super::conflict::ConflictPolicy;
use super::draft::{BookingDraft, BookingWizard, WizardError};
use crate::core::Config;
use crate::utils::{Clock, SystemClock};

#[derive(Clone)]
pub struct BookingEngine {
    pub(crate) catalog: Arc<dyn CatalogGateway>,
    pub(crate) bookings: Arc<dyn BookingRepository>,
    pub(crate) evaluator: Arc<AvailabilityEvaluator>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) timeout: Duration,
}

impl BookingEngine {
    pub fn new(
        catalog: Arc<dyn CatalogGateway>,
        bookings: Arc<dyn BookingRepository>,
        clock: Arc<dyn Clock>,
        timezone: Tz,
        timeout: Duration,
    ) -> Self {
        let evaluator = AvailabilityEvaluator::new(
            catalog.clone(),
            bookings.clone(),
            ConflictPolicy::new(timezone),
            timeout,
        );
        Self {
            catalog,
            bookings,
            evaluator: Arc::new(evaluator),
            clock,
            timeout,
        }
    }

    /// Engine on the system clock, timezone and timeout from config
    pub fn from_config(
        catalog: Arc<dyn CatalogGateway>,
        bookings: Arc<dyn BookingRepository>,
        config: &Config,
    ) -> Self {
        Self::new(
            catalog,
            bookings,
            Arc::new(SystemClock),
            config.timezone(),
            config.request_timeout(),
        )
    }

    pub fn timezone(&self) -> Tz {
        self.evaluator.policy().timezone()
    }

    pub fn evaluator(&self) -> &AvailabilityEvaluator {
        &self.evaluator
    }

    pub fn bookings(&self) -> &Arc<dyn BookingRepository> {
        &self.bookings
    }

    pub async fn check_availability(&self, request: &AvailabilityRequest) -> AvailabilityResult {
        self.evaluator.check(request).await
    }

    /// Open a wizard for `draft.restaurant_id`, loading the catalog
    pub async fn open_wizard(&self, draft: BookingDraft) -> Result<BookingWizard, WizardError> {
        BookingWizard::open(self.clone(), draft).await
    }
}
