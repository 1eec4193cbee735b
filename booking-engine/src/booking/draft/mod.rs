//! Booking wizard
//!
//! Drives one [`BookingDraft`] through `Details → Tables → Services →
//! Confirm → Submitted`:
//!
//! - leaving Details runs the availability check
//! - leaving Tables re-runs it if the selection changed since
//! - submitting requires a passed check and sends the draft with
//!   `total_deposit` and the draft's idempotency key
//!
//! The wizard is `&mut self` throughout, so one draft never has two calls in
//! flight.

mod error;
mod form;
mod step;
mod validation;


pub use error::WizardError;
pub use form::{BookingDraft, DraftEdit, DraftField, FieldErrors};
pub use step::WizardStep;
pub use validation::{validate_confirm, validate_details, validate_tables};

use shared::StoreError;
use shared::models::{Booking, BookingCreate, DiningTable, Restaurant, ServiceItem};

use super::availability::AvailabilityRequest;
use super::bounded;
use super::engine::BookingEngine;
use super::totals::{BookingTotals, calculate_totals};

/// Shown when the store gives no usable message
pub const SUBMISSION_FALLBACK: &str = "Could not create the booking, please try again";

pub struct BookingWizard {
    engine: BookingEngine,
    draft: BookingDraft,
    step: WizardStep,
    restaurant: Restaurant,
    tables: Vec<DiningTable>,
    services: Vec<ServiceItem>,
}

impl BookingWizard {
    /// Load restaurant, tables and services for the draft.
    ///
    /// A missing restaurant is [`WizardError::NotFound`]; the host page should
    /// leave the booking flow.
    pub async fn open(engine: BookingEngine, draft: BookingDraft) -> Result<Self, WizardError> {
        let restaurant_id = draft.restaurant_id;
        let restaurant = bounded(engine.timeout, engine.catalog.get_restaurant(restaurant_id)).await?;
        let tables = bounded(engine.timeout, engine.catalog.list_tables(restaurant_id)).await?;
        let services = bounded(engine.timeout, engine.catalog.list_services(restaurant_id)).await?;
        tracing::debug!(
            restaurant_id,
            tables = tables.len(),
            services = services.len(),
            "Booking wizard opened"
        );
        Ok(Self {
            engine,
            draft,
            step: WizardStep::Details,
            restaurant,
            tables,
            services,
        })
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn restaurant(&self) -> &Restaurant {
        &self.restaurant
    }

    pub fn tables(&self) -> &[DiningTable] {
        &self.tables
    }

    pub fn services(&self) -> &[ServiceItem] {
        &self.services
    }

    pub fn submitted_booking_id(&self) -> Option<i64> {
        match self.step {
            WizardStep::Submitted { booking_id } => Some(booking_id),
            _ => None,
        }
    }

    /// Give the draft back, e.g. to keep it across a page reload
    pub fn into_draft(self) -> BookingDraft {
        self.draft
    }

    pub fn edit(&mut self, edit: DraftEdit) -> Result<(), WizardError> {
        self.ensure_open("edit")?;
        self.draft.apply(edit);
        Ok(())
    }

    /// Current amounts, recomputed from selection, deposit field and catalog
    pub fn totals(&self) -> BookingTotals {
        let tables = self
            .tables
            .iter()
            .filter(|t| self.draft.table_ids.contains(&t.id));
        let services = self
            .services
            .iter()
            .filter(|s| self.draft.service_ids.contains(&s.id));
        let manual = self.draft.parsed_deposit().unwrap_or(0.0).max(0.0);
        calculate_totals(tables, services, manual)
    }

    /// Refresh tables and services (prices, deposits, statuses)
    pub async fn reload_catalog(&mut self) -> Result<(), WizardError> {
        let restaurant_id = self.draft.restaurant_id;
        let timeout = self.engine.timeout;
        self.tables = bounded(timeout, self.engine.catalog.list_tables(restaurant_id)).await?;
        self.services = bounded(timeout, self.engine.catalog.list_services(restaurant_id)).await?;
        Ok(())
    }

    /// Validate the current step and move forward
    pub async fn next(&mut self) -> Result<WizardStep, WizardError> {
        self.ensure_open("advance")?;
        let now = self.engine.clock.now();
        let tz = self.engine.timezone();

        match self.step {
            WizardStep::Details => {
                self.gate(
                    validation::DETAILS_FIELDS,
                    validation::validate_details(&self.draft, now, tz),
                )?;
                self.check_availability().await?;
            }
            WizardStep::Tables => {
                self.gate(
                    validation::TABLES_FIELDS,
                    validation::validate_tables(&self.draft, &self.tables),
                )?;
                if !self.draft.availability_checked {
                    self.check_availability().await?;
                }
            }
            WizardStep::Services => {}
            WizardStep::Confirm | WizardStep::Submitted { .. } => {
                return Err(WizardError::InvalidTransition {
                    step: self.step,
                    action: "advance",
                });
            }
        }

        let from = self.step;
        if let Some(to) = from.forward() {
            self.step = to;
        }
        self.draft.banner = None;
        tracing::debug!(from = %from, to = %self.step, "Wizard step");
        Ok(self.step)
    }

    pub fn back(&mut self) -> Result<WizardStep, WizardError> {
        let Some(to) = self.step.backward() else {
            return Err(WizardError::InvalidTransition {
                step: self.step,
                action: "go back",
            });
        };
        tracing::debug!(from = %self.step, to = %to, "Wizard step");
        self.step = to;
        self.draft.banner = None;
        Ok(to)
    }

    /// Create the booking. On failure the draft is kept for a retry.
    pub async fn submit(&mut self) -> Result<Booking, WizardError> {
        if self.step != WizardStep::Confirm {
            return Err(WizardError::InvalidTransition {
                step: self.step,
                action: "submit",
            });
        }
        let now = self.engine.clock.now();
        let tz = self.engine.timezone();
        self.gate(
            validation::CONFIRM_FIELDS,
            validation::validate_confirm(&self.draft, now, tz),
        )?;

        if let Some(msg) = &self.draft.availability_error {
            return Err(WizardError::Unavailable(msg.clone()));
        }
        if !self.draft.availability_checked {
            return Err(WizardError::AvailabilityRequired);
        }

        let payload = self.payload(tz)?;
        let result = bounded(self.engine.timeout, self.engine.bookings.create(payload)).await;

        match result {
            Ok(booking) => {
                tracing::info!(
                    booking_id = booking.id,
                    restaurant_id = booking.restaurant_id,
                    guests = booking.guest_count,
                    "Booking submitted"
                );
                self.step = WizardStep::Submitted { booking_id: booking.id };
                self.draft.banner = None;
                Ok(booking)
            }
            Err(StoreError::Conflict { message, table_ids }) => {
                tracing::warn!(tables = ?table_ids, "Booking submission hit a table conflict");
                self.draft.availability_error = Some(message.clone());
                self.draft.conflicting_tables = table_ids;
                self.draft.banner = Some(message.clone());
                Err(WizardError::Unavailable(message))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Booking submission failed");
                let message = submission_message(&e);
                self.draft.banner = Some(message.clone());
                Err(WizardError::Submission(message))
            }
        }
    }

    fn ensure_open(&self, action: &'static str) -> Result<(), WizardError> {
        if self.step.is_submitted() {
            return Err(WizardError::InvalidTransition {
                step: self.step,
                action,
            });
        }
        Ok(())
    }

    /// Replace the errors of `fields` with this pass's result; fail when any
    /// were found
    fn gate(&mut self, fields: &[DraftField], errors: FieldErrors) -> Result<(), WizardError> {
        self.draft.errors.retain(|field, _| !fields.contains(field));
        if errors.is_empty() {
            return Ok(());
        }
        self.draft.errors.extend(errors.clone());
        Err(WizardError::Validation(errors))
    }

    async fn check_availability(&mut self) -> Result<(), WizardError> {
        let tz = self.engine.timezone();
        let (Some(requested_time), Some(guest_count)) =
            (self.draft.booking_time(tz), self.draft.parsed_guest_count())
        else {
            // Details validation runs first, so this only guards direct misuse
            return Err(WizardError::AvailabilityRequired);
        };
        let request = AvailabilityRequest {
            restaurant_id: self.draft.restaurant_id,
            requested_time,
            guest_count,
            candidate_table_ids: self.draft.table_ids.iter().copied().collect(),
        };
        let result = self.engine.evaluator.check(&request).await;

        self.draft.availability_checked = true;
        if result.available {
            self.draft.availability_error = None;
            self.draft.conflicting_tables.clear();
            Ok(())
        } else {
            tracing::debug!(message = %result.message, "Availability check failed");
            self.draft.availability_error = Some(result.message.clone());
            self.draft.conflicting_tables = result.conflicting_tables;
            Err(WizardError::Unavailable(result.message))
        }
    }

    fn payload(&self, tz: chrono_tz::Tz) -> Result<BookingCreate, WizardError> {
        let (Some(booking_time), Some(guest_count)) =
            (self.draft.booking_time(tz), self.draft.parsed_guest_count())
        else {
            return Err(WizardError::AvailabilityRequired);
        };
        Ok(BookingCreate {
            restaurant_id: self.draft.restaurant_id,
            customer_id: self.draft.customer_id,
            booking_time,
            guest_count,
            table_ids: self.draft.table_ids.iter().copied().collect(),
            service_ids: self.draft.service_ids.iter().copied().collect(),
            deposit_amount: self.totals().total_deposit,
            note: self.draft.note.trim().to_string(),
            idempotency_key: Some(self.draft.idempotency_key),
        })
    }
}

/// User-facing text for a failed create
fn submission_message(err: &StoreError) -> String {
    match err {
        StoreError::Validation(msg) | StoreError::NotFound(msg) if !msg.is_empty() => msg.clone(),
        _ => SUBMISSION_FALLBACK.to_string(),
    }
}
