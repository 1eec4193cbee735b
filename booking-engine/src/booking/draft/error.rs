use shared::StoreError;
use thiserror::Error;

use super::form::FieldErrors;
use super::step::WizardStep;

/// Wizard errors
///
/// Everything except `NotFound` is recoverable inside the wizard: the draft
/// is kept and the customer can edit or retry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WizardError {
    /// Field-scoped validation failed; the same errors are stored on the draft
    #[error("Please fix the highlighted fields")]
    Validation(FieldErrors),

    /// The restaurant cannot seat the party as requested
    #[error("{0}")]
    Unavailable(String),

    /// Submission requires a passed availability check
    #[error("Availability has not been checked for the current details")]
    AvailabilityRequired,

    /// The store rejected or failed the create call
    #[error("{0}")]
    Submission(String),

    #[error("Cannot {action} from step {step}")]
    InvalidTransition { step: WizardStep, action: &'static str },

    /// Referenced restaurant does not exist; leave the wizard
    #[error("{0}")]
    NotFound(String),

    /// Catalog could not be loaded
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for WizardError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(msg) => Self::NotFound(msg),
            other => Self::Store(other),
        }
    }
}
