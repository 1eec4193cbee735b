//! Wizard steps
//!
//! `Details → Tables → Services → Confirm`, then `Submitted` once the store
//! accepted the booking. Movement is strictly linear, one step at a time.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "step", rename_all = "camelCase")]
pub enum WizardStep {
    #[default]
    Details,
    Tables,
    Services,
    Confirm,
    /// Terminal, carries the persisted booking id
    #[serde(rename_all = "camelCase")]
    Submitted { booking_id: i64 },
}

impl WizardStep {
    /// 1-based position shown to the customer (Submitted has none)
    pub fn number(&self) -> Option<u8> {
        match self {
            Self::Details => Some(1),
            Self::Tables => Some(2),
            Self::Services => Some(3),
            Self::Confirm => Some(4),
            Self::Submitted { .. } => None,
        }
    }

    /// Step reached by `next`; Confirm only leaves through submission
    pub fn forward(&self) -> Option<Self> {
        match self {
            Self::Details => Some(Self::Tables),
            Self::Tables => Some(Self::Services),
            Self::Services => Some(Self::Confirm),
            Self::Confirm | Self::Submitted { .. } => None,
        }
    }

    pub fn backward(&self) -> Option<Self> {
        match self {
            Self::Tables => Some(Self::Details),
            Self::Services => Some(Self::Tables),
            Self::Confirm => Some(Self::Services),
            Self::Details | Self::Submitted { .. } => None,
        }
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Details => "details",
            Self::Tables => "tables",
            Self::Services => "services",
            Self::Confirm => "confirm",
            Self::Submitted { .. } => "submitted",
        }
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
