use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::ContraindicationAlert;

// ---------------------------------------------------------------------------
// SafetyGateDecision
// ---------------------------------------------------------------------------

/// Outcome of the pre-session safety check for one client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyGateDecision {
    pub allowed: bool,
    /// Active absolute contraindications; empty exactly when `allowed`.
    pub blocking_alerts: Vec<ContraindicationAlert>,
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub absolute: usize,
    pub local: usize,
    pub caution: usize,
    pub modified: usize,
}

impl SeverityCounts {
    pub fn total(&self) -> usize {
        self.absolute + self.local + self.caution + self.modified
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContraindicationStatistics {
    pub total: usize,
    pub active: usize,
    pub resolved: usize,
    /// Over every alert, resolved ones included.
    pub by_severity: SeverityCounts,
    /// Active alerts only, keyed by category display name.
    pub by_category: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RedFlagStatistics {
    pub total: usize,
    pub emergency: usize,
    pub urgent: usize,
    pub prompt: usize,
    pub referred: usize,
    /// Percentage of red flags that were referred; 0 when there are none.
    pub referral_rate: f64,
}

// ---------------------------------------------------------------------------
// ScreeningResult
// ---------------------------------------------------------------------------

/// Alerts produced and stored by one screening run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningResult {
    pub client_id: Uuid,
    pub new_alerts: Vec<ContraindicationAlert>,
    pub decision: SafetyGateDecision,
}

// ---------------------------------------------------------------------------
// SafetyError
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum SafetyError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Alert not found: {0}")]
    AlertNotFound(Uuid),

    #[error("Invalid alert {id}: {reason}")]
    InvalidAlert { id: Uuid, reason: String },

    #[error("Internal lock failed")]
    LockFailed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_counts_total() {
        let counts = SeverityCounts {
            absolute: 1,
            local: 2,
            caution: 3,
            modified: 0,
        };
        assert_eq!(counts.total(), 6);
    }

    #[test]
    fn not_found_message_names_alert() {
        let id = Uuid::new_v4();
        let err = SafetyError::AlertNotFound(id);
        assert_eq!(err.to_string(), format!("Alert not found: {id}"));
    }
}
