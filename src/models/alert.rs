use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{ContraindicationCondition, ContraindicationSeverity, RedFlagSymptom};

/// One detected or declared contraindication for one client.
///
/// `is_resolved` and `resolved_date` move together: an alert is either open
/// with no resolution date, or resolved with one. Alerts are never deleted;
/// resolving keeps the record for the audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContraindicationAlert {
    pub id: Uuid,
    pub client_id: Uuid,
    pub condition: ContraindicationCondition,
    /// Usually the condition's default; a clinician may override it.
    pub severity: ContraindicationSeverity,
    pub detected_date: NaiveDateTime,
    pub notes: String,
    pub action_taken: Option<String>,
    pub is_resolved: bool,
    pub resolved_date: Option<NaiveDateTime>,
}

impl ContraindicationAlert {
    /// New open alert carrying the condition's default severity.
    pub fn new(client_id: Uuid, condition: ContraindicationCondition, notes: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_id,
            condition,
            severity: condition.default_severity(),
            detected_date: chrono::Local::now().naive_local(),
            notes: notes.into(),
            action_taken: None,
            is_resolved: false,
            resolved_date: None,
        }
    }

    /// Clinical override of the default severity.
    pub fn with_severity(mut self, severity: ContraindicationSeverity) -> Self {
        self.severity = severity;
        self
    }

    /// Copy of this alert marked resolved at `resolved_at`.
    pub fn resolved(&self, action_taken: &str, resolved_at: NaiveDateTime) -> Self {
        Self {
            action_taken: Some(action_taken.to_string()),
            is_resolved: true,
            resolved_date: Some(resolved_at),
            ..self.clone()
        }
    }

    pub fn is_active(&self) -> bool {
        !self.is_resolved
    }
}

/// A point-in-time emergent symptom recorded by a clinician.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedFlagAlert {
    pub id: Uuid,
    pub client_id: Uuid,
    pub symptom: RedFlagSymptom,
    pub detected_date: NaiveDateTime,
    pub notes: String,
    pub referral_made: bool,
    pub referral_details: Option<String>,
}

impl RedFlagAlert {
    pub fn new(client_id: Uuid, symptom: RedFlagSymptom, notes: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_id,
            symptom,
            detected_date: chrono::Local::now().naive_local(),
            notes: notes.into(),
            referral_made: false,
            referral_details: None,
        }
    }
}
