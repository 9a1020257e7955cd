use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::enums::{RedFlagSymptom, Urgency};
use crate::models::RedFlagAlert;

/// A red flag still waiting for the client to be referred on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferralAction {
    pub alert_id: Uuid,
    pub client_id: Uuid,
    pub symptom: RedFlagSymptom,
    pub urgency: Urgency,
    pub detected_date: NaiveDateTime,
    /// Text shown to the therapist.
    pub recommended_action: String,
    /// True for emergencies: the session must end now.
    pub stop_session: bool,
}

/// Referral handler for unreferred red flags.
pub struct ReferralProtocol;

impl ReferralProtocol {
    /// Unreferred red flags as a worklist, most urgent first, then oldest first.
    pub fn pending_referrals(alerts: &[RedFlagAlert]) -> Vec<ReferralAction> {
        let mut actions: Vec<ReferralAction> = alerts
            .iter()
            .filter(|a| !a.referral_made)
            .map(|alert| {
                let urgency = alert.symptom.urgency();
                ReferralAction {
                    alert_id: alert.id,
                    client_id: alert.client_id,
                    symptom: alert.symptom,
                    urgency,
                    detected_date: alert.detected_date,
                    recommended_action: urgency.recommended_action().to_string(),
                    stop_session: urgency == Urgency::Emergency,
                }
            })
            .collect();

        actions.sort_by(|a, b| {
            b.urgency
                .cmp(&a.urgency)
                .then_with(|| a.detected_date.cmp(&b.detected_date))
        });
        actions
    }
}
