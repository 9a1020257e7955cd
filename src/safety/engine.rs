use uuid::Uuid;

use crate::db::AlertRepository;
use crate::models::{ContraindicationAlert, RedFlagAlert};

use super::detection::detect_contraindications;
use super::gate::can_proceed;
use super::referral::{ReferralAction, ReferralProtocol};
use super::statistics::{contraindication_statistics, red_flag_statistics};
use super::store::AlertStore;
use super::types::{
    ContraindicationStatistics, RedFlagStatistics, SafetyError, SafetyGateDecision,
    ScreeningResult,
};

/// Wires the detector, alert store, safety gate and statistics together.
/// The store is owned here and handed to every consumer by reference.
pub struct SafetyEngine<R: AlertRepository> {
    pub(crate) store: AlertStore<R>,
}

impl<R: AlertRepository> SafetyEngine<R> {
    pub fn new(store: AlertStore<R>) -> Self {
        Self { store }
    }

    /// Engine over the repository's existing alerts.
    pub fn load(repository: R) -> Result<Self, SafetyError> {
        Ok(Self::new(AlertStore::load(repository)?))
    }

    pub fn store(&self) -> &AlertStore<R> {
        &self.store
    }

    /// Detect contraindications from intake text, store them, and report
    /// whether the client may be treated.
    ///
    /// Not atomic: when a store write fails, alerts added before it stay
    /// stored and the error is returned. Detection does not deduplicate, so a
    /// retry stores those alerts again.
    pub fn screen_client<S: AsRef<str>>(
        &self,
        client_id: &Uuid,
        conditions: &[S],
        medications: &[S],
    ) -> Result<ScreeningResult, SafetyError> {
        let candidates = detect_contraindications(conditions, medications, *client_id);

        let mut new_alerts = Vec::with_capacity(candidates.len());
        for alert in candidates {
            if let Err(e) = self.store.add(alert.clone()) {
                tracing::error!(
                    client_id = %client_id,
                    stored = new_alerts.len(),
                    condition = alert.condition.as_str(),
                    error = %e,
                    "Client screening aborted"
                );
                return Err(e);
            }
            new_alerts.push(alert);
        }

        let decision = can_proceed(&self.store, client_id)?;

        tracing::info!(
            client_id = %client_id,
            conditions = conditions.len(),
            medications = medications.len(),
            stored = new_alerts.len(),
            allowed = decision.allowed,
            "Client screening complete"
        );

        Ok(ScreeningResult {
            client_id: *client_id,
            new_alerts,
            decision,
        })
    }

    /// Manually entered contraindication (e.g. declared by the therapist).
    pub fn record_contraindication(&self, alert: ContraindicationAlert) -> Result<(), SafetyError> {
        self.store.add(alert)
    }

    pub fn record_red_flag(&self, alert: RedFlagAlert) -> Result<(), SafetyError> {
        self.store.add_red_flag(alert)
    }

    pub fn resolve(
        &self,
        alert_id: &Uuid,
        action_taken: &str,
    ) -> Result<ContraindicationAlert, SafetyError> {
        self.store.resolve(alert_id, action_taken)
    }

    pub fn record_referral(
        &self,
        alert_id: &Uuid,
        referral_details: &str,
    ) -> Result<RedFlagAlert, SafetyError> {
        self.store.record_referral(alert_id, referral_details)
    }

    pub fn can_proceed(&self, client_id: &Uuid) -> Result<SafetyGateDecision, SafetyError> {
        can_proceed(&self.store, client_id)
    }

    pub fn pending_referrals(&self) -> Result<Vec<ReferralAction>, SafetyError> {
        Ok(ReferralProtocol::pending_referrals(&self.store.all_red_flags()?))
    }

    pub fn contraindication_statistics(&self) -> Result<ContraindicationStatistics, SafetyError> {
        Ok(contraindication_statistics(&self.store.all_contraindications()?))
    }

    pub fn red_flag_statistics(&self) -> Result<RedFlagStatistics, SafetyError> {
        Ok(red_flag_statistics(&self.store.all_red_flags()?))
    }
}
