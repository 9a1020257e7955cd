use std::sync::RwLock;

use uuid::Uuid;

use crate::db::AlertRepository;
use crate::models::enums::ContraindicationSeverity;
use crate::models::{ContraindicationAlert, RedFlagAlert};

use super::types::SafetyError;

/// In-memory projection of every client's safety alerts, written through to
/// an [`AlertRepository`].
///
/// Mutations hold the write lock for the whole read-modify-persist sequence,
/// so two concurrent resolves of the same alert cannot both succeed.
pub struct AlertStore<R: AlertRepository> {
    repository: R,
    contraindications: RwLock<Vec<ContraindicationAlert>>,
    red_flags: RwLock<Vec<RedFlagAlert>>,
}

impl<R: AlertRepository> AlertStore<R> {
    /// Empty projection over `repository`.
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            contraindications: RwLock::new(Vec::new()),
            red_flags: RwLock::new(Vec::new()),
        }
    }

    /// Projection primed with everything the repository already holds.
    pub fn load(repository: R) -> Result<Self, SafetyError> {
        let contraindications = repository.get_all_contraindications()?;
        let red_flags = repository.get_all_red_flags()?;

        tracing::info!(
            contraindications = contraindications.len(),
            red_flags = red_flags.len(),
            "Alert store loaded"
        );

        Ok(Self {
            repository,
            contraindications: RwLock::new(contraindications),
            red_flags: RwLock::new(red_flags),
        })
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    // -- Contraindications --------------------------------------------------

    pub fn add(&self, alert: ContraindicationAlert) -> Result<(), SafetyError> {
        check_resolution(&alert)?;
        let mut alerts = self
            .contraindications
            .write()
            .map_err(|_| SafetyError::LockFailed)?;

        self.repository.save_contraindication(&alert)?;
        alerts.push(alert);
        Ok(())
    }

    /// Replace the stored alert with the same id.
    /// Unknown ids are reported as `AlertNotFound` rather than ignored.
    pub fn update(&self, alert: ContraindicationAlert) -> Result<(), SafetyError> {
        check_resolution(&alert)?;
        let mut alerts = self
            .contraindications
            .write()
            .map_err(|_| SafetyError::LockFailed)?;

        self.replace_contraindication(&mut alerts, alert)
    }

    /// Mark an active alert resolved and return the updated record.
    pub fn resolve(
        &self,
        alert_id: &Uuid,
        action_taken: &str,
    ) -> Result<ContraindicationAlert, SafetyError> {
        let mut alerts = self
            .contraindications
            .write()
            .map_err(|_| SafetyError::LockFailed)?;

        let existing = alerts
            .iter()
            .find(|a| a.id == *alert_id && a.is_active())
            .ok_or_else(|| {
                tracing::warn!(alert_id = %alert_id, "Resolve requested for unknown or resolved alert");
                SafetyError::AlertNotFound(*alert_id)
            })?;

        let resolved = existing.resolved(action_taken, chrono::Local::now().naive_local());
        self.replace_contraindication(&mut alerts, resolved.clone())?;

        tracing::info!(
            alert_id = %alert_id,
            client_id = %resolved.client_id,
            condition = resolved.condition.as_str(),
            "Contraindication resolved"
        );

        Ok(resolved)
    }

    fn replace_contraindication(
        &self,
        alerts: &mut [ContraindicationAlert],
        alert: ContraindicationAlert,
    ) -> Result<(), SafetyError> {
        let slot = alerts
            .iter_mut()
            .find(|a| a.id == alert.id)
            .ok_or(SafetyError::AlertNotFound(alert.id))?;

        self.repository.update_contraindication(&alert)?;
        *slot = alert;
        Ok(())
    }

    /// Unresolved alerts for one client.
    pub fn active_alerts_for_client(
        &self,
        client_id: &Uuid,
    ) -> Result<Vec<ContraindicationAlert>, SafetyError> {
        let alerts = self
            .contraindications
            .read()
            .map_err(|_| SafetyError::LockFailed)?;

        Ok(alerts
            .iter()
            .filter(|a| a.client_id == *client_id && a.is_active())
            .cloned()
            .collect())
    }

    /// Unresolved alerts of severity `absolute` for one client.
    pub fn absolute_alerts_for_client(
        &self,
        client_id: &Uuid,
    ) -> Result<Vec<ContraindicationAlert>, SafetyError> {
        Ok(self
            .active_alerts_for_client(client_id)?
            .into_iter()
            .filter(|a| a.severity == ContraindicationSeverity::Absolute)
            .collect())
    }

    /// Every alert ever recorded for one client, resolved ones included.
    pub fn alerts_for_client(
        &self,
        client_id: &Uuid,
    ) -> Result<Vec<ContraindicationAlert>, SafetyError> {
        let alerts = self
            .contraindications
            .read()
            .map_err(|_| SafetyError::LockFailed)?;

        Ok(alerts
            .iter()
            .filter(|a| a.client_id == *client_id)
            .cloned()
            .collect())
    }

    pub fn all_contraindications(&self) -> Result<Vec<ContraindicationAlert>, SafetyError> {
        let alerts = self
            .contraindications
            .read()
            .map_err(|_| SafetyError::LockFailed)?;
        Ok(alerts.clone())
    }

    // -- Red flags ----------------------------------------------------------

    pub fn add_red_flag(&self, alert: RedFlagAlert) -> Result<(), SafetyError> {
        let mut flags = self.red_flags.write().map_err(|_| SafetyError::LockFailed)?;

        tracing::warn!(
            client_id = %alert.client_id,
            symptom = alert.symptom.as_str(),
            urgency = alert.symptom.urgency().as_str(),
            "Red flag recorded"
        );

        self.repository.save_red_flag(&alert)?;
        flags.push(alert);
        Ok(())
    }

    pub fn update_red_flag(&self, alert: RedFlagAlert) -> Result<(), SafetyError> {
        let mut flags = self.red_flags.write().map_err(|_| SafetyError::LockFailed)?;
        self.replace_red_flag(&mut flags, alert)
    }

    /// Record that the client was referred on for a red flag.
    pub fn record_referral(
        &self,
        alert_id: &Uuid,
        referral_details: &str,
    ) -> Result<RedFlagAlert, SafetyError> {
        let mut flags = self.red_flags.write().map_err(|_| SafetyError::LockFailed)?;

        let mut referred = flags
            .iter()
            .find(|f| f.id == *alert_id)
            .cloned()
            .ok_or(SafetyError::AlertNotFound(*alert_id))?;
        referred.referral_made = true;
        referred.referral_details = Some(referral_details.to_string());

        self.replace_red_flag(&mut flags, referred.clone())?;
        Ok(referred)
    }

    fn replace_red_flag(
        &self,
        flags: &mut [RedFlagAlert],
        alert: RedFlagAlert,
    ) -> Result<(), SafetyError> {
        let slot = flags
            .iter_mut()
            .find(|f| f.id == alert.id)
            .ok_or(SafetyError::AlertNotFound(alert.id))?;

        self.repository.update_red_flag(&alert)?;
        *slot = alert;
        Ok(())
    }

    pub fn red_flags_for_client(&self, client_id: &Uuid) -> Result<Vec<RedFlagAlert>, SafetyError> {
        let flags = self.red_flags.read().map_err(|_| SafetyError::LockFailed)?;
        Ok(flags
            .iter()
            .filter(|f| f.client_id == *client_id)
            .cloned()
            .collect())
    }

    pub fn all_red_flags(&self) -> Result<Vec<RedFlagAlert>, SafetyError> {
        let flags = self.red_flags.read().map_err(|_| SafetyError::LockFailed)?;
        Ok(flags.clone())
    }
}

/// `is_resolved` must be set exactly when `resolved_date` is.
fn check_resolution(alert: &ContraindicationAlert) -> Result<(), SafetyError> {
    let reason = match (alert.is_resolved, alert.resolved_date) {
        (true, None) => "marked resolved without a resolved date",
        (false, Some(_)) => "has a resolved date but is not marked resolved",
        _ => return Ok(()),
    };
    tracing::warn!(alert_id = %alert.id, reason, "Rejected contraindication alert");
    Err(SafetyError::InvalidAlert {
        id: alert.id,
        reason: reason.to_string(),
    })
}
