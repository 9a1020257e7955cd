use uuid::Uuid;

use crate::db::AlertRepository;

use super::store::AlertStore;
use super::types::{SafetyError, SafetyGateDecision};

/// Decide whether a session may go ahead for `client_id`.
///
/// Treatment is allowed only when the client has no active `absolute`
/// contraindication. Local, caution and modified alerts are advisory and never
/// block, however many of them are open.
pub fn can_proceed<R: AlertRepository>(
    store: &AlertStore<R>,
    client_id: &Uuid,
) -> Result<SafetyGateDecision, SafetyError> {
    let blocking_alerts = store.absolute_alerts_for_client(client_id)?;
    let allowed = blocking_alerts.is_empty();

    if !allowed {
        tracing::info!(
            client_id = %client_id,
            blocking = blocking_alerts.len(),
            "Treatment blocked by absolute contraindication"
        );
    }

    Ok(SafetyGateDecision {
        allowed,
        blocking_alerts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::SqliteAlertRepository;
    use crate::models::enums::{ContraindicationCondition, ContraindicationSeverity};
    use crate::models::ContraindicationAlert;

    fn memory_store() -> AlertStore<SqliteAlertRepository> {
        AlertStore::new(SqliteAlertRepository::open_in_memory().unwrap())
    }

    #[test]
    fn client_without_alerts_may_proceed() {
        let store = memory_store();
        let decision = can_proceed(&store, &Uuid::new_v4()).unwrap();
        assert!(decision.allowed);
        assert!(decision.blocking_alerts.is_empty());
    }

    #[test]
    fn resolving_only_absolute_alert_reopens_gate() {
        let store = memory_store();
        let client = Uuid::new_v4();
        let dvt = ContraindicationAlert::new(
            client,
            ContraindicationCondition::DeepVeinThrombosis,
            "Diagnosed last week",
        );
        let id = dvt.id;
        store.add(dvt.clone()).unwrap();

        let before = can_proceed(&store, &client).unwrap();
        assert_eq!(
            before,
            SafetyGateDecision {
                allowed: false,
                blocking_alerts: vec![dvt],
            }
        );

        store.resolve(&id, "physician clearance received").unwrap();

        let after = can_proceed(&store, &client).unwrap();
        assert_eq!(
            after,
            SafetyGateDecision {
                allowed: true,
                blocking_alerts: vec![],
            }
        );
    }

    #[test]
    fn non_absolute_alerts_never_block() {
        let store = memory_store();
        let client = Uuid::new_v4();
        for (condition, severity) in [
            (ContraindicationCondition::VaricoseVeins, ContraindicationSeverity::Local),
            (ContraindicationCondition::Cancer, ContraindicationSeverity::Caution),
            (ContraindicationCondition::Diabetes, ContraindicationSeverity::Caution),
            (ContraindicationCondition::Pregnancy, ContraindicationSeverity::Modified),
            // An absolute-category condition downgraded by a clinician.
            (ContraindicationCondition::Fever, ContraindicationSeverity::Caution),
        ] {
            store
                .add(ContraindicationAlert::new(client, condition, "").with_severity(severity))
                .unwrap();
        }

        let decision = can_proceed(&store, &client).unwrap();
        assert!(decision.allowed);
        assert!(decision.blocking_alerts.is_empty());
    }

    #[test]
    fn other_clients_absolute_alerts_do_not_block() {
        let store = memory_store();
        store
            .add(ContraindicationAlert::new(
                Uuid::new_v4(),
                ContraindicationCondition::Fever,
                "",
            ))
            .unwrap();
        assert!(can_proceed(&store, &Uuid::new_v4()).unwrap().allowed);
    }
}
