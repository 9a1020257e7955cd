//! Dashboard reductions over alert collections. Pure functions, no state.

use std::collections::BTreeMap;

use crate::models::enums::{ContraindicationSeverity, Urgency};
use crate::models::{ContraindicationAlert, RedFlagAlert};

use super::types::{ContraindicationStatistics, RedFlagStatistics, SeverityCounts};

pub fn contraindication_statistics(alerts: &[ContraindicationAlert]) -> ContraindicationStatistics {
    let mut by_severity = SeverityCounts::default();
    let mut by_category: BTreeMap<String, usize> = BTreeMap::new();
    let mut active = 0;

    for alert in alerts {
        match alert.severity {
            ContraindicationSeverity::Absolute => by_severity.absolute += 1,
            ContraindicationSeverity::Local => by_severity.local += 1,
            ContraindicationSeverity::Caution => by_severity.caution += 1,
            ContraindicationSeverity::Modified => by_severity.modified += 1,
        }

        if alert.is_active() {
            active += 1;
            *by_category
                .entry(alert.condition.category().display_name().to_string())
                .or_default() += 1;
        }
    }

    ContraindicationStatistics {
        total: alerts.len(),
        active,
        resolved: alerts.len() - active,
        by_severity,
        by_category,
    }
}

pub fn red_flag_statistics(alerts: &[RedFlagAlert]) -> RedFlagStatistics {
    let count_urgency =
        |urgency: Urgency| alerts.iter().filter(|a| a.symptom.urgency() == urgency).count();

    let total = alerts.len();
    let referred = alerts.iter().filter(|a| a.referral_made).count();
    let referral_rate = if total == 0 {
        0.0
    } else {
        referred as f64 / total as f64 * 100.0
    };

    RedFlagStatistics {
        total,
        emergency: count_urgency(Urgency::Emergency),
        urgent: count_urgency(Urgency::Urgent),
        prompt: count_urgency(Urgency::Prompt),
        referred,
        referral_rate,
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::models::enums::{ContraindicationCondition, RedFlagSymptom};

    fn red_flag(symptom: RedFlagSymptom, referred: bool) -> RedFlagAlert {
        let mut flag = RedFlagAlert::new(Uuid::new_v4(), symptom, "");
        flag.referral_made = referred;
        flag
    }

    #[test]
    fn empty_red_flags_have_zero_referral_rate() {
        let stats = red_flag_statistics(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.referral_rate, 0.0);
        assert!(!stats.referral_rate.is_nan());
    }

    #[test]
    fn red_flag_counts_and_rate() {
        let flags = vec![
            red_flag(RedFlagSymptom::ChestPain, true),
            red_flag(RedFlagSymptom::ShortnessOfBreath, true),
            red_flag(RedFlagSymptom::CalfPainSwelling, true),
            red_flag(RedFlagSymptom::NightPain, false),
            red_flag(RedFlagSymptom::ChangingMole, false),
        ];
        let stats = red_flag_statistics(&flags);

        assert_eq!(stats.total, 5);
        assert_eq!(stats.emergency, 2);
        assert_eq!(stats.urgent, 1);
        assert_eq!(stats.prompt, 1);
        assert_eq!(stats.referred, 3);
        assert!((stats.referral_rate - 60.0).abs() < 1e-9);
    }

    #[test]
    fn contraindication_counts() {
        let client = Uuid::new_v4();
        let fever = ContraindicationAlert::new(client, ContraindicationCondition::Fever, "");
        let dvt = ContraindicationAlert::new(client, ContraindicationCondition::DeepVeinThrombosis, "");
        let cancer = ContraindicationAlert::new(client, ContraindicationCondition::Cancer, "");
        let arthritis = ContraindicationAlert::new(client, ContraindicationCondition::Arthritis, "")
            .resolved("cleared", chrono::Local::now().naive_local());

        let stats = contraindication_statistics(&[fever, dvt, cancer, arthritis]);

        assert_eq!(stats.total, 4);
        assert_eq!(stats.active, 3);
        assert_eq!(stats.resolved, 1);
        assert_eq!(
            stats.by_severity,
            SeverityCounts {
                absolute: 2,
                local: 0,
                caution: 1,
                modified: 1,
            }
        );
        assert_eq!(stats.by_category.get("Absolute Contraindication"), Some(&2));
        assert_eq!(stats.by_category.get("Requires Caution"), Some(&1));
        // Resolved alerts are excluded from the category breakdown.
        assert_eq!(stats.by_category.get("Modified Treatment"), None);
    }

    #[test]
    fn empty_contraindications_are_all_zero() {
        assert_eq!(
            contraindication_statistics(&[]),
            ContraindicationStatistics::default()
        );
    }

    #[test]
    fn statistics_serialize_for_dashboard() {
        let stats = red_flag_statistics(&[red_flag(RedFlagSymptom::ChestPain, false)]);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["total"], 1);
        assert_eq!(json["emergency"], 1);
        assert_eq!(json["referral_rate"], 0.0);
    }
}
