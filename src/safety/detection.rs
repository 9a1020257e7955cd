//! Keyword detection of contraindications from intake text.
//!
//! Matching is plain lower-case substring containment. Each condition line
//! maps to at most one condition: the keyword table is walked in declaration
//! order and the first keyword found wins. Absolute conditions are declared
//! first so a line naming both an absolute and a milder condition is
//! classified as absolute.

use uuid::Uuid;

use crate::models::enums::{ContraindicationCondition, ContraindicationSeverity};
use crate::models::ContraindicationAlert;

use ContraindicationCondition::*;

/// Ordered keyword table. Order is significant (first match wins).
static CONDITION_KEYWORDS: &[(&str, ContraindicationCondition)] = &[
    // Absolute
    ("fever", Fever),
    ("febrile", Fever),
    ("high temperature", Fever),
    ("contagious", ContagiousIllness),
    ("infectious", ContagiousIllness),
    ("influenza", ContagiousIllness),
    ("covid", ContagiousIllness),
    ("shingles", ContagiousIllness),
    ("impetigo", ContagiousIllness),
    ("scabies", ContagiousIllness),
    ("ringworm", ContagiousIllness),
    ("deep vein thrombosis", DeepVeinThrombosis),
    ("dvt", DeepVeinThrombosis),
    ("thrombosis", DeepVeinThrombosis),
    ("blood clot", DeepVeinThrombosis),
    ("acute inflammation", AcuteInflammation),
    ("inflamed", AcuteInflammation),
    // Local
    ("varicose", VaricoseVeins),
    ("spider veins", VaricoseVeins),
    ("open wound", OpenWound),
    ("laceration", OpenWound),
    ("sunburn", OpenWound),
    ("rash", OpenWound),
    ("surgery", RecentSurgery),
    ("post-op", RecentSurgery),
    ("operation", RecentSurgery),
    ("sprain", AcuteInjury),
    ("fracture", AcuteInjury),
    ("whiplash", AcuteInjury),
    ("bruise", AcuteInjury),
    // Requires caution
    ("cancer", Cancer),
    ("tumor", Cancer),
    ("tumour", Cancer),
    ("chemotherapy", Cancer),
    ("lymphoma", Cancer),
    ("leukemia", Cancer),
    ("leukaemia", Cancer),
    ("diabet", Diabetes),
    ("heart disease", HeartDisease),
    ("heart failure", HeartDisease),
    ("heart attack", HeartDisease),
    ("angina", HeartDisease),
    ("arrhythmia", HeartDisease),
    ("pacemaker", HeartDisease),
    ("hypertension", Hypertension),
    ("high blood pressure", Hypertension),
    ("anticoagula", BloodThinners),
    ("blood thinner", BloodThinners),
    ("osteoporosis", Osteoporosis),
    ("osteopenia", Osteoporosis),
    ("epilep", Epilepsy),
    ("seizure", Epilepsy),
    ("lupus", AutoimmuneDisorder),
    ("multiple sclerosis", AutoimmuneDisorder),
    ("autoimmune", AutoimmuneDisorder),
    ("kidney", KidneyDisease),
    // Modified treatment
    ("pregnan", Pregnancy),
    ("arthritis", Arthritis),
    ("fibromyalgia", Fibromyalgia),
    ("neuropathy", Neuropathy),
    ("scoliosis", SpinalCondition),
    ("herniated disc", SpinalCondition),
    ("disc herniation", SpinalCondition),
    ("spinal stenosis", SpinalCondition),
    ("migraine", Migraine),
];

/// Anticoagulant and antiplatelet names, generic and brand.
static BLOOD_THINNERS: &[&str] = &[
    "warfarin",
    "coumadin",
    "jantoven",
    "heparin",
    "enoxaparin",
    "lovenox",
    "apixaban",
    "eliquis",
    "rivaroxaban",
    "xarelto",
    "dabigatran",
    "pradaxa",
    "edoxaban",
    "clopidogrel",
    "plavix",
    "aspirin",
];

/// First condition whose keyword occurs in `text`, if any.
pub fn match_condition(text: &str) -> Option<ContraindicationCondition> {
    let lower = text.to_lowercase();
    CONDITION_KEYWORDS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, condition)| *condition)
}

/// Blood-thinner name contained in `medication`, if any.
pub fn match_blood_thinner(medication: &str) -> Option<&'static str> {
    let lower = medication.to_lowercase();
    BLOOD_THINNERS
        .iter()
        .find(|name| lower.contains(*name))
        .copied()
}

/// Produce unsaved alert candidates from medical-history lines and medications.
///
/// Never fails: unmatched lines contribute nothing. Repeated calls on the
/// same input yield fresh alerts each time; deduplication is the caller's job.
pub fn detect_contraindications<S: AsRef<str>>(
    conditions: &[S],
    medications: &[S],
    client_id: Uuid,
) -> Vec<ContraindicationAlert> {
    let mut alerts = Vec::new();

    for text in conditions {
        let text = text.as_ref();
        if let Some(condition) = match_condition(text) {
            tracing::debug!(
                client_id = %client_id,
                condition = condition.as_str(),
                "Contraindication matched in medical history"
            );
            alerts.push(ContraindicationAlert::new(
                client_id,
                condition,
                format!("Detected from medical history: {text}"),
            ));
        }
    }

    for medication in medications {
        let medication = medication.as_ref();
        if let Some(name) = match_blood_thinner(medication) {
            tracing::debug!(
                client_id = %client_id,
                medication = name,
                "Blood thinner matched in medication list"
            );
            alerts.push(
                ContraindicationAlert::new(
                    client_id,
                    BloodThinners,
                    format!("Detected from medication: {medication} ({name})"),
                )
                .with_severity(ContraindicationSeverity::Caution),
            );
        }
    }

    alerts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(alerts: &[ContraindicationAlert]) -> Vec<(ContraindicationCondition, ContraindicationSeverity, String)> {
        alerts
            .iter()
            .map(|a| (a.condition, a.severity, a.notes.clone()))
            .collect()
    }

    #[test]
    fn cancer_diabetes_and_aspirin_yield_three_caution_alerts() {
        let client = Uuid::new_v4();
        let alerts = detect_contraindications(
            &["Stage 2 breast cancer", "type 2 diabetes"],
            &["80mg aspirin daily"],
            client,
        );

        let conditions: Vec<_> = alerts.iter().map(|a| a.condition).collect();
        assert_eq!(conditions, vec![Cancer, Diabetes, BloodThinners]);
        assert!(alerts
            .iter()
            .all(|a| a.severity == ContraindicationSeverity::Caution));
        assert!(alerts.iter().all(|a| a.client_id == client && !a.is_resolved));
        assert!(alerts[2].notes.contains("aspirin"));
    }

    #[test]
    fn dvt_line_yields_absolute_alert() {
        let alerts = detect_contraindications(
            &["deep vein thrombosis diagnosed last week"],
            &[],
            Uuid::new_v4(),
        );
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].condition, DeepVeinThrombosis);
        assert_eq!(alerts[0].severity, ContraindicationSeverity::Absolute);
        assert_eq!(
            alerts[0].notes,
            "Detected from medical history: deep vein thrombosis diagnosed last week"
        );
    }

    #[test]
    fn dual_keyword_line_yields_first_declared_match_only() {
        // "diabet" is declared before "lupus" in the keyword table.
        let alerts = detect_contraindications(&["lupus and diabetes"], &[], Uuid::new_v4());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].condition, Diabetes);
    }

    #[test]
    fn absolute_keyword_wins_over_milder_one() {
        assert_eq!(match_condition("Arthritis, currently running a fever"), Some(Fever));
    }

    #[test]
    fn matching_ignores_case() {
        assert_eq!(match_condition("PREGNANT - 24 weeks"), Some(Pregnancy));
        assert_eq!(match_blood_thinner("ELIQUIS 5mg"), Some("eliquis"));
    }

    #[test]
    fn unmatched_and_empty_input_yield_nothing() {
        let empty: [&str; 0] = [];
        assert!(detect_contraindications(&empty, &empty, Uuid::new_v4()).is_empty());

        let alerts = detect_contraindications(
            &["seasonal allergies", "tight shoulders"],
            &["vitamin d", "ibuprofen"],
            Uuid::new_v4(),
        );
        assert!(alerts.is_empty());
    }

    #[test]
    fn detection_is_deterministic_but_not_deduplicated() {
        let client = Uuid::new_v4();
        let conditions = ["hypertension", "osteoarthritis in both knees"];
        let medications = ["warfarin 5mg"];

        let first = detect_contraindications(&conditions, &medications, client);
        let second = detect_contraindications(&conditions, &medications, client);

        assert_eq!(summary(&first), summary(&second));
        assert_eq!(first.len(), 3);
        for (a, b) in first.iter().zip(&second) {
            assert_ne!(a.id, b.id, "each run creates new alert records");
        }
    }

    #[test]
    fn one_alert_per_medication_line() {
        let alerts = detect_contraindications(
            &[] as &[&str],
            &["aspirin and plavix", "heparin flush"],
            Uuid::new_v4(),
        );
        assert_eq!(alerts.len(), 2);
        assert!(alerts.iter().all(|a| a.condition == BloodThinners));
    }

    #[test]
    fn every_keyword_is_lowercase() {
        for (keyword, _) in CONDITION_KEYWORDS {
            assert_eq!(*keyword, keyword.to_lowercase());
        }
        for name in BLOOD_THINNERS {
            assert_eq!(*name, name.to_lowercase());
        }
    }
}
