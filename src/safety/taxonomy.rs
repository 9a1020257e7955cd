//! Fixed clinical metadata for contraindication conditions and red-flag symptoms.
//!
//! Every attribute is an exhaustive `match`, so adding a variant to
//! `ContraindicationCondition` or `RedFlagSymptom` does not compile until each
//! attribute below is supplied for it.

use crate::models::enums::{
    ConditionCategory, ContraindicationCondition, ContraindicationSeverity, RedFlagSymptom,
    Urgency,
};

impl ContraindicationCondition {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Fever => "Fever",
            Self::ContagiousIllness => "Contagious Illness",
            Self::DeepVeinThrombosis => "Deep Vein Thrombosis",
            Self::AcuteInflammation => "Acute Inflammation",
            Self::VaricoseVeins => "Varicose Veins",
            Self::OpenWound => "Open Wound or Skin Lesion",
            Self::RecentSurgery => "Recent Surgery",
            Self::AcuteInjury => "Acute Injury",
            Self::Cancer => "Cancer",
            Self::Diabetes => "Diabetes",
            Self::HeartDisease => "Heart Disease",
            Self::Hypertension => "Hypertension",
            Self::BloodThinners => "Blood Thinners",
            Self::Osteoporosis => "Osteoporosis",
            Self::Epilepsy => "Epilepsy",
            Self::AutoimmuneDisorder => "Autoimmune Disorder",
            Self::KidneyDisease => "Kidney Disease",
            Self::Pregnancy => "Pregnancy",
            Self::Arthritis => "Arthritis",
            Self::Fibromyalgia => "Fibromyalgia",
            Self::Neuropathy => "Neuropathy",
            Self::SpinalCondition => "Spinal Condition",
            Self::Migraine => "Migraine",
        }
    }

    pub fn category(&self) -> ConditionCategory {
        match self {
            Self::Fever
            | Self::ContagiousIllness
            | Self::DeepVeinThrombosis
            | Self::AcuteInflammation => ConditionCategory::AbsoluteContraindication,
            Self::VaricoseVeins | Self::OpenWound | Self::RecentSurgery | Self::AcuteInjury => {
                ConditionCategory::LocalContraindication
            }
            Self::Cancer
            | Self::Diabetes
            | Self::HeartDisease
            | Self::Hypertension
            | Self::BloodThinners
            | Self::Osteoporosis
            | Self::Epilepsy
            | Self::AutoimmuneDisorder
            | Self::KidneyDisease => ConditionCategory::RequiresCaution,
            Self::Pregnancy
            | Self::Arthritis
            | Self::Fibromyalgia
            | Self::Neuropathy
            | Self::SpinalCondition
            | Self::Migraine => ConditionCategory::ModifiedTreatment,
        }
    }

    pub fn default_severity(&self) -> ContraindicationSeverity {
        match self {
            Self::Fever
            | Self::ContagiousIllness
            | Self::DeepVeinThrombosis
            | Self::AcuteInflammation => ContraindicationSeverity::Absolute,
            Self::VaricoseVeins | Self::OpenWound | Self::RecentSurgery | Self::AcuteInjury => {
                ContraindicationSeverity::Local
            }
            Self::Cancer
            | Self::Diabetes
            | Self::HeartDisease
            | Self::Hypertension
            | Self::BloodThinners
            | Self::Osteoporosis
            | Self::Epilepsy
            | Self::AutoimmuneDisorder
            | Self::KidneyDisease => ContraindicationSeverity::Caution,
            Self::Pregnancy
            | Self::Arthritis
            | Self::Fibromyalgia
            | Self::Neuropathy
            | Self::SpinalCondition
            | Self::Migraine => ContraindicationSeverity::Modified,
        }
    }

    pub fn requires_physician_clearance(&self) -> bool {
        match self {
            Self::DeepVeinThrombosis
            | Self::RecentSurgery
            | Self::Cancer
            | Self::HeartDisease
            | Self::Epilepsy
            | Self::KidneyDisease => true,
            Self::Fever
            | Self::ContagiousIllness
            | Self::AcuteInflammation
            | Self::VaricoseVeins
            | Self::OpenWound
            | Self::AcuteInjury
            | Self::Diabetes
            | Self::Hypertension
            | Self::BloodThinners
            | Self::Osteoporosis
            | Self::AutoimmuneDisorder
            | Self::Pregnancy
            | Self::Arthritis
            | Self::Fibromyalgia
            | Self::Neuropathy
            | Self::SpinalCondition
            | Self::Migraine => false,
        }
    }

    /// Ordered treatment recommendations, most important first.
    pub fn recommendations(&self) -> &'static [&'static str] {
        match self {
            Self::Fever => &[
                "Do not treat; reschedule until fever-free for 24 hours",
                "Advise rest and fluids",
            ],
            Self::ContagiousIllness => &[
                "Do not treat; reschedule after the contagious period",
                "Disinfect the treatment area and linens",
            ],
            Self::DeepVeinThrombosis => &[
                "Do not treat; massage may dislodge the clot",
                "Refer to physician immediately if not already under care",
                "Require written physician clearance before any future session",
            ],
            Self::AcuteInflammation => &[
                "Do not treat during the acute phase",
                "Reassess once swelling, heat and redness subside",
            ],
            Self::VaricoseVeins => &[
                "Avoid direct pressure over affected veins",
                "Use only light strokes directed toward the heart nearby",
            ],
            Self::OpenWound => &[
                "Avoid the affected area entirely",
                "Cover the area and use gloves if nearby work is needed",
            ],
            Self::RecentSurgery => &[
                "Avoid the surgical site until fully healed",
                "Obtain physician clearance before working near the site",
                "Watch for signs of clotting in the lower limbs",
            ],
            Self::AcuteInjury => &[
                "Avoid the injured area for 48 to 72 hours",
                "Work surrounding areas gently to support circulation",
            ],
            Self::Cancer => &[
                "Obtain oncologist clearance before treatment",
                "Avoid tumour sites, radiation fields and ports",
                "Use light pressure during active chemotherapy",
            ],
            Self::Diabetes => &[
                "Confirm the client has eaten and has glucose available",
                "Use lighter pressure on areas with reduced sensation",
                "Avoid recent insulin injection sites",
            ],
            Self::HeartDisease => &[
                "Obtain physician clearance",
                "Keep sessions shorter with moderate pressure",
                "Monitor for dizziness, breathlessness or chest discomfort",
            ],
            Self::Hypertension => &[
                "Confirm blood pressure is controlled",
                "Avoid vigorous techniques and position changes that raise pressure",
            ],
            Self::BloodThinners => &[
                "Use light pressure to avoid bruising",
                "Avoid deep tissue work and percussive techniques",
                "Check for unexplained bruising before each session",
            ],
            Self::Osteoporosis => &[
                "Avoid deep pressure and joint mobilisation",
                "Take care with positioning and transfers",
            ],
            Self::Epilepsy => &[
                "Ask about seizure triggers and warning signs",
                "Avoid flickering light and strong scents",
                "Keep the table low and have a seizure plan",
            ],
            Self::AutoimmuneDisorder => &[
                "Reschedule during flares",
                "Use gentle techniques and adjust to reported fatigue",
            ],
            Self::KidneyDisease => &[
                "Obtain physician clearance",
                "Avoid deep work over the lower back and fluid-shifting techniques",
            ],
            Self::Pregnancy => &[
                "Use side-lying or supported semi-reclined positioning",
                "Avoid deep pressure on the legs",
                "Confirm no high-risk complications with the client",
            ],
            Self::Arthritis => &[
                "Avoid inflamed joints during flares",
                "Use gentle range of motion within comfort",
            ],
            Self::Fibromyalgia => &[
                "Start with light pressure and adjust to feedback",
                "Keep the first sessions short",
            ],
            Self::Neuropathy => &[
                "Use light pressure on areas with reduced sensation",
                "Check in frequently about comfort",
            ],
            Self::SpinalCondition => &[
                "Support the spine with bolsters in a neutral position",
                "Avoid direct pressure on affected vertebrae",
            ],
            Self::Migraine => &[
                "Do not treat during an active migraine unless requested",
                "Use a dim, quiet room and avoid scented oils",
            ],
        }
    }
}

impl ConditionCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::AbsoluteContraindication => "Absolute Contraindication",
            Self::LocalContraindication => "Local Contraindication",
            Self::RequiresCaution => "Requires Caution",
            Self::ModifiedTreatment => "Modified Treatment",
        }
    }
}

impl ContraindicationSeverity {
    /// Whether an active alert of this severity blocks a session.
    pub fn blocks_treatment(&self) -> bool {
        matches!(self, Self::Absolute)
    }
}

impl RedFlagSymptom {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::ChestPain => "Chest Pain",
            Self::ShortnessOfBreath => "Shortness of Breath",
            Self::SuddenWeakness => "Sudden Weakness",
            Self::ThunderclapHeadache => "Sudden Severe Headache",
            Self::SaddleAnesthesia => "Saddle Numbness or Bladder/Bowel Changes",
            Self::CalfPainSwelling => "Calf Pain with Swelling",
            Self::NumbnessTingling => "New Numbness or Tingling",
            Self::HighFever => "High Fever",
            Self::UnexplainedWeightLoss => "Unexplained Weight Loss",
            Self::NightPain => "Unrelenting Night Pain",
            Self::UnexplainedBruising => "Unexplained Bruising",
            Self::ChangingMole => "Changing Mole or Skin Lesion",
        }
    }

    pub fn urgency(&self) -> Urgency {
        match self {
            Self::ChestPain
            | Self::ShortnessOfBreath
            | Self::SuddenWeakness
            | Self::ThunderclapHeadache
            | Self::SaddleAnesthesia => Urgency::Emergency,
            Self::CalfPainSwelling | Self::NumbnessTingling | Self::HighFever => Urgency::Urgent,
            Self::UnexplainedWeightLoss | Self::NightPain => Urgency::Prompt,
            Self::UnexplainedBruising | Self::ChangingMole => Urgency::Soon,
        }
    }

    pub fn recommended_action(&self) -> &'static str {
        self.urgency().recommended_action()
    }
}

impl Urgency {
    pub fn recommended_action(&self) -> &'static str {
        match self {
            Self::Emergency => "Stop the session and call emergency services",
            Self::Urgent => "Do not treat; refer to a physician the same day",
            Self::Prompt => "Refer to a physician within a few days",
            Self::Soon => "Recommend a physician review at the next opportunity",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_condition_has_recommendations() {
        for condition in ContraindicationCondition::ALL {
            assert!(
                !condition.recommendations().is_empty(),
                "{} has no recommendations",
                condition.as_str()
            );
            assert!(!condition.display_name().is_empty());
        }
    }

    #[test]
    fn absolute_category_matches_absolute_severity() {
        for condition in ContraindicationCondition::ALL {
            let is_absolute_category =
                condition.category() == ConditionCategory::AbsoluteContraindication;
            assert_eq!(
                is_absolute_category,
                condition.default_severity() == ContraindicationSeverity::Absolute,
                "{}",
                condition.as_str()
            );
        }
    }

    #[test]
    fn dvt_is_absolute_and_needs_clearance() {
        let dvt = ContraindicationCondition::DeepVeinThrombosis;
        assert_eq!(dvt.default_severity(), ContraindicationSeverity::Absolute);
        assert!(dvt.requires_physician_clearance());
    }

    #[test]
    fn only_absolute_blocks() {
        let blocking: Vec<_> = ContraindicationSeverity::ALL
            .iter()
            .filter(|s| s.blocks_treatment())
            .collect();
        assert_eq!(blocking, vec![&ContraindicationSeverity::Absolute]);
    }

    #[test]
    fn red_flag_action_follows_urgency() {
        assert_eq!(RedFlagSymptom::ChestPain.urgency(), Urgency::Emergency);
        assert_eq!(
            RedFlagSymptom::ChestPain.recommended_action(),
            Urgency::Emergency.recommended_action()
        );
        for symptom in RedFlagSymptom::ALL {
            assert!(!symptom.recommended_action().is_empty());
        }
    }
}
