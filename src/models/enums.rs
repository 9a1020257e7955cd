use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(
    /// How strongly a contraindication restricts treatment.
    /// Only `Absolute` blocks a session.
    ContraindicationSeverity {
        Absolute => "absolute",
        Local => "local",
        Caution => "caution",
        Modified => "modified",
    }
);

str_enum!(ConditionCategory {
    AbsoluteContraindication => "absolute_contraindication",
    LocalContraindication => "local_contraindication",
    RequiresCaution => "requires_caution",
    ModifiedTreatment => "modified_treatment",
});

str_enum!(
    /// Red-flag triage level. Declared least to most pressing so the derived
    /// ordering gives `Emergency > Urgent > Prompt > Soon`. The only enum here
    /// with an ordering.
    #[derive(PartialOrd, Ord)]
    Urgency {
        Soon => "soon",
        Prompt => "prompt",
        Urgent => "urgent",
        Emergency => "emergency",
    }
);

str_enum!(ContraindicationCondition {
    Fever => "fever",
    ContagiousIllness => "contagious_illness",
    DeepVeinThrombosis => "dvt",
    AcuteInflammation => "acute_inflammation",
    VaricoseVeins => "varicose_veins",
    OpenWound => "open_wound",
    RecentSurgery => "recent_surgery",
    AcuteInjury => "acute_injury",
    Cancer => "cancer",
    Diabetes => "diabetes",
    HeartDisease => "heart_disease",
    Hypertension => "hypertension",
    BloodThinners => "blood_thinners",
    Osteoporosis => "osteoporosis",
    Epilepsy => "epilepsy",
    AutoimmuneDisorder => "autoimmune_disorder",
    KidneyDisease => "kidney_disease",
    Pregnancy => "pregnancy",
    Arthritis => "arthritis",
    Fibromyalgia => "fibromyalgia",
    Neuropathy => "neuropathy",
    SpinalCondition => "spinal_condition",
    Migraine => "migraine",
});

str_enum!(RedFlagSymptom {
    ChestPain => "chest_pain",
    ShortnessOfBreath => "shortness_of_breath",
    SuddenWeakness => "sudden_weakness",
    ThunderclapHeadache => "thunderclap_headache",
    SaddleAnesthesia => "saddle_anesthesia",
    CalfPainSwelling => "calf_pain_swelling",
    NumbnessTingling => "numbness_tingling",
    HighFever => "high_fever",
    UnexplainedWeightLoss => "unexplained_weight_loss",
    NightPain => "night_pain",
    UnexplainedBruising => "unexplained_bruising",
    ChangingMole => "changing_mole",
});
