//! Clinical safety alerting: contraindication detection, the pre-session
//! safety gate, red-flag referrals and dashboard statistics.

pub mod detection;
pub mod engine;
pub mod gate;
pub mod referral;
pub mod statistics;
pub mod store;
pub mod taxonomy;
pub mod types;

pub use detection::detect_contraindications;
pub use engine::SafetyEngine;
pub use gate::can_proceed;
pub use referral::{ReferralAction, ReferralProtocol};
pub use statistics::{contraindication_statistics, red_flag_statistics};
pub use store::AlertStore;
pub use types::*;
