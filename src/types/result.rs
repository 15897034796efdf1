//! Outcome of a single fraud evaluation

use serde::{Deserialize, Serialize};

/// Risk assessment returned for one candidate transaction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FraudResult {
    /// A rule considers the transaction likely fraudulent
    pub is_fraudulent: bool,

    /// The transaction must not go through
    pub is_blocked: bool,

    /// The account holder has to confirm the transaction
    pub verification_required: bool,

    /// Sum of the contributions of every rule that fired
    pub risk_score: u32,
}

impl FraudResult {
    /// Result of a blacklisted location: blocked with a fixed score, nothing else set
    pub fn blocked(risk_score: u32) -> Self {
        Self {
            is_blocked: true,
            risk_score,
            ..Self::default()
        }
    }

    /// Whether any flag was raised
    pub fn is_flagged(&self) -> bool {
        self.is_fraudulent || self.is_blocked || self.verification_required
    }
}
