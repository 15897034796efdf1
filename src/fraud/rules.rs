//! Individual fraud rules and what an evaluation reports about them

use crate::types::alert::{FraudAlert, RiskLevel, RiskLevelThresholds};
use crate::types::result::FraudResult;
use crate::types::transaction::Transaction;
use serde::{Deserialize, Serialize};

/// A rule that contributed to a risk score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FraudRule {
    BlacklistedLocation,
    HighValue,
    HighFrequency,
    LocationChange,
}

impl FraudRule {
    pub fn name(&self) -> &'static str {
        match self {
            FraudRule::BlacklistedLocation => "blacklisted_location",
            FraudRule::HighValue => "high_value",
            FraudRule::HighFrequency => "high_frequency",
            FraudRule::LocationChange => "location_change",
        }
    }
}

/// Result of an evaluation together with the rules that fired, in evaluation order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assessment {
    pub result: FraudResult,
    pub triggered: Vec<FraudRule>,
}

impl Assessment {
    /// Classify the score
    pub fn risk_level(&self, thresholds: &RiskLevelThresholds) -> RiskLevel {
        RiskLevel::from_score(self.result.risk_score, thresholds)
    }

    /// Build an alert for the evaluated transaction, if anything was flagged
    pub fn to_alert(
        &self,
        transaction: &Transaction,
        thresholds: &RiskLevelThresholds,
    ) -> Option<FraudAlert> {
        if !self.result.is_flagged() {
            return None;
        }

        let alert = FraudAlert::new(
            transaction.location.clone(),
            transaction.amount,
            self.result.risk_score,
            self.risk_level(thresholds),
        )
        .with_triggered_rules(
            self.triggered
                .iter()
                .map(|rule| rule.name().to_string())
                .collect(),
        );

        Some(alert)
    }
}
