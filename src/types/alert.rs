//! Fraud alert data structures

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Risk level classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Determine risk level from score and thresholds
    pub fn from_score(score: u32, thresholds: &RiskLevelThresholds) -> Self {
        if score >= thresholds.critical {
            RiskLevel::Critical
        } else if score >= thresholds.high {
            RiskLevel::High
        } else if score >= thresholds.medium {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

/// Lowest score of each risk level above `Low`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskLevelThresholds {
    pub medium: u32,
    pub high: u32,
    pub critical: u32,
}

impl Default for RiskLevelThresholds {
    fn default() -> Self {
        Self {
            medium: 20,
            high: 50,
            critical: 80,
        }
    }
}

/// Alert raised when an evaluated transaction is flagged
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FraudAlert {
    /// Unique alert identifier
    pub alert_id: String,

    /// Location of the flagged transaction
    pub location: String,

    /// Amount of the flagged transaction
    pub amount: Decimal,

    /// Accumulated risk score
    pub risk_score: u32,

    /// Risk level classification
    pub risk_level: RiskLevel,

    /// Names of the rules that fired
    pub triggered_rules: Vec<String>,

    /// Alert generation timestamp
    pub timestamp: DateTime<Utc>,
}

impl FraudAlert {
    /// Create a new fraud alert
    pub fn new(location: String, amount: Decimal, risk_score: u32, risk_level: RiskLevel) -> Self {
        Self {
            alert_id: uuid::Uuid::new_v4().to_string(),
            location,
            amount,
            risk_score,
            risk_level,
            triggered_rules: Vec::new(),
            timestamp: Utc::now(),
        }
    }

    /// Add triggered rules to the alert
    pub fn with_triggered_rules(mut self, rules: Vec<String>) -> Self {
        self.triggered_rules = rules;
        self
    }
}
