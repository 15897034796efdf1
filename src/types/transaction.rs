//! Transaction data structures for fraud risk evaluation

use crate::error::ValidationError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A payment made on an account, either the one being evaluated or part of its history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction amount (must be positive)
    pub amount: Decimal,

    /// When the transaction happened
    pub timestamp: DateTime<Utc>,

    /// Location code where the transaction originated (e.g. "BR")
    pub location: String,
}

impl Transaction {
    /// Create a validated transaction
    pub fn new(
        amount: Decimal,
        timestamp: DateTime<Utc>,
        location: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let tx = Self {
            amount,
            timestamp,
            location: location.into(),
        };
        tx.validate()?;
        Ok(tx)
    }

    /// Check invariants on a transaction built by other means (e.g. deserialized)
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount(self.amount));
        }
        if self.location.trim().is_empty() {
            return Err(ValidationError::EmptyLocation);
        }
        Ok(())
    }
}
