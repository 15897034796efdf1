//! Type definitions shared by the rule evaluators

pub mod alert;
pub mod result;
pub mod transaction;

pub use alert::{FraudAlert, RiskLevel, RiskLevelThresholds};
pub use result::FraudResult;
pub use transaction::Transaction;
