//! Fraud risk scoring

pub mod detector;
pub mod rules;

pub use detector::{evaluate, FraudDetector};
pub use rules::{Assessment, FraudRule};
