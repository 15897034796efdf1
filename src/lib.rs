//! Business Rules Library
//!
//! Deterministic evaluators over caller-supplied inputs: fraud risk scoring of
//! a transaction, flight booking pricing, and the energy-management result type.

pub mod config;
pub mod energy;
pub mod error;
pub mod flight;
pub mod fraud;
pub mod types;

pub use config::AppConfig;
pub use energy::EnergyManagementResult;
pub use error::ValidationError;
pub use flight::{BookingRequest, BookingResult, FlightBookingSystem};
pub use fraud::{evaluate, Assessment, FraudDetector, FraudRule};
pub use types::{FraudAlert, FraudResult, RiskLevel, Transaction};
