//! Input validation errors

use rust_decimal::Decimal;
use thiserror::Error;

/// Rejected caller input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("transaction amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    #[error("transaction location must not be empty")]
    EmptyLocation,

    #[error("booking must include at least one passenger")]
    NoPassengers,

    #[error("ticket price must not be negative, got {0}")]
    NegativePrice(Decimal),

    #[error("booking price exceeds the representable range")]
    PriceOverflow,
}
