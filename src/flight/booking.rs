//! Flight booking pricing: a base fare adjusted by demand, timing, group size,
//! reward points and cancellation policy.

use crate::config::FlightPricingConfig;
use crate::error::ValidationError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Everything needed to price one booking or cancellation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub passengers: u32,
    pub booking_time: DateTime<Utc>,
    pub available_seats: u32,
    /// Base fare per passenger
    pub current_price: Decimal,
    /// Seats already sold, drives the demand factor
    pub previous_sales: u32,
    pub is_cancellation: bool,
    pub departure_time: DateTime<Utc>,
    #[serde(default)]
    pub reward_points_available: u32,
}

impl BookingRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.passengers == 0 {
            return Err(ValidationError::NoPassengers);
        }
        if self.current_price < Decimal::ZERO {
            return Err(ValidationError::NegativePrice(self.current_price));
        }
        Ok(())
    }

    /// Whole hours left before departure, truncated
    pub fn hours_until_departure(&self) -> i64 {
        (self.departure_time - self.booking_time).num_hours()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingResult {
    pub confirmation: bool,
    pub total_price: Decimal,
    pub refund_amount: Decimal,
    pub points_used: bool,
}

/// Prices bookings with a fixed set of adjustments
#[derive(Debug, Clone, Default)]
pub struct FlightBookingSystem {
    pricing: FlightPricingConfig,
}

impl FlightBookingSystem {
    pub fn new(pricing: FlightPricingConfig) -> Self {
        Self { pricing }
    }

    /// Price a booking, or the refund of a cancellation.
    ///
    /// Requests for more passengers than available seats are declined with a
    /// zero price. Prices outside the `Decimal` range are rejected.
    pub fn book_flight(&self, request: &BookingRequest) -> Result<BookingResult, ValidationError> {
        request.validate()?;

        if request.passengers > request.available_seats {
            debug!(
                passengers = request.passengers,
                available_seats = request.available_seats,
                "Not enough seats"
            );
            return Ok(BookingResult::default());
        }

        let demand = (Decimal::from(request.previous_sales) / Decimal::ONE_HUNDRED)
            .checked_mul(self.pricing.demand_factor)
            .ok_or(ValidationError::PriceOverflow)?;
        let mut price = request
            .current_price
            .checked_mul(demand)
            .and_then(|p| p.checked_mul(Decimal::from(request.passengers)))
            .ok_or(ValidationError::PriceOverflow)?;

        let hours = request.hours_until_departure();
        if hours < self.pricing.last_minute_hours {
            debug!(hours, fee = %self.pricing.last_minute_fee, "Last minute fee");
            price = price
                .checked_add(self.pricing.last_minute_fee)
                .ok_or(ValidationError::PriceOverflow)?;
        }

        if request.passengers > self.pricing.group_size {
            price = price
                .checked_mul(self.pricing.group_multiplier)
                .ok_or(ValidationError::PriceOverflow)?;
        }

        let points_used = request.reward_points_available > 0;
        if points_used {
            let discount = Decimal::from(request.reward_points_available)
                .checked_mul(self.pricing.point_value)
                .ok_or(ValidationError::PriceOverflow)?;
            price = price
                .checked_sub(discount)
                .ok_or(ValidationError::PriceOverflow)?;
        }

        let total_price = price.max(Decimal::ZERO);

        if request.is_cancellation {
            let refund_amount = if hours >= self.pricing.full_refund_hours {
                total_price
            } else {
                total_price
                    .checked_mul(self.pricing.late_refund_rate)
                    .ok_or(ValidationError::PriceOverflow)?
            };
            debug!(hours, refund = %refund_amount, "Cancellation refund");

            return Ok(BookingResult {
                confirmation: false,
                total_price,
                refund_amount,
                points_used,
            });
        }

        Ok(BookingResult {
            confirmation: true,
            total_price,
            refund_amount: Decimal::ZERO,
            points_used,
        })
    }
}
