//! Flight booking pricing

pub mod booking;

pub use booking::{BookingRequest, BookingResult, FlightBookingSystem};
