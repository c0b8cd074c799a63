//! Service layer: business logic orchestration.
//!
//! [`HotelService`] serves search and lookup; [`BookingService`] runs the
//! payment intent and booking confirmation flow. Both hold their
//! collaborators behind trait objects supplied at construction.

pub mod booking_service;
pub mod hotel_service;

pub use booking_service::{BookingService, CreatedIntent};
pub use hotel_service::{HotelService, SearchPage};
