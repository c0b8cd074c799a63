//! Data Transfer Objects for REST request/response serialization.
//!
//! All bodies use camelCase field names. Hotels and bookings are returned
//! as their domain types directly.

pub mod booking_dto;
pub mod hotel_dto;

pub use booking_dto::*;
pub use hotel_dto::*;
