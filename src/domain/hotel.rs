//! Hotel aggregate with its embedded, append-only booking list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::HotelId;
use crate::error::BookingError;

/// A hotel listing as stored and returned to clients.
///
/// Bookings are embedded in the hotel and only ever appended to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    /// Unique hotel identifier.
    #[serde(rename = "_id")]
    pub id: HotelId,
    /// User that owns the listing.
    pub user_id: String,
    /// Display name.
    pub name: String,
    /// City the hotel is located in.
    pub city: String,
    /// Country the hotel is located in.
    pub country: String,
    /// Free-form description.
    pub description: String,
    /// Hotel type tag (e.g. `"Budget"`, `"Boutique"`).
    #[serde(rename = "type")]
    pub hotel_type: String,
    /// Maximum number of adults.
    pub adult_count: u32,
    /// Maximum number of children.
    pub child_count: u32,
    /// Amenity tags.
    pub facilities: Vec<String>,
    /// Nightly price in major currency units.
    pub price_per_night: f64,
    /// Star rating, 1 to 5.
    pub star_rating: u8,
    /// Hosted image URLs.
    pub image_urls: Vec<String>,
    /// Last modification timestamp.
    pub last_updated: DateTime<Utc>,
    /// Bookings in the order they were confirmed.
    pub bookings: Vec<Booking>,
}

impl Hotel {
    /// Price for a stay of `nights` nights in major currency units.
    #[must_use]
    pub fn total_cost(&self, nights: u32) -> f64 {
        self.price_per_night * f64::from(nights)
    }

    /// Returns a copy of this hotel keeping only the bookings made by `user_id`.
    #[must_use]
    pub fn with_bookings_of(&self, user_id: &str) -> Self {
        let mut hotel = self.clone();
        hotel.bookings.retain(|b| b.user_id == user_id);
        hotel
    }
}

/// A confirmed, paid stay at a hotel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Unique booking identifier.
    #[serde(rename = "_id")]
    pub id: uuid::Uuid,
    /// User that paid for the booking.
    pub user_id: String,
    /// Guest first name.
    pub first_name: String,
    /// Guest last name.
    pub last_name: String,
    /// Guest contact email.
    pub email: String,
    /// Number of adults staying.
    pub adult_count: u32,
    /// Number of children staying.
    pub child_count: u32,
    /// Arrival date.
    pub check_in: DateTime<Utc>,
    /// Departure date.
    pub check_out: DateTime<Utc>,
    /// Amount charged in major currency units.
    pub total_cost: f64,
    /// Processor intent that paid for this booking.
    pub payment_intent_id: String,
    /// When the booking was recorded.
    pub created_at: DateTime<Utc>,
}

/// Guest-supplied booking fields from the confirmation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetails {
    /// Guest first name.
    pub first_name: String,
    /// Guest last name.
    pub last_name: String,
    /// Guest contact email.
    pub email: String,
    /// Number of adults staying.
    pub adult_count: u32,
    /// Number of children staying.
    #[serde(default)]
    pub child_count: u32,
    /// Arrival date.
    pub check_in: DateTime<Utc>,
    /// Departure date.
    pub check_out: DateTime<Utc>,
}

impl BookingDetails {
    /// Validates the guest fields and turns them into a [`Booking`].
    ///
    /// `total_cost` and `payment_intent_id` come from the verified payment
    /// intent, never from the request body.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::InvalidRequest`] if a name or the email is
    /// blank, no adult is staying, or check-out is not after check-in.
    pub fn into_booking(
        self,
        user_id: &str,
        payment_intent_id: &str,
        total_cost: f64,
    ) -> Result<Booking, BookingError> {
        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            return Err(BookingError::InvalidRequest(
                "guest name is required".to_string(),
            ));
        }
        if !self.email.contains('@') {
            return Err(BookingError::InvalidRequest(format!(
                "invalid email: {}",
                self.email
            )));
        }
        if self.adult_count == 0 {
            return Err(BookingError::InvalidRequest(
                "at least one adult is required".to_string(),
            ));
        }
        if self.check_out <= self.check_in {
            return Err(BookingError::InvalidRequest(
                "check-out must be after check-in".to_string(),
            ));
        }

        Ok(Booking {
            id: uuid::Uuid::new_v4(),
            user_id: user_id.to_string(),
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            adult_count: self.adult_count,
            child_count: self.child_count,
            check_in: self.check_in,
            check_out: self.check_out,
            total_cost,
            payment_intent_id: payment_intent_id.to_string(),
            created_at: Utc::now(),
        })
    }
}
