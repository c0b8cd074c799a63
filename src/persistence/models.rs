//! Database row types for the `hotels` table.

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use uuid::Uuid;

use crate::domain::{Booking, Hotel, HotelId};
use crate::error::BookingError;

/// Column list shared by every `SELECT` that maps to [`HotelRow`].
pub const HOTEL_COLUMNS: &str = "id, user_id, name, city, country, description, hotel_type, \
     adult_count, child_count, facilities, price_per_night, star_rating, image_urls, \
     last_updated, bookings";

/// A row from the `hotels` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct HotelRow {
    /// Primary key.
    pub id: Uuid,
    /// Owning user.
    pub user_id: String,
    /// Display name.
    pub name: String,
    /// City.
    pub city: String,
    /// Country.
    pub country: String,
    /// Description.
    pub description: String,
    /// Hotel type tag.
    pub hotel_type: String,
    /// Adult capacity.
    pub adult_count: i32,
    /// Child capacity.
    pub child_count: i32,
    /// Facility tags (`TEXT[]`).
    pub facilities: Vec<String>,
    /// Nightly price.
    pub price_per_night: f64,
    /// Star rating (`SMALLINT`).
    pub star_rating: i16,
    /// Image URLs (`TEXT[]`).
    pub image_urls: Vec<String>,
    /// Last modification timestamp.
    pub last_updated: DateTime<Utc>,
    /// Embedded bookings (`JSONB` array).
    pub bookings: Json<Vec<Booking>>,
}

impl TryFrom<HotelRow> for Hotel {
    type Error = BookingError;

    fn try_from(row: HotelRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let out_of_range = |column: &str| {
            BookingError::PersistenceError(format!("hotel {id}: {column} out of range"))
        };
        Ok(Self {
            id: HotelId::from_uuid(id),
            adult_count: u32::try_from(row.adult_count).map_err(|_| out_of_range("adult_count"))?,
            child_count: u32::try_from(row.child_count).map_err(|_| out_of_range("child_count"))?,
            star_rating: u8::try_from(row.star_rating).map_err(|_| out_of_range("star_rating"))?,
            user_id: row.user_id,
            name: row.name,
            city: row.city,
            country: row.country,
            description: row.description,
            hotel_type: row.hotel_type,
            facilities: row.facilities,
            price_per_night: row.price_per_night,
            image_urls: row.image_urls,
            last_updated: row.last_updated,
            bookings: row.bookings.0,
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn row() -> HotelRow {
        HotelRow {
            id: Uuid::new_v4(),
            user_id: "owner".to_string(),
            name: "Harbour View".to_string(),
            city: "Plymouth".to_string(),
            country: "England".to_string(),
            description: String::new(),
            hotel_type: "Family".to_string(),
            adult_count: 4,
            child_count: 2,
            facilities: vec!["Spa".to_string()],
            price_per_night: 110.0,
            star_rating: 4,
            image_urls: vec![],
            last_updated: Utc::now(),
            bookings: Json(vec![]),
        }
    }

    #[test]
    fn converts_valid_row() {
        let row = row();
        let id = row.id;
        let Ok(hotel) = Hotel::try_from(row) else {
            panic!("valid row");
        };
        assert_eq!(*hotel.id.as_uuid(), id);
        assert_eq!(hotel.adult_count, 4);
        assert_eq!(hotel.star_rating, 4);
    }

    #[test]
    fn negative_capacity_is_a_persistence_error() {
        let mut row = row();
        row.adult_count = -1;
        assert!(matches!(
            Hotel::try_from(row),
            Err(BookingError::PersistenceError(_))
        ));
    }
}
