//! Type-safe hotel identifier.
//!
//! [`HotelId`] is a newtype wrapper around [`uuid::Uuid`] (v4) so that hotel
//! identifiers cannot be confused with booking or user identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::BookingError;

/// Unique identifier for a hotel.
///
/// Serialized as the bare UUID string. This is also the exact form written
/// into payment intent metadata, so comparisons against metadata use
/// [`fmt::Display`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct HotelId(uuid::Uuid);

impl HotelId {
    /// Creates a new random `HotelId` (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Creates a `HotelId` from an existing [`uuid::Uuid`].
    #[must_use]
    pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner [`uuid::Uuid`].
    #[must_use]
    pub const fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl Default for HotelId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HotelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for HotelId {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(BookingError::InvalidRequest(
                "hotel id is required".to_string(),
            ));
        }
        uuid::Uuid::parse_str(trimmed)
            .map(Self)
            .map_err(|_| BookingError::InvalidRequest(format!("invalid hotel id: {trimmed}")))
    }
}

impl From<uuid::Uuid> for HotelId {
    fn from(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }
}

impl From<HotelId> for uuid::Uuid {
    fn from(id: HotelId) -> Self {
        id.0
    }
}
