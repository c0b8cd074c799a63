//! Persistence layer: the hotel record store.
//!
//! [`HotelStore`] is the seam between services and storage. Two backends
//! implement it: [`postgres::PostgresHotelStore`] for deployments and
//! [`memory::InMemoryHotelStore`] for tests and persistence-disabled runs.
//! Filtering, sorting and slicing happen inside the store so that the
//! Postgres backend can push them down to SQL.

pub mod memory;
pub mod models;
pub mod postgres;

use async_trait::async_trait;

use crate::domain::{Booking, Hotel, HotelId, PageRequest, SearchQuery, SortOption};
use crate::error::BookingError;

pub use memory::InMemoryHotelStore;
pub use postgres::PostgresHotelStore;

/// One page of search results plus the total number of matches.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Hotels on the requested page.
    pub hotels: Vec<Hotel>,
    /// Number of hotels matching the query across all pages.
    pub total: u64,
}

/// Storage backend for hotels and their embedded bookings.
#[async_trait]
pub trait HotelStore: Send + Sync + std::fmt::Debug {
    /// Stores a new hotel.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::InvalidRequest`] if the id is taken, or
    /// [`BookingError::PersistenceError`] on storage failure.
    async fn insert(&self, hotel: Hotel) -> Result<HotelId, BookingError>;

    /// Looks up a hotel by id.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::PersistenceError`] on storage failure.
    async fn find_by_id(&self, id: HotelId) -> Result<Option<Hotel>, BookingError>;

    /// Returns every hotel, most recently updated first.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::PersistenceError`] on storage failure.
    async fn list(&self) -> Result<Vec<Hotel>, BookingError>;

    /// Returns one sorted page of hotels matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::PersistenceError`] on storage failure.
    async fn search(
        &self,
        query: &SearchQuery,
        sort: SortOption,
        page: PageRequest,
    ) -> Result<SearchResult, BookingError>;

    /// Atomically appends a booking to a hotel.
    ///
    /// Returns `false` if no hotel has the given id.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::PersistenceError`] on storage failure.
    async fn append_booking(&self, id: HotelId, booking: Booking) -> Result<bool, BookingError>;

    /// Returns the hotels holding at least one booking by `user_id`, each
    /// carrying only that user's bookings.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::PersistenceError`] on storage failure.
    async fn find_booked_by(&self, user_id: &str) -> Result<Vec<Hotel>, BookingError>;
}
