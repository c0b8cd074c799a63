//! Hotel service: search, listing and lookup.

use std::sync::Arc;

use crate::domain::{
    Hotel, HotelId, PageRequest, PaginationMeta, SEARCH_PAGE_SIZE, SearchParams, SearchQuery,
};
use crate::error::BookingError;
use crate::persistence::HotelStore;

/// One page of search results with its pagination metadata.
#[derive(Debug, Clone)]
pub struct SearchPage {
    /// Hotels on this page.
    pub hotels: Vec<Hotel>,
    /// Totals for the whole result set.
    pub pagination: PaginationMeta,
}

/// Read-side operations over the hotel store.
#[derive(Debug, Clone)]
pub struct HotelService {
    store: Arc<dyn HotelStore>,
}

impl HotelService {
    /// Creates a new `HotelService`.
    #[must_use]
    pub fn new(store: Arc<dyn HotelStore>) -> Self {
        Self { store }
    }

    /// Runs a search and returns the requested page.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::PersistenceError`] on storage failure.
    pub async fn search(&self, params: &SearchParams) -> Result<SearchPage, BookingError> {
        let query = SearchQuery::build(params);
        let page = PageRequest::new(params.page, SEARCH_PAGE_SIZE);

        let result = self.store.search(&query, params.sort, page).await?;
        let pagination = PaginationMeta::new(result.total, page);

        tracing::debug!(
            total = pagination.total,
            page = pagination.page,
            sort = %params.sort,
            "hotel search"
        );
        Ok(SearchPage {
            hotels: result.hotels,
            pagination,
        })
    }

    /// Returns every hotel, most recently updated first.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::PersistenceError`] on storage failure.
    pub async fn list_hotels(&self) -> Result<Vec<Hotel>, BookingError> {
        self.store.list().await
    }

    /// Looks up a single hotel.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::HotelNotFound`] if no hotel has this id.
    pub async fn get_hotel(&self, id: HotelId) -> Result<Hotel, BookingError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(BookingError::HotelNotFound(id))
    }
}
