//! In-process hotel store.
//!
//! [`InMemoryHotelStore`] keeps hotels in insertion order behind a single
//! [`tokio::sync::RwLock`]. Searches take the read lock; booking appends
//! take the write lock, which makes each append atomic with respect to
//! every other operation.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{HotelStore, SearchResult};
use crate::domain::{Booking, Hotel, HotelId, PageRequest, SearchQuery, SortOption};
use crate::error::BookingError;

/// Hotel store backed by a `Vec` in memory. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryHotelStore {
    hotels: RwLock<Vec<Hotel>>,
}

impl InMemoryHotelStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of hotels in the store.
    pub async fn len(&self) -> usize {
        self.hotels.read().await.len()
    }

    /// Returns `true` if the store holds no hotels.
    pub async fn is_empty(&self) -> bool {
        self.hotels.read().await.is_empty()
    }
}

#[async_trait]
impl HotelStore for InMemoryHotelStore {
    async fn insert(&self, hotel: Hotel) -> Result<HotelId, BookingError> {
        let id = hotel.id;
        let mut hotels = self.hotels.write().await;
        if hotels.iter().any(|h| h.id == id) {
            return Err(BookingError::InvalidRequest(format!(
                "hotel {id} already exists"
            )));
        }
        hotels.push(hotel);
        Ok(id)
    }

    async fn find_by_id(&self, id: HotelId) -> Result<Option<Hotel>, BookingError> {
        let hotels = self.hotels.read().await;
        Ok(hotels.iter().find(|h| h.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Hotel>, BookingError> {
        let mut hotels = self.hotels.read().await.clone();
        hotels.sort_by(|a, b| b.last_updated.cmp(&a.last_updated));
        Ok(hotels)
    }

    async fn search(
        &self,
        query: &SearchQuery,
        sort: SortOption,
        page: PageRequest,
    ) -> Result<SearchResult, BookingError> {
        let hotels = self.hotels.read().await;
        let mut matched: Vec<&Hotel> = hotels.iter().filter(|h| query.matches(h)).collect();
        apply_sort(&mut matched, sort);

        let total = matched.len() as u64;
        let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(page.limit()).unwrap_or(usize::MAX);
        let hotels = matched.into_iter().skip(skip).take(take).cloned().collect();

        Ok(SearchResult { hotels, total })
    }

    async fn append_booking(&self, id: HotelId, booking: Booking) -> Result<bool, BookingError> {
        let mut hotels = self.hotels.write().await;
        let Some(hotel) = hotels.iter_mut().find(|h| h.id == id) else {
            return Ok(false);
        };
        hotel.bookings.push(booking);
        Ok(true)
    }

    async fn find_booked_by(&self, user_id: &str) -> Result<Vec<Hotel>, BookingError> {
        let hotels = self.hotels.read().await;
        Ok(hotels
            .iter()
            .filter(|h| h.bookings.iter().any(|b| b.user_id == user_id))
            .map(|h| h.with_bookings_of(user_id))
            .collect())
    }
}

/// Stable sort, so equal keys keep insertion order.
fn apply_sort(hotels: &mut [&Hotel], sort: SortOption) {
    match sort {
        SortOption::Unsorted => {}
        SortOption::StarRating => hotels.sort_by(|a, b| b.star_rating.cmp(&a.star_rating)),
        SortOption::PricePerNightAsc => {
            hotels.sort_by(|a, b| a.price_per_night.total_cmp(&b.price_per_night));
        }
        SortOption::PricePerNightDesc => {
            hotels.sort_by(|a, b| b.price_per_night.total_cmp(&a.price_per_night));
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::hotel::tests::{sample_details, sample_hotel};
    use crate::domain::{SEARCH_PAGE_SIZE, SearchParams};

    async fn seeded(prices: &[f64]) -> InMemoryHotelStore {
        let store = InMemoryHotelStore::new();
        for (i, price) in prices.iter().enumerate() {
            let stars = u8::try_from(i % 5 + 1).unwrap_or(1);
            let _ = store.insert(sample_hotel("Bristol", *price, stars)).await;
        }
        store
    }

    async fn search_page(store: &InMemoryHotelStore, sort: SortOption, page: u32) -> SearchResult {
        let query = SearchQuery::build(&SearchParams::default());
        let Ok(result) = store
            .search(&query, sort, PageRequest::new(page, SEARCH_PAGE_SIZE))
            .await
        else {
            panic!("search failed");
        };
        result
    }

    #[tokio::test]
    async fn insert_and_find() {
        let store = InMemoryHotelStore::new();
        let hotel = sample_hotel("Cardiff", 90.0, 3);
        let id = hotel.id;

        assert!(store.insert(hotel.clone()).await.is_ok());
        assert!(store.insert(hotel).await.is_err());

        let Ok(Some(found)) = store.find_by_id(id).await else {
            panic!("hotel should be found");
        };
        assert_eq!(found.id, id);
        assert!(matches!(store.find_by_id(HotelId::new()).await, Ok(None)));
    }

    #[tokio::test]
    async fn last_page_holds_remainder() {
        let store = seeded(&[10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0]).await;
        let result = search_page(&store, SortOption::Unsorted, 3).await;
        assert_eq!(result.total, 7);
        assert_eq!(result.hotels.len(), 1);
    }

    #[tokio::test]
    async fn page_past_end_is_empty_with_totals() {
        let store = seeded(&[10.0, 20.0, 30.0, 40.0]).await;
        let result = search_page(&store, SortOption::Unsorted, 9).await;
        assert_eq!(result.total, 4);
        assert!(result.hotels.is_empty());
    }

    #[tokio::test]
    async fn sorts_by_price_and_stars() {
        let store = seeded(&[50.0, 10.0, 30.0]).await;

        let asc = search_page(&store, SortOption::PricePerNightAsc, 1).await;
        let prices: Vec<f64> = asc.hotels.iter().map(|h| h.price_per_night).collect();
        assert_eq!(prices, vec![10.0, 30.0, 50.0]);

        let desc = search_page(&store, SortOption::PricePerNightDesc, 1).await;
        let prices: Vec<f64> = desc.hotels.iter().map(|h| h.price_per_night).collect();
        assert_eq!(prices, vec![50.0, 30.0, 10.0]);

        let stars = search_page(&store, SortOption::StarRating, 1).await;
        let ratings: Vec<u8> = stars.hotels.iter().map(|h| h.star_rating).collect();
        assert_eq!(ratings, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn append_booking_to_missing_hotel_reports_false() {
        let store = InMemoryHotelStore::new();
        let Ok(booking) = sample_details().into_booking("u", "pi_1", 1.0) else {
            panic!("valid details");
        };
        assert!(matches!(store.append_booking(HotelId::new(), booking).await, Ok(false)));
    }

    #[tokio::test]
    async fn concurrent_appends_all_land() {
        let store = std::sync::Arc::new(InMemoryHotelStore::new());
        let hotel = sample_hotel("Oxford", 100.0, 4);
        let id = hotel.id;
        let _ = store.insert(hotel).await;

        let mut tasks = Vec::new();
        for n in 0..16 {
            let store = std::sync::Arc::clone(&store);
            tasks.push(tokio::spawn(async move {
                let Ok(booking) = sample_details().into_booking("u", &format!("pi_{n}"), 1.0)
                else {
                    panic!("valid details");
                };
                store.append_booking(id, booking).await
            }));
        }
        for task in tasks {
            assert!(matches!(task.await, Ok(Ok(true))));
        }

        let Ok(Some(hotel)) = store.find_by_id(id).await else {
            panic!("hotel should exist");
        };
        assert_eq!(hotel.bookings.len(), 16);
    }

    #[tokio::test]
    async fn find_booked_by_returns_only_callers_bookings() {
        let store = InMemoryHotelStore::new();
        let booked = sample_hotel("Durham", 70.0, 2);
        let untouched = sample_hotel("Exeter", 70.0, 2);
        let booked_id = booked.id;
        let _ = store.insert(booked).await;
        let _ = store.insert(untouched).await;

        for user in ["me", "someone-else"] {
            let Ok(booking) = sample_details().into_booking(user, "pi_1", 70.0) else {
                panic!("valid details");
            };
            let _ = store.append_booking(booked_id, booking).await;
        }

        let Ok(hotels) = store.find_booked_by("me").await else {
            panic!("lookup failed");
        };
        assert_eq!(hotels.len(), 1);
        let Some(hotel) = hotels.first() else {
            panic!("expected one hotel");
        };
        assert_eq!(hotel.bookings.len(), 1);
        assert!(store.len().await == 2 && !store.is_empty().await);
    }
}
