//! DTOs for hotel search and lookup endpoints.

use serde::Serialize;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Hotel, PaginationMeta};
use crate::service::SearchPage;

/// Query parameters accepted by `GET /api/hotels/search`.
///
/// Used for documentation only; the handler reads the raw pairs so that
/// list parameters may repeat.
#[derive(Debug, IntoParams)]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
#[allow(dead_code)]
pub struct SearchQueryParams {
    /// Case-insensitive match on city or country.
    destination: Option<String>,
    /// Minimum adult capacity.
    adult_count: Option<u32>,
    /// Minimum child capacity.
    child_count: Option<u32>,
    /// Facilities the hotel must all offer. Repeatable.
    facilities: Option<Vec<String>>,
    /// Hotel types to accept. Repeatable.
    types: Option<Vec<String>>,
    /// Star ratings to accept (1 to 5). Repeatable.
    stars: Option<Vec<u8>>,
    /// Maximum price per night.
    max_price: Option<f64>,
    /// One of `starRating`, `pricePerNightAsc`, `pricePerNightDesc`.
    sort_option: Option<String>,
    /// 1-based page number, three hotels per page.
    page: Option<u32>,
}

/// Response body for a hotel search.
#[derive(Debug, Serialize, ToSchema)]
pub struct SearchResponse {
    /// Hotels on the requested page.
    pub data: Vec<Hotel>,
    /// Totals for the whole result set.
    pub pagination: PaginationMeta,
}

impl From<SearchPage> for SearchResponse {
    fn from(page: SearchPage) -> Self {
        Self {
            data: page.hotels,
            pagination: page.pagination,
        }
    }
}
