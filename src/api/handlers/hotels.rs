//! Hotel read handlers: search, list, get.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{SearchQueryParams, SearchResponse};
use crate::api::extract::ApiQuery;
use crate::app_state::AppState;
use crate::domain::{Hotel, HotelId, SearchParams};
use crate::error::{BookingError, ErrorResponse};

/// `GET /hotels/search`: Filtered, sorted, paginated hotel search.
///
/// # Errors
///
/// Returns [`BookingError::InvalidRequest`] for malformed parameters and
/// [`BookingError::PersistenceError`] on storage failure.
#[utoipa::path(
    get,
    path = "/api/hotels/search",
    tag = "Hotels",
    summary = "Search hotels",
    description = "Returns one page of hotels (three per page) matching every supplied filter. List parameters may repeat or use the `key[]` form.",
    params(SearchQueryParams),
    responses(
        (status = 200, description = "One page of matching hotels", body = SearchResponse),
        (status = 400, description = "Malformed query parameter", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn search_hotels(
    State(state): State<AppState>,
    ApiQuery(pairs): ApiQuery<Vec<(String, String)>>,
) -> Result<impl IntoResponse, BookingError> {
    let params = SearchParams::from_pairs(&pairs)?;
    let page = state.hotel_service.search(&params).await?;
    Ok(Json(SearchResponse::from(page)))
}

/// `GET /hotels`: All hotels, most recently updated first.
///
/// # Errors
///
/// Returns [`BookingError::PersistenceError`] on storage failure.
#[utoipa::path(
    get,
    path = "/api/hotels",
    tag = "Hotels",
    summary = "List hotels",
    responses(
        (status = 200, description = "Every hotel", body = Vec<Hotel>),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn list_hotels(State(state): State<AppState>) -> Result<impl IntoResponse, BookingError> {
    let hotels = state.hotel_service.list_hotels().await?;
    Ok(Json(hotels))
}

/// `GET /hotels/{id}`: Get a single hotel.
///
/// # Errors
///
/// Returns [`BookingError::InvalidRequest`] for a malformed id and
/// [`BookingError::HotelNotFound`] if no hotel has it.
#[utoipa::path(
    get,
    path = "/api/hotels/{id}",
    tag = "Hotels",
    summary = "Get hotel details",
    params(
        ("id" = String, Path, description = "Hotel UUID"),
    ),
    responses(
        (status = 200, description = "Hotel details", body = Hotel),
        (status = 400, description = "Invalid or unknown hotel id", body = ErrorResponse),
    )
)]
pub async fn get_hotel(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, BookingError> {
    let hotel_id: HotelId = id.parse()?;
    let hotel = state.hotel_service.get_hotel(hotel_id).await?;
    Ok(Json(hotel))
}

/// Hotel read routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/hotels", get(list_hotels))
        .route("/hotels/search", get(search_hotels))
        .route("/hotels/{id}", get(get_hotel))
}
