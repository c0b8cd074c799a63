//! Booking handlers: payment intent creation, confirmation, and the
//! caller's own bookings. Every route here requires an [`AuthUser`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{ConfirmBookingRequest, PaymentIntentRequest, PaymentIntentResponse};
use crate::api::extract::ApiJson;
use crate::app_state::AppState;
use crate::auth::AuthUser;
use crate::domain::{Hotel, HotelId};
use crate::error::{BookingError, ErrorResponse};

/// `POST /hotels/{id}/bookings/payment-intent`: Open a payment intent.
///
/// # Errors
///
/// Returns [`BookingError`] for a malformed body, an invalid or unknown
/// hotel, zero nights, or a processor failure.
#[utoipa::path(
    post,
    path = "/api/hotels/{id}/bookings/payment-intent",
    tag = "Bookings",
    summary = "Create a payment intent",
    description = "Prices the stay as price per night times nights and opens a payment intent bound to this hotel and the caller.",
    params(
        ("id" = String, Path, description = "Hotel UUID"),
    ),
    request_body = PaymentIntentRequest,
    responses(
        (status = 200, description = "Intent created", body = PaymentIntentResponse),
        (status = 400, description = "Invalid request or unknown hotel", body = ErrorResponse),
        (status = 401, description = "Missing or invalid credentials", body = ErrorResponse),
        (status = 500, description = "Payment processor failure", body = ErrorResponse),
    )
)]
pub async fn create_payment_intent(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<PaymentIntentRequest>,
) -> Result<impl IntoResponse, BookingError> {
    let hotel_id: HotelId = id.parse()?;
    let created = state
        .booking_service
        .create_payment_intent(hotel_id, &user.user_id, req.number_of_nights)
        .await?;
    Ok(Json(PaymentIntentResponse::from(created)))
}

/// `POST /hotels/{id}/bookings`: Confirm a paid booking.
///
/// # Errors
///
/// Returns [`BookingError`] for a malformed body, or if the intent is
/// unknown, bound to another hotel or user, not yet succeeded, or the guest
/// details are invalid.
#[utoipa::path(
    post,
    path = "/api/hotels/{id}/bookings",
    tag = "Bookings",
    summary = "Confirm a booking",
    description = "Verifies the payment intent with the processor and appends the booking to the hotel.",
    params(
        ("id" = String, Path, description = "Hotel UUID"),
    ),
    request_body = ConfirmBookingRequest,
    responses(
        (status = 200, description = "Booking recorded"),
        (status = 400, description = "Payment not verified or invalid details", body = ErrorResponse),
        (status = 401, description = "Missing or invalid credentials", body = ErrorResponse),
        (status = 500, description = "Storage or processor failure", body = ErrorResponse),
    )
)]
pub async fn confirm_booking(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<ConfirmBookingRequest>,
) -> Result<impl IntoResponse, BookingError> {
    let hotel_id: HotelId = id.parse()?;
    state
        .booking_service
        .confirm_booking(hotel_id, &user.user_id, &req.payment_intent_id, req.details)
        .await?;
    Ok(StatusCode::OK)
}

/// `GET /my-bookings`: Hotels holding the caller's bookings.
///
/// # Errors
///
/// Returns [`BookingError::PersistenceError`] on storage failure.
#[utoipa::path(
    get,
    path = "/api/my-bookings",
    tag = "Bookings",
    summary = "List my bookings",
    description = "Returns each hotel the caller has booked, carrying only the caller's bookings.",
    responses(
        (status = 200, description = "Booked hotels", body = Vec<Hotel>),
        (status = 401, description = "Missing or invalid credentials", body = ErrorResponse),
    )
)]
pub async fn my_bookings(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, BookingError> {
    let hotels = state.booking_service.bookings_for_user(&user.user_id).await?;
    Ok(Json(hotels))
}

/// Booking routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/hotels/{id}/bookings", post(confirm_booking))
        .route("/hotels/{id}/bookings/payment-intent", post(create_payment_intent))
        .route("/my-bookings", get(my_bookings))
}
