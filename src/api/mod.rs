//! REST API layer: route handlers, DTOs, and router composition.
//!
//! Resource endpoints are mounted under `/api`; `/health` sits at the root.
//! With the `swagger-ui` feature the OpenAPI document is served at
//! `/api-docs/openapi.json` with a browsable UI at `/swagger-ui`.

pub mod dto;
pub mod extract;
pub mod handlers;

use axum::Router;
use utoipa::OpenApi;

use crate::app_state::AppState;

/// OpenAPI document covering every REST endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "hotel-booking", description = "Hotel search and Stripe-backed bookings"),
    paths(
        handlers::hotels::search_hotels,
        handlers::hotels::list_hotels,
        handlers::hotels::get_hotel,
        handlers::bookings::create_payment_intent,
        handlers::bookings::confirm_booking,
        handlers::bookings::my_bookings,
        handlers::system::health_handler,
    ),
    components(schemas(
        crate::domain::Hotel,
        crate::domain::Booking,
        crate::domain::BookingDetails,
        crate::domain::PaginationMeta,
        crate::error::ErrorResponse,
        crate::error::ErrorBody,
        dto::SearchResponse,
        dto::PaymentIntentRequest,
        dto::PaymentIntentResponse,
        dto::ConfirmBookingRequest,
        handlers::system::HealthResponse,
    )),
    tags(
        (name = "Hotels", description = "Hotel search and lookup"),
        (name = "Bookings", description = "Payment intents and booking confirmation"),
        (name = "System", description = "Service health"),
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    let router = Router::new()
        .nest("/api", handlers::routes())
        .merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    router
}
