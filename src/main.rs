//! hotel-booking server entry point.
//!
//! Starts the Axum HTTP server with the hotel search and booking endpoints.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use hotel_booking::api;
use hotel_booking::app_state::AppState;
use hotel_booking::auth::TokenVerifier;
use hotel_booking::config::BookingConfig;
use hotel_booking::payment::{PaymentProcessor, StripeClient};
use hotel_booking::persistence::{HotelStore, InMemoryHotelStore, PostgresHotelStore};
use hotel_booking::service::{BookingService, HotelService};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = BookingConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting hotel-booking");

    // Build persistence layer
    let store: Arc<dyn HotelStore> = if config.persistence_enabled {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await?;
        let store = PostgresHotelStore::new(pool);
        store.migrate().await?;
        tracing::info!("connected to postgres, migrations applied");
        Arc::new(store)
    } else {
        tracing::warn!("persistence disabled, hotels are kept in memory");
        Arc::new(InMemoryHotelStore::new())
    };

    // Build payment processor
    let payments: Arc<dyn PaymentProcessor> = Arc::new(StripeClient::new(&config.stripe)?);

    // Build service layer
    let hotel_service = Arc::new(HotelService::new(Arc::clone(&store)));
    let booking_service = Arc::new(BookingService::new(
        store,
        payments,
        config.stripe.currency.clone(),
    ));

    // Build application state
    let app_state = AppState {
        hotel_service,
        booking_service,
        tokens: Arc::new(TokenVerifier::new(&config.jwt_secret)),
    };

    // Auth travels in a cookie, so the frontend origin must be explicit.
    let cors = CorsLayer::new()
        .allow_origin(config.frontend_url.parse::<HeaderValue>()?)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
