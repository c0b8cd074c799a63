//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::auth::TokenVerifier;
use crate::service::{BookingService, HotelService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Hotel search and lookup.
    pub hotel_service: Arc<HotelService>,
    /// Payment and booking flow.
    pub booking_service: Arc<BookingService>,
    /// Verifies caller auth tokens.
    pub tokens: Arc<TokenVerifier>,
}
