//! DTOs for the payment intent and booking endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::BookingDetails;
use crate::service::CreatedIntent;

/// Request body for `POST /api/hotels/{id}/bookings/payment-intent`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentRequest {
    /// Length of the stay.
    pub number_of_nights: u32,
}

/// Response body for a created payment intent.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    /// Processor intent identifier, sent back on confirmation.
    pub payment_intent_id: String,
    /// Secret the browser uses to complete payment.
    pub client_secret: String,
    /// Stay price in major currency units.
    pub total_cost: f64,
}

impl From<CreatedIntent> for PaymentIntentResponse {
    fn from(intent: CreatedIntent) -> Self {
        Self {
            payment_intent_id: intent.payment_intent_id,
            client_secret: intent.client_secret,
            total_cost: intent.total_cost,
        }
    }
}

/// Request body for `POST /api/hotels/{id}/bookings`.
///
/// Any `totalCost` the client sends is ignored; the booked cost is taken
/// from the verified payment intent.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmBookingRequest {
    /// Intent returned by the payment intent endpoint.
    pub payment_intent_id: String,
    /// Guest and stay details.
    #[serde(flatten)]
    pub details: BookingDetails,
}
