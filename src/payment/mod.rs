//! Payment processor integration.
//!
//! [`PaymentProcessor`] is the seam between the booking flow and the
//! external processor. [`stripe::StripeClient`] talks to the Stripe REST
//! API; [`memory::InMemoryPaymentProcessor`] simulates it in-process.

pub mod memory;
pub mod stripe;

use async_trait::async_trait;

use crate::domain::{NewPaymentIntent, PaymentIntent};
use crate::error::BookingError;

pub use memory::InMemoryPaymentProcessor;
pub use stripe::StripeClient;

/// Creates and retrieves payment intents.
#[async_trait]
pub trait PaymentProcessor: Send + Sync + std::fmt::Debug {
    /// Creates a new payment intent.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::PaymentProcessor`] if the processor is
    /// unreachable or rejects the request.
    async fn create_intent(&self, request: &NewPaymentIntent) -> Result<PaymentIntent, BookingError>;

    /// Fetches the current state of an intent. `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::PaymentProcessor`] if the processor is
    /// unreachable or answers with an unexpected error.
    async fn retrieve_intent(&self, id: &str) -> Result<Option<PaymentIntent>, BookingError>;
}
