//! Booking service: payment intents and booking confirmation.
//!
//! Booking is a two-step flow. [`BookingService::create_payment_intent`]
//! prices the stay and opens an intent with the processor, bound to the
//! hotel and user through intent metadata. After the browser completes
//! payment with the processor, [`BookingService::confirm_booking`]
//! re-fetches the intent and only appends a booking once the processor
//! reports it as succeeded for the same hotel and user.

use std::sync::Arc;

use crate::domain::{BookingDetails, Hotel, HotelId, NewPaymentIntent, PaymentIntentStatus};
use crate::error::BookingError;
use crate::payment::PaymentProcessor;
use crate::persistence::HotelStore;

/// A freshly created payment intent, ready to hand to the browser.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedIntent {
    /// Processor intent identifier.
    pub payment_intent_id: String,
    /// Secret the browser uses to complete payment.
    pub client_secret: String,
    /// Stay price in major currency units.
    pub total_cost: f64,
}

/// Orchestrates the payment and booking flow.
#[derive(Debug, Clone)]
pub struct BookingService {
    store: Arc<dyn HotelStore>,
    payments: Arc<dyn PaymentProcessor>,
    currency: String,
}

impl BookingService {
    /// Creates a new `BookingService` charging in `currency`.
    #[must_use]
    pub fn new(
        store: Arc<dyn HotelStore>,
        payments: Arc<dyn PaymentProcessor>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            store,
            payments,
            currency: currency.into(),
        }
    }

    /// Prices a stay and opens a payment intent for it.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::InvalidRequest`] for zero nights,
    /// [`BookingError::HotelNotFound`] for an unknown hotel, and
    /// [`BookingError::PaymentProcessor`] if the processor fails or returns
    /// an intent without a client secret.
    pub async fn create_payment_intent(
        &self,
        hotel_id: HotelId,
        user_id: &str,
        nights: u32,
    ) -> Result<CreatedIntent, BookingError> {
        if nights == 0 {
            return Err(BookingError::InvalidRequest(
                "numberOfNights must be at least 1".to_string(),
            ));
        }

        let hotel = self
            .store
            .find_by_id(hotel_id)
            .await?
            .ok_or(BookingError::HotelNotFound(hotel_id))?;

        let total_cost = hotel.total_cost(nights);
        let request = NewPaymentIntent::for_stay(hotel_id, user_id, total_cost, &self.currency);
        let intent = self.payments.create_intent(&request).await?;

        let Some(client_secret) = intent.client_secret.filter(|s| !s.is_empty()) else {
            return Err(BookingError::PaymentProcessor(format!(
                "intent {} has no client secret",
                intent.id
            )));
        };

        tracing::info!(
            %hotel_id,
            user_id,
            intent_id = %intent.id,
            amount = intent.amount,
            "payment intent created"
        );
        Ok(CreatedIntent {
            payment_intent_id: intent.id,
            client_secret,
            total_cost,
        })
    }

    /// Verifies a payment with the processor and records the booking.
    ///
    /// Confirming the same succeeded intent twice records two bookings.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::PaymentIntentNotFound`],
    /// [`BookingError::PaymentIntentMismatch`] or
    /// [`BookingError::PaymentNotSucceeded`] when verification fails (in
    /// that order), [`BookingError::InvalidRequest`] for bad guest details,
    /// and [`BookingError::HotelNotFound`] if the hotel has disappeared.
    pub async fn confirm_booking(
        &self,
        hotel_id: HotelId,
        user_id: &str,
        payment_intent_id: &str,
        details: BookingDetails,
    ) -> Result<(), BookingError> {
        let intent = self
            .payments
            .retrieve_intent(payment_intent_id)
            .await?
            .ok_or_else(|| BookingError::PaymentIntentNotFound(payment_intent_id.to_string()))?;

        if !intent.is_bound_to(hotel_id, user_id) {
            tracing::warn!(%hotel_id, user_id, intent_id = %intent.id, "payment intent mismatch");
            return Err(BookingError::PaymentIntentMismatch);
        }

        if intent.status != PaymentIntentStatus::Succeeded {
            tracing::warn!(
                %hotel_id,
                intent_id = %intent.id,
                status = %intent.status,
                "payment not succeeded"
            );
            return Err(BookingError::PaymentNotSucceeded(intent.status));
        }

        let booking = details.into_booking(user_id, &intent.id, intent.major_amount())?;
        let booking_id = booking.id;

        if !self.store.append_booking(hotel_id, booking).await? {
            return Err(BookingError::HotelNotFound(hotel_id));
        }

        tracing::info!(%hotel_id, user_id, %booking_id, intent_id = %intent.id, "booking confirmed");
        Ok(())
    }

    /// Returns the hotels the user has booked, each with only their bookings.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::PersistenceError`] on storage failure.
    pub async fn bookings_for_user(&self, user_id: &str) -> Result<Vec<Hotel>, BookingError> {
        self.store.find_booked_by(user_id).await
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::domain::PaymentIntent;
    use crate::domain::hotel::tests::{sample_details, sample_hotel};
    use crate::domain::payment::{METADATA_HOTEL_ID, METADATA_USER_ID};
    use crate::payment::InMemoryPaymentProcessor;
    use crate::persistence::InMemoryHotelStore;

    struct Fixture {
        service: BookingService,
        store: Arc<InMemoryHotelStore>,
        payments: Arc<InMemoryPaymentProcessor>,
        hotel_id: HotelId,
    }

    async fn fixture_with(payments: InMemoryPaymentProcessor) -> Fixture {
        let store = Arc::new(InMemoryHotelStore::new());
        let payments = Arc::new(payments);
        let hotel = sample_hotel("London", 200.0, 4);
        let hotel_id = hotel.id;
        let _ = store.insert(hotel).await;
        let service = BookingService::new(
            Arc::clone(&store) as Arc<dyn HotelStore>,
            Arc::clone(&payments) as Arc<dyn PaymentProcessor>,
            "gbp",
        );
        Fixture {
            service,
            store,
            payments,
            hotel_id,
        }
    }

    async fn fixture() -> Fixture {
        fixture_with(InMemoryPaymentProcessor::new()).await
    }

    async fn booking_count(f: &Fixture) -> usize {
        let Ok(Some(hotel)) = f.store.find_by_id(f.hotel_id).await else {
            panic!("hotel should exist");
        };
        hotel.bookings.len()
    }

    async fn paid_intent(f: &Fixture, user_id: &str) -> String {
        let Ok(created) = f.service.create_payment_intent(f.hotel_id, user_id, 3).await else {
            panic!("intent creation failed");
        };
        assert!(
            f.payments
                .set_status(&created.payment_intent_id, PaymentIntentStatus::Succeeded)
                .await
        );
        created.payment_intent_id
    }

    #[tokio::test]
    async fn intent_amount_is_price_times_nights_in_minor_units() {
        let f = fixture().await;
        let Ok(created) = f.service.create_payment_intent(f.hotel_id, "user-1", 3).await else {
            panic!("intent creation failed");
        };
        assert!((created.total_cost - 600.0).abs() < f64::EPSILON);

        let Some(intent) = f.payments.get(&created.payment_intent_id).await else {
            panic!("intent should be stored");
        };
        assert_eq!(intent.amount, 60_000);
        assert_eq!(intent.currency, "gbp");
        assert!(intent.is_bound_to(f.hotel_id, "user-1"));
    }

    #[tokio::test]
    async fn intent_for_unknown_hotel_is_rejected() {
        let f = fixture().await;
        assert!(matches!(
            f.service.create_payment_intent(HotelId::new(), "u", 2).await,
            Err(BookingError::HotelNotFound(_))
        ));
    }

    #[tokio::test]
    async fn zero_nights_is_rejected() {
        let f = fixture().await;
        assert!(matches!(
            f.service.create_payment_intent(f.hotel_id, "u", 0).await,
            Err(BookingError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn missing_client_secret_is_a_server_error() {
        let f = fixture_with(InMemoryPaymentProcessor::without_client_secrets()).await;
        let Err(err) = f.service.create_payment_intent(f.hotel_id, "u", 1).await else {
            panic!("intent without secret must fail");
        };
        assert!(matches!(err, BookingError::PaymentProcessor(_)));
        assert!(err.is_server_error());
    }

    #[tokio::test]
    async fn succeeded_intent_appends_booking_with_verified_cost() {
        let f = fixture().await;
        let intent_id = paid_intent(&f, "user-1").await;

        let result = f
            .service
            .confirm_booking(f.hotel_id, "user-1", &intent_id, sample_details())
            .await;
        assert!(result.is_ok());

        let Ok(Some(hotel)) = f.store.find_by_id(f.hotel_id).await else {
            panic!("hotel should exist");
        };
        let Some(booking) = hotel.bookings.first() else {
            panic!("booking should be appended");
        };
        assert_eq!(booking.user_id, "user-1");
        assert_eq!(booking.payment_intent_id, intent_id);
        assert!((booking.total_cost - 600.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn intent_for_other_hotel_is_rejected_without_append() {
        let f = fixture().await;
        let other = sample_hotel("Paris", 90.0, 3);
        let other_id = other.id;
        let _ = f.store.insert(other).await;

        // Paid for `other_id`, confirmed against `f.hotel_id`.
        let intent = PaymentIntent {
            id: "pi_other".to_string(),
            amount: 9_000,
            currency: "gbp".to_string(),
            status: PaymentIntentStatus::Succeeded,
            client_secret: None,
            metadata: HashMap::from([
                (METADATA_HOTEL_ID.to_string(), other_id.to_string()),
                (METADATA_USER_ID.to_string(), "user-1".to_string()),
            ]),
        };
        f.payments.insert(intent).await;

        let result = f
            .service
            .confirm_booking(f.hotel_id, "user-1", "pi_other", sample_details())
            .await;
        let Err(err) = result else {
            panic!("mismatched hotel must be rejected");
        };
        assert!(matches!(err, BookingError::PaymentIntentMismatch));
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
        assert_eq!(booking_count(&f).await, 0);
    }

    #[tokio::test]
    async fn intent_for_other_user_is_rejected_without_append() {
        let f = fixture().await;
        let intent_id = paid_intent(&f, "user-1").await;

        let result = f
            .service
            .confirm_booking(f.hotel_id, "intruder", &intent_id, sample_details())
            .await;
        assert!(matches!(result, Err(BookingError::PaymentIntentMismatch)));
        assert_eq!(booking_count(&f).await, 0);
    }

    #[tokio::test]
    async fn unpaid_intent_is_rejected_naming_status() {
        let f = fixture().await;
        let Ok(created) = f.service.create_payment_intent(f.hotel_id, "user-1", 3).await else {
            panic!("intent creation failed");
        };

        let result = f
            .service
            .confirm_booking(f.hotel_id, "user-1", &created.payment_intent_id, sample_details())
            .await;
        let Err(err) = result else {
            panic!("unpaid intent must be rejected");
        };
        assert!(err.to_string().contains("requires_payment_method"));
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
        assert_eq!(booking_count(&f).await, 0);
    }

    #[tokio::test]
    async fn unknown_intent_is_rejected() {
        let f = fixture().await;
        let result = f
            .service
            .confirm_booking(f.hotel_id, "user-1", "pi_nope", sample_details())
            .await;
        assert!(matches!(result, Err(BookingError::PaymentIntentNotFound(_))));
    }

    #[tokio::test]
    async fn mismatch_is_checked_before_status() {
        let f = fixture().await;
        let Ok(created) = f.service.create_payment_intent(f.hotel_id, "user-1", 1).await else {
            panic!("intent creation failed");
        };
        let result = f
            .service
            .confirm_booking(f.hotel_id, "user-2", &created.payment_intent_id, sample_details())
            .await;
        assert!(matches!(result, Err(BookingError::PaymentIntentMismatch)));
    }

    #[tokio::test]
    async fn unrecognised_status_is_named_in_rejection() {
        let f = fixture().await;
        let Ok(created) = f.service.create_payment_intent(f.hotel_id, "user-1", 1).await else {
            panic!("intent creation failed");
        };
        let status = PaymentIntentStatus::Unknown("requires_review".to_string());
        assert!(f.payments.set_status(&created.payment_intent_id, status).await);

        let Err(err) = f
            .service
            .confirm_booking(f.hotel_id, "user-1", &created.payment_intent_id, sample_details())
            .await
        else {
            panic!("unrecognised status must be rejected");
        };
        assert!(err.to_string().ends_with("Status: requires_review"));
        assert_eq!(booking_count(&f).await, 0);
    }

    #[tokio::test]
    async fn paid_intent_for_missing_hotel_is_client_error() {
        let f = fixture().await;
        let missing = HotelId::new();
        let intent = PaymentIntent {
            id: "pi_gone".to_string(),
            amount: 10_000,
            currency: "gbp".to_string(),
            status: PaymentIntentStatus::Succeeded,
            client_secret: None,
            metadata: HashMap::from([
                (METADATA_HOTEL_ID.to_string(), missing.to_string()),
                (METADATA_USER_ID.to_string(), "user-1".to_string()),
            ]),
        };
        f.payments.insert(intent).await;

        let Err(err) = f
            .service
            .confirm_booking(missing, "user-1", "pi_gone", sample_details())
            .await
        else {
            panic!("booking a missing hotel must fail");
        };
        assert!(matches!(err, BookingError::HotelNotFound(id) if id == missing));
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
        assert_eq!(booking_count(&f).await, 0);
    }

    // Known gap: confirmation is not idempotent per payment intent.
    #[tokio::test]
    async fn repeated_confirmation_appends_twice() {
        let f = fixture().await;
        let intent_id = paid_intent(&f, "user-1").await;

        for _ in 0..2 {
            let result = f
                .service
                .confirm_booking(f.hotel_id, "user-1", &intent_id, sample_details())
                .await;
            assert!(result.is_ok());
        }
        assert_eq!(booking_count(&f).await, 2);
    }

    #[tokio::test]
    async fn bookings_for_user_lists_booked_hotels() {
        let f = fixture().await;
        let intent_id = paid_intent(&f, "user-1").await;
        let _ = f
            .service
            .confirm_booking(f.hotel_id, "user-1", &intent_id, sample_details())
            .await;

        let Ok(mine) = f.service.bookings_for_user("user-1").await else {
            panic!("lookup failed");
        };
        assert_eq!(mine.len(), 1);
        let Ok(theirs) = f.service.bookings_for_user("user-2").await else {
            panic!("lookup failed");
        };
        assert!(theirs.is_empty());
    }
}
