//! Payment intents as seen from this service.
//!
//! The processor owns the intent lifecycle. This module only models the
//! fields the booking flow reads and the binding between an intent and the
//! hotel and user it was created for.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::HotelId;

/// Metadata key holding the hotel an intent pays for.
pub const METADATA_HOTEL_ID: &str = "hotelId";

/// Metadata key holding the user who created the intent.
pub const METADATA_USER_ID: &str = "userId";

/// Lifecycle state of a payment intent.
///
/// Statuses this service does not know about are kept verbatim in
/// [`PaymentIntentStatus::Unknown`] so error messages name the real state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentIntentStatus {
    /// Waiting for a payment method.
    RequiresPaymentMethod,
    /// Waiting for confirmation.
    RequiresConfirmation,
    /// Waiting on customer action such as 3-D Secure.
    RequiresAction,
    /// Being processed.
    Processing,
    /// Authorized, waiting for capture.
    RequiresCapture,
    /// Canceled before completion.
    Canceled,
    /// Paid.
    Succeeded,
    /// Any other status, as reported by the processor.
    Unknown(String),
}

impl PaymentIntentStatus {
    /// Wire name of the status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::RequiresPaymentMethod => "requires_payment_method",
            Self::RequiresConfirmation => "requires_confirmation",
            Self::RequiresAction => "requires_action",
            Self::Processing => "processing",
            Self::RequiresCapture => "requires_capture",
            Self::Canceled => "canceled",
            Self::Succeeded => "succeeded",
            Self::Unknown(raw) => raw,
        }
    }
}

impl From<String> for PaymentIntentStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "requires_payment_method" => Self::RequiresPaymentMethod,
            "requires_confirmation" => Self::RequiresConfirmation,
            "requires_action" => Self::RequiresAction,
            "processing" => Self::Processing,
            "requires_capture" => Self::RequiresCapture,
            "canceled" => Self::Canceled,
            "succeeded" => Self::Succeeded,
            _ => Self::Unknown(raw),
        }
    }
}

impl From<PaymentIntentStatus> for String {
    fn from(status: PaymentIntentStatus) -> Self {
        match status {
            PaymentIntentStatus::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for PaymentIntentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A payment intent as returned by the processor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentIntent {
    /// Processor-assigned identifier.
    pub id: String,
    /// Amount in minor currency units.
    pub amount: i64,
    /// Lowercase ISO currency code.
    pub currency: String,
    /// Current lifecycle state.
    pub status: PaymentIntentStatus,
    /// Secret the browser uses to complete payment.
    #[serde(default)]
    pub client_secret: Option<String>,
    /// Key/value tags attached at creation.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl PaymentIntent {
    /// Returns `true` if the intent metadata names exactly this hotel and user.
    #[must_use]
    pub fn is_bound_to(&self, hotel_id: HotelId, user_id: &str) -> bool {
        let hotel = hotel_id.to_string();
        self.metadata.get(METADATA_HOTEL_ID) == Some(&hotel)
            && self.metadata.get(METADATA_USER_ID).map(String::as_str) == Some(user_id)
    }

    /// Amount in major currency units.
    #[must_use]
    pub fn major_amount(&self) -> f64 {
        from_minor_units(self.amount, &self.currency)
    }
}

/// Parameters for creating a payment intent.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPaymentIntent {
    /// Amount in minor currency units.
    pub amount: i64,
    /// Lowercase ISO currency code.
    pub currency: String,
    /// Tags binding the intent to a hotel and user.
    pub metadata: HashMap<String, String>,
}

impl NewPaymentIntent {
    /// Builds an intent request for a stay costing `total_cost` major units.
    #[must_use]
    pub fn for_stay(hotel_id: HotelId, user_id: &str, total_cost: f64, currency: &str) -> Self {
        let metadata = HashMap::from([
            (METADATA_HOTEL_ID.to_string(), hotel_id.to_string()),
            (METADATA_USER_ID.to_string(), user_id.to_string()),
        ]);
        Self {
            amount: to_minor_units(total_cost, currency),
            currency: currency.to_string(),
            metadata,
        }
    }
}

/// Currencies the processor charges in whole units, with no minor unit.
const ZERO_DECIMAL_CURRENCIES: &[&str] = &[
    "bif", "clp", "djf", "gnf", "jpy", "kmf", "krw", "mga", "pyg", "rwf", "ugx", "vnd", "vuv",
    "xaf", "xof", "xpf",
];

/// Number of minor units in one major unit of `currency`.
#[must_use]
pub fn minor_units_per_major(currency: &str) -> i64 {
    if ZERO_DECIMAL_CURRENCIES.contains(&currency.to_ascii_lowercase().as_str()) {
        1
    } else {
        100
    }
}

/// Converts a major-unit amount of `currency` to minor units, rounding to
/// the nearest unit.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn to_minor_units(amount: f64, currency: &str) -> i64 {
    (amount * minor_units_per_major(currency) as f64).round() as i64
}

/// Converts a minor-unit amount of `currency` back to major units.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn from_minor_units(amount: i64, currency: &str) -> f64 {
    amount as f64 / minor_units_per_major(currency) as f64
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn minor_units_round_float_noise() {
        assert_eq!(to_minor_units(600.0, "gbp"), 60_000);
        assert_eq!(to_minor_units(19.99, "gbp"), 1_999);
        assert_eq!(to_minor_units(0.1 + 0.2, "gbp"), 30);
    }

    #[test]
    fn zero_decimal_currencies_are_not_scaled() {
        assert_eq!(minor_units_per_major("JPY"), 1);
        assert_eq!(to_minor_units(12_000.0, "jpy"), 12_000);
        assert!((from_minor_units(12_000, "jpy") - 12_000.0).abs() < f64::EPSILON);

        let req = NewPaymentIntent::for_stay(HotelId::new(), "u", 12_000.0, "jpy");
        assert_eq!(req.amount, 12_000);
    }

    #[test]
    fn stay_request_binds_hotel_and_user() {
        let hotel_id = HotelId::new();
        let req = NewPaymentIntent::for_stay(hotel_id, "user-1", 600.0, "gbp");
        assert_eq!(req.amount, 60_000);
        assert_eq!(req.metadata.get(METADATA_HOTEL_ID), Some(&hotel_id.to_string()));
        assert_eq!(req.metadata.get(METADATA_USER_ID).map(String::as_str), Some("user-1"));
    }

    #[test]
    fn binding_requires_both_hotel_and_user() {
        let hotel_id = HotelId::new();
        let req = NewPaymentIntent::for_stay(hotel_id, "user-1", 10.0, "gbp");
        let intent = PaymentIntent {
            id: "pi_1".to_string(),
            amount: req.amount,
            currency: req.currency,
            status: PaymentIntentStatus::Succeeded,
            client_secret: None,
            metadata: req.metadata,
        };
        assert!(intent.is_bound_to(hotel_id, "user-1"));
        assert!(!intent.is_bound_to(hotel_id, "user-2"));
        assert!(!intent.is_bound_to(HotelId::new(), "user-1"));
    }

    #[test]
    fn deserializes_processor_payload() {
        let payload = serde_json::json!({
            "id": "pi_3Mtw",
            "object": "payment_intent",
            "amount": 60000,
            "currency": "gbp",
            "status": "requires_payment_method",
            "client_secret": "pi_3Mtw_secret_abc",
            "metadata": { "hotelId": "h", "userId": "u" }
        });
        let Ok(intent) = serde_json::from_value::<PaymentIntent>(payload) else {
            panic!("payload should deserialize");
        };
        assert_eq!(intent.status, PaymentIntentStatus::RequiresPaymentMethod);
        assert_eq!(intent.client_secret.as_deref(), Some("pi_3Mtw_secret_abc"));
        assert!((intent.major_amount() - 600.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_status_does_not_fail_parsing() {
        let Ok(status) = serde_json::from_str::<PaymentIntentStatus>("\"requires_review\"") else {
            panic!("unknown statuses should map to Unknown");
        };
        assert_eq!(status, PaymentIntentStatus::Unknown("requires_review".to_string()));
        assert_eq!(status.to_string(), "requires_review");
    }

    #[test]
    fn known_statuses_round_trip_their_wire_names() {
        let Ok(json) = serde_json::to_string(&PaymentIntentStatus::RequiresAction) else {
            panic!("status should serialize");
        };
        assert_eq!(json, "\"requires_action\"");
    }
}
