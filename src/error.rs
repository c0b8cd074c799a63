//! Service error types with HTTP status code mapping.
//!
//! [`BookingError`] is the central error type for the service. Each variant
//! maps to a specific HTTP status code and structured JSON error response.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{HotelId, PaymentIntentStatus};

/// Message returned to clients for every server-side failure.
pub const GENERIC_SERVER_MESSAGE: &str = "something went wrong";

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 2004,
///     "message": "payment intent not succeeded. Status: requires_payment_method"
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category                  | HTTP Status               |
/// |-----------|---------------------------|---------------------------|
/// | 1000–1099 | Validation                | 400 Bad Request           |
/// | 1100–1199 | Authentication            | 401 Unauthorized          |
/// | 2000–2999 | Lookup / payment state    | 400 Bad Request           |
/// | 3000–3999 | Server                    | 500 Internal Server Error |
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// No credentials, or credentials that failed verification.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Hotel with the given ID was not found.
    #[error("hotel not found: {0}")]
    HotelNotFound(HotelId),

    /// The payment processor has no intent with this ID.
    #[error("payment intent not found: {0}")]
    PaymentIntentNotFound(String),

    /// Intent metadata is bound to a different hotel or user.
    #[error("payment intent mismatch")]
    PaymentIntentMismatch,

    /// Intent exists and matches but has not been paid.
    #[error("payment intent not succeeded. Status: {0}")]
    PaymentNotSucceeded(PaymentIntentStatus),

    /// Payment processor unreachable or returned an unusable response.
    #[error("payment processor error: {0}")]
    PaymentProcessor(String),

    /// Persistence layer failure.
    #[error("persistence error: {0}")]
    PersistenceError(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl BookingError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::Unauthorized(_) => 1101,
            Self::HotelNotFound(_) => 2001,
            Self::PaymentIntentNotFound(_) => 2002,
            Self::PaymentIntentMismatch => 2003,
            Self::PaymentNotSucceeded(_) => 2004,
            Self::Internal(_) => 3000,
            Self::PersistenceError(_) => 3001,
            Self::PaymentProcessor(_) => 3002,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_)
            | Self::HotelNotFound(_)
            | Self::PaymentIntentNotFound(_)
            | Self::PaymentIntentMismatch
            | Self::PaymentNotSucceeded(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::PaymentProcessor(_) | Self::PersistenceError(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Returns `true` for failures the client cannot fix by changing the request.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl From<JsonRejection> for BookingError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for BookingError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if self.is_server_error() {
            tracing::error!(error = %self, code = self.error_code(), "request failed");
            GENERIC_SERVER_MESSAGE.to_string()
        } else {
            tracing::debug!(error = %self, code = self.error_code(), "request rejected");
            self.to_string()
        };
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message,
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_bad_request() {
        let errors = [
            BookingError::InvalidRequest("bad".to_string()),
            BookingError::HotelNotFound(HotelId::new()),
            BookingError::PaymentIntentNotFound("pi_1".to_string()),
            BookingError::PaymentIntentMismatch,
            BookingError::PaymentNotSucceeded(PaymentIntentStatus::Processing),
        ];
        for err in errors {
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST, "{err}");
            assert!(!err.is_server_error());
        }
    }

    #[test]
    fn server_errors_hide_details() {
        let err = BookingError::PersistenceError("connection reset".to_string());
        assert!(err.is_server_error());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn not_succeeded_message_names_status() {
        let err = BookingError::PaymentNotSucceeded(PaymentIntentStatus::RequiresPaymentMethod);
        assert_eq!(
            err.to_string(),
            "payment intent not succeeded. Status: requires_payment_method"
        );
    }

    #[test]
    fn json_rejection_becomes_bad_request() {
        let rejection = JsonRejection::MissingJsonContentType(Default::default());
        let err = BookingError::from(rejection);
        assert!(matches!(err, BookingError::InvalidRequest(_)));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
