//! Stripe REST client for payment intents.
//!
//! Stripe takes form-encoded request bodies with bracketed keys for nested
//! maps (`metadata[hotelId]=...`) and authenticates with the secret key as
//! a bearer token.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

use super::PaymentProcessor;
use crate::config::StripeConfig;
use crate::domain::{NewPaymentIntent, PaymentIntent};
use crate::error::BookingError;

/// Error envelope returned by Stripe on non-2xx responses.
#[derive(Debug, Deserialize)]
struct StripeErrorEnvelope {
    error: StripeErrorBody,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Payment processor backed by the Stripe API.
#[derive(Debug, Clone)]
pub struct StripeClient {
    http: reqwest::Client,
    api_key: String,
    api_base: String,
}

impl StripeClient {
    /// Builds a client from explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Internal`] if the HTTP client cannot be built.
    pub fn new(config: &StripeConfig) -> Result<Self, BookingError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BookingError::Internal(format!("http client: {e}")))?;
        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    fn intents_url(&self) -> String {
        format!("{}/v1/payment_intents", self.api_base)
    }

    async fn read_intent(response: reqwest::Response) -> Result<PaymentIntent, BookingError> {
        let status = response.status();
        if status.is_success() {
            return response
                .json::<PaymentIntent>()
                .await
                .map_err(|e| BookingError::PaymentProcessor(format!("invalid response: {e}")));
        }
        let detail = match response.json::<StripeErrorEnvelope>().await {
            Ok(envelope) => format!(
                "{} ({})",
                envelope.error.message.unwrap_or_default(),
                envelope.error.code.unwrap_or_default()
            ),
            Err(_) => String::new(),
        };
        Err(BookingError::PaymentProcessor(format!(
            "stripe returned {status}: {detail}"
        )))
    }
}

/// Form fields for a create-intent request.
fn create_form(request: &NewPaymentIntent) -> Vec<(String, String)> {
    let mut form = vec![
        ("amount".to_string(), request.amount.to_string()),
        ("currency".to_string(), request.currency.clone()),
    ];
    let mut metadata: Vec<_> = request.metadata.iter().collect();
    metadata.sort();
    for (key, value) in metadata {
        form.push((format!("metadata[{key}]"), value.clone()));
    }
    form
}

/// Stripe ids are ASCII alphanumerics and underscores; anything else cannot
/// name an intent and must not reach the request path.
fn is_valid_intent_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[async_trait]
impl PaymentProcessor for StripeClient {
    async fn create_intent(&self, request: &NewPaymentIntent) -> Result<PaymentIntent, BookingError> {
        let response = self
            .http
            .post(self.intents_url())
            .bearer_auth(&self.api_key)
            .form(&create_form(request))
            .send()
            .await
            .map_err(|e| BookingError::PaymentProcessor(e.to_string()))?;

        let intent = Self::read_intent(response).await?;
        tracing::debug!(intent_id = %intent.id, amount = intent.amount, "stripe intent created");
        Ok(intent)
    }

    async fn retrieve_intent(&self, id: &str) -> Result<Option<PaymentIntent>, BookingError> {
        if !is_valid_intent_id(id) {
            return Ok(None);
        }
        let response = self
            .http
            .get(format!("{}/{id}", self.intents_url()))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| BookingError::PaymentProcessor(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::read_intent(response).await.map(Some)
    }
}
