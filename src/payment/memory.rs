//! In-process payment processor.
//!
//! Mirrors the parts of the processor lifecycle the booking flow depends
//! on: intents start in `requires_payment_method` and only change status
//! when [`InMemoryPaymentProcessor::set_status`] is called, standing in for
//! the browser completing payment with the processor.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::PaymentProcessor;
use crate::domain::{NewPaymentIntent, PaymentIntent, PaymentIntentStatus};
use crate::error::BookingError;

/// Payment processor that keeps intents in memory.
#[derive(Debug, Default)]
pub struct InMemoryPaymentProcessor {
    intents: RwLock<HashMap<String, PaymentIntent>>,
    omit_client_secret: bool,
}

impl InMemoryPaymentProcessor {
    /// Creates an empty processor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a processor whose intents come back without a client secret.
    #[must_use]
    pub fn without_client_secrets() -> Self {
        Self {
            omit_client_secret: true,
            ..Self::default()
        }
    }

    /// Moves an intent to `status`. Returns `false` if the intent is unknown.
    pub async fn set_status(&self, id: &str, status: PaymentIntentStatus) -> bool {
        let mut intents = self.intents.write().await;
        match intents.get_mut(id) {
            Some(intent) => {
                intent.status = status;
                true
            }
            None => false,
        }
    }

    /// Stores an intent as-is, replacing any intent with the same id.
    pub async fn insert(&self, intent: PaymentIntent) {
        self.intents.write().await.insert(intent.id.clone(), intent);
    }

    /// Returns the intent with the given id, if any.
    pub async fn get(&self, id: &str) -> Option<PaymentIntent> {
        self.intents.read().await.get(id).cloned()
    }
}

#[async_trait]
impl PaymentProcessor for InMemoryPaymentProcessor {
    async fn create_intent(&self, request: &NewPaymentIntent) -> Result<PaymentIntent, BookingError> {
        let id = format!("pi_{}", uuid::Uuid::new_v4().simple());
        let client_secret = if self.omit_client_secret {
            None
        } else {
            Some(format!("{id}_secret_{}", uuid::Uuid::new_v4().simple()))
        };
        let intent = PaymentIntent {
            id: id.clone(),
            amount: request.amount,
            currency: request.currency.clone(),
            status: PaymentIntentStatus::RequiresPaymentMethod,
            client_secret,
            metadata: request.metadata.clone(),
        };
        self.intents.write().await.insert(id, intent.clone());
        Ok(intent)
    }

    async fn retrieve_intent(&self, id: &str) -> Result<Option<PaymentIntent>, BookingError> {
        Ok(self.get(id).await)
    }
}
