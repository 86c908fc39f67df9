//! Webhook event envelope and the checkout session payload

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

pub const CHECKOUT_SESSION_COMPLETED: &str = "checkout.session.completed";

/// `{id, type, data: {object}}`. The object stays untyped until the event
/// type says what it is.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: EventData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventData {
    pub object: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    #[serde(default)]
    pub id: Option<String>,
    /// Nullable on the provider side; absent and `null` both mean empty
    #[serde(default)]
    pub metadata: Option<HashMap<String, String>>,
    /// `paid`, `unpaid` or `no_payment_required`
    pub payment_status: String,
    #[serde(default)]
    pub payment_intent: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
}

impl WebhookEvent {
    pub fn from_slice(payload: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(payload)
    }

    /// Interpret `data.object` as a checkout session
    pub fn checkout_session(&self) -> Result<CheckoutSession, serde_json::Error> {
        CheckoutSession::deserialize(&self.data.object)
    }
}

impl CheckoutSession {
    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata
            .as_ref()?
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}
