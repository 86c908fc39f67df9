//! Payment service: applies verified Stripe webhook events
//!
//! Only `checkout.session.completed` changes state. It writes the settled
//! status to the appointment and its payment in a single transaction.

use care_core::entities::{CheckoutSettlement, PaymentStatus};
use chrono::Utc;
use serde_json::Value;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::dto::WebhookResult;
use crate::webhook::{verify_signature, CheckoutSession, WebhookEvent, CHECKOUT_SESSION_COMPLETED};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

pub struct PaymentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PaymentService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Verify and apply one raw webhook delivery
    #[instrument(skip_all)]
    pub async fn handle_webhook(
        &self,
        payload: &[u8],
        signature: Option<&str>,
    ) -> ServiceResult<WebhookResult> {
        let signature =
            signature.ok_or_else(|| ServiceError::webhook("Missing Stripe-Signature header"))?;
        verify_signature(
            payload,
            signature,
            self.ctx.webhook_secret(),
            Utc::now().timestamp(),
        )
        .map_err(|e| ServiceError::webhook(e.to_string()))?;

        let event =
            WebhookEvent::from_slice(payload).map_err(|e| ServiceError::webhook(e.to_string()))?;
        self.handle_event(&event).await
    }

    /// Apply an already verified event
    #[instrument(skip_all, fields(event_type = %event.event_type, event_id = ?event.id))]
    pub async fn handle_event(&self, event: &WebhookEvent) -> ServiceResult<WebhookResult> {
        if event.event_type != CHECKOUT_SESSION_COMPLETED {
            warn!("Unhandled event type: {}", event.event_type);
            return Ok(WebhookResult::unhandled(&event.event_type));
        }

        let session = event
            .checkout_session()
            .map_err(|e| ServiceError::webhook(e.to_string()))?;
        let settlement = settlement_for(&session)?;

        if settlement.is_empty() {
            warn!("Checkout session carries no appointment or payment id");
        } else {
            self.ctx.payment_repo().settle_checkout(&settlement).await?;
        }

        info!(
            appointment_id = ?settlement.appointment_id,
            payment_id = ?settlement.payment_id,
            status = %settlement.status,
            customer_email = ?session.customer_email,
            "Checkout session processed"
        );
        Ok(WebhookResult {
            success: true,
            message: "Checkout session processed successfully".to_string(),
            appointment_id: settlement.appointment_id,
            payment_id: settlement.payment_id,
            payment_status: Some(session.payment_status),
        })
    }
}

fn metadata_id(session: &CheckoutSession, key: &str) -> ServiceResult<Option<Uuid>> {
    session
        .metadata_value(key)
        .map(|raw| {
            raw.parse()
                .map_err(|_| ServiceError::webhook(format!("Invalid {key} in metadata: {raw}")))
        })
        .transpose()
}

fn settlement_for(session: &CheckoutSession) -> ServiceResult<CheckoutSettlement> {
    Ok(CheckoutSettlement {
        appointment_id: metadata_id(session, "appointmentId")?,
        payment_id: metadata_id(session, "paymentId")?,
        status: PaymentStatus::from_checkout(&session.payment_status),
        gateway_data: session.payment_intent.clone().map(Value::String),
    })
}
