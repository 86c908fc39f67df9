//! Stripe webhook handler
//!
//! Mounted outside `/api/v1` so the body reaches the handler untouched; the
//! signature is computed over the exact bytes Stripe sent.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use care_service::dto::WebhookResult;
use care_service::webhook::SIGNATURE_HEADER;
use care_service::{PaymentService, ServiceError};
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::response::{ApiError, ApiResponse};
use crate::state::AppState;

/// Ids touched by a handled checkout event
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutOutcome {
    pub appointment_id: Option<Uuid>,
    pub payment_id: Option<Uuid>,
    pub payment_status: Option<String>,
}

/// Envelope for a webhook result. Unhandled event types answer 200 with
/// `success: false` so Stripe does not retry them.
pub fn webhook_response(result: WebhookResult) -> ApiResponse<CheckoutOutcome> {
    if !result.success {
        return ApiResponse::message(false, result.message);
    }
    ApiResponse::ok(
        result.message,
        CheckoutOutcome {
            appointment_id: result.appointment_id,
            payment_id: result.payment_id,
            payment_status: result.payment_status,
        },
    )
}

/// POST /webhook
pub async fn stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok());

    let service = PaymentService::new(state.service_context());
    match service.handle_webhook(&body, signature).await {
        Ok(result) => webhook_response(result).into_response(),
        Err(err @ ServiceError::Webhook(_)) => {
            warn!(error = %err, "Webhook rejected");
            (StatusCode::BAD_REQUEST, err.to_string()).into_response()
        }
        Err(err) => ApiError::from(err).into_response(),
    }
}
